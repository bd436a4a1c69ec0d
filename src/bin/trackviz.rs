use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "trackviz", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw box annotations onto a single image as a PNG.
    Frame(FrameArgs),
    /// Render tracks over a directory of frames into a PNG sequence.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input frame image (PNG or JPEG).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Box annotations JSON (an array of boxes).
    #[arg(long)]
    boxes: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Comma-separated `#RRGGBB` colors cycled over boxes; defaults to the
    /// built-in palette.
    #[arg(long)]
    palette: Option<String>,

    /// Outline stroke width in pixels.
    #[arg(long, default_value_t = trackviz::DEFAULT_STROKE_WIDTH)]
    width: f64,

    /// TTF/OTF font for attribute labels; without it labels are skipped.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Label size in pixels.
    #[arg(long, default_value_t = 14.0)]
    font_size: f32,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Track annotations JSON (an array of paths).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory of numbered frame images (`<frame>.png` or `.jpg`).
    #[arg(long)]
    frames: PathBuf,

    /// Output directory; each rendered frame is written as `<frame>.png`.
    #[arg(long)]
    out: PathBuf,

    /// Comma-separated `#RRGGBB` colors cycled over tracks; defaults to the
    /// built-in palette.
    #[arg(long)]
    palette: Option<String>,

    /// Outline stroke width in pixels.
    #[arg(long, default_value_t = trackviz::DEFAULT_STROKE_WIDTH)]
    width: f64,

    /// TTF/OTF font for attribute labels; without it labels are skipped.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Label size in pixels.
    #[arg(long, default_value_t = 14.0)]
    font_size: f32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn read_boxes_json(path: &Path) -> anyhow::Result<Vec<trackviz::TrackedBox>> {
    let f = File::open(path).with_context(|| format!("open boxes '{}'", path.display()))?;
    let r = BufReader::new(f);
    let boxes: Vec<trackviz::TrackedBox> =
        serde_json::from_reader(r).with_context(|| "parse boxes JSON")?;
    Ok(boxes)
}

fn read_paths_json(path: &Path) -> anyhow::Result<Vec<trackviz::TrackPath>> {
    let f = File::open(path).with_context(|| format!("open tracks '{}'", path.display()))?;
    let r = BufReader::new(f);
    let paths: Vec<trackviz::TrackPath> =
        serde_json::from_reader(r).with_context(|| "parse tracks JSON")?;
    Ok(paths)
}

fn parse_palette(arg: Option<&str>) -> anyhow::Result<Vec<trackviz::Color>> {
    let Some(arg) = arg else {
        return Ok(trackviz::DEFAULT_PALETTE.to_vec());
    };
    let mut palette = Vec::new();
    for part in arg.split(',') {
        palette.push(trackviz::Color::from_hex(part)?);
    }
    Ok(palette)
}

fn load_font(path: Option<&Path>, size_px: f32) -> anyhow::Result<Option<trackviz::LabelFont>> {
    match path {
        Some(path) => Ok(Some(trackviz::LabelFont::load(path, size_px)?)),
        None => Ok(None),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read frame '{}'", args.in_path.display()))?;
    let image = trackviz::decode_frame(&bytes)?;
    let boxes = read_boxes_json(&args.boxes)?;
    let palette = parse_palette(args.palette.as_deref())?;
    let font = load_font(args.font.as_deref(), args.font_size)?;

    let rendered = trackviz::highlight_boxes(&image, &boxes, &palette, args.width, font.as_ref())?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        rendered.as_raw(),
        rendered.width(),
        rendered.height(),
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let paths = read_paths_json(&args.in_path)?;
    let store = trackviz::FrameStore::load_dir(&args.frames)?;
    let palette = parse_palette(args.palette.as_deref())?;
    let font = load_font(args.font.as_deref(), args.font_size)?;

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    let frames = trackviz::highlight_paths(&store, &paths, &palette, args.width, font.as_ref())?;
    trackviz::save(frames, |frame| args.out.join(format!("{}.png", frame.0)))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
