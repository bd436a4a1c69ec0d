use trackviz::{DEFAULT_PALETTE, FrameIndex, FrameStore, TrackPath, highlight_paths, save};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let s = include_str!("../tests/data/tracks.json");
    let paths: Vec<TrackPath> = serde_json::from_str(s)?;

    let mut frames = FrameStore::new();
    for f in [0u64, 1, 2] {
        frames.insert(
            FrameIndex(f),
            image::RgbImage::from_pixel(128, 72, image::Rgb([24, 24, 24])),
        );
    }

    let out_dir = std::path::Path::new("target").join("render_tracks");
    std::fs::create_dir_all(&out_dir)?;

    let rendered = highlight_paths(&frames, &paths, &DEFAULT_PALETTE, 1.0, None)?;
    save(rendered, |frame| out_dir.join(format!("{}.png", frame.0)))?;

    eprintln!("wrote {}", out_dir.display());
    Ok(())
}
