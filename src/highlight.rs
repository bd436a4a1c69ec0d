//! Drawing operations that overlay tracked boxes on video frames.
//!
//! Every operation here is non-destructive: the input image is left
//! untouched and a freshly rendered copy is returned. Sequencing
//! operations (`highlight_path`, `highlight_paths`) produce iterators of
//! `(image, frame)` pairs that can be fed straight into [`save`].

use std::collections::{BTreeMap, btree_map};
use std::path::Path;

use image::RgbImage;

use crate::core::{Color, FrameIndex, Rect};
use crate::error::{TrackvizError, TrackvizResult};
use crate::frames::FrameSource;
use crate::model::{TrackPath, TrackedBox};
use crate::render::BoxCanvas;
use crate::text::{LABEL_SHADOW_OFFSETS, LabelFont, LabelShaper, label_anchor_x, next_label_y};

/// A rendered frame paired with the frame index it belongs to.
pub type RenderedFrame = (RgbImage, FrameIndex);

const LABEL_SHADOW: Color = Color::rgb(0, 0, 0);
const LABEL_FILL: Color = Color::rgb(255, 255, 255);

fn check_stroke_width(width: f64) -> TrackvizResult<()> {
    if !width.is_finite() || width <= 0.0 {
        return Err(TrackvizError::validation(format!(
            "stroke width must be finite and positive, got {width}"
        )));
    }
    Ok(())
}

fn check_palette(palette: &[Color]) -> TrackvizResult<()> {
    if palette.is_empty() {
        return Err(TrackvizError::validation("palette must not be empty"));
    }
    Ok(())
}

fn check_rect(rect: Rect) -> TrackvizResult<()> {
    if !(rect.x0.is_finite() && rect.y0.is_finite() && rect.x1.is_finite() && rect.y1.is_finite()) {
        return Err(TrackvizError::render(format!(
            "box rect must have finite coordinates, got {rect:?}"
        )));
    }
    if rect.x0 > rect.x1 || rect.y0 > rect.y1 {
        return Err(TrackvizError::render(format!(
            "box rect must be ordered (x0 <= x1, y0 <= y1), got {rect:?}"
        )));
    }
    Ok(())
}

/// Renders a single tracked box onto a copy of `image`.
///
/// The outline is stroked `width` pixels thick, shifted left and up by
/// half the stroke width so that a box flush against the image edge stays
/// visible. Occluded boxes get a dashed outline, everything else solid.
/// When `font` is given, each entry of [`TrackedBox::attributes`] is
/// drawn to the left of the box, stacked top to bottom, white over a
/// one-pixel black shadow ring.
///
/// The `lost` flag is ignored here; filtering lost boxes is the caller's
/// concern.
#[tracing::instrument(skip(image, tracked, font), fields(frame = tracked.frame.0, occluded = tracked.occluded))]
pub fn highlight_box(
    image: &RgbImage,
    tracked: &TrackedBox,
    color: Color,
    width: f64,
    font: Option<&LabelFont>,
) -> TrackvizResult<RgbImage> {
    check_stroke_width(width)?;
    check_rect(tracked.rect)?;

    let mut canvas = BoxCanvas::for_image(image)?;
    let rect = tracked.rect;
    let outline = Rect::new(
        rect.x0 - width * 0.5,
        rect.y0 - width * 0.5,
        rect.x1 - width * 0.5,
        rect.y1 - width * 0.5,
    );
    canvas.stroke_box(outline, color, width, tracked.occluded);

    if let Some(font) = font {
        if !tracked.attributes.is_empty() {
            let mut shaper = LabelShaper::new(font)?;
            let mut ypos = rect.y0;
            for attribute in &tracked.attributes {
                let label = shaper.shape(attribute, font.size_px())?;
                let xpos = label_anchor_x(rect.x0, f64::from(label.width));
                for (dx, dy) in LABEL_SHADOW_OFFSETS {
                    canvas.draw_label(font.data(), &label, xpos + dx, ypos + dy, LABEL_SHADOW);
                }
                canvas.draw_label(font.data(), &label, xpos, ypos, LABEL_FILL);
                ypos = next_label_y(ypos, f64::from(label.height));
            }
        }
    }

    canvas.finish()
}

/// Renders a set of boxes onto a copy of `image`, one pass per box.
///
/// Colors are taken from `palette` in box order, cycling when there are
/// more boxes than palette entries. Boxes are drawn unconditionally,
/// including lost ones; use the path operations when lost boxes should
/// be skipped.
#[tracing::instrument(skip(image, boxes, palette, font), fields(boxes = boxes.len()))]
pub fn highlight_boxes(
    image: &RgbImage,
    boxes: &[TrackedBox],
    palette: &[Color],
    width: f64,
    font: Option<&LabelFont>,
) -> TrackvizResult<RgbImage> {
    check_palette(palette)?;

    let mut rendered = image.clone();
    for (i, tracked) in boxes.iter().enumerate() {
        rendered = highlight_box(&rendered, tracked, palette[i % palette.len()], width, font)?;
    }
    Ok(rendered)
}

/// Renders one track over its source frames, yielding a frame image per
/// box in path order.
///
/// Frames are resolved from `frames` lazily, one per call to `next`.
/// Lost boxes are not drawn but their frame is still yielded, so the
/// output stays aligned with the track. The iterator ends after the
/// first error.
#[tracing::instrument(skip(frames, path, font), fields(boxes = path.boxes.len()))]
pub fn highlight_path<'a>(
    frames: &'a dyn FrameSource,
    path: &'a TrackPath,
    color: Color,
    width: f64,
    font: Option<&'a LabelFont>,
) -> PathFrames<'a> {
    PathFrames {
        frames,
        boxes: path.boxes.iter(),
        color,
        width,
        font,
        done: false,
    }
}

/// Iterator returned by [`highlight_path`].
pub struct PathFrames<'a> {
    frames: &'a dyn FrameSource,
    boxes: std::slice::Iter<'a, TrackedBox>,
    color: Color,
    width: f64,
    font: Option<&'a LabelFont>,
    done: bool,
}

impl Iterator for PathFrames<'_> {
    type Item = TrackvizResult<RenderedFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let tracked = self.boxes.next()?;
        let image = match self.frames.frame(tracked.frame) {
            Ok(image) => image,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };
        let image = if tracked.lost {
            image
        } else {
            match highlight_box(&image, tracked, self.color, self.width, self.font) {
                Ok(image) => image,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        };
        Some(Ok((image, tracked.frame)))
    }
}

/// Renders several tracks over a shared frame sequence, yielding each
/// distinct frame exactly once in ascending order.
///
/// Tracks are assigned colors from `palette` in order, cycling. All
/// boxes are grouped by frame up front; within a frame they are drawn
/// in the order the tracks listed them. Lost boxes are skipped when
/// drawing but still pin their frame into the output. Frame images are
/// resolved lazily during iteration, and the iterator ends after the
/// first error.
#[tracing::instrument(skip(frames, paths, palette, font), fields(paths = paths.len()))]
pub fn highlight_paths<'a>(
    frames: &'a dyn FrameSource,
    paths: &'a [TrackPath],
    palette: &[Color],
    width: f64,
    font: Option<&'a LabelFont>,
) -> TrackvizResult<PathsFrames<'a>> {
    check_palette(palette)?;

    let mut by_frame: BTreeMap<FrameIndex, Vec<(&'a TrackedBox, Color)>> = BTreeMap::new();
    for (i, path) in paths.iter().enumerate() {
        let color = palette[i % palette.len()];
        for tracked in &path.boxes {
            by_frame.entry(tracked.frame).or_default().push((tracked, color));
        }
    }

    Ok(PathsFrames {
        frames,
        entries: by_frame.into_iter(),
        width,
        font,
        done: false,
    })
}

/// Iterator returned by [`highlight_paths`].
pub struct PathsFrames<'a> {
    frames: &'a dyn FrameSource,
    entries: btree_map::IntoIter<FrameIndex, Vec<(&'a TrackedBox, Color)>>,
    width: f64,
    font: Option<&'a LabelFont>,
    done: bool,
}

impl std::fmt::Debug for PathsFrames<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathsFrames")
            .field("width", &self.width)
            .field("font", &self.font)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl Iterator for PathsFrames<'_> {
    type Item = TrackvizResult<RenderedFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let (frame, entries) = self.entries.next()?;
        let mut image = match self.frames.frame(frame) {
            Ok(image) => image,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };
        for (tracked, color) in entries {
            if tracked.lost {
                continue;
            }
            image = match highlight_box(&image, tracked, color, self.width, self.font) {
                Ok(image) => image,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };
        }
        Some(Ok((image, frame)))
    }
}

/// Writes a sequence of rendered frames to disk.
///
/// `output` maps each frame index to a destination path and is called
/// exactly once per yielded frame, in iteration order. The image format
/// is picked from the path extension. The first failed item or write
/// aborts the run; frames already written stay on disk.
#[tracing::instrument(skip(items, output))]
pub fn save<I, F, P>(items: I, mut output: F) -> TrackvizResult<()>
where
    I: IntoIterator<Item = TrackvizResult<RenderedFrame>>,
    F: FnMut(FrameIndex) -> P,
    P: AsRef<Path>,
{
    for item in items {
        let (image, frame) = item?;
        let path = output(frame);
        let path = path.as_ref();
        image.save(path).map_err(|e| {
            TrackvizError::io(format!(
                "write frame {} to '{}': {e}",
                frame.0,
                path.display()
            ))
        })?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/highlight.rs"]
mod tests;
