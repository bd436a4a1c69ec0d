use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context as _;
use image::RgbImage;

use crate::core::FrameIndex;
use crate::error::{TrackvizError, TrackvizResult};

/// Source of base frame images, indexed by frame number.
///
/// Path highlighting looks frames up here but never owns the collection; a
/// missing frame is a hard lookup error, never a silent skip.
pub trait FrameSource {
    /// Return the image for `frame`.
    fn frame(&self, frame: FrameIndex) -> TrackvizResult<RgbImage>;
}

/// In-memory frame collection.
///
/// IO is front-loaded: images are read and decoded once, at load time, so
/// rendering never touches the filesystem.
#[derive(Clone, Debug, Default)]
pub struct FrameStore {
    frames: BTreeMap<FrameIndex, RgbImage>,
}

impl FrameStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) the image for `frame`.
    pub fn insert(&mut self, frame: FrameIndex, image: RgbImage) {
        self.frames.insert(frame, image);
    }

    /// Number of frames held.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the store holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame indices held, in ascending order.
    pub fn frames(&self) -> impl Iterator<Item = FrameIndex> + '_ {
        self.frames.keys().copied()
    }

    /// Load every `<frame>.png`/`.jpg`/`.jpeg` file in `root` whose stem
    /// parses as a frame number. Other directory entries are ignored.
    pub fn load_dir(root: impl AsRef<Path>) -> TrackvizResult<Self> {
        let root = root.as_ref();
        let entries = std::fs::read_dir(root)
            .map_err(|e| TrackvizError::io(format!("read frame dir '{}': {e}", root.display())))?;

        let mut store = Self::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                TrackvizError::io(format!("read frame dir '{}': {e}", root.display()))
            })?;
            let path = entry.path();
            let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
                continue;
            };
            if !matches!(ext.to_ascii_lowercase().as_str(), "png" | "jpg" | "jpeg") {
                continue;
            }
            let Some(frame) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<u64>().ok())
            else {
                continue;
            };
            let bytes = std::fs::read(&path)
                .map_err(|e| TrackvizError::io(format!("read frame '{}': {e}", path.display())))?;
            let image = image::load_from_memory(&bytes)
                .with_context(|| format!("decode frame '{}'", path.display()))?
                .to_rgb8();
            store.insert(FrameIndex(frame), image);
        }
        Ok(store)
    }
}

impl FrameSource for FrameStore {
    fn frame(&self, frame: FrameIndex) -> TrackvizResult<RgbImage> {
        self.frames
            .get(&frame)
            .cloned()
            .ok_or_else(|| TrackvizError::lookup(format!("no image for frame {}", frame.0)))
    }
}

/// Decode an encoded image (PNG, JPEG, ...) into an RGB8 frame.
pub fn decode_frame(bytes: &[u8]) -> TrackvizResult<RgbImage> {
    let decoded = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(decoded.to_rgb8())
}

#[cfg(test)]
#[path = "../tests/unit/frames.rs"]
mod tests;
