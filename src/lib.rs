//! Trackviz draws object-tracking results onto video frames.
//!
//! The crate takes tracking annotations ([`TrackedBox`] values grouped into
//! [`TrackPath`]s), resolves the video frames they reference through a
//! [`FrameSource`], and renders bounding boxes and attribute labels onto
//! copies of those frames with the `vello_cpu` rasterizer.
//!
//! # Pipeline overview
//!
//! 1. **Load**: frame images into a [`FrameStore`], annotations via serde
//! 2. **Highlight**: [`highlight_box`] / [`highlight_boxes`] for single
//!    images, [`highlight_path`] / [`highlight_paths`] for frame sequences
//! 3. **Save**: stream the resulting `(image, frame)` pairs to disk with
//!    [`save`]
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Non-destructive**: drawing never mutates the input image; every
//!   operation returns a freshly rendered copy.
//! - **No IO in drawing**: file IO is front-loaded in
//!   [`FrameStore::load_dir`] and deferred to [`save`]; the highlight
//!   operations only touch memory.
//! - **Deterministic**: identical inputs produce identical pixels.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod render;

/// Colors, palettes, frame indices, and geometry primitives.
pub mod core;
/// Crate-wide error and result types.
pub mod error;
/// Frame lookup: the [`FrameSource`] trait and the in-memory [`FrameStore`].
pub mod frames;
/// Drawing operations for boxes, tracks, and frame sequences.
pub mod highlight;
/// The annotation data model: tracked boxes and track paths.
pub mod model;
/// Label fonts and text shaping.
pub mod text;

pub use crate::core::{Color, DEFAULT_PALETTE, DEFAULT_STROKE_WIDTH, FrameIndex, Point, Rect};
pub use crate::error::{TrackvizError, TrackvizResult};
pub use crate::frames::{FrameSource, FrameStore, decode_frame};
pub use crate::highlight::{
    PathFrames, PathsFrames, RenderedFrame, highlight_box, highlight_boxes, highlight_path,
    highlight_paths, save,
};
pub use crate::model::{TrackPath, TrackedBox};
pub use crate::text::LabelFont;
