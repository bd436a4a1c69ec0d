use crate::core::{FrameIndex, Rect};
use crate::error::{TrackvizError, TrackvizResult};

/// One box annotation: an axis-aligned rectangle on a single frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrackedBox {
    /// Box geometry in image pixels, with ordered coordinates
    /// (`x0` left, `y0` top, `x1` right, `y1` bottom).
    pub rect: Rect,
    /// Frame this box annotates.
    pub frame: FrameIndex,
    /// Whether the object is partially hidden; occluded boxes draw dashed.
    #[serde(default)]
    pub occluded: bool,
    /// Whether the object has left the field of view. Absent means `false`.
    /// Lost boxes are never drawn, but path iterators still yield their frames.
    #[serde(default)]
    pub lost: bool,
    /// Attribute labels rendered beside the box, top to bottom.
    #[serde(default)]
    pub attributes: Vec<String>,
}

impl TrackedBox {
    /// Build a visible, unoccluded box with no attributes.
    ///
    /// Fails when the rectangle has non-finite or unordered coordinates.
    pub fn new(rect: Rect, frame: FrameIndex) -> TrackvizResult<Self> {
        let finite =
            rect.x0.is_finite() && rect.y0.is_finite() && rect.x1.is_finite() && rect.y1.is_finite();
        if !finite {
            return Err(TrackvizError::validation(
                "box coordinates must be finite",
            ));
        }
        if rect.x0 > rect.x1 || rect.y0 > rect.y1 {
            return Err(TrackvizError::validation(
                "box coordinates must be ordered (x0 <= x1, y0 <= y1)",
            ));
        }
        Ok(Self {
            rect,
            frame,
            occluded: false,
            lost: false,
            attributes: Vec::new(),
        })
    }
}

/// Ordered sequence of boxes describing one tracked object across frames.
///
/// The sequence order is preserved during multi-path accumulation; it does
/// not need to be sorted by frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrackPath {
    /// Boxes in annotation order.
    pub boxes: Vec<TrackedBox>,
}

impl TrackPath {
    /// Build a path from boxes in annotation order.
    pub fn new(boxes: Vec<TrackedBox>) -> Self {
        Self { boxes }
    }
}

#[cfg(test)]
#[path = "../tests/unit/model.rs"]
mod tests;
