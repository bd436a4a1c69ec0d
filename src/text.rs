use std::path::Path;
use std::sync::Arc;

use crate::error::{TrackvizError, TrackvizResult};

/// Horizontal gap, in pixels, between a label's right edge and the box left edge,
/// and the vertical gap between stacked labels.
pub(crate) const LABEL_GAP: f64 = 3.0;

/// Offsets of the six dark copies drawn behind each label, applied before the
/// single light copy at the exact anchor.
pub(crate) const LABEL_SHADOW_OFFSETS: [(f64, f64); 6] = [
    (0.0, 1.0),
    (1.0, 1.0),
    (1.0, 0.0),
    (0.0, -1.0),
    (-1.0, -1.0),
    (-1.0, 0.0),
];

/// Left edge of a label anchored to a box starting at `left`, clamped so the
/// label never starts off-canvas.
pub(crate) fn label_anchor_x(left: f64, text_width: f64) -> f64 {
    (left - text_width - LABEL_GAP).max(0.0)
}

/// Top of the next label when the previous one started at `y` and measured
/// `height` pixels tall.
pub(crate) fn next_label_y(y: f64, height: f64) -> f64 {
    y + height + LABEL_GAP
}

/// Brush payload carried through Parley layouts.
///
/// Label colors are applied at draw time (dark copies then a light copy), so
/// the brush itself carries nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct LabelBrush;

/// Font used for attribute labels, loaded from raw TTF/OTF bytes.
#[derive(Clone, Debug)]
pub struct LabelFont {
    bytes: Arc<Vec<u8>>,
    data: vello_cpu::peniko::FontData,
    size_px: f32,
}

impl LabelFont {
    /// Build a label font from raw font bytes and a pixel size.
    ///
    /// Fails when the size is not finite and positive, or when the bytes do
    /// not register any font family.
    pub fn from_bytes(bytes: Vec<u8>, size_px: f32) -> TrackvizResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(TrackvizError::validation(
                "label size_px must be finite and > 0",
            ));
        }

        let mut probe = parley::FontContext::default();
        let families = probe
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        if families.is_empty() {
            return Err(TrackvizError::validation(
                "no font families registered from font bytes",
            ));
        }

        let data = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes.clone()), 0);
        Ok(Self {
            bytes: Arc::new(bytes),
            data,
            size_px,
        })
    }

    /// Read a font file and build a label font from it.
    pub fn load(path: impl AsRef<Path>, size_px: f32) -> TrackvizResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| TrackvizError::io(format!("read font '{}': {e}", path.display())))?;
        Self::from_bytes(bytes, size_px)
    }

    /// Configured label size in pixels.
    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    pub(crate) fn data(&self) -> &vello_cpu::peniko::FontData {
        &self.data
    }

    pub(crate) fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Glyphs and pixel extents of one laid-out label.
pub(crate) struct ShapedLabel {
    pub(crate) glyphs: Vec<vello_cpu::Glyph>,
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) font_size: f32,
}

/// Stateful helper for shaping and measuring label text with Parley.
pub(crate) struct LabelShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<LabelBrush>,
    family: String,
}

impl LabelShaper {
    /// Construct a shaper with the font registered and its family resolved.
    pub(crate) fn new(font: &LabelFont) -> TrackvizResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes().to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            TrackvizError::validation("no font families registered from font bytes")
        })?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| TrackvizError::validation("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
        })
    }

    /// Shape `text` as a single line, returning positioned glyphs and extents.
    ///
    /// A glyph missing from the font (notdef) is a render error.
    pub(crate) fn shape(&mut self, text: &str, size_px: f32) -> TrackvizResult<ShapedLabel> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(LabelBrush));

        let mut layout: parley::Layout<LabelBrush> = builder.build(text);
        layout.break_all_lines(None);

        let mut glyphs = Vec::new();
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                for g in run.glyphs() {
                    if g.id == 0 {
                        return Err(TrackvizError::render(format!(
                            "font has no glyph for a character of {text:?}"
                        )));
                    }
                    glyphs.push(vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                }
            }
        }

        Ok(ShapedLabel {
            glyphs,
            width: layout.width(),
            height: layout.height(),
            font_size: size_px,
        })
    }
}
