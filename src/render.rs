use std::sync::Arc;

use image::RgbImage;

use crate::core::{Color, Rect};
use crate::error::{TrackvizError, TrackvizResult};
use crate::text::ShapedLabel;

/// One-shot CPU canvas for highlighting a single image.
///
/// The canvas has exactly the pixel dimensions of the input image and its
/// coordinates are image pixel coordinates. A context is allocated per render
/// call and never reused across calls.
#[derive(Debug)]
pub(crate) struct BoxCanvas {
    ctx: vello_cpu::RenderContext,
    width: u32,
    height: u32,
}

impl BoxCanvas {
    /// Create a canvas sized to `image` with the image drawn as the
    /// full-canvas background layer.
    pub(crate) fn for_image(image: &RgbImage) -> TrackvizResult<Self> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(TrackvizError::render("canvas must be at least 1x1 pixel"));
        }
        let w: u16 = width
            .try_into()
            .map_err(|_| TrackvizError::render("canvas width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| TrackvizError::render("canvas height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap_from_rgb(image))),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));

        Ok(Self { ctx, width, height })
    }

    /// Stroke an unfilled box outline, dashed when `dashed` is set.
    pub(crate) fn stroke_box(&mut self, rect: Rect, color: Color, width: f64, dashed: bool) {
        let stroke = vello_cpu::kurbo::Stroke::new(width)
            .with_caps(vello_cpu::kurbo::Cap::Butt)
            .with_join(vello_cpu::kurbo::Join::Miter);
        let stroke = if dashed {
            stroke.with_dashes(0.0, [4.0 * width, 2.0 * width])
        } else {
            stroke
        };

        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_stroke(stroke);
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(
                color.r, color.g, color.b, 255,
            ));
        self.ctx.stroke_rect(&rect_to_cpu(rect));
    }

    /// Draw one shaped label with its layout origin at `(x, y)`.
    pub(crate) fn draw_label(
        &mut self,
        font: &vello_cpu::peniko::FontData,
        label: &ShapedLabel,
        x: f64,
        y: f64,
        color: Color,
    ) {
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((x, y)));
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(
                color.r, color.g, color.b, 255,
            ));
        self.ctx
            .glyph_run(font)
            .font_size(label.font_size)
            .fill_glyphs(label.glyphs.iter().cloned());
    }

    /// Flush all drawing and read the canvas back as a new RGB image.
    pub(crate) fn finish(mut self) -> TrackvizResult<RgbImage> {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.ctx.width(), self.ctx.height());
        self.ctx.render_to_pixmap(&mut pixmap);
        rgb_from_pixmap(&pixmap, self.width, self.height)
    }
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

/// Wrap an RGB8 image into an opaque premultiplied pixmap.
///
/// With alpha 255 the premultiplied channels equal the straight ones, so no
/// per-pixel multiply is needed.
fn pixmap_from_rgb(image: &RgbImage) -> vello_cpu::Pixmap {
    let (width, height) = image.dimensions();
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in image.pixels() {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px.0[0], px.0[1], px.0[2], 255,
        ]));
    }
    vello_cpu::Pixmap::from_parts_with_opacity(pixels, width as u16, height as u16, false)
}

/// Read rendered premultiplied RGBA8 back into a 3-channel image.
///
/// The canvas background is fully opaque, so alpha stays 255 everywhere and
/// the premultiplied channels can be taken as straight RGB.
fn rgb_from_pixmap(pixmap: &vello_cpu::Pixmap, width: u32, height: u32) -> TrackvizResult<RgbImage> {
    let bytes = pixmap.data_as_u8_slice();
    let expected = (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4);
    if bytes.len() != expected {
        return Err(TrackvizError::render("pixmap byte len mismatch"));
    }

    let mut rgb = Vec::with_capacity((width as usize) * (height as usize) * 3);
    for px in bytes.chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
    }
    RgbImage::from_raw(width, height, rgb)
        .ok_or_else(|| TrackvizError::render("rgb buffer len mismatch"))
}
