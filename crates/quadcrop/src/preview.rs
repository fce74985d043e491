// Author: Dustin Pilgrim
// License: MIT

use std::path::Path;

use eventline::debug;
use image::DynamicImage;
use tiny_skia::{Color, FilterQuality, Pixmap, PixmapPaint, Rect, Transform};

use quadcrop_core::{ImageSize, ViewportState};
use quadcrop_engine::render::{OverlayFrame, draw_overlay};
use quadcrop_engine::CropEngine;

use crate::canvas::Canvas;
use crate::paths::ensure_parent_dir;

fn backdrop() -> Color {
    Color::from_rgba8(0x20, 0x20, 0x20, 0xFF)
}

fn blank_image() -> Color {
    Color::from_rgba8(0x80, 0x80, 0x80, 0xFF)
}

pub fn load_image(path: &Path) -> Result<DynamicImage, String> {
    image::open(path).map_err(|e| format!("failed to open image {}: {e}", path.display()))
}

pub fn image_size(img: &DynamicImage) -> Result<ImageSize, String> {
    let w = i32::try_from(img.width()).map_err(|_| "image too wide".to_string())?;
    let h = i32::try_from(img.height()).map_err(|_| "image too tall".to_string())?;
    Ok(ImageSize::new(w, h))
}

/// Straight RGBA into tiny-skia's premultiplied layout.
pub fn to_pixmap(img: &DynamicImage) -> Result<Pixmap, String> {
    let rgba = img.to_rgba8();
    let mut pixmap =
        Pixmap::new(rgba.width(), rgba.height()).ok_or("tiny-skia pixmap alloc failed")?;

    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgba.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = tiny_skia::ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}

/// The view as the host would show it before any overlay: backdrop plus
/// the image scaled into the viewport (or a flat stand-in without one).
pub fn base_layer(
    view: ImageSize,
    viewport: &ViewportState,
    image: Option<&Pixmap>,
) -> Result<Pixmap, String> {
    let w = u32::try_from(view.width).map_err(|_| "bad view width".to_string())?;
    let h = u32::try_from(view.height).map_err(|_| "bad view height".to_string())?;
    let mut base = Pixmap::new(w, h).ok_or("tiny-skia pixmap alloc failed")?;
    base.fill(backdrop());

    match image {
        Some(img) => {
            let transform = Transform::from_row(
                viewport.scale_x,
                0.0,
                0.0,
                viewport.scale_y,
                viewport.left as f32,
                viewport.top as f32,
            );
            let paint = PixmapPaint {
                quality: FilterQuality::Bilinear,
                ..PixmapPaint::default()
            };
            base.draw_pixmap(0, 0, img.as_ref(), &paint, transform, None);
        }
        None => {
            let r = viewport.rect();
            if let Some(rect) = Rect::from_xywh(r.left, r.top, r.width, r.height) {
                let mut paint = tiny_skia::Paint::default();
                paint.set_color(blank_image());
                base.fill_rect(rect, &paint, Transform::identity(), None);
            }
        }
    }

    Ok(base)
}

/// Draw the engine's current state over `base` and write it out as PNG.
pub fn render_png(engine: &mut CropEngine, base: Pixmap, out: &Path) -> Result<(), String> {
    let frame = OverlayFrame::capture(engine).ok_or("nothing to render: no image or layout")?;

    let mut canvas = Canvas::new(base);
    draw_overlay(&mut canvas, &frame);

    ensure_parent_dir(out).map_err(|e| format!("create output dir: {e}"))?;
    canvas
        .pixmap()
        .save_png(out)
        .map_err(|e| format!("failed to write {}: {e}", out.display()))?;

    debug!("rendered overlay to {}", out.display());
    Ok(())
}
