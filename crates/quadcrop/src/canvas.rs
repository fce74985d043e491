// Author: Dustin Pilgrim
// License: MIT
//
// tiny-skia backend for the overlay pass. `base` is the view with only the
// image on it; the loupe samples from there so it never magnifies overlay.

use tiny_skia::{
    FillRule, FilterQuality, Paint as SkPaint, Path, PathBuilder, Pattern, Pixmap, Rect,
    SpreadMode, Stroke, Transform,
};

use quadcrop_core::{ViewPoint, ViewRect};
use quadcrop_engine::{DrawSurface, Loupe, Paint};

pub struct Canvas {
    base: Pixmap,
    pixmap: Pixmap,
}

impl Canvas {
    /// Start from a finished base layer.
    pub fn new(base: Pixmap) -> Self {
        let pixmap = base.clone();
        Self { base, pixmap }
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    fn apply(&mut self, path: &Path, paint: Paint) {
        match paint {
            Paint::Fill { argb } => {
                self.pixmap
                    .fill_path(path, &sk_paint(argb), FillRule::Winding, Transform::identity(), None);
            }
            Paint::Stroke { argb, width } => {
                let stroke = Stroke {
                    width,
                    ..Default::default()
                };
                self.pixmap
                    .stroke_path(path, &sk_paint(argb), &stroke, Transform::identity(), None);
            }
        }
    }
}

fn sk_paint(argb: u32) -> SkPaint<'static> {
    let mut paint = SkPaint::default();
    let [a, r, g, b] = argb.to_be_bytes();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn polygon(points: &[ViewPoint]) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);
    for p in rest {
        pb.line_to(p.x, p.y);
    }
    pb.close();
    pb.finish()
}

impl DrawSurface for Canvas {
    fn draw_line(&mut self, from: ViewPoint, to: ViewPoint, argb: u32, width: f32) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        if let Some(path) = pb.finish() {
            self.apply(&path, Paint::Stroke { argb, width });
        }
    }

    fn draw_circle(&mut self, centre: ViewPoint, radius: f32, paint: Paint) {
        if let Some(path) = PathBuilder::from_circle(centre.x, centre.y, radius) {
            self.apply(&path, paint);
        }
    }

    fn draw_path(&mut self, points: &[ViewPoint], paint: Paint) {
        if let Some(path) = polygon(points) {
            self.apply(&path, paint);
        }
    }

    fn fill_outside(&mut self, bounds: ViewRect, hole: &[ViewPoint], argb: u32) {
        let Some(rect) = Rect::from_xywh(bounds.left, bounds.top, bounds.width, bounds.height) else {
            return;
        };

        let mut pb = PathBuilder::new();
        pb.push_rect(rect);
        if let Some((first, rest)) = hole.split_first() {
            pb.move_to(first.x, first.y);
            for p in rest {
                pb.line_to(p.x, p.y);
            }
            pb.close();
        }
        let Some(path) = pb.finish() else {
            return;
        };

        // even-odd punches the quad out of the rect whatever its winding
        self.pixmap
            .fill_path(&path, &sk_paint(argb), FillRule::EvenOdd, Transform::identity(), None);
    }

    fn draw_magnified(&mut self, loupe: &Loupe, radius: f32) {
        let Some(circle) = PathBuilder::from_circle(loupe.centre.x, loupe.centre.y, radius) else {
            return;
        };

        let (tx, ty) = loupe.translation();
        let shader = Pattern::new(
            self.base.as_ref(),
            SpreadMode::Pad,
            FilterQuality::Bilinear,
            1.0,
            Transform::from_row(loupe.zoom, 0.0, 0.0, loupe.zoom, tx, ty),
        );
        let paint = SkPaint {
            shader,
            anti_alias: true,
            ..Default::default()
        };

        self.pixmap
            .fill_path(&circle, &paint, FillRule::Winding, Transform::identity(), None);
    }
}
