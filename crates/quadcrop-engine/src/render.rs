// Author: Dustin Pilgrim
// License: MIT
//
// Overlay pass: mask, guide lines, outline, handles, loupe. Pixels are the
// host's business; this only decides what goes where.

use quadcrop_core::{ViewPoint, ViewportState};

use crate::config::OverlayStyle;
use crate::engine::CropEngine;
use crate::magnifier::{Loupe, LoupeMarker};
use crate::surface::{DrawSurface, Paint, with_alpha};

const MASK_ARGB: u32 = 0xFF00_0000;
const LOUPE_BG_ARGB: u32 = 0xFFFF_FFFF;

/// Everything one overlay pass needs, already in view space.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame {
    pub viewport: ViewportState,
    pub density: f32,
    pub corners: [ViewPoint; 4],
    pub midpoints: Option<[ViewPoint; 4]>,
    pub loupe: Option<Loupe>,
    pub show_guide_lines: bool,
    pub style: OverlayStyle,
}

impl OverlayFrame {
    /// `None` until there is an image, a quad and a usable layout.
    pub fn capture(engine: &mut CropEngine) -> Option<Self> {
        let viewport = engine.refresh_viewport();
        if !viewport.is_usable() {
            return None;
        }
        let quad = engine.points()?;

        let corners = quad.corners().map(|p| viewport.image_to_view(p));
        let midpoints = if engine.config().show_edge_midpoints {
            engine
                .edge_midpoints()
                .map(|m| m.points().map(|p| viewport.image_to_view(p)))
        } else {
            None
        };

        let config = engine.config();
        Some(Self {
            viewport,
            density: engine.display().density,
            corners,
            midpoints,
            loupe: engine.magnifier(),
            show_guide_lines: config.show_guide_lines,
            style: config.style,
        })
    }

    fn dp(&self, value: f32) -> f32 {
        value * self.density
    }
}

pub fn draw_overlay<S: DrawSurface>(surface: &mut S, frame: &OverlayFrame) {
    draw_mask(surface, frame);
    draw_guide_lines(surface, frame);
    draw_outline(surface, frame);
    draw_handles(surface, frame);
    draw_magnifier(surface, frame);
}

fn draw_mask<S: DrawSurface>(surface: &mut S, frame: &OverlayFrame) {
    if frame.style.mask_alpha == 0 {
        return;
    }
    let argb = with_alpha(MASK_ARGB, frame.style.mask_alpha);
    surface.fill_outside(frame.viewport.rect(), &frame.corners, argb);
}

/// Rule-of-thirds over the displayed image.
fn draw_guide_lines<S: DrawSurface>(surface: &mut S, frame: &OverlayFrame) {
    if !frame.show_guide_lines {
        return;
    }
    let vp = &frame.viewport;
    let argb = frame.style.guide_line_colour;
    let width = frame.dp(frame.style.guide_line_width);

    let (left, top) = (vp.left as f32, vp.top as f32);
    let (right, bottom) = ((vp.left + vp.width) as f32, (vp.top + vp.height) as f32);
    let w_step = vp.width / 3;
    let h_step = vp.height / 3;

    for i in 1..=2 {
        let x = (vp.left + w_step * i) as f32;
        surface.draw_line(ViewPoint::new(x, top), ViewPoint::new(x, bottom), argb, width);
    }
    for i in 1..=2 {
        let y = (vp.top + h_step * i) as f32;
        surface.draw_line(ViewPoint::new(left, y), ViewPoint::new(right, y), argb, width);
    }
}

fn draw_outline<S: DrawSurface>(surface: &mut S, frame: &OverlayFrame) {
    let paint = Paint::Stroke {
        argb: frame.style.line_colour,
        width: frame.dp(frame.style.line_width),
    };
    surface.draw_path(&frame.corners, paint);
}

fn draw_handle<S: DrawSurface>(surface: &mut S, frame: &OverlayFrame, centre: ViewPoint) {
    let s = &frame.style;
    let radius = frame.dp(s.point_radius);
    surface.draw_circle(
        centre,
        radius,
        Paint::Fill {
            argb: with_alpha(s.point_fill_colour, s.point_fill_alpha),
        },
    );
    surface.draw_circle(
        centre,
        radius,
        Paint::Stroke {
            argb: s.point_colour,
            width: frame.dp(s.point_width),
        },
    );
}

fn draw_handles<S: DrawSurface>(surface: &mut S, frame: &OverlayFrame) {
    for &p in &frame.corners {
        draw_handle(surface, frame, p);
    }
    if let Some(mids) = frame.midpoints {
        for p in mids {
            draw_handle(surface, frame, p);
        }
    }
}

fn draw_magnifier<S: DrawSurface>(surface: &mut S, frame: &OverlayFrame) {
    let Some(loupe) = frame.loupe else {
        return;
    };
    let s = &frame.style;

    surface.draw_circle(loupe.centre, loupe.radius, Paint::Fill { argb: LOUPE_BG_ARGB });
    surface.draw_magnified(&loupe, loupe.radius - frame.dp(s.magnifier_border_width));

    match loupe.marker {
        LoupeMarker::Handle => draw_handle(surface, frame, loupe.centre),
        LoupeMarker::Crosshair => {
            let c = loupe.centre;
            let len = frame.dp(s.magnifier_cross_length);
            let width = frame.dp(s.magnifier_cross_width);
            let argb = s.magnifier_cross_colour;
            surface.draw_line(ViewPoint::new(c.x, c.y - len), ViewPoint::new(c.x, c.y + len), argb, width);
            surface.draw_line(ViewPoint::new(c.x - len, c.y), ViewPoint::new(c.x + len, c.y), argb, width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadcrop_core::{DisplayMatrix, ImageSize, ViewRect};

    use crate::config::EngineConfig;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Line(ViewPoint, ViewPoint, u32),
        Circle(ViewPoint, f32, Paint),
        Path(Vec<ViewPoint>, Paint),
        Mask(ViewRect, u32),
        Magnified(ViewPoint, f32),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl DrawSurface for Recorder {
        fn draw_line(&mut self, from: ViewPoint, to: ViewPoint, argb: u32, _width: f32) {
            self.ops.push(Op::Line(from, to, argb));
        }

        fn draw_circle(&mut self, centre: ViewPoint, radius: f32, paint: Paint) {
            self.ops.push(Op::Circle(centre, radius, paint));
        }

        fn draw_path(&mut self, points: &[ViewPoint], paint: Paint) {
            self.ops.push(Op::Path(points.to_vec(), paint));
        }

        fn fill_outside(&mut self, bounds: ViewRect, _hole: &[ViewPoint], argb: u32) {
            self.ops.push(Op::Mask(bounds, argb));
        }

        fn draw_magnified(&mut self, loupe: &Loupe, radius: f32) {
            self.ops.push(Op::Magnified(loupe.centre, radius));
        }
    }

    fn engine() -> CropEngine {
        let mut e = CropEngine::new(EngineConfig::default());
        e.set_image(ImageSize::new(300, 600));
        e.set_display(DisplayMatrix {
            view_width: 400,
            view_height: 600,
            scale_x: 1.0,
            scale_y: 1.0,
            density: 1.0,
        });
        e
    }

    fn render(e: &mut CropEngine) -> Vec<Op> {
        let frame = OverlayFrame::capture(e).unwrap();
        let mut r = Recorder::default();
        draw_overlay(&mut r, &frame);
        r.ops
    }

    #[test]
    fn idle_pass_draws_mask_guides_outline_and_handles() {
        let mut e = engine();
        let ops = render(&mut e);

        assert_eq!(
            ops[0],
            Op::Mask(
                ViewRect {
                    left: 50.0,
                    top: 0.0,
                    width: 300.0,
                    height: 600.0
                },
                0x5600_0000
            )
        );
        let lines = ops.iter().filter(|o| matches!(o, Op::Line(..))).count();
        assert_eq!(lines, 4);
        assert!(ops.contains(&Op::Line(
            ViewPoint::new(150.0, 0.0),
            ViewPoint::new(150.0, 600.0),
            0xFFFF_FFFF
        )));

        // fill + stroke for 4 corners and 4 midpoints
        let circles = ops.iter().filter(|o| matches!(o, Op::Circle(..))).count();
        assert_eq!(circles, 16);
        assert!(!ops.iter().any(|o| matches!(o, Op::Magnified(..))));
    }

    #[test]
    fn options_turn_layers_off() {
        let mut e = engine();
        {
            let c = e.config_mut();
            c.show_guide_lines = false;
            c.show_edge_midpoints = false;
            c.style.mask_alpha = 0;
        }
        let ops = render(&mut e);
        assert!(matches!(ops[0], Op::Path(..)));
        assert_eq!(ops.len(), 1 + 8);
    }

    #[test]
    fn dragging_corner_adds_loupe_with_handle_marker() {
        let mut e = engine();
        assert!(e.on_pointer_down(50.0, 0.0));
        let ops = render(&mut e);

        // left-top is in the left half: loupe on the right, radius 400 / 8
        let centre = ViewPoint::new(350.0, 50.0);
        let at = ops
            .iter()
            .position(|o| *o == Op::Magnified(centre, 49.0))
            .unwrap();
        assert_eq!(ops[at - 1], Op::Circle(centre, 50.0, Paint::Fill { argb: 0xFFFF_FFFF }));
        assert!(matches!(ops[at + 1], Op::Circle(c, r, _) if c == centre && r == 10.0));
        assert_eq!(ops.len(), at + 3);
    }

    #[test]
    fn dragging_edge_adds_crosshair() {
        let mut e = engine();
        // bottom midpoint: image (150, 600) -> view (200, 600)
        assert!(e.on_pointer_down(200.0, 598.0));
        let ops = render(&mut e);
        let tail = &ops[ops.len() - 2..];
        assert!(tail.iter().all(|o| matches!(o, Op::Line(_, _, 0xFFFF_4081))));
    }
}
