// Author: Dustin Pilgrim
// License: MIT

//! Property-based invariant tests for the crop engine.
//!
//! 1. Legal drags keep the quad convex while the drag limit is on
//! 2. Every reachable corner stays inside the image, limit on or off
//! 3. Edge midpoints always equal the truncating midpoint of their edge
//! 4. image -> view -> image round-trips within one pixel, and any view
//!    point, however far outside, maps into the image
//! 5. Full-image crop is idempotent
//! 6. Arbitrary pointer sequences never panic and leave no stray drag

use proptest::prelude::*;
use quadcrop_core::{Corner, DisplayMatrix, Edge, HandleType, ImageSize, Point, Quad, ViewportState};
use quadcrop_engine::{CropEngine, EngineConfig};

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Down(f32, f32),
    Move(f32, f32),
    Up,
    Cancel,
    /// Image-space drag of `HandleType::ALL[idx]`.
    Drag(usize, i32, i32),
}

fn image_strategy() -> impl Strategy<Value = ImageSize> {
    (10i32..3000, 10i32..3000).prop_map(|(w, h)| ImageSize::new(w, h))
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-100.0f32..1400.0, -100.0f32..1400.0).prop_map(|(x, y)| Op::Down(x, y)),
        (-100.0f32..1400.0, -100.0f32..1400.0).prop_map(|(x, y)| Op::Move(x, y)),
        Just(Op::Up),
        Just(Op::Cancel),
        (0usize..8, -200i32..3200, -200i32..3200).prop_map(|(h, x, y)| Op::Drag(h, x, y)),
    ]
}

/// Axis-aligned start rectangle inside the image, as fractions of its size.
fn start_strategy() -> impl Strategy<Value = (f32, f32, f32, f32)> {
    (0.0f32..0.45, 0.55f32..=1.0, 0.0f32..0.45, 0.55f32..=1.0)
}

fn start_quad(image: ImageSize, (l, r, t, b): (f32, f32, f32, f32)) -> Quad {
    let x0 = (image.width as f32 * l) as i32;
    let x1 = ((image.width as f32 * r) as i32).max(x0 + 1).min(image.width);
    let y0 = (image.height as f32 * t) as i32;
    let y1 = ((image.height as f32 * b) as i32).max(y0 + 1).min(image.height);
    Quad::new([
        Point::new(x0, y0),
        Point::new(x1, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
    ])
}

fn engine_for(image: ImageSize, view: (i32, i32), density: f32, drag_limit: bool) -> CropEngine {
    let config = EngineConfig {
        drag_limit,
        ..EngineConfig::default()
    };
    let mut e = CropEngine::new(config);
    e.set_image(image);
    e.set_display(DisplayMatrix::fit_centre(view.0, view.1, image, density));
    e
}

fn apply(e: &mut CropEngine, op: &Op) {
    match *op {
        Op::Down(x, y) => {
            e.on_pointer_down(x, y);
        }
        Op::Move(x, y) => {
            e.on_pointer_move(x, y);
        }
        Op::Up => {
            e.on_pointer_up();
        }
        Op::Cancel => {
            e.on_pointer_cancel();
        }
        Op::Drag(h, x, y) => {
            e.drag_handle_to(HandleType::ALL[h], Point::new(x, y));
        }
    }
}

fn midpoints_match(e: &mut CropEngine) -> bool {
    let (Some(q), Some(m)) = (e.points(), e.edge_midpoints()) else {
        return false;
    };
    Edge::ALL.iter().all(|&edge| {
        let (a, b) = edge.corners();
        let (a, b) = (q.corner(a), q.corner(b));
        m.get(edge) == Point::new(a.x + (b.x - a.x) / 2, a.y + (b.y - a.y) / 2)
    })
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Convexity survives every legal drag
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn drag_limit_preserves_convexity(
        image in image_strategy(),
        start in start_strategy(),
        ops in prop::collection::vec(op_strategy(), 1..80),
    ) {
        let mut e = engine_for(image, (800, 800), 1.0, true);
        e.set_quad(start_quad(image, start));
        prop_assert!(e.can_right_crop());

        for op in &ops {
            apply(&mut e, op);
            prop_assert!(e.can_right_crop(), "lost convexity after {:?}: {:?}", op, e.points());
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Bounds hold for every reachable state
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn corners_stay_inside_image(
        image in image_strategy(),
        drag_limit in any::<bool>(),
        ops in prop::collection::vec(op_strategy(), 1..80),
    ) {
        let mut e = engine_for(image, (640, 960), 2.0, drag_limit);
        for op in &ops {
            apply(&mut e, op);
            let q = e.points().unwrap();
            for c in Corner::ALL {
                prop_assert!(image.contains(q.corner(c)), "{:?} escaped: {:?}", c, q);
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Midpoints are a pure function of the corners
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn midpoints_track_corners(
        image in image_strategy(),
        drag_limit in any::<bool>(),
        ops in prop::collection::vec(op_strategy(), 1..60),
    ) {
        let mut e = engine_for(image, (800, 600), 1.0, drag_limit);
        prop_assert!(midpoints_match(&mut e));
        for op in &ops {
            apply(&mut e, op);
            prop_assert!(midpoints_match(&mut e));
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Coordinate round trip
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn view_round_trip_within_one_pixel(
        image in image_strategy(),
        view_w in 50i32..2000,
        view_h in 50i32..2000,
        fx in 0.0f32..1.0,
        fy in 0.0f32..1.0,
    ) {
        let display = DisplayMatrix::fit_centre(view_w, view_h, image, 1.0);
        let vp = ViewportState::compute(image, &display);
        prop_assume!(vp.is_usable());

        let p = Point::new((image.width as f32 * fx) as i32, (image.height as f32 * fy) as i32);
        let v = vp.image_to_view(p);
        let r = vp.rect();
        prop_assume!(v.x > r.left && v.x < r.right() && v.y > r.top && v.y < r.bottom());

        let back = vp.view_to_image(v.x, v.y);
        prop_assert!((back.x - p.x).abs() <= 1, "{:?} -> {:?} -> {:?}", p, v, back);
        prop_assert!((back.y - p.y).abs() <= 1, "{:?} -> {:?} -> {:?}", p, v, back);
    }
}

proptest! {
    #[test]
    fn any_pointer_maps_inside_image(
        image in image_strategy(),
        view_w in 50i32..2000,
        view_h in 50i32..2000,
        x in -5000.0f32..5000.0,
        y in -5000.0f32..5000.0,
    ) {
        let display = DisplayMatrix::fit_centre(view_w, view_h, image, 1.0);
        let vp = ViewportState::compute(image, &display);
        prop_assume!(vp.is_usable());

        let p = vp.view_to_image(x, y);
        prop_assert!(image.contains(p), "({}, {}) -> {:?} outside {:?}", x, y, p, image);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Full-image crop idempotence
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn full_image_crop_twice_is_stable(
        image in image_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..20),
    ) {
        let mut e = engine_for(image, (800, 800), 1.0, true);
        for op in &ops {
            apply(&mut e, op);
        }
        e.set_full_image_crop();
        let first = e.points();
        e.set_full_image_crop();
        prop_assert_eq!(e.points(), first);
        prop_assert_eq!(first, Some(Quad::full_image(image)));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 6. Pointer sequences
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn up_always_ends_the_gesture(
        image in image_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..40),
        cancel in any::<bool>(),
    ) {
        let mut e = engine_for(image, (1024, 768), 1.5, true);
        for op in &ops {
            apply(&mut e, op);
        }
        if cancel {
            e.on_pointer_cancel();
        } else {
            e.on_pointer_up();
        }
        prop_assert_eq!(e.active_handle(), None);
        prop_assert!(!e.on_pointer_move(10.0, 10.0));
    }

    #[test]
    fn move_without_down_changes_nothing(
        image in image_strategy(),
        x in -100.0f32..1400.0,
        y in -100.0f32..1400.0,
    ) {
        let mut e = engine_for(image, (800, 800), 1.0, true);
        let before = e.points();
        prop_assert!(!e.on_pointer_move(x, y));
        prop_assert_eq!(e.points(), before);
    }
}
