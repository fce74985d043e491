// Author: Dustin Pilgrim
// License: MIT

use quadcrop_core::geometry::distance;
use quadcrop_core::{EdgeMidpoints, HandleType, Point, Quad, ViewportState};

/// Default grab distance around a handle, in density-independent units.
pub const DEFAULT_CATCH_RADIUS: f32 = 15.0;

fn within(viewport: &ViewportState, p: Point, px: f32, py: f32, radius: f32) -> bool {
    let v = viewport.image_to_view(p);
    distance(px, py, v.x, v.y) < radius
}

/// Handle under the pointer, if any.
///
/// Corners win over edges; within each group the lowest index wins.
/// `midpoints` is `None` when edge handles are hidden, which also makes them
/// ungrabbable. `radius` is already in view pixels.
pub fn find_handle(
    px: f32,
    py: f32,
    quad: &Quad,
    midpoints: Option<&EdgeMidpoints>,
    viewport: &ViewportState,
    radius: f32,
) -> Option<HandleType> {
    HandleType::ALL.into_iter().find(|handle| match *handle {
        HandleType::Corner(c) => within(viewport, quad.corner(c), px, py, radius),
        HandleType::Edge(e) => midpoints.is_some_and(|m| within(viewport, m.get(e), px, py, radius)),
    })
}
