// Author: Dustin Pilgrim
// License: MIT
//
// Loupe placement. The loupe is a circle in a top corner of the view that
// shows the area around the dragged handle at `zoom` times the view scale.

use quadcrop_core::geometry::distance;
use quadcrop_core::{DisplayMatrix, HandleType, ImageSize, Point, ViewPoint, ViewportState};

/// Edge drags flip the loupe to the right once the handle comes closer than
/// this many loupe radii to the view origin.
const EDGE_FLIP_RADII: f32 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoupeMarker {
    /// Corner drags: a handle circle at the loupe centre.
    Handle,
    /// Edge drags: a crosshair.
    Crosshair,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Loupe {
    pub centre: ViewPoint,
    pub radius: f32,
    /// Dragged handle, in view space.
    pub focus: ViewPoint,
    pub zoom: f32,
    pub marker: LoupeMarker,
}

impl Loupe {
    pub fn place(
        handle: HandleType,
        position: Point,
        image: ImageSize,
        viewport: &ViewportState,
        display: &DisplayMatrix,
        zoom: f32,
    ) -> Self {
        let radius = (display.view_width / 8) as f32;
        let focus = viewport.image_to_view(position);

        let (on_right, marker) = match handle {
            HandleType::Corner(_) => {
                let left_half = 0 <= position.x && position.x < image.width / 2;
                (left_half, LoupeMarker::Handle)
            }
            HandleType::Edge(_) => {
                let near_origin = distance(focus.x, focus.y, 0.0, 0.0) < radius * EDGE_FLIP_RADII;
                (near_origin, LoupeMarker::Crosshair)
            }
        };

        let cx = if on_right {
            display.view_width as f32 - radius
        } else {
            radius
        };

        Self {
            centre: ViewPoint::new(cx, radius),
            radius,
            focus,
            zoom,
            marker,
        }
    }

    /// `(tx, ty)` such that `loupe = view * zoom + (tx, ty)`.
    pub fn translation(&self) -> (f32, f32) {
        (
            self.centre.x - self.focus.x * self.zoom,
            self.centre.y - self.focus.y * self.zoom,
        )
    }

    pub fn view_to_loupe(&self, p: ViewPoint) -> ViewPoint {
        ViewPoint {
            x: self.centre.x + (p.x - self.focus.x) * self.zoom,
            y: self.centre.y + (p.y - self.focus.y) * self.zoom,
        }
    }

    pub fn image_to_loupe(&self, viewport: &ViewportState, p: Point) -> ViewPoint {
        self.view_to_loupe(viewport.image_to_view(p))
    }
}
