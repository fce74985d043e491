// Author: Dustin Pilgrim
// License: MIT
//
// View-space <-> image-space mapping. The host view always centres the
// image; only its scale and the view size change between frames.

use serde::{Deserialize, Serialize};

use crate::point::{ImageSize, Point};

/// Position in host view pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewPoint {
    pub x: f32,
    pub y: f32,
}

impl ViewPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in view pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewRect {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// What the host reports about its current layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayMatrix {
    pub view_width: i32,
    pub view_height: i32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// View pixels per density-independent unit.
    pub density: f32,
}

impl DisplayMatrix {
    /// Uniform scale that fits the whole image inside the view.
    pub fn fit_centre(view_width: i32, view_height: i32, image: ImageSize, density: f32) -> Self {
        let scale = if image.is_empty() {
            0.0
        } else {
            (view_width as f32 / image.width as f32).min(view_height as f32 / image.height as f32)
        };

        Self {
            view_width,
            view_height,
            scale_x: scale,
            scale_y: scale,
            density,
        }
    }

    pub fn dp(&self, value: f32) -> f32 {
        value * self.density
    }
}

impl Default for DisplayMatrix {
    fn default() -> Self {
        Self {
            view_width: 0,
            view_height: 0,
            scale_x: 0.0,
            scale_y: 0.0,
            density: 1.0,
        }
    }
}

/// Where the image currently sits on screen. Derived, never stored across frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub scale_x: f32,
    pub scale_y: f32,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    /// Intrinsic size the mapping inverts to.
    pub image: ImageSize,
}

impl ViewportState {
    pub fn compute(image: ImageSize, display: &DisplayMatrix) -> Self {
        let width = (image.width as f32 * display.scale_x).round() as i32;
        let height = (image.height as f32 * display.scale_y).round() as i32;

        Self {
            scale_x: display.scale_x,
            scale_y: display.scale_y,
            left: (display.view_width - width) / 2,
            top: (display.view_height - height) / 2,
            width,
            height,
            image,
        }
    }

    /// A zero, negative or non-finite scale cannot be inverted.
    pub fn is_usable(&self) -> bool {
        self.scale_x.is_finite() && self.scale_y.is_finite() && self.scale_x > 0.0 && self.scale_y > 0.0
    }

    pub fn rect(&self) -> ViewRect {
        ViewRect {
            left: self.left as f32,
            top: self.top as f32,
            width: self.width as f32,
            height: self.height as f32,
        }
    }

    pub fn image_to_view(&self, p: Point) -> ViewPoint {
        ViewPoint {
            x: p.x as f32 * self.scale_x + self.left as f32,
            y: p.y as f32 * self.scale_y + self.top as f32,
        }
    }

    /// Pointers outside the displayed image are pulled onto its nearest edge
    /// first, then the result is truncated to whole pixels.
    ///
    /// The on-screen size is rounded, so its far edge can invert to one
    /// pixel past the image; the result is clamped to `[0, w] x [0, h]`.
    pub fn view_to_image(&self, x: f32, y: f32) -> Point {
        let r = self.rect();
        let cx = x.max(r.left).min(r.right());
        let cy = y.max(r.top).min(r.bottom());

        let ix = ((cx - r.left) / self.scale_x) as i32;
        let iy = ((cy - r.top) / self.scale_y) as i32;

        Point {
            x: ix.min(self.image.width).max(0),
            y: iy.min(self.image.height).max(0),
        }
    }
}
