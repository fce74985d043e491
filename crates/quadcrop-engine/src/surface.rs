// Author: Dustin Pilgrim
// License: MIT

use quadcrop_core::{ViewPoint, ViewRect};

use crate::magnifier::Loupe;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Fill { argb: u32 },
    Stroke { argb: u32, width: f32 },
}

/// The drawing primitives the overlay needs from its host.
///
/// Everything is in view pixels.
pub trait DrawSurface {
    fn draw_line(&mut self, from: ViewPoint, to: ViewPoint, argb: u32, width: f32);

    fn draw_circle(&mut self, centre: ViewPoint, radius: f32, paint: Paint);

    /// Closed polygon through `points`.
    fn draw_path(&mut self, points: &[ViewPoint], paint: Paint);

    /// Fill `bounds` with `argb` except for the polygon `hole`.
    fn fill_outside(&mut self, bounds: ViewRect, hole: &[ViewPoint], argb: u32);

    /// Zoomed copy of the base layer through `loupe`'s transform, clipped to
    /// a circle of `radius` around the loupe centre.
    fn draw_magnified(&mut self, loupe: &Loupe, radius: f32);
}

/// Replace the alpha byte of an ARGB colour.
#[inline]
pub fn with_alpha(argb: u32, alpha: u8) -> u32 {
    (argb & 0x00FF_FFFF) | ((alpha as u32) << 24)
}
