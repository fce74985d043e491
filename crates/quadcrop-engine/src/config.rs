// Author: Dustin Pilgrim
// License: MIT

use crate::resolver::DEFAULT_CATCH_RADIUS;

/// Overlay look. Colours are ARGB (`0xAARRGGBB`); widths and radii are in
/// density-independent units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub line_colour: u32,
    pub line_width: f32,

    pub point_colour: u32,
    pub point_width: f32,
    pub point_radius: f32,
    pub point_fill_colour: u32,
    pub point_fill_alpha: u8,

    /// Dim applied outside the quad, 0 disables the mask.
    pub mask_alpha: u8,

    pub guide_line_colour: u32,
    pub guide_line_width: f32,

    pub magnifier_cross_colour: u32,
    pub magnifier_cross_width: f32,
    /// Half-length of each crosshair arm.
    pub magnifier_cross_length: f32,
    pub magnifier_border_width: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            line_colour: 0xFF00_FFFF,
            line_width: 1.0,

            point_colour: 0xFF00_FFFF,
            point_width: 1.0,
            point_radius: 10.0,
            point_fill_colour: 0xFFFF_FFFF,
            point_fill_alpha: 175,

            mask_alpha: 86,

            guide_line_colour: 0xFFFF_FFFF,
            guide_line_width: 0.3,

            magnifier_cross_colour: 0xFFFF_4081,
            magnifier_cross_width: 0.8,
            magnifier_cross_length: 3.0,
            magnifier_border_width: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Enforce convexity on every drag. Off means only the image bounds apply.
    pub drag_limit: bool,
    /// Grab distance around handles, density-independent units.
    pub catch_radius: f32,
    pub show_edge_midpoints: bool,
    pub show_magnifier: bool,
    pub magnifier_zoom: f32,
    pub show_guide_lines: bool,
    pub style: OverlayStyle,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            drag_limit: true,
            catch_radius: DEFAULT_CATCH_RADIUS,
            show_edge_midpoints: true,
            show_magnifier: true,
            magnifier_zoom: 2.0,
            show_guide_lines: true,
            style: OverlayStyle::default(),
        }
    }
}
