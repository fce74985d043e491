// Author: Dustin Pilgrim
// License: MIT
//
// Everything lives under a `quadcrop` block and every key is optional.
// Values are read raw first, then checked and folded over the defaults.

use std::path::Path;

use rune_cfg::RuneConfig;

use quadcrop_engine::EngineConfig;

const BLOCK: &str = "quadcrop";

/// Config values as written, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawConfig {
    pub drag_limit: Option<bool>,
    pub catch_radius: Option<f64>,
    pub show_edge_midpoints: Option<bool>,
    pub show_magnifier: Option<bool>,
    pub magnifier_zoom: Option<f64>,
    pub show_guide_lines: Option<bool>,

    pub line_colour: Option<String>,
    pub line_width: Option<f64>,
    pub point_colour: Option<String>,
    pub point_width: Option<f64>,
    pub point_radius: Option<f64>,
    pub point_fill_colour: Option<String>,
    pub point_fill_alpha: Option<f64>,
    pub mask_alpha: Option<f64>,
    pub guide_line_colour: Option<String>,
    pub guide_line_width: Option<f64>,
    pub magnifier_cross_colour: Option<String>,
    pub magnifier_cross_width: Option<f64>,
}

/// Missing file means defaults.
pub fn load(path: &Path) -> Result<EngineConfig, String> {
    if !path.exists() {
        return Ok(EngineConfig::default());
    }

    let rc = RuneConfig::from_file(path)
        .map_err(|e| format!("failed to read config {}: {e}", path.display()))?;

    resolve(&read_raw(&rc)?)
}

fn read_raw(rc: &RuneConfig) -> Result<RawConfig, String> {
    if !rc.has(BLOCK) {
        return Ok(RawConfig::default());
    }

    Ok(RawConfig {
        drag_limit: get_bool(rc, "drag_limit")?,
        catch_radius: get_num(rc, "catch_radius")?,
        show_edge_midpoints: get_bool(rc, "show_edge_midpoints")?,
        show_magnifier: get_bool(rc, "show_magnifier")?,
        magnifier_zoom: get_num(rc, "magnifier_zoom")?,
        show_guide_lines: get_bool(rc, "show_guide_lines")?,

        line_colour: get_str(rc, "line_colour")?,
        line_width: get_num(rc, "line_width")?,
        point_colour: get_str(rc, "point_colour")?,
        point_width: get_num(rc, "point_width")?,
        point_radius: get_num(rc, "point_radius")?,
        point_fill_colour: get_str(rc, "point_fill_colour")?,
        point_fill_alpha: get_num(rc, "point_fill_alpha")?,
        mask_alpha: get_num(rc, "mask_alpha")?,
        guide_line_colour: get_str(rc, "guide_line_colour")?,
        guide_line_width: get_num(rc, "guide_line_width")?,
        magnifier_cross_colour: get_str(rc, "magnifier_cross_colour")?,
        magnifier_cross_width: get_num(rc, "magnifier_cross_width")?,
    })
}

fn get_bool(rc: &RuneConfig, key: &str) -> Result<Option<bool>, String> {
    rc.get_optional::<bool>(&format!("{BLOCK}.{key}"))
        .map_err(|e| format!("config error at {BLOCK}.{key}: {e}"))
}

fn get_num(rc: &RuneConfig, key: &str) -> Result<Option<f64>, String> {
    rc.get_optional::<f64>(&format!("{BLOCK}.{key}"))
        .map_err(|e| format!("config error at {BLOCK}.{key}: {e}"))
}

fn get_str(rc: &RuneConfig, key: &str) -> Result<Option<String>, String> {
    rc.get_optional::<String>(&format!("{BLOCK}.{key}"))
        .map_err(|e| format!("config error at {BLOCK}.{key}: {e}"))
}

pub fn resolve(raw: &RawConfig) -> Result<EngineConfig, String> {
    let mut cfg = EngineConfig::default();

    if let Some(v) = raw.drag_limit {
        cfg.drag_limit = v;
    }
    if let Some(v) = raw.catch_radius {
        cfg.catch_radius = positive("catch_radius", v)?;
    }
    if let Some(v) = raw.show_edge_midpoints {
        cfg.show_edge_midpoints = v;
    }
    if let Some(v) = raw.show_magnifier {
        cfg.show_magnifier = v;
    }
    if let Some(v) = raw.magnifier_zoom {
        cfg.magnifier_zoom = positive("magnifier_zoom", v)?;
    }
    if let Some(v) = raw.show_guide_lines {
        cfg.show_guide_lines = v;
    }

    let style = &mut cfg.style;
    if let Some(s) = &raw.line_colour {
        style.line_colour = colour("line_colour", s)?;
    }
    if let Some(v) = raw.line_width {
        style.line_width = positive("line_width", v)?;
    }
    if let Some(s) = &raw.point_colour {
        style.point_colour = colour("point_colour", s)?;
    }
    if let Some(v) = raw.point_width {
        style.point_width = positive("point_width", v)?;
    }
    if let Some(v) = raw.point_radius {
        style.point_radius = positive("point_radius", v)?;
    }
    if let Some(s) = &raw.point_fill_colour {
        style.point_fill_colour = colour("point_fill_colour", s)?;
    }
    if let Some(v) = raw.point_fill_alpha {
        style.point_fill_alpha = alpha(v);
    }
    if let Some(v) = raw.mask_alpha {
        style.mask_alpha = alpha(v);
    }
    if let Some(s) = &raw.guide_line_colour {
        style.guide_line_colour = colour("guide_line_colour", s)?;
    }
    if let Some(v) = raw.guide_line_width {
        style.guide_line_width = positive("guide_line_width", v)?;
    }
    if let Some(s) = &raw.magnifier_cross_colour {
        style.magnifier_cross_colour = colour("magnifier_cross_colour", s)?;
    }
    if let Some(v) = raw.magnifier_cross_width {
        style.magnifier_cross_width = positive("magnifier_cross_width", v)?;
    }

    Ok(cfg)
}

fn positive(key: &str, v: f64) -> Result<f32, String> {
    if v.is_finite() && v > 0.0 {
        Ok(v as f32)
    } else {
        Err(format!("config error at {BLOCK}.{key}: expected a number > 0, got {v}"))
    }
}

fn colour(key: &str, s: &str) -> Result<u32, String> {
    parse_hex_colour(s).map_err(|e| format!("config error at {BLOCK}.{key}: {e}"))
}

/// NaN counts as transparent.
fn alpha(v: f64) -> u8 {
    if v.is_nan() { 0 } else { v.round().clamp(0.0, 255.0) as u8 }
}

/// `#RRGGBB` to opaque ARGB.
pub fn parse_hex_colour(s: &str) -> Result<u32, String> {
    let hex = s
        .trim()
        .strip_prefix('#')
        .ok_or_else(|| "colour must start with #".to_string())?;

    if hex.len() != 6 {
        return Err("colour must be 6 hex digits (RRGGBB)".into());
    }

    let rgb = u32::from_str_radix(hex, 16).map_err(|_| "invalid hex colour".to_string())?;
    Ok(0xFF00_0000 | rgb)
}
