// Author: Dustin Pilgrim
// License: MIT

use std::path::{Path, PathBuf};

use eventline::{debug, info, warn};
use serde::{Deserialize, Serialize};

use quadcrop_core::{Corner, DisplayMatrix, Edge, EdgeMidpoints, HandleType, ImageSize, Point, Quad};
use quadcrop_engine::{CropEngine, EngineConfig, MoveVerdict, PointsUpdate};

use crate::cli::{Args, Cmd};
use crate::crop::BoundsCropper;
use crate::script::{self, Step};
use crate::{config, paths, preview};

pub fn run(args: Args) -> Result<(), String> {
    let config_path = args.config.clone().unwrap_or_else(paths::default_config_path);
    debug!("config path: {}", config_path.display());
    let cfg = config::load(&config_path)?;

    match args.cmd {
        Cmd::Check { size, points } => check(size, &points),

        Cmd::Drag {
            size,
            points,
            corner,
            edge,
            to,
            no_limit,
            json,
        } => {
            let handle = pick_handle(corner, edge)?;
            let mut cfg = cfg;
            if no_limit {
                cfg.drag_limit = false;
            }
            let report = drag(cfg, size, points.as_deref(), handle, to);
            emit(&report, json)
        }

        Cmd::Replay {
            script,
            image,
            size,
            view,
            density,
            points,
            render,
            crop,
            json,
        } => replay(
            cfg,
            ReplayOpts {
                script,
                image,
                size,
                view,
                density,
                points,
                render,
                crop,
                json,
            },
        ),
    }
}

fn pick_handle(corner: Option<Corner>, edge: Option<Edge>) -> Result<HandleType, String> {
    match (corner, edge) {
        (Some(c), None) => Ok(c.into()),
        (None, Some(e)) => Ok(e.into()),
        _ => Err("give exactly one of --corner or --edge".into()),
    }
}

fn wrap(points: &[Point]) -> Vec<Option<Point>> {
    points.iter().copied().map(Some).collect()
}

// -------------------- check --------------------

fn check(size: ImageSize, points: &[Point]) -> Result<(), String> {
    match Quad::from_points_within(&wrap(points), size) {
        Ok(quad) => {
            println!("valid: yes");
            println!("can_right_crop: {}", quad.is_convex());
        }
        Err(e) => {
            println!("valid: no ({e})");
            println!("can_right_crop: false");
        }
    }
    Ok(())
}

// -------------------- drag --------------------

fn drag(
    cfg: EngineConfig,
    size: ImageSize,
    points: Option<&[Point]>,
    handle: HandleType,
    to: Point,
) -> StateReport {
    let mut engine = CropEngine::new(cfg);
    engine.set_image(size);
    install_points(&mut engine, points);

    let verdict = engine.drag_handle_to(handle, to);
    info!("drag {handle:?} -> ({}, {}): {verdict:?}", to.x, to.y);

    let mut report = StateReport::of(&mut engine);
    report.verdict = Some(verdict_str(verdict).to_string());
    report
}

fn verdict_str(v: MoveVerdict) -> &'static str {
    match v {
        MoveVerdict::Committed => "committed",
        MoveVerdict::OutOfBounds => "out-of-bounds",
        MoveVerdict::BreaksShape => "breaks-shape",
    }
}

// -------------------- replay --------------------

pub struct ReplayOpts {
    pub script: PathBuf,
    pub image: Option<PathBuf>,
    pub size: Option<ImageSize>,
    pub view: ImageSize,
    pub density: f32,
    pub points: Option<Vec<Point>>,
    pub render: Option<PathBuf>,
    pub crop: Option<PathBuf>,
    pub json: bool,
}

fn replay(cfg: EngineConfig, opts: ReplayOpts) -> Result<(), String> {
    let steps = script::load(&opts.script)?;

    let source = opts.image.as_deref().map(preview::load_image).transpose()?;
    let size = match (&source, opts.size) {
        (Some(img), _) => preview::image_size(img)?,
        (None, Some(size)) => size,
        (None, None) => return Err("replay needs --image or --size".into()),
    };
    if !opts.density.is_finite() || opts.density <= 0.0 {
        return Err(format!("--density must be > 0, got {}", opts.density));
    }

    let mut engine = CropEngine::new(cfg);
    engine.set_image(size);
    engine.set_display(DisplayMatrix::fit_centre(
        opts.view.width,
        opts.view.height,
        size,
        opts.density,
    ));
    install_points(&mut engine, opts.points.as_deref());

    info!("replaying {} step(s) from {}", steps.len(), opts.script.display());
    for (i, step) in steps.iter().enumerate() {
        let consumed = apply(&mut engine, *step);
        debug!("step {}: {step:?} consumed={consumed}", i + 1);
    }
    if let Some(handle) = engine.active_handle() {
        info!("script ended mid-drag on {handle:?}");
    }

    emit(&StateReport::of(&mut engine), opts.json)?;

    if let Some(out) = &opts.render {
        let pixmap = source.as_ref().map(preview::to_pixmap).transpose()?;
        let base = preview::base_layer(opts.view, engine.viewport(), pixmap.as_ref())?;
        preview::render_png(&mut engine, base, out)?;
        info!("rendered: {}", out.display());
    }

    if let Some(out) = &opts.crop {
        let src = source.as_ref().ok_or("--crop needs --image")?;
        write_crop(&engine, src, out)?;
        info!("cropped: {}", out.display());
    }

    Ok(())
}

fn apply(engine: &mut CropEngine, step: Step) -> bool {
    match step {
        Step::Down(x, y) => engine.on_pointer_down(x, y),
        Step::Move(x, y) => engine.on_pointer_move(x, y),
        Step::Up => engine.on_pointer_up(),
        Step::Cancel => engine.on_pointer_cancel(),
    }
}

fn write_crop(engine: &CropEngine, source: &image::DynamicImage, out: &Path) -> Result<(), String> {
    let cropped = engine
        .crop_current(&mut BoundsCropper { source })
        .map_err(|e| format!("crop failed: {e}"))?;

    paths::ensure_parent_dir(out).map_err(|e| format!("create output dir: {e}"))?;
    cropped
        .save(out)
        .map_err(|e| format!("failed to write {}: {e}", out.display()))
}

// -------------------- shared --------------------

fn install_points(engine: &mut CropEngine, points: Option<&[Point]>) {
    let Some(points) = points else {
        return;
    };
    let points = wrap(points);
    if engine.set_points(Some(points.as_slice())) == PointsUpdate::FullImageFallback {
        warn!("initial points rejected; starting from the full image");
    }
}

fn fmt_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Engine state as printed after `drag` and `replay`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<String>,
    pub points: Option<Quad>,
    pub midpoints: Option<EdgeMidpoints>,
    pub can_right_crop: bool,
}

impl StateReport {
    fn of(engine: &mut CropEngine) -> Self {
        Self {
            verdict: None,
            points: engine.points(),
            midpoints: engine.edge_midpoints(),
            can_right_crop: engine.can_right_crop(),
        }
    }

    fn to_text(&self) -> String {
        let mut lines = Vec::new();
        if let Some(v) = &self.verdict {
            lines.push(format!("verdict: {v}"));
        }
        match &self.points {
            Some(q) => lines.push(format!("points: {}", fmt_points(q.corners()))),
            None => lines.push("points: none".to_string()),
        }
        if let Some(m) = &self.midpoints {
            lines.push(format!("midpoints: {}", fmt_points(m.points())));
        }
        lines.push(format!("can_right_crop: {}", self.can_right_crop));
        lines.join("\n")
    }
}

fn emit(report: &StateReport, json: bool) -> Result<(), String> {
    if json {
        let out = serde_json::to_string_pretty(report).map_err(|e| format!("encode json: {e}"))?;
        println!("{out}");
    } else {
        println!("{}", report.to_text());
    }
    Ok(())
}
