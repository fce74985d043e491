// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};

use quadcrop_core::{Corner, Edge, ImageSize, Point};

#[derive(Debug, Parser)]
#[command(name = "quadcrop", version, about = "Quadcrop: four-corner crop handles, headless.")]
pub struct Args {
    /// Log to stderr (in addition to the log file)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Override log file path (default: $XDG_STATE_HOME/quadcrop/quadcrop.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Override config path (default: $XDG_CONFIG_HOME/quadcrop/quadcrop.rune)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// Validate four image-space points (LT RT RB LB)
    Check {
        /// Image size, e.g. 1000x2000
        #[arg(long, value_parser = parse_size)]
        size: ImageSize,
        /// Points as x,y
        #[arg(value_parser = parse_point, num_args = 0..)]
        points: Vec<Point>,
    },

    /// Move one handle to an image-space position and report the verdict
    #[command(group(ArgGroup::new("handle").required(true).args(["corner", "edge"])))]
    Drag {
        #[arg(long, value_parser = parse_size)]
        size: ImageSize,
        /// Starting points (default: full image)
        #[arg(long, value_parser = parse_point, num_args = 1..)]
        points: Option<Vec<Point>>,
        #[arg(long, value_enum)]
        corner: Option<Corner>,
        #[arg(long, value_enum)]
        edge: Option<Edge>,
        /// Target position as x,y
        #[arg(long, value_parser = parse_point)]
        to: Point,
        /// Only check bounds, allow any shape
        #[arg(long)]
        no_limit: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replay a pointer script against an image laid out fit-centre
    #[command(group(ArgGroup::new("source").required(true).args(["image", "size"])))]
    Replay {
        /// Script file: `down X Y`, `move X Y`, `up`, `cancel`
        script: PathBuf,
        /// Image to load (its size drives the layout)
        #[arg(long)]
        image: Option<PathBuf>,
        /// Blank image of this size instead of a file
        #[arg(long, value_parser = parse_size)]
        size: Option<ImageSize>,
        /// Virtual view size
        #[arg(long, value_parser = parse_size, default_value = "720x1280")]
        view: ImageSize,
        /// View pixels per dp
        #[arg(long, default_value_t = 1.0)]
        density: f32,
        /// Initial points (default: full image)
        #[arg(long, value_parser = parse_point, num_args = 1..)]
        points: Option<Vec<Point>>,
        /// Write the view with the overlay to this PNG
        #[arg(long)]
        render: Option<PathBuf>,
        /// Write the crop (bounding box of the final quad) to this PNG
        #[arg(long, requires = "image")]
        crop: Option<PathBuf>,
        /// Print the final state as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn parse_size(s: &str) -> Result<ImageSize, String> {
    let (w, h) = s
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got \"{s}\""))?;
    let w: i32 = w.trim().parse().map_err(|_| format!("bad width in \"{s}\""))?;
    let h: i32 = h.trim().parse().map_err(|_| format!("bad height in \"{s}\""))?;
    if w <= 0 || h <= 0 {
        return Err(format!("size must be positive, got \"{s}\""));
    }
    Ok(ImageSize::new(w, h))
}

pub fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .trim()
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got \"{s}\""))?;
    let x = x.trim().parse().map_err(|_| format!("bad x in \"{s}\""))?;
    let y = y.trim().parse().map_err(|_| format!("bad y in \"{s}\""))?;
    Ok(Point::new(x, y))
}
