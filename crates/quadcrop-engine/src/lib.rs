// Author: Dustin Pilgrim
// License: MIT

pub mod config;
pub mod constraint;
pub mod crop;
pub mod engine;
pub mod magnifier;
pub mod render;
pub mod resolver;
pub mod session;
pub mod surface;

pub use config::{EngineConfig, OverlayStyle};
pub use constraint::MoveVerdict;
pub use crop::{CropError, Cropper};
pub use engine::{CropEngine, PointsUpdate};
pub use magnifier::{Loupe, LoupeMarker};
pub use render::OverlayFrame;
pub use session::DragSession;
pub use surface::{DrawSurface, Paint};
