// Author: Dustin Pilgrim
// License: MIT

pub mod error;
pub mod geometry;
pub mod handle;
pub mod point;
pub mod quad;
pub mod viewport;

pub use error::QuadError;
pub use handle::{Corner, Edge, HandleType};
pub use point::{ImageSize, Point};
pub use quad::{EdgeMidpoints, Quad};
pub use viewport::{DisplayMatrix, ViewPoint, ViewRect, ViewportState};
