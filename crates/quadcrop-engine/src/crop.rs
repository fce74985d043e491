// Author: Dustin Pilgrim
// License: MIT

use quadcrop_core::{ImageSize, Quad, QuadError};
use thiserror::Error;

/// The collaborator that turns a validated quad into pixels (perspective
/// warp, bounding-box copy, whatever the host provides).
pub trait Cropper {
    type Output;
    type Error: std::error::Error + 'static;

    fn crop(&mut self, image: ImageSize, quad: &Quad) -> Result<Self::Output, Self::Error>;
}

#[derive(Debug, Error)]
pub enum CropError<E: std::error::Error + 'static> {
    #[error("no image loaded")]
    NoImage,

    #[error("invalid crop points: {0}")]
    InvalidPoints(#[from] QuadError),

    #[error("cropper failed: {0}")]
    Cropper(#[source] E),
}
