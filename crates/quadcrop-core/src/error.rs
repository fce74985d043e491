// Author: Dustin Pilgrim
// License: MIT

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuadError {
    #[error("expected 4 crop points, got {0}")]
    WrongCount(usize),

    #[error("crop point {0} is missing")]
    MissingPoint(usize),

    #[error("crop point {index} ({x}, {y}) lies outside the {width}x{height} image")]
    OutOfBounds {
        index: usize,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
}
