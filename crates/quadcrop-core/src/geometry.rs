// Author: Dustin Pilgrim
// License: MIT
//
// Exact integer predicates used by every shape decision, plus the float
// distance used for hit testing and loupe placement only.

use crate::point::Point;

/// Signed side of `p` relative to the directed line `a -> b`.
///
/// Positive and negative values are opposite half-planes; zero means the
/// three points are collinear. Coordinates are widened to `i64`, which is
/// exact for anything inside a non-negative `i32` image.
pub fn orientation(a: Point, b: Point, p: Point) -> i64 {
    let (x1, y1) = (a.x as i64, a.y as i64);
    let (x2, y2) = (b.x as i64, b.y as i64);
    let (px, py) = (p.x as i64, p.y as i64);
    (px - x1) * (y2 - y1) - (py - y1) * (x2 - x1)
}

/// Sign of `orientation(a, b, p) * orientation(a, b, reference)`, without
/// forming the (possibly overflowing) product.
///
/// `1`: same side of the line, `-1`: opposite sides, `0`: one of them is on it.
pub fn side_agreement(a: Point, b: Point, p: Point, reference: Point) -> i64 {
    orientation(a, b, p).signum() * orientation(a, b, reference).signum()
}

/// Euclidean distance between two view-space positions.
pub fn distance(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    (ax - bx).hypot(ay - by)
}
