// Author: Dustin Pilgrim
// License: MIT
//
// Drag legality. A rejected move leaves the quad untouched; nothing is
// ever clamped to a "nearest legal" position.

use quadcrop_core::geometry::side_agreement;
use quadcrop_core::{Corner, Edge, ImageSize, Point, Quad};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveVerdict {
    Committed,
    /// Some resulting coordinate would leave `[0, w] x [0, h]`.
    OutOfBounds,
    /// The move would cross, fold or flatten the quad.
    BreaksShape,
}

impl MoveVerdict {
    pub fn is_committed(self) -> bool {
        self == MoveVerdict::Committed
    }
}

/// Whether `corner` may move to `candidate` with the other three held fixed.
///
/// The candidate has to stay strictly on the far side of the diagonal
/// joining its two neighbours, and strictly inside the wedge the
/// neighbours open at the opposite corner. Points on any of those lines
/// are rejected so the quad never degenerates.
pub fn can_move_corner(quad: &Quad, corner: Corner, candidate: Point) -> bool {
    let next = quad.corner(corner.next());
    let opposite = quad.corner(corner.opposite());
    let prev = quad.corner(corner.prev());

    side_agreement(prev, next, candidate, opposite) < 0
        && side_agreement(opposite, next, candidate, prev) > 0
        && side_agreement(opposite, prev, candidate, next) > 0
}

/// `point + (dx, dy)`, or `None` if either axis would leave the image.
pub fn move_point(point: Point, dx: i32, dy: i32, image: ImageSize) -> Option<Point> {
    let moved = point.offset(dx, dy);
    image.contains(moved).then_some(moved)
}

pub fn drag_corner(
    quad: &mut Quad,
    corner: Corner,
    candidate: Point,
    image: ImageSize,
    drag_limit: bool,
) -> MoveVerdict {
    if !image.contains(candidate) {
        return MoveVerdict::OutOfBounds;
    }
    if drag_limit && !can_move_corner(quad, corner, candidate) {
        return MoveVerdict::BreaksShape;
    }

    quad.set_corner(corner, candidate);
    MoveVerdict::Committed
}

/// Offset an edge drag applies to both of its corners, projected onto the
/// axis the edge slides along.
pub fn edge_offset(edge: Edge, midpoint: Point, candidate: Point) -> (i32, i32) {
    if edge.moves_vertically() {
        (0, candidate.y - midpoint.y)
    } else {
        (candidate.x - midpoint.x, 0)
    }
}

/// Translate both corners of `edge` so its midpoint follows `candidate`.
///
/// All-or-nothing: either both corners move or neither does.
pub fn drag_edge(
    quad: &mut Quad,
    edge: Edge,
    midpoint: Point,
    candidate: Point,
    image: ImageSize,
    drag_limit: bool,
) -> MoveVerdict {
    let (dx, dy) = edge_offset(edge, midpoint, candidate);
    let (a, b) = edge.corners();

    let (Some(new_a), Some(new_b)) = (
        move_point(quad.corner(a), dx, dy, image),
        move_point(quad.corner(b), dx, dy, image),
    ) else {
        return MoveVerdict::OutOfBounds;
    };

    // Second corner is judged against the quad with the first already moved.
    let mut trial = *quad;
    if drag_limit && !can_move_corner(&trial, a, new_a) {
        return MoveVerdict::BreaksShape;
    }
    trial.set_corner(a, new_a);
    if drag_limit && !can_move_corner(&trial, b, new_b) {
        return MoveVerdict::BreaksShape;
    }
    trial.set_corner(b, new_b);

    *quad = trial;
    MoveVerdict::Committed
}
