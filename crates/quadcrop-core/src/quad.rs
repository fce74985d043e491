// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

use crate::error::QuadError;
use crate::geometry::side_agreement;
use crate::handle::{Corner, Edge};
use crate::point::{ImageSize, Point};

/// Four crop corners in `[LeftTop, RightTop, RightBottom, LeftBottom]` order.
///
/// A `Quad` is always complete; partially defined input is rejected by
/// [`Quad::from_points`] before it can become one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quad {
    corners: [Point; 4],
}

impl Quad {
    pub const fn new(corners: [Point; 4]) -> Self {
        Self { corners }
    }

    /// `[(0,0), (w,0), (w,h), (0,h)]`.
    pub const fn full_image(size: ImageSize) -> Self {
        Self::new([
            Point::new(0, 0),
            Point::new(size.width, 0),
            Point::new(size.width, size.height),
            Point::new(0, size.height),
        ])
    }

    /// Exactly four points, none missing.
    pub fn is_valid(points: &[Option<Point>]) -> bool {
        points.len() == 4 && points.iter().all(Option::is_some)
    }

    /// Builds a quad from input that passes [`Quad::is_valid`], otherwise
    /// says which part of it failed.
    pub fn from_points(points: &[Option<Point>]) -> Result<Self, QuadError> {
        if !Self::is_valid(points) {
            return Err(match points.iter().position(Option::is_none) {
                Some(i) if points.len() == 4 => QuadError::MissingPoint(i),
                _ => QuadError::WrongCount(points.len()),
            });
        }

        let mut corners = [Point::default(); 4];
        for (slot, p) in corners.iter_mut().zip(points.iter().flatten()) {
            *slot = *p;
        }
        Ok(Self { corners })
    }

    /// Like [`Quad::from_points`], additionally requiring every corner inside `size`.
    pub fn from_points_within(points: &[Option<Point>], size: ImageSize) -> Result<Self, QuadError> {
        let quad = Self::from_points(points)?;
        quad.check_within(size)?;
        Ok(quad)
    }

    pub fn check_within(&self, size: ImageSize) -> Result<(), QuadError> {
        match self.corners.iter().position(|p| !size.contains(*p)) {
            None => Ok(()),
            Some(index) => {
                let p = self.corners[index];
                Err(QuadError::OutOfBounds {
                    index,
                    x: p.x,
                    y: p.y,
                    width: size.width,
                    height: size.height,
                })
            }
        }
    }

    pub fn corners(&self) -> &[Point; 4] {
        &self.corners
    }

    pub fn corner(&self, c: Corner) -> Point {
        self.corners[c.index()]
    }

    pub fn set_corner(&mut self, c: Corner, p: Point) {
        self.corners[c.index()] = p;
    }

    pub fn edge_midpoints(&self) -> EdgeMidpoints {
        let mut mids = EdgeMidpoints::default();
        mids.recompute(self);
        mids
    }

    /// True iff each diagonal strictly separates the other diagonal's endpoints.
    ///
    /// Rules out crossed (bow-tie), reflex and degenerate (collinear) shapes.
    pub fn is_convex(&self) -> bool {
        let lt = self.corner(Corner::LeftTop);
        let rt = self.corner(Corner::RightTop);
        let rb = self.corner(Corner::RightBottom);
        let lb = self.corner(Corner::LeftBottom);

        side_agreement(lt, rb, lb, rt) < 0 && side_agreement(lb, rt, lt, rb) < 0
    }
}

/// Midpoints of the four quad edges, a pure function of the corners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeMidpoints {
    points: [Point; 4],
}

impl EdgeMidpoints {
    /// In-place refresh; integer division truncates like screen pixels do.
    pub fn recompute(&mut self, quad: &Quad) {
        let c = quad.corners();
        for i in 0..4 {
            let a = c[i];
            let b = c[(i + 1) % 4];
            self.points[i] = Point::new(a.x + (b.x - a.x) / 2, a.y + (b.y - a.y) / 2);
        }
    }

    pub fn get(&self, edge: Edge) -> Point {
        self.points[edge.index()]
    }

    pub fn points(&self) -> &[Point; 4] {
        &self.points
    }
}
