// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

#[cfg(feature = "clap")]
use clap::ValueEnum;

/// Corner roles, in the winding order the quad stores them.
#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    LeftTop,
    RightTop,
    RightBottom,
    LeftBottom,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::LeftTop,
        Corner::RightTop,
        Corner::RightBottom,
        Corner::LeftBottom,
    ];

    pub const fn index(self) -> usize {
        match self {
            Corner::LeftTop => 0,
            Corner::RightTop => 1,
            Corner::RightBottom => 2,
            Corner::LeftBottom => 3,
        }
    }

    /// Wraps modulo 4.
    pub const fn from_index(index: usize) -> Corner {
        Self::ALL[index % 4]
    }

    pub const fn next(self) -> Corner {
        Self::from_index(self.index() + 1)
    }

    pub const fn opposite(self) -> Corner {
        Self::from_index(self.index() + 2)
    }

    pub const fn prev(self) -> Corner {
        Self::from_index(self.index() + 3)
    }
}

/// Edge roles. Edge `i` runs from corner `i` to corner `i + 1`.
#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    pub const fn index(self) -> usize {
        match self {
            Edge::Top => 0,
            Edge::Right => 1,
            Edge::Bottom => 2,
            Edge::Left => 3,
        }
    }

    pub const fn from_index(index: usize) -> Edge {
        Self::ALL[index % 4]
    }

    /// The two corners bounding this edge, in winding order.
    pub const fn corners(self) -> (Corner, Corner) {
        let start = Corner::from_index(self.index());
        (start, start.next())
    }

    /// Top and bottom edges slide vertically, left and right horizontally.
    pub const fn moves_vertically(self) -> bool {
        matches!(self, Edge::Top | Edge::Bottom)
    }
}

/// One of the eight draggable handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleType {
    Corner(Corner),
    Edge(Edge),
}

impl HandleType {
    /// Hit-test priority: corners first, then edges, each index-ascending.
    pub const ALL: [HandleType; 8] = [
        HandleType::Corner(Corner::LeftTop),
        HandleType::Corner(Corner::RightTop),
        HandleType::Corner(Corner::RightBottom),
        HandleType::Corner(Corner::LeftBottom),
        HandleType::Edge(Edge::Top),
        HandleType::Edge(Edge::Right),
        HandleType::Edge(Edge::Bottom),
        HandleType::Edge(Edge::Left),
    ];

    pub const fn is_edge(self) -> bool {
        matches!(self, HandleType::Edge(_))
    }
}

impl From<Corner> for HandleType {
    fn from(c: Corner) -> Self {
        HandleType::Corner(c)
    }
}

impl From<Edge> for HandleType {
    fn from(e: Edge) -> Self {
        HandleType::Edge(e)
    }
}
