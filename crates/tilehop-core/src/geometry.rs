use serde::{Deserialize, Serialize};

/// Axis-aligned box with a top-left origin (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a box from two opposite corners given in any order.
    pub fn from_corners(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        let left = x0.min(x1);
        let top = y0.min(y1);
        Self {
            x: left,
            y: top,
            width: x0.max(x1) - left,
            height: y0.max(y1) - top,
        }
    }

    pub fn left(&self) -> f32 {
        self.x.min(self.x + self.width)
    }

    pub fn right(&self) -> f32 {
        self.x.max(self.x + self.width)
    }

    pub fn top(&self) -> f32 {
        self.y.min(self.y + self.height)
    }

    pub fn bottom(&self) -> f32 {
        self.y.max(self.y + self.height)
    }

    /// Strict overlap test. Boxes that only share an edge or a corner do not
    /// overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        overlaps(self, other)
    }
}

/// Open-interval rectangle intersection on both axes.
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    a.right() > b.left() && a.left() < b.right() && a.bottom() > b.top() && a.top() < b.bottom()
}
