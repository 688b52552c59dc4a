//! Axis-aligned box overlap
//!
//! Player and van are both plain rectangles on the street; touching edges
//! count as a hit.

use glam::Vec2;

/// An axis-aligned box (min corner + size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// True when the boxes overlap or share an edge
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        !(a_max.x < other.min.x
            || b_max.x < self.min.x
            || a_max.y < other.min.y
            || b_max.y < self.min.y)
    }
}
