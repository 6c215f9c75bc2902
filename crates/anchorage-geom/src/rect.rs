use serde::{Deserialize, Serialize};

use super::{Padding, Vec2};

/// An axis-aligned rectangle with a float origin and extent.
///
/// Extents are not forced to be positive: layout math is allowed to produce
/// degenerate rectangles, and every query here treats a negative extent as
/// empty.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Rect {
    /// Construct a rectangle from coordinates and size.
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Construct a rectangle from a position and a size.
    pub const fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    /// The zero rectangle at the origin.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Left edge.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Top edge.
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Top-left corner.
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Width and height.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    /// Center point.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Area, counting negative extents as zero.
    pub fn area(&self) -> f32 {
        self.w.max(0.0) * self.h.max(0.0)
    }

    /// Does this rect have a zero or negative extent?
    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Do the two rectangles share a strictly positive area?
    pub fn overlaps(&self, other: &Self) -> bool {
        self.right().min(other.right()) - self.x.max(other.x) > 0.0
            && self.bottom().min(other.bottom()) - self.y.max(other.y) > 0.0
    }

    /// The shared region of two rectangles, if it has positive area.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return None;
        }
        Some(Self::new(left, top, right - left, bottom - top))
    }

    /// The smallest rectangle enclosing both.
    pub fn union(&self, other: &Self) -> Self {
        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(left, top, right - left, bottom - top)
    }

    /// Shrink inward by `padding`. The resulting extent never goes below zero.
    pub fn inset(&self, padding: Padding) -> Self {
        Self::new(
            self.x + padding.left,
            self.y + padding.top,
            (self.w - padding.horizontal()).max(0.0),
            (self.h - padding.vertical()).max(0.0),
        )
    }

    /// Move by `delta`.
    pub fn translate(&self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.w, self.h)
    }

    /// Does this rectangle contain the point? Left and top edges are inclusive,
    /// right and bottom edges exclusive.
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// True if origin and extent are within `epsilon` of `other`'s.
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.pos().approx_eq(other.pos(), epsilon) && self.size().approx_eq(other.size(), epsilon)
    }
}
