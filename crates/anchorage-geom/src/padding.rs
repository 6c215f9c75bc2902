use std::ops::Mul;

use serde::{Deserialize, Serialize};

/// Inward insets on each edge of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Padding {
    /// Left inset.
    pub left: f32,
    /// Right inset.
    pub right: f32,
    /// Top inset.
    pub top: f32,
    /// Bottom inset.
    pub bottom: f32,
}

impl Padding {
    /// Construct padding from individual edges.
    pub const fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Padding with the same inset on every edge.
    pub const fn uniform(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    /// Padding with `x` on the left and right edges and `y` on the top and bottom.
    pub const fn symmetric(x: f32, y: f32) -> Self {
        Self::new(x, x, y, y)
    }

    /// No padding.
    pub const fn zero() -> Self {
        Self::uniform(0.0)
    }

    /// Combined left and right insets.
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Combined top and bottom insets.
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Every inset multiplied by `scale`.
    pub fn scaled(&self, scale: f32) -> Self {
        Self::new(
            self.left * scale,
            self.right * scale,
            self.top * scale,
            self.bottom * scale,
        )
    }
}

impl Mul<f32> for Padding {
    type Output = Self;

    fn mul(self, scale: f32) -> Self {
        self.scaled(scale)
    }
}
