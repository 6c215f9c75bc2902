//! Floating point geometry primitives used by the anchorage layout engine.

#![warn(missing_docs)]

/// Inward insets.
mod padding;
/// Rectangle operations.
mod rect;
/// Two-component vectors.
mod vec2;

pub use padding::Padding;
pub use rect::Rect;
pub use vec2::Vec2;

/// Cardinal directions.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Direction {
    /// Upward direction.
    Up,
    /// Downward direction.
    Down,
    /// Leftward direction.
    Left,
    /// Rightward direction.
    Right,
}

/// Are two floats within `epsilon` of each other?
#[inline]
pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() <= epsilon
}
