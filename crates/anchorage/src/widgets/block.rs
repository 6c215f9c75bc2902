use crate::{
    geom::{Rect, Vec2},
    layout::Layout,
    widget::Widget,
};

/// A leaf with an intrinsic size in unscaled pixels, standing in for content
/// that measures itself (text, images). The declared layout size is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    size: Vec2,
}

impl Block {
    /// Create a block with an intrinsic size.
    pub fn new(w: f32, h: f32) -> Self {
        Self {
            size: Vec2::new(w, h),
        }
    }

    /// The intrinsic size.
    pub fn intrinsic(&self) -> Vec2 {
        self.size
    }
}

impl Widget for Block {
    fn actual_size(&self, _layout: &Layout, _parent: Rect, scale: f32) -> Vec2 {
        self.size * scale
    }
}
