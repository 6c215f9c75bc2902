//! Per-node layout configuration and the pure pieces of the layout algorithm.

/// Anchor values and static positioning.
mod anchor;
/// Auto-anchor chain resolution and sibling queries.
pub mod flow;
/// Scroll value model.
pub mod scroll;
/// Overlap resolution between siblings.
pub mod squish;

use serde::{Deserialize, Serialize};

pub use self::anchor::Anchor;
use crate::geom::{Padding, Rect, Vec2};

/// Layout configuration for a single node.
///
/// Size components greater than 1 are absolute pixels and are multiplied by
/// the ambient scale. Components less than or equal to 1 are fractions of the
/// parent's content extent on that axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Attachment point within the parent.
    pub anchor: Anchor,
    /// Declared size.
    pub size: Vec2,
    /// Displacement away from the attached edge.
    pub offset: Vec2,
    /// Inset applied to this node's area before children are placed.
    pub child_padding: Padding,
    /// Derive the width from the rightmost visible child.
    pub width_from_children: bool,
    /// Derive the height from the lowest visible child.
    pub height_from_children: bool,
    /// With auto-sizing, never shrink below the declared size.
    pub size_as_minimum: bool,
    /// With auto-sizing, never grow beyond the declared size.
    pub size_as_maximum: bool,
    /// Clamp the final area to the parent's content area.
    pub prevent_parent_spill: bool,
    /// Allow auto-anchored younger siblings to attach to this node.
    pub can_auto_anchors_attach: bool,
    /// Squish order among siblings. Higher priority keeps more of its area.
    pub priority: i32,
    /// Clip and vertically scroll children instead of growing to fit them.
    pub scroll: bool,
    /// Shrink overlapping children so that no two of them intersect.
    pub squish_children: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            anchor: Anchor::TopLeft,
            size: Vec2::splat(1.0),
            offset: Vec2::zero(),
            child_padding: Padding::zero(),
            width_from_children: false,
            height_from_children: false,
            size_as_minimum: false,
            size_as_maximum: false,
            prevent_parent_spill: false,
            can_auto_anchors_attach: true,
            priority: 0,
            scroll: false,
            squish_children: false,
        }
    }
}

impl Layout {
    /// A layout with the given anchor and declared size.
    pub fn new(anchor: Anchor, size: impl Into<Vec2>) -> Self {
        Self {
            anchor,
            size: size.into(),
            ..Default::default()
        }
    }

    /// A top-left layout filling the parent's content area.
    pub fn fill() -> Self {
        Self::default()
    }

    /// Set the anchor.
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set the declared size.
    pub fn size(mut self, size: impl Into<Vec2>) -> Self {
        self.size = size.into();
        self
    }

    /// Set the offset from the attached edge.
    pub fn offset(mut self, x: f32, y: f32) -> Self {
        self.offset = Vec2::new(x, y);
        self
    }

    /// Set the child padding.
    pub fn child_padding(mut self, padding: Padding) -> Self {
        self.child_padding = padding;
        self
    }

    /// Derive the width from the children.
    pub fn width_from_children(mut self) -> Self {
        self.width_from_children = true;
        self
    }

    /// Derive the height from the children.
    pub fn height_from_children(mut self) -> Self {
        self.height_from_children = true;
        self
    }

    /// Treat the declared size as a lower bound for auto-sizing.
    pub fn size_as_minimum(mut self) -> Self {
        self.size_as_minimum = true;
        self
    }

    /// Treat the declared size as an upper bound for auto-sizing.
    pub fn size_as_maximum(mut self) -> Self {
        self.size_as_maximum = true;
        self
    }

    /// Keep the area within the parent's content area.
    pub fn prevent_parent_spill(mut self) -> Self {
        self.prevent_parent_spill = true;
        self
    }

    /// Stop auto-anchored siblings from attaching to this node.
    pub fn no_auto_attach(mut self) -> Self {
        self.can_auto_anchors_attach = false;
        self
    }

    /// Set the squish priority.
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Make this node a vertical scroll container.
    pub fn scroll(mut self) -> Self {
        self.scroll = true;
        self
    }

    /// Squish overlapping children.
    pub fn squish_children(mut self) -> Self {
        self.squish_children = true;
        self
    }

    /// Does this node's result depend on its children's areas?
    pub fn sizes_from_children(&self) -> bool {
        self.width_from_children || self.height_from_children
    }

    /// Resolve the declared size against the parent's content area.
    pub fn resolve_size(&self, parent: Rect, scale: f32) -> Vec2 {
        Vec2::new(
            resolve_axis(self.size.x, parent.w, scale),
            resolve_axis(self.size.y, parent.h, scale),
        )
    }

    /// The offset after ambient scaling.
    pub fn scaled_offset(&self, scale: f32) -> Vec2 {
        self.offset * scale
    }

    /// The child padding after ambient scaling.
    pub fn scaled_child_padding(&self, scale: f32) -> Padding {
        self.child_padding.scaled(scale)
    }
}

/// Absolute above 1, parent fraction at or below.
fn resolve_axis(declared: f32, parent: f32, scale: f32) -> f32 {
    if declared > 1.0 {
        declared * scale
    } else {
        declared * parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_dual_interpretation() {
        let parent = Rect::new(0.0, 0.0, 200.0, 100.0);
        let l = Layout::new(Anchor::TopLeft, (0.5, 30.0));
        assert_eq!(l.resolve_size(parent, 1.0), Vec2::new(100.0, 30.0));
        assert_eq!(l.resolve_size(parent, 2.0), Vec2::new(100.0, 60.0));

        // exactly one is still a fraction
        let l = Layout::new(Anchor::TopLeft, (1.0, 1.0));
        assert_eq!(l.resolve_size(parent, 3.0), Vec2::new(200.0, 100.0));
    }

    #[test]
    fn builder_sets_flags() {
        let l = Layout::new(Anchor::AutoLeft, (1.0, 10.0))
            .height_from_children()
            .size_as_minimum()
            .offset(2.0, 4.0)
            .child_padding(Padding::uniform(3.0))
            .priority(5);
        assert!(l.height_from_children && !l.width_from_children);
        assert!(l.sizes_from_children());
        assert!(l.size_as_minimum);
        assert_eq!(l.scaled_offset(2.0), Vec2::new(4.0, 8.0));
        assert_eq!(l.scaled_child_padding(2.0), Padding::uniform(6.0));
        assert_eq!(l.priority, 5);
        assert!(l.can_auto_anchors_attach);
        assert!(!Layout::fill().no_auto_attach().can_auto_anchors_attach);
    }

    #[test]
    fn deserializes_with_defaults() {
        let l: Layout =
            serde_json::from_str(r#"{ "anchor": "AutoInline", "size": { "x": 80.0, "y": 20.0 } }"#)
                .unwrap();
        assert_eq!(l.anchor, Anchor::AutoInline);
        assert_eq!(l.size, Vec2::new(80.0, 20.0));
        assert!(l.can_auto_anchors_attach);
    }
}
