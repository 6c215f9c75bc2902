//! The per-node capability trait.

use std::any::{Any, type_name};

use convert_case::{Case, Casing};

use crate::{
    NodeId,
    geom::{Rect, Vec2},
    layout::Layout,
};

/// Widgets are the behavior attached to nodes in the [`Tree`](crate::Tree)
/// arena. Every method has a default, so a plain container needs no code.
pub trait Widget: Any {
    /// The size this node wants before any auto-sizing, given its parent's
    /// content area.
    fn actual_size(&self, layout: &Layout, parent_content: Rect, scale: f32) -> Vec2 {
        layout.resolve_size(parent_content, scale)
    }

    /// Called once per auto-size recursion with the one-based recursion count
    /// and the child whose extent drove the new size.
    fn on_layout_recursion(&mut self, _recursion: usize, _relevant_child: Option<NodeId>) {}

    /// Called whenever a new unscrolled area is stored on the node.
    fn on_area_updated(&mut self, _area: Rect) {}

    /// Name used in debug output.
    fn name(&self) -> String {
        let name = type_name::<Self>();
        let base = name.split('<').next().unwrap_or(name);
        let short = base.rsplit("::").next().unwrap_or(base);
        short.to_case(Case::Snake)
    }
}

/// Convert widgets into boxed trait objects.
impl<W> From<W> for Box<dyn Widget>
where
    W: Widget + 'static,
{
    fn from(widget: W) -> Self {
        Box::new(widget)
    }
}
