use crate::{
    core::id::NodeId,
    geom::Rect,
    layout::{Layout, scroll::ScrollBar},
    widget::Widget,
};

/// Core node data stored in the arena.
pub struct Node {
    /// Widget behavior and state.
    pub(crate) widget: Box<dyn Widget>,

    /// Parent in the arena tree.
    pub(crate) parent: Option<NodeId>,
    /// Children in the arena tree, oldest first.
    pub(crate) children: Vec<NodeId>,

    /// Layout configuration.
    pub(crate) layout: Layout,

    /// Layout-authoritative area in viewport coordinates, before any scroll
    /// offset is applied.
    pub(crate) area: Rect,
    /// The area must be recomputed before it is read.
    pub(crate) dirty: bool,
    /// Node visibility.
    pub(crate) hidden: bool,
    /// Scroll state. Only meaningful when the layout scrolls.
    pub(crate) scroll: ScrollBar,
}

impl Node {
    /// A fresh, detached, dirty node.
    pub(crate) fn new(layout: Layout, widget: Box<dyn Widget>) -> Self {
        Self {
            widget,
            parent: None,
            children: Vec::new(),
            layout,
            area: Rect::zero(),
            dirty: true,
            hidden: false,
            scroll: ScrollBar::default(),
        }
    }

    /// Return the node's widget name.
    pub fn name(&self) -> String {
        self.widget.name()
    }

    /// Return the widget.
    pub fn widget(&self) -> &dyn Widget {
        self.widget.as_ref()
    }

    /// Return the node's parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Return the node's children.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Return the layout configuration.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Return the last computed unscrolled area. This may be stale if the node
    /// is dirty; use [`Tree::area`](crate::Tree::area) for a current value.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Return true if the area needs recomputing.
    pub fn dirty(&self) -> bool {
        self.dirty
    }

    /// Return true if the node is hidden.
    pub fn hidden(&self) -> bool {
        self.hidden
    }

    /// Return the scroll state.
    pub fn scroll(&self) -> ScrollBar {
        self.scroll
    }
}
