//! The node arena and its public operations.

use std::{collections::HashMap, mem, time::Instant};

#[cfg(debug_assertions)]
use std::collections::HashSet;

use slotmap::SlotMap;
use tracing::debug;

use crate::{
    config::LayoutConfig,
    core::{id::NodeId, node::Node, pass::LayoutPass},
    error::{Error, Result},
    geom::{Rect, Vec2},
    layout::{Layout, scroll::ScrollBar},
    metrics::{LayoutEvent, Metrics},
    widget::Widget,
};

/// An arena of layout nodes.
///
/// Every node without a parent is a root and is laid out against the
/// viewport. Areas are computed lazily: mutations only mark nodes dirty, and
/// the next read of an area re-runs layout for the smallest subtree that can
/// have changed.
pub struct Tree {
    /// Node storage.
    pub(crate) nodes: SlotMap<NodeId, Node>,
    /// Parentless nodes, in insertion order.
    pub(crate) roots: Vec<NodeId>,
    /// Host-assigned names for roots.
    named: HashMap<String, NodeId>,
    /// The area roots are laid out against.
    pub(crate) viewport: Rect,
    /// Engine settings.
    pub(crate) config: LayoutConfig,
    /// Layout counters.
    pub(crate) metrics: Metrics,
    /// Recorded events, if enabled.
    events: Vec<LayoutEvent>,
}

impl Tree {
    /// Create an empty tree with the given viewport.
    pub fn new(viewport: Rect) -> Self {
        Self::with_config(viewport, LayoutConfig::default())
    }

    /// Create an empty tree with a viewport and configuration.
    pub fn with_config(viewport: Rect, config: LayoutConfig) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            roots: Vec::new(),
            named: HashMap::new(),
            viewport,
            config,
            metrics: Metrics::default(),
            events: Vec::new(),
        }
    }

    /// Return a reference to a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Look up a live node.
    fn get(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(Error::NodeNotFound(id))
    }

    /// Look up a live node mutably.
    fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))
    }

    /// Does the id refer to a live node?
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Return true if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The viewport roots are laid out against.
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Change the viewport. Every root is marked dirty.
    pub fn set_viewport(&mut self, viewport: Rect) {
        if viewport != self.viewport {
            self.viewport = viewport;
            self.dirty_roots();
        }
    }

    /// The current configuration.
    pub fn config(&self) -> LayoutConfig {
        self.config
    }

    /// Install a new configuration. Every root is marked dirty.
    pub fn set_config(&mut self, config: LayoutConfig) {
        self.config = config;
        if !config.record_events {
            self.events.clear();
        }
        self.dirty_roots();
    }

    /// Mark every root dirty.
    fn dirty_roots(&mut self) {
        for root in self.roots.clone() {
            if let Some(node) = self.nodes.get_mut(root) {
                node.dirty = true;
            }
        }
    }

    /// A snapshot of the layout counters.
    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    /// Zero the layout counters.
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Take every event recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<LayoutEvent> {
        mem::take(&mut self.events)
    }

    /// Record an event if recording is on.
    pub(crate) fn record(&mut self, event: LayoutEvent) {
        if self.config.record_events {
            self.events.push(event);
        }
    }

    /// Add a detached node. It is a root until attached to a parent.
    pub fn insert(&mut self, layout: Layout, widget: impl Into<Box<dyn Widget>>) -> NodeId {
        let id = self.nodes.insert(Node::new(layout, widget.into()));
        self.roots.push(id);
        id
    }

    /// Add a node as the last child of `parent`.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        layout: Layout,
        widget: impl Into<Box<dyn Widget>>,
    ) -> Result<NodeId> {
        self.get(parent)?;
        let id = self.insert(layout, widget);
        self.attach(parent, id)?;
        Ok(id)
    }

    /// Attach a detached node as the last child of `parent`.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let index = self.get(parent)?.children.len();
        self.attach_at(parent, child, index)
    }

    /// Attach a detached node as a child of `parent` at `index`, clamped to
    /// the number of children.
    pub fn attach_at(&mut self, parent: NodeId, child: NodeId, index: usize) -> Result<()> {
        self.get(parent)?;
        if self.get(child)?.parent.is_some() {
            return Err(Error::AlreadyAttached(child));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(Error::WouldCreateCycle { parent, child });
        }

        self.roots.retain(|r| *r != child);
        self.named.retain(|_, r| *r != child);
        self.get_mut(child)?.parent = Some(parent);
        let children = &mut self.get_mut(parent)?.children;
        let index = index.min(children.len());
        children.insert(index, child);

        self.mark_dirty(child);
        self.mark_dirty(parent);
        self.debug_assert_tree_invariants();
        Ok(())
    }

    /// Detach a node from its parent, making it a root. Detaching a root is a
    /// no-op.
    pub fn detach(&mut self, child: NodeId) -> Result<()> {
        let Some(parent) = self.get(child)?.parent else {
            return Ok(());
        };
        self.get_mut(parent)?.children.retain(|c| *c != child);
        self.get_mut(child)?.parent = None;
        self.roots.push(child);

        self.mark_dirty(parent);
        self.mark_dirty(child);
        self.debug_assert_tree_invariants();
        Ok(())
    }

    /// Remove a node and all its descendants from the arena.
    pub fn remove_subtree(&mut self, id: NodeId) -> Result<()> {
        self.detach(id)?;
        let doomed = self.descendants(id)?;
        self.roots.retain(|r| *r != id);
        self.named.retain(|_, r| *r != id);
        for node in doomed {
            self.nodes.remove(node);
        }
        self.debug_assert_tree_invariants();
        Ok(())
    }

    /// Return a node's children, oldest first.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(&self.get(id)?.children)
    }

    /// Return a node's parent, if any.
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.get(id)?.parent)
    }

    /// Return every parentless node, in insertion order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Collect a subtree in pre-order, including the root.
    pub fn descendants(&self, id: NodeId) -> Result<Vec<NodeId>> {
        self.get(id)?;
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(node_id) = stack.pop() {
            let Some(node) = self.nodes.get(node_id) else {
                continue;
            };
            out.push(node_id);
            for child in node.children.iter().rev() {
                stack.push(*child);
            }
        }
        Ok(out)
    }

    /// Return true if `ancestor` appears in the parent chain of `node`,
    /// including `node` itself.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Give a root a name the host can look it up by.
    pub fn add_root(&mut self, name: &str, id: NodeId) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::InvalidName(name.into()));
        }
        if self.named.contains_key(name) {
            return Err(Error::DuplicateRoot(name.into()));
        }
        if self.get(id)?.parent.is_some() {
            return Err(Error::AlreadyAttached(id));
        }
        self.named.insert(name.into(), id);
        Ok(())
    }

    /// Look up a named root.
    pub fn root_by_name(&self, name: &str) -> Option<NodeId> {
        self.named.get(name).copied()
    }

    /// Remove a named root and its whole subtree, returning its id.
    pub fn remove_root(&mut self, name: &str) -> Result<Option<NodeId>> {
        let Some(id) = self.named.remove(name) else {
            return Ok(None);
        };
        self.remove_subtree(id)?;
        Ok(Some(id))
    }

    /// Return a node's layout configuration.
    pub fn layout_of(&self, id: NodeId) -> Result<Layout> {
        Ok(self.get(id)?.layout)
    }

    /// Update the layout for a node, marking it dirty if anything changed.
    pub fn with_layout_of(&mut self, id: NodeId, f: impl FnOnce(&mut Layout)) -> Result<()> {
        let node = self.get_mut(id)?;
        let mut layout = node.layout;
        f(&mut layout);
        if layout != node.layout {
            node.layout = layout;
            self.mark_dirty(id);
        }
        Ok(())
    }

    /// Set the layout for a node.
    pub fn set_layout_of(&mut self, id: NodeId, layout: Layout) -> Result<()> {
        self.with_layout_of(id, |l| *l = layout)
    }

    /// Run a closure against a node's widget. The node is marked dirty, since
    /// the widget may report a different size afterwards.
    pub fn with_widget_mut<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut dyn Widget) -> R,
    ) -> Result<R> {
        let node = self.get_mut(id)?;
        let r = f(node.widget.as_mut());
        self.mark_dirty(id);
        Ok(r)
    }

    /// Set a node's hidden flag. Returns `true` if visibility changed.
    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) -> Result<bool> {
        let node = self.get_mut(id)?;
        let changed = node.hidden != hidden;
        node.hidden = hidden;
        if changed {
            self.mark_dirty(id);
            if let Some(parent) = self.get(id)?.parent {
                self.mark_dirty(parent);
            }
        }
        Ok(changed)
    }

    /// Is the node hidden?
    pub fn is_hidden(&self, id: NodeId) -> Result<bool> {
        Ok(self.get(id)?.hidden)
    }

    /// Is the node's area stale?
    pub fn is_dirty(&self, id: NodeId) -> Result<bool> {
        Ok(self.get(id)?.dirty)
    }

    /// Mark a node dirty, and walk upward while each parent's result depends
    /// on the child below it. A scroll range covers the container's whole
    /// subtree, so the path up to the outermost scrolling ancestor is marked
    /// as well.
    pub fn mark_dirty(&mut self, id: NodeId) {
        let mut current = id;
        loop {
            let Some(node) = self.nodes.get_mut(current) else {
                return;
            };
            node.dirty = true;
            let Some(parent) = node.parent else {
                return;
            };
            if !self.depends_on_children(parent, current) {
                break;
            }
            current = parent;
        }

        let Some(scroller) = self.outermost_scroll_ancestor(current) else {
            return;
        };
        let mut next = Some(current);
        while let Some(n) = next {
            let Some(node) = self.nodes.get_mut(n) else {
                return;
            };
            node.dirty = true;
            if n == scroller {
                return;
            }
            next = node.parent;
        }
    }

    /// The scrolling ancestor of `id` closest to the root, if any.
    fn outermost_scroll_ancestor(&self, id: NodeId) -> Option<NodeId> {
        let mut outermost = None;
        let mut current = self.nodes.get(id).and_then(|n| n.parent);
        while let Some(a) = current {
            let node = self.nodes.get(a)?;
            if node.layout.scroll {
                outermost = Some(a);
            }
            current = node.parent;
        }
        outermost
    }

    /// Does `parent`'s layout depend on `child`'s?
    fn depends_on_children(&self, parent: NodeId, child: NodeId) -> bool {
        let Some(p) = self.nodes.get(parent) else {
            return false;
        };
        let l = p.layout;
        if l.sizes_from_children() || l.squish_children || l.scroll {
            return true;
        }
        self.nodes
            .get(child)
            .is_some_and(|c| c.layout.anchor.is_auto())
            || p.children.iter().any(|c| {
                self.nodes
                    .get(*c)
                    .is_some_and(|n| n.layout.anchor.is_auto())
            })
    }

    /// The scroll state of a node.
    pub fn scroll(&self, id: NodeId) -> Result<ScrollBar> {
        Ok(self.get(id)?.scroll)
    }

    /// Set a scroll container's value, clamped to its range. Never affects
    /// layout. Returns true if the value changed.
    pub fn set_scroll(&mut self, id: NodeId, value: f32) -> Result<bool> {
        self.area(id)?;
        Ok(self.get_mut(id)?.scroll.set(value))
    }

    /// Scroll a container by a number of wheel ticks.
    pub fn scroll_by(&mut self, id: NodeId, ticks: f32) -> Result<bool> {
        self.area(id)?;
        Ok(self.get_mut(id)?.scroll.scroll_by(ticks))
    }

    /// The node's current unscrolled area. If the node or any ancestor it
    /// depends on is dirty, layout is re-run from the topmost dirty node on
    /// the path to the root.
    pub fn area(&mut self, id: NodeId) -> Result<Rect> {
        let mut top = None;
        let mut current = Some(id);
        while let Some(c) = current {
            let node = self.get(c)?;
            if node.dirty {
                top = Some(c);
            }
            current = node.parent;
        }
        if let Some(top) = top {
            self.run(top)?;
        }
        Ok(self.get(id)?.area)
    }

    /// The last computed area, without recomputing.
    pub fn cached_area(&self, id: NodeId) -> Result<Rect> {
        Ok(self.get(id)?.area)
    }

    /// Recompute a node's layout unconditionally and return its area.
    pub fn force_layout(&mut self, id: NodeId) -> Result<Rect> {
        self.run(id)?;
        Ok(self.get(id)?.area)
    }

    /// Lay out every dirty subtree. Hosts call this once per frame.
    pub fn update(&mut self) -> Result<()> {
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = self.get(id)?;
            if node.dirty {
                self.run(id)?;
            } else {
                stack.extend(node.children.iter().rev());
            }
        }
        Ok(())
    }

    /// Run a layout pass rooted at `id`.
    fn run(&mut self, id: NodeId) -> Result<()> {
        debug!(node = ?id, "layout");
        let start = Instant::now();
        let r = LayoutPass::new(self).layout_node(id);
        self.metrics.layout_time += start.elapsed();
        r
    }

    /// Total scroll offset applied to a node by its scrolling ancestors.
    fn scroll_offset(&self, id: NodeId) -> Result<Vec2> {
        let mut offset = Vec2::zero();
        let mut current = self.get(id)?.parent;
        while let Some(p) = current {
            let node = self.get(p)?;
            if node.layout.scroll {
                offset.y -= node.scroll.current();
            }
            current = node.parent;
        }
        Ok(offset)
    }

    /// Where the node is drawn: its unscrolled area moved by every scrolling
    /// ancestor's value.
    pub fn render_area(&mut self, id: NodeId) -> Result<Rect> {
        let area = self.area(id)?;
        Ok(area.translate(self.scroll_offset(id)?))
    }

    /// The visible part of a node's render area after clipping by every
    /// scrolling ancestor's rendered content area. `None` when fully clipped.
    pub fn clip_area(&mut self, id: NodeId) -> Result<Option<Rect>> {
        let mut clipped = self.render_area(id)?;
        let mut current = self.get(id)?.parent;
        while let Some(p) = current {
            let node = self.get(p)?;
            let parent = node.parent;
            if node.layout.scroll {
                let pad = node.layout.scaled_child_padding(self.config.scale);
                let content = self.render_area(p)?.inset(pad);
                match clipped.intersect(&content) {
                    Some(r) => clipped = r,
                    None => return Ok(None),
                }
            }
            current = parent;
        }
        Ok(Some(clipped))
    }

    /// Find the deepest visible node whose clipped render area contains the
    /// point. Later roots and later siblings take precedence.
    pub fn locate(&mut self, point: Vec2) -> Result<Option<NodeId>> {
        self.update()?;
        let mut result = None;
        for root in self.roots.clone() {
            self.locate_recursive(root, point, &mut result)?;
        }
        Ok(result)
    }

    /// Hit-test a subtree, leaving the last match in `result`.
    fn locate_recursive(
        &mut self,
        id: NodeId,
        point: Vec2,
        result: &mut Option<NodeId>,
    ) -> Result<()> {
        if self.get(id)?.hidden {
            return Ok(());
        }
        let hit = self
            .clip_area(id)?
            .is_some_and(|r| r.contains_point(point));
        if hit {
            *result = Some(id);
        }
        // Scrolled content can extend beyond its parent, so children are
        // searched even on a miss; clipping keeps them honest.
        for child in self.get(id)?.children.clone() {
            self.locate_recursive(child, point, result)?;
        }
        Ok(())
    }

    /// The union of a node's unscrolled area with every visible descendant's.
    pub fn total_covered_area(&mut self, id: NodeId) -> Result<Rect> {
        self.area(id)?;
        self.covered_area(id)
    }

    /// [`Self::total_covered_area`] without the recompute.
    pub(crate) fn covered_area(&self, id: NodeId) -> Result<Rect> {
        let node = self.get(id)?;
        let mut covered = node.area;
        for child in &node.children {
            if self.get(*child)?.hidden {
                continue;
            }
            covered = covered.union(&self.covered_area(*child)?);
        }
        Ok(covered)
    }

    /// Assert structural invariants on the node tree in debug builds.
    #[cfg(debug_assertions)]
    pub(crate) fn debug_assert_tree_invariants(&self) {
        let mut seen_roots = HashSet::with_capacity(self.roots.len());
        for root in &self.roots {
            debug_assert!(seen_roots.insert(*root), "duplicate root {root:?}");
            debug_assert!(
                self.nodes.get(*root).is_some_and(|n| n.parent.is_none()),
                "root {root:?} missing or attached"
            );
        }
        for (id, node) in self.nodes.iter() {
            if node.parent.is_none() {
                debug_assert!(seen_roots.contains(&id), "parentless {id:?} not a root");
            }
            let mut seen = HashSet::with_capacity(node.children.len());
            for child in &node.children {
                debug_assert!(seen.insert(*child), "duplicate child {child:?} under {id:?}");
                debug_assert!(
                    self.nodes
                        .get(*child)
                        .is_some_and(|c| c.parent == Some(id)),
                    "child {child:?} parent mismatch under {id:?}"
                );
            }
            if let Some(parent) = node.parent {
                debug_assert!(
                    self.nodes
                        .get(parent)
                        .is_some_and(|p| p.children.contains(&id)),
                    "parent {parent:?} missing child {id:?}"
                );
            }
        }
    }

    #[cfg(not(debug_assertions))]
    /// No-op in release builds.
    pub(crate) fn debug_assert_tree_invariants(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{layout::Anchor, widgets::Group};

    fn tree() -> Tree {
        Tree::new(Rect::new(0.0, 0.0, 200.0, 100.0))
    }

    #[test]
    fn attach_rejects_bad_links() {
        let mut t = tree();
        let a = t.insert(Layout::fill(), Group);
        let b = t.insert(Layout::fill(), Group);
        t.attach(a, b).unwrap();
        assert_eq!(t.attach(a, b), Err(Error::AlreadyAttached(b)));
        assert_eq!(
            t.attach(b, a),
            Err(Error::WouldCreateCycle { parent: b, child: a })
        );
        assert_eq!(
            t.attach(a, a),
            Err(Error::WouldCreateCycle { parent: a, child: a })
        );
        assert_eq!(t.roots(), &[a]);
    }

    #[test]
    fn attach_at_orders_children() {
        let mut t = tree();
        let p = t.insert(Layout::fill(), Group);
        let a = t.insert_child(p, Layout::fill(), Group).unwrap();
        let b = t.insert(Layout::fill(), Group);
        t.attach_at(p, b, 0).unwrap();
        let c = t.insert(Layout::fill(), Group);
        t.attach_at(p, c, 99).unwrap();
        assert_eq!(t.children(p).unwrap(), &[b, a, c]);
    }

    #[test]
    fn remove_subtree_invalidates_handles() {
        let mut t = tree();
        let p = t.insert(Layout::fill(), Group);
        let a = t.insert_child(p, Layout::fill(), Group).unwrap();
        let aa = t.insert_child(a, Layout::fill(), Group).unwrap();
        t.remove_subtree(a).unwrap();
        assert!(!t.contains(a) && !t.contains(aa));
        assert_eq!(t.area(aa), Err(Error::NodeNotFound(aa)));
        assert!(t.children(p).unwrap().is_empty());
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn named_roots() {
        let mut t = tree();
        let a = t.insert(Layout::fill(), Group);
        let b = t.insert(Layout::fill(), Group);
        t.add_root("main", a).unwrap();
        assert_eq!(t.add_root("main", b), Err(Error::DuplicateRoot("main".into())));
        assert_eq!(t.add_root(" ", b), Err(Error::InvalidName(" ".into())));
        assert_eq!(t.root_by_name("main"), Some(a));
        assert_eq!(t.remove_root("main").unwrap(), Some(a));
        assert!(!t.contains(a));
        assert_eq!(t.remove_root("main").unwrap(), None);
    }

    #[test]
    fn lazy_recompute() {
        let mut t = tree();
        let root = t.insert(Layout::fill(), Group);
        let child = t
            .insert_child(root, Layout::new(Anchor::TopLeft, (50.0, 20.0)), Group)
            .unwrap();
        assert_eq!(t.area(child).unwrap(), Rect::new(0.0, 0.0, 50.0, 20.0));
        let before = t.metrics();

        // batched mutations cost nothing until the next read
        t.with_layout_of(child, |l| l.offset = Vec2::new(5.0, 5.0))
            .unwrap();
        t.with_layout_of(child, |l| l.anchor = Anchor::BottomRight)
            .unwrap();
        assert_eq!(t.metrics(), before);
        assert!(t.is_dirty(child).unwrap());
        assert!(!t.is_dirty(root).unwrap());

        assert_eq!(t.area(child).unwrap(), Rect::new(145.0, 75.0, 50.0, 20.0));
        assert_eq!((t.metrics() - before).force_area_updates, 1);
        // clean reads are free
        let before = t.metrics();
        t.area(child).unwrap();
        assert_eq!(t.metrics(), before);
    }

    #[test]
    fn auto_anchor_dirties_parent() {
        let mut t = tree();
        let root = t.insert(Layout::fill(), Group);
        let a = t
            .insert_child(root, Layout::new(Anchor::AutoLeft, (1.0, 20.0)), Group)
            .unwrap();
        t.update().unwrap();
        assert!(!t.is_dirty(root).unwrap());
        t.with_layout_of(a, |l| l.size.y = 30.0).unwrap();
        assert!(t.is_dirty(root).unwrap());
    }

    #[test]
    fn viewport_change_dirties_roots() {
        let mut t = tree();
        let root = t.insert(Layout::fill(), Group);
        assert_eq!(t.area(root).unwrap(), Rect::new(0.0, 0.0, 200.0, 100.0));
        t.set_viewport(Rect::new(0.0, 0.0, 50.0, 50.0));
        assert!(t.is_dirty(root).unwrap());
        assert_eq!(t.area(root).unwrap(), Rect::new(0.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn events_recorded_when_enabled() {
        let mut t = tree();
        let root = t.insert(Layout::fill(), Group);
        t.area(root).unwrap();
        assert!(t.drain_events().is_empty());

        t.set_config(LayoutConfig::default().with_events(true));
        t.area(root).unwrap();
        assert_eq!(
            t.drain_events(),
            vec![LayoutEvent::AreaUpdated {
                node: root,
                area: Rect::new(0.0, 0.0, 200.0, 100.0)
            }]
        );
    }
}
