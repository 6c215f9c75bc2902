//! The recursive layout walk.

use tracing::{debug, trace, warn};

use crate::{
    config::LayoutConfig,
    core::{id::NodeId, node::Node, tree::Tree},
    error::{Error, Result},
    geom::{Rect, Vec2},
    layout::{
        Layout,
        flow::{self, Sibling},
        squish::{self, SquishItem},
    },
    metrics::LayoutEvent,
};

/// Layout traversal over a tree. A pass lays out one subtree and leaves every
/// node in it clean.
pub(crate) struct LayoutPass<'a> {
    /// Tree being updated.
    tree: &'a mut Tree,
    /// Settings for this pass.
    config: LayoutConfig,
}

impl<'a> LayoutPass<'a> {
    /// Create a new layout pass.
    pub(crate) fn new(tree: &'a mut Tree) -> Self {
        let config = tree.config;
        Self { tree, config }
    }

    /// Look up a node.
    fn node(&self, id: NodeId) -> Result<&Node> {
        self.tree.nodes.get(id).ok_or(Error::NodeNotFound(id))
    }

    /// Look up a node mutably.
    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.tree.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))
    }

    /// Position and size a node, then everything below it.
    ///
    /// A failed pass leaves the node dirty, so every later read runs into
    /// the same error instead of a half-computed area.
    pub(crate) fn layout_node(&mut self, id: NodeId) -> Result<()> {
        let r = self.settle_node(id);
        if r.is_err()
            && let Some(node) = self.tree.nodes.get_mut(id)
        {
            node.dirty = true;
        }
        r
    }

    /// The body of [`Self::layout_node`].
    ///
    /// Nodes that size from their children go around again with the size
    /// their children imply, until it stops changing or a size seen earlier
    /// in the loop comes round again. Clamps such as spill prevention can
    /// hold the placed size apart from the implied one forever, so both are
    /// remembered.
    fn settle_node(&mut self, id: NodeId) -> Result<()> {
        let node = self.node_mut(id)?;
        node.dirty = false;
        let layout = node.layout;
        self.tree.metrics.force_area_updates += 1;

        let eps = self.config.epsilon;
        let parent = self.parent_content(id)?;
        let older = self.older_siblings(id)?;
        let mut override_size: Option<Vec2> = None;
        let mut visited: Vec<Vec2> = Vec::new();
        let mut recursion = 0;

        loop {
            let intended = self
                .node(id)?
                .widget
                .actual_size(&layout, parent, self.config.scale);
            let size = override_size.unwrap_or(intended);
            let area = self.place(&layout, parent, size, &older);
            self.set_area_and_update_children(id, area)?;

            if !layout.sizes_from_children() {
                return Ok(());
            }

            let current = self.node(id)?.area.size();
            let (auto, relevant) = self.auto_size(id, &layout, intended)?;
            if auto.approx_eq(current, eps) || visited.iter().any(|v| v.approx_eq(auto, eps)) {
                return Ok(());
            }

            if recursion >= self.config.max_recursion {
                warn!(node = ?id, iterations = recursion, "auto-size did not converge");
                return Err(Error::NonConvergent {
                    node: id,
                    iterations: recursion,
                });
            }
            recursion += 1;
            visited.push(current);
            visited.push(auto);
            self.tree.metrics.recursions += 1;
            self.node_mut(id)?
                .widget
                .on_layout_recursion(recursion, relevant);
            self.tree.record(LayoutEvent::Recursion {
                node: id,
                iteration: recursion,
                child: relevant,
            });
            trace!(node = ?id, recursion, from = ?current, to = ?auto, "auto-size recursion");
            override_size = Some(auto);
        }
    }

    /// Store a node's area and lay out its children against it. This skips
    /// the node's own anchoring and auto-sizing.
    pub(crate) fn set_area_and_update_children(&mut self, id: NodeId, area: Rect) -> Result<()> {
        let node = self.node_mut(id)?;
        node.area = area;
        node.widget.on_area_updated(area);
        let layout = node.layout;
        let children = node.children.clone();
        self.tree.metrics.actual_area_updates += 1;
        self.tree.record(LayoutEvent::AreaUpdated { node: id, area });

        if layout.scroll {
            self.validate_scroll(id, &layout, &children)?;
        }
        for child in &children {
            self.layout_node(*child)?;
        }
        if layout.squish_children {
            self.squish_children(&children)?;
        }
        if layout.scroll {
            self.update_scroll_max(id, &layout, &children)?;
        }
        Ok(())
    }

    /// The area a node is placed in: its parent's area inset by the parent's
    /// child padding, or the viewport for a root.
    fn parent_content(&self, id: NodeId) -> Result<Rect> {
        match self.node(id)?.parent {
            Some(parent) => {
                let parent = self.node(parent)?;
                Ok(parent
                    .area
                    .inset(parent.layout.scaled_child_padding(self.config.scale)))
            }
            None => Ok(self.tree.viewport),
        }
    }

    /// What the flow resolver needs to know about a node.
    fn snapshot(&self, id: NodeId) -> Result<Sibling> {
        let node = self.node(id)?;
        Ok(Sibling {
            id,
            area: node.area,
            hidden: node.hidden,
            attachable: node.layout.can_auto_anchors_attach,
            anchor: node.layout.anchor,
        })
    }

    /// Snapshots of the siblings before `id`, oldest first.
    fn older_siblings(&self, id: NodeId) -> Result<Vec<Sibling>> {
        let Some(parent) = self.node(id)?.parent else {
            return Ok(Vec::new());
        };
        self.node(parent)?
            .children
            .iter()
            .take_while(|c| **c != id)
            .map(|c| self.snapshot(*c))
            .collect()
    }

    /// Snapshots of every child, oldest first.
    fn child_snapshots(&self, id: NodeId) -> Result<Vec<Sibling>> {
        self.node(id)?
            .children
            .iter()
            .map(|c| self.snapshot(*c))
            .collect()
    }

    /// Anchor, flow and clamp a node of the given size.
    fn place(&self, layout: &Layout, parent: Rect, size: Vec2, older: &[Sibling]) -> Rect {
        let offset = layout.scaled_offset(self.config.scale);
        let pos = layout.anchor.resolve(parent, size, offset);
        let pos = flow::resolve_auto(
            layout.anchor,
            pos,
            size,
            offset,
            parent,
            older,
            self.config.epsilon,
        );
        let mut area = Rect::from_pos_size(pos, size);
        if layout.prevent_parent_spill {
            area.x = area.x.max(parent.left());
            area.y = area.y.max(parent.top());
            if area.right() > parent.right() {
                area.w = parent.right() - area.x;
            }
            if area.bottom() > parent.bottom() {
                area.h = parent.bottom() - area.y;
            }
        }
        area
    }

    /// The size a node's children imply, and the child that decided it.
    fn auto_size(
        &self,
        id: NodeId,
        layout: &Layout,
        intended: Vec2,
    ) -> Result<(Vec2, Option<NodeId>)> {
        let area = self.node(id)?.area;
        let pad = layout.scaled_child_padding(self.config.scale);
        let children = self.child_snapshots(id)?;
        let mut size = area.size();
        let mut relevant = None;

        if layout.height_from_children {
            size.y = match flow::lowest_child(&children) {
                Some(c) => {
                    relevant = Some(c.id);
                    if c.anchor.is_top_aligned() {
                        c.area.bottom() - area.y + pad.bottom
                    } else {
                        c.area.h + pad.vertical()
                    }
                }
                None => 0.0,
            };
        }
        if layout.width_from_children {
            size.x = match flow::rightmost_child(&children) {
                Some(c) => {
                    relevant = Some(c.id);
                    if c.anchor.is_left_aligned() {
                        c.area.right() - area.x + pad.right
                    } else {
                        c.area.w + pad.horizontal()
                    }
                }
                None => 0.0,
            };
        }

        if layout.size_as_minimum {
            if layout.width_from_children {
                size.x = size.x.max(intended.x);
            }
            if layout.height_from_children {
                size.y = size.y.max(intended.y);
            }
        }
        if layout.size_as_maximum {
            if layout.width_from_children {
                size.x = size.x.min(intended.x);
            }
            if layout.height_from_children {
                size.y = size.y.min(intended.y);
            }
        }
        Ok((size, relevant))
    }

    /// Reject scroll containers that size from their children or hold
    /// children that don't flow.
    fn validate_scroll(&self, id: NodeId, layout: &Layout, children: &[NodeId]) -> Result<()> {
        let mut err = None;
        if layout.height_from_children {
            err = Some(Error::ScrollWithAutoHeight(id));
        }
        for child in children {
            if err.is_some() {
                break;
            }
            let child_layout = self.node(*child)?.layout;
            if child_layout.scroll {
                err = Some(Error::NestedScroll {
                    outer: id,
                    inner: *child,
                });
            } else if !child_layout.anchor.is_auto() {
                err = Some(Error::StaticAnchorInScroll {
                    container: id,
                    child: *child,
                });
            }
        }
        match err {
            Some(e) => {
                debug!(node = ?id, "invalid scroll configuration: {e}");
                Err(e)
            }
            None => Ok(()),
        }
    }

    /// Recompute the scroll range from the visible children's coverage.
    fn update_scroll_max(
        &mut self,
        id: NodeId,
        layout: &Layout,
        children: &[NodeId],
    ) -> Result<()> {
        let area = self.node(id)?.area;
        let pad = layout.scaled_child_padding(self.config.scale);
        let content_top = area.inset(pad).top();

        let mut lowest: Option<f32> = None;
        for child in children {
            if self.node(*child)?.hidden {
                continue;
            }
            let bottom = self.tree.covered_area(*child)?.bottom();
            lowest = Some(lowest.map_or(bottom, |l| l.max(bottom)));
        }
        let covered = lowest.map_or(0.0, |b| b - content_top);
        let max = covered - area.h + pad.vertical();
        self.node_mut(id)?.scroll.set_max(max);
        Ok(())
    }

    /// Squish overlapping children and re-lay out the ones that changed.
    fn squish_children(&mut self, children: &[NodeId]) -> Result<()> {
        let items = children
            .iter()
            .map(|c| {
                let node = self.node(*c)?;
                Ok(SquishItem {
                    area: node.area,
                    priority: node.layout.priority,
                    hidden: node.hidden,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let squished = squish::squish(&items);
        for ((child, item), area) in children.iter().zip(&items).zip(squished) {
            if !item.area.approx_eq(&area, self.config.epsilon) {
                trace!(node = ?child, from = ?item.area, to = ?area, "squished");
                self.tree.metrics.squishes += 1;
                self.set_area_and_update_children(*child, area)?;
            }
        }
        Ok(())
    }
}
