//! Helpers for tests and benchmarks.

use std::{cell::RefCell, rc::Rc};

use rand::{Rng, seq::IndexedRandom};
use tracing::Level;
use tracing_subscriber::fmt;

use crate::{
    NodeId, Tree,
    error::Result,
    geom::{Padding, Rect, Vec2},
    layout::{Anchor, Layout},
    widget::Widget,
    widgets::{Block, Group},
};

/// Install a compact `tracing` subscriber that writes through the test
/// harness. Safe to call from every test.
pub fn init_tracing() {
    let format = fmt::format()
        .with_level(true)
        .with_line_number(true)
        .with_ansi(false)
        .without_time()
        .compact();
    let _ignored = fmt()
        .with_max_level(Level::TRACE)
        .with_test_writer()
        .event_format(format)
        .try_init();
}

/// A hook call observed by a [`Probe`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hook {
    /// [`Widget::on_layout_recursion`].
    Recursion(usize, Option<NodeId>),
    /// [`Widget::on_area_updated`].
    Area(Rect),
}

/// A shared log of hook calls.
pub type HookLog = Rc<RefCell<Vec<Hook>>>;

/// A widget that records every hook it receives, optionally with an
/// intrinsic size.
pub struct Probe {
    /// Shared with the test.
    pub log: HookLog,
    /// Intrinsic size, overriding the layout's declared size.
    pub size: Option<Vec2>,
}

impl Probe {
    /// A probe and the log it writes to.
    pub fn recording() -> (Self, HookLog) {
        let log = HookLog::default();
        (
            Self {
                log: log.clone(),
                size: None,
            },
            log,
        )
    }

    /// Give the probe an intrinsic size.
    pub fn with_size(mut self, w: f32, h: f32) -> Self {
        self.size = Some(Vec2::new(w, h));
        self
    }
}

impl Widget for Probe {
    fn actual_size(&self, layout: &Layout, parent: Rect, scale: f32) -> Vec2 {
        self.size
            .map_or_else(|| layout.resolve_size(parent, scale), |s| s * scale)
    }

    fn on_layout_recursion(&mut self, recursion: usize, relevant_child: Option<NodeId>) {
        self.log
            .borrow_mut()
            .push(Hook::Recursion(recursion, relevant_child));
    }

    fn on_area_updated(&mut self, area: Rect) {
        self.log.borrow_mut().push(Hook::Area(area));
    }
}

/// Count the recursion hooks in a log.
pub fn recursions(log: &HookLog) -> usize {
    log.borrow()
        .iter()
        .filter(|h| matches!(h, Hook::Recursion(..)))
        .count()
}

/// Build `depth` levels of nested groups below `parent`, each sizing its
/// height from its children, with `fanout` auto-anchored children per level
/// and fixed-size leaves at the bottom. Returns the first group.
pub fn nested_groups(
    tree: &mut Tree,
    parent: NodeId,
    depth: usize,
    fanout: usize,
) -> Result<NodeId> {
    let layout = Layout::new(Anchor::AutoLeft, (1.0, 1.0))
        .height_from_children()
        .child_padding(Padding::uniform(1.0));
    let group = tree.insert_child(parent, layout, Group)?;
    for _ in 0..fanout {
        if depth <= 1 {
            let leaf = Layout::new(Anchor::AutoInline, (1.0, 1.0));
            tree.insert_child(group, leaf, Block::new(20.0, 10.0))?;
        } else {
            nested_groups(tree, group, depth - 1, fanout)?;
        }
    }
    Ok(group)
}

/// Anchors exercised by [`random_tree`].
const RANDOM_ANCHORS: [Anchor; 8] = [
    Anchor::TopLeft,
    Anchor::TopCenter,
    Anchor::TopRight,
    Anchor::AutoLeft,
    Anchor::AutoRight,
    Anchor::AutoInline,
    Anchor::AutoInlineCenter,
    Anchor::AutoInlineBottomIgnoreOverflow,
];

/// A random layout for a node in [`random_tree`]. Heights are absolute and
/// every anchor is top-aligned, so no child's height or position depends on
/// its parent's height and height auto-sizing always converges.
pub fn random_layout(rng: &mut impl Rng) -> Layout {
    let anchor = *RANDOM_ANCHORS.choose(rng).unwrap_or(&Anchor::TopLeft);
    let size = Vec2::new(random_extent(rng), rng.random_range(2.0..60.0));
    let mut layout = Layout::new(anchor, size)
        .offset(rng.random_range(0.0..5.0), rng.random_range(0.0..5.0))
        .child_padding(Padding::uniform(rng.random_range(0.0..3.0)))
        .priority(rng.random_range(-2..3));
    layout.height_from_children = rng.random_bool(0.3);
    layout.size_as_minimum = rng.random_bool(0.2);
    layout.prevent_parent_spill = rng.random_bool(0.2);
    layout.can_auto_anchors_attach = rng.random_bool(0.9);
    layout.squish_children = rng.random_bool(0.1);
    layout
}

/// Either a parent fraction or an absolute size.
fn random_extent(rng: &mut impl Rng) -> f32 {
    if rng.random_bool(0.5) {
        rng.random_range(0.1..=1.0)
    } else {
        rng.random_range(2.0..80.0)
    }
}

/// Grow a random tree of `count` nodes below `root`. Each new node picks a
/// random existing node as its parent, and roughly one in ten is hidden.
pub fn random_tree(
    tree: &mut Tree,
    root: NodeId,
    count: usize,
    rng: &mut impl Rng,
) -> Result<Vec<NodeId>> {
    let mut nodes = vec![root];
    for _ in 0..count {
        let parent = *nodes.choose(rng).unwrap_or(&root);
        let layout = random_layout(rng);
        let id = tree.insert_child(parent, layout, Group)?;
        if rng.random_bool(0.1) {
            tree.set_hidden(id, true)?;
        }
        nodes.push(id);
    }
    Ok(nodes)
}
