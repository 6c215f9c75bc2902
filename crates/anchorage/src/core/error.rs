use std::{io, result::Result as StdResult};

use thiserror::Error;

use crate::NodeId;

/// Result type for anchorage operations.
pub type Result<T> = StdResult<T, Error>;

/// Layout engine error type.
///
/// Structural and configuration errors are fatal for the call that produced
/// them. Degenerate geometry (zero or negative extents) is never reported here.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    #[error("node not found: {0:?}")]
    /// The handle does not refer to a live node.
    NodeNotFound(NodeId),
    #[error("node already attached: {0:?}")]
    /// The node already has a parent.
    AlreadyAttached(NodeId),
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    /// The attach would make a node its own ancestor.
    WouldCreateCycle {
        /// Requested parent.
        parent: NodeId,
        /// Requested child.
        child: NodeId,
    },
    #[error("root name already in use: {0}")]
    /// A named root with this name already exists.
    DuplicateRoot(String),
    #[error("invalid root name: {0:?}")]
    /// Root names must be non-empty.
    InvalidName(String),

    #[error("{0:?} scrolls its content and also sizes its height from its children")]
    /// Vertical scrolling combined with height auto-sizing on one node.
    ScrollWithAutoHeight(NodeId),
    #[error("child {child:?} of scrolling node {container:?} uses a static anchor")]
    /// A scroll container's child is not auto-anchored.
    StaticAnchorInScroll {
        /// The scrolling node.
        container: NodeId,
        /// The offending child.
        child: NodeId,
    },
    #[error("scrolling node {inner:?} is nested directly inside scrolling node {outer:?}")]
    /// Two scroll containers nested directly.
    NestedScroll {
        /// The outer scrolling node.
        outer: NodeId,
        /// The inner scrolling node.
        inner: NodeId,
    },
    #[error("auto-size of {node:?} did not converge after {iterations} iterations")]
    /// Auto-size recursion crossed the configured cap.
    NonConvergent {
        /// The node being auto-sized.
        node: NodeId,
        /// Number of recursions performed.
        iterations: usize,
    },

    #[error("io: {0}")]
    /// Writing debug output failed.
    Io(String),
    #[error("config: {0}")]
    /// Configuration could not be parsed.
    Config(String),
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}
