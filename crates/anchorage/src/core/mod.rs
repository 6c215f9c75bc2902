//! Core engine types: the node arena, the layout pass and the ambient
//! concerns around them.

/// Engine configuration.
pub mod config;
/// Debug dump utilities.
pub mod dump;
/// Core error types.
pub mod error;
/// Node ID types.
pub mod id;
/// Layout counters and events.
pub mod metrics;
/// Node data stored in the arena.
pub mod node;
/// The recursive layout walk.
mod pass;
/// The node arena.
pub mod tree;

pub use id::NodeId;
pub use node::Node;
pub use tree::Tree;
