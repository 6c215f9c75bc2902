//! Anchorage: a retained-mode, anchor-based layout engine.
//!
//! Nodes live in a [`Tree`] arena. Each carries a [`Layout`] that says where it
//! attaches inside its parent, how big it is, and whether it sizes itself from
//! its children, flows after its older siblings, scrolls, or squishes
//! overlapping children. Areas are computed lazily when read.
//!
//! # Quick Start
//!
//! - [`Tree`] - The arena and layout entry points
//! - [`Layout`] - Per-node layout configuration
//! - [`Widget`] - Per-node behavior hooks
//!
//! # Module Organization
//!
//! - [`geom`] - Geometry primitives (Vec2, Rect, Padding)
//! - [`layout`] - Anchors, flow, scroll and squish
//! - [`widgets`] - Built-in widget implementations

#![warn(missing_docs)]

// Internal core module - re-export specific items below
mod core;

// Public modules
pub mod layout;
pub mod testing;
pub mod widget;
pub mod widgets;

pub use anchorage_geom as geom;
pub use core::{Node, NodeId, Tree, config, dump, error, metrics};

pub use config::LayoutConfig;
pub use layout::{Anchor, Layout};
pub use metrics::{LayoutEvent, Metrics};
pub use widget::Widget;
