//! Built-in widgets.

mod block;
mod group;

pub use block::Block;
pub use group::Group;
