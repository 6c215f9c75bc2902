use slotmap::new_key_type;

new_key_type! {
    /// Opaque handle for a layout item stored in the [`Tree`](crate::Tree) arena.
    ///
    /// Handles stay valid until the item is removed; a removed item's handle
    /// is never reused for a different item.
    pub struct NodeId;
}
