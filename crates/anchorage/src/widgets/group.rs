use crate::widget::Widget;

/// A plain container. Its size comes entirely from its [`Layout`](crate::Layout).
#[derive(Debug, Default, Clone, Copy)]
pub struct Group;

impl Group {
    /// Create a new group.
    pub fn new() -> Self {
        Self
    }
}

impl Widget for Group {
    fn name(&self) -> String {
        "group".into()
    }
}
