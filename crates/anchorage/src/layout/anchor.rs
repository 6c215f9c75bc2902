use serde::{Deserialize, Serialize};

use crate::geom::{Rect, Vec2};

/// Where an item attaches inside its parent's content area.
///
/// The first nine variants form a static 3×3 grid. The `Auto*` variants flow
/// relative to older siblings: `AutoLeft`, `AutoCenter` and `AutoRight` stack
/// below the lowest older sibling, while the `AutoInline*` variants sit to the
/// right of the nearest older sibling and wrap to a new line when they don't
/// fit. The `*IgnoreOverflow` twins never wrap.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Anchor {
    /// Top left corner.
    #[default]
    TopLeft,
    /// Middle of the top edge.
    TopCenter,
    /// Top right corner.
    TopRight,
    /// Middle of the left edge.
    CenterLeft,
    /// Center.
    Center,
    /// Middle of the right edge.
    CenterRight,
    /// Bottom left corner.
    BottomLeft,
    /// Middle of the bottom edge.
    BottomCenter,
    /// Bottom right corner.
    BottomRight,

    /// Below the lowest older sibling, aligned left.
    AutoLeft,
    /// Below the lowest older sibling, centered.
    AutoCenter,
    /// Below the lowest older sibling, aligned right.
    AutoRight,
    /// Right of the nearest older sibling, top-aligned to it, or on a new line
    /// if it doesn't fit.
    AutoInline,
    /// Like `AutoInline`, vertically centered against the older sibling.
    AutoInlineCenter,
    /// Like `AutoInline`, aligned to the older sibling's bottom edge.
    AutoInlineBottom,
    /// Right of the nearest older sibling, regardless of overflow.
    AutoInlineIgnoreOverflow,
    /// Like `AutoInlineCenter`, regardless of overflow.
    AutoInlineCenterIgnoreOverflow,
    /// Like `AutoInlineBottom`, regardless of overflow.
    AutoInlineBottomIgnoreOverflow,
}

impl Anchor {
    /// Every anchor, static variants first.
    pub const ALL: [Self; 18] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::CenterLeft,
        Self::Center,
        Self::CenterRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
        Self::AutoLeft,
        Self::AutoCenter,
        Self::AutoRight,
        Self::AutoInline,
        Self::AutoInlineCenter,
        Self::AutoInlineBottom,
        Self::AutoInlineIgnoreOverflow,
        Self::AutoInlineCenterIgnoreOverflow,
        Self::AutoInlineBottomIgnoreOverflow,
    ];

    /// Does this anchor flow relative to older siblings?
    pub fn is_auto(self) -> bool {
        self.static_counterpart() != self
    }

    /// Is this one of the inline (beside-sibling) variants?
    pub fn is_inline(self) -> bool {
        matches!(
            self,
            Self::AutoInline
                | Self::AutoInlineCenter
                | Self::AutoInlineBottom
                | Self::AutoInlineIgnoreOverflow
                | Self::AutoInlineCenterIgnoreOverflow
                | Self::AutoInlineBottomIgnoreOverflow
        )
    }

    /// Is this an inline variant that never wraps?
    pub fn is_ignore_overflow(self) -> bool {
        matches!(
            self,
            Self::AutoInlineIgnoreOverflow
                | Self::AutoInlineCenterIgnoreOverflow
                | Self::AutoInlineBottomIgnoreOverflow
        )
    }

    /// Does the item's top edge attach to the parent's top edge (or to a
    /// sibling, for flow anchors)?
    pub fn is_top_aligned(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopCenter | Self::TopRight) || self.is_auto()
    }

    /// Does the item's left edge attach to the parent's left edge (or to a
    /// sibling, for inline anchors)?
    pub fn is_left_aligned(self) -> bool {
        matches!(
            self,
            Self::TopLeft | Self::CenterLeft | Self::BottomLeft | Self::AutoLeft
        ) || self.is_inline()
    }

    /// The static anchor an auto anchor starts from before flow adjustments.
    /// Static anchors map to themselves.
    pub fn static_counterpart(self) -> Self {
        match self {
            Self::AutoLeft
            | Self::AutoInline
            | Self::AutoInlineCenter
            | Self::AutoInlineBottom
            | Self::AutoInlineIgnoreOverflow
            | Self::AutoInlineCenterIgnoreOverflow
            | Self::AutoInlineBottomIgnoreOverflow => Self::TopLeft,
            Self::AutoCenter => Self::TopCenter,
            Self::AutoRight => Self::TopRight,
            other => other,
        }
    }

    /// Position an item of `size` inside `parent`, moved inward from the
    /// attached edge by `offset`. Auto anchors resolve like their static
    /// counterpart.
    pub fn resolve(self, parent: Rect, size: Vec2, offset: Vec2) -> Vec2 {
        let center = parent.center();
        let left = parent.left() + offset.x;
        let hcenter = center.x - size.x / 2.0 + offset.x;
        let right = parent.right() - size.x - offset.x;
        let top = parent.top() + offset.y;
        let vcenter = center.y - size.y / 2.0 + offset.y;
        let bottom = parent.bottom() - size.y - offset.y;

        let (x, y) = match self.static_counterpart() {
            Self::TopCenter => (hcenter, top),
            Self::TopRight => (right, top),
            Self::CenterLeft => (left, vcenter),
            Self::Center => (hcenter, vcenter),
            Self::CenterRight => (right, vcenter),
            Self::BottomLeft => (left, bottom),
            Self::BottomCenter => (hcenter, bottom),
            Self::BottomRight => (right, bottom),
            _ => (left, top),
        };
        Vec2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARENT: Rect = Rect::new(0.0, 0.0, 200.0, 100.0);
    const SIZE: Vec2 = Vec2::new(50.0, 20.0);

    #[test]
    fn static_grid() {
        let expected = [
            (Anchor::TopLeft, (0.0, 0.0)),
            (Anchor::TopCenter, (75.0, 0.0)),
            (Anchor::TopRight, (150.0, 0.0)),
            (Anchor::CenterLeft, (0.0, 40.0)),
            (Anchor::Center, (75.0, 40.0)),
            (Anchor::CenterRight, (150.0, 40.0)),
            (Anchor::BottomLeft, (0.0, 80.0)),
            (Anchor::BottomCenter, (75.0, 80.0)),
            (Anchor::BottomRight, (150.0, 80.0)),
        ];
        for (anchor, pos) in expected {
            assert_eq!(anchor.resolve(PARENT, SIZE, Vec2::zero()), pos.into(), "{anchor:?}");
        }
    }

    #[test]
    fn offset_moves_inward() {
        let off = Vec2::new(5.0, 3.0);
        assert_eq!(
            Anchor::TopLeft.resolve(PARENT, SIZE, off),
            Vec2::new(5.0, 3.0)
        );
        assert_eq!(
            Anchor::BottomRight.resolve(PARENT, SIZE, off),
            Vec2::new(145.0, 77.0)
        );
        assert_eq!(
            Anchor::Center.resolve(PARENT, SIZE, off),
            Vec2::new(80.0, 43.0)
        );
    }

    #[test]
    fn auto_anchors_start_from_top_row() {
        let off = Vec2::zero();
        assert_eq!(
            Anchor::AutoLeft.resolve(PARENT, SIZE, off),
            Anchor::TopLeft.resolve(PARENT, SIZE, off)
        );
        assert_eq!(
            Anchor::AutoCenter.resolve(PARENT, SIZE, off),
            Vec2::new(75.0, 0.0)
        );
        assert_eq!(
            Anchor::AutoRight.resolve(PARENT, SIZE, off),
            Vec2::new(150.0, 0.0)
        );
        assert_eq!(
            Anchor::AutoInlineBottomIgnoreOverflow.resolve(PARENT, SIZE, off),
            Vec2::zero()
        );
    }

    #[test]
    fn classification() {
        let autos = Anchor::ALL.iter().filter(|a| a.is_auto()).count();
        assert_eq!(autos, 9);
        assert_eq!(Anchor::ALL.iter().filter(|a| a.is_inline()).count(), 6);
        assert!(Anchor::AutoRight.is_top_aligned());
        assert!(!Anchor::AutoRight.is_left_aligned());
        assert!(Anchor::AutoInlineCenter.is_left_aligned());
        assert!(!Anchor::CenterLeft.is_top_aligned());
        assert!(Anchor::CenterLeft.is_left_aligned());
        assert!(!Anchor::BottomRight.is_top_aligned());
    }
}
