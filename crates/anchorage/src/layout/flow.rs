use crate::{
    NodeId,
    geom::{Rect, Vec2},
    layout::Anchor,
};

/// A snapshot of a sibling's state, as seen by the flow resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sibling {
    /// The sibling's node.
    pub id: NodeId,
    /// Its current unscrolled area.
    pub area: Rect,
    /// Hidden siblings never take part in flow or auto-size math.
    pub hidden: bool,
    /// Whether auto-anchored siblings may attach to it.
    pub attachable: bool,
    /// Its anchor.
    pub anchor: Anchor,
}

impl Sibling {
    /// Can auto anchors attach to this sibling?
    fn can_attach(&self) -> bool {
        !self.hidden && self.attachable
    }
}

/// The nearest attachable sibling before the item, in child order. `older`
/// holds the item's older siblings, oldest first.
pub fn older_sibling(older: &[Sibling]) -> Option<&Sibling> {
    older.iter().rev().find(|s| s.can_attach())
}

/// The attachable older sibling with the greatest bottom edge. Ties go to the
/// later sibling.
pub fn lowest_older_sibling(older: &[Sibling]) -> Option<&Sibling> {
    let mut lowest: Option<&Sibling> = None;
    for s in older.iter().filter(|s| s.can_attach()) {
        if lowest.is_none_or(|l| s.area.bottom() >= l.area.bottom()) {
            lowest = Some(s);
        }
    }
    lowest
}

/// The visible child reaching furthest down. Top-aligned children rank by
/// their bottom edge, others by their height. Ties go to the later child.
pub fn lowest_child(children: &[Sibling]) -> Option<&Sibling> {
    extreme_child(children, |c| {
        if c.anchor.is_top_aligned() {
            c.area.bottom()
        } else {
            c.area.h
        }
    })
}

/// The visible child reaching furthest right. Left-aligned children rank by
/// their right edge, others by their width. Ties go to the later child.
pub fn rightmost_child(children: &[Sibling]) -> Option<&Sibling> {
    extreme_child(children, |c| {
        if c.anchor.is_left_aligned() {
            c.area.right()
        } else {
            c.area.w
        }
    })
}

/// The visible child with the greatest rank. Later children win ties.
fn extreme_child(children: &[Sibling], rank: impl Fn(&Sibling) -> f32) -> Option<&Sibling> {
    let mut best: Option<(&Sibling, f32)> = None;
    for c in children.iter().filter(|c| !c.hidden) {
        let r = rank(c);
        if best.is_none_or(|(_, b)| r >= b) {
            best = Some((c, r));
        }
    }
    best.map(|(c, _)| c)
}

/// Adjust a statically resolved position for an auto anchor.
///
/// `pos` is the position the anchor's static counterpart produced, `size` is
/// the item's size and `offset` its scaled offset. Static anchors and items
/// without attachable older siblings keep `pos` unchanged.
pub fn resolve_auto(
    anchor: Anchor,
    pos: Vec2,
    size: Vec2,
    offset: Vec2,
    parent: Rect,
    older: &[Sibling],
    epsilon: f32,
) -> Vec2 {
    if !anchor.is_auto() {
        return pos;
    }

    if anchor.is_inline()
        && let Some(prev) = older_sibling(older)
    {
        let x = prev.area.right() + offset.x;
        if anchor.is_ignore_overflow() || x + size.x <= parent.right() + epsilon {
            let y = prev.area.y + offset.y;
            let y = match anchor {
                Anchor::AutoInlineCenter | Anchor::AutoInlineCenterIgnoreOverflow => {
                    y + (prev.area.h - size.y) / 2.0
                }
                Anchor::AutoInlineBottom | Anchor::AutoInlineBottomIgnoreOverflow => {
                    y + prev.area.h - size.y
                }
                _ => y,
            };
            return Vec2::new(x, y);
        }
    }

    match lowest_older_sibling(older) {
        Some(low) => Vec2::new(pos.x, low.area.bottom() + offset.y),
        None => pos,
    }
}
