use crate::geom::{Direction, Rect};

/// One sibling in a squishing group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquishItem {
    /// The sibling's area after independent placement.
    pub area: Rect,
    /// Lower priorities move out of the way of higher ones.
    pub priority: i32,
    /// Hidden siblings neither squish nor get squished.
    pub hidden: bool,
}

/// Trim `rect` so it no longer overlaps `other`, moving the edge indicated by
/// `dir` to the facing edge of `other`.
pub fn trim(rect: Rect, other: Rect, dir: Direction) -> Rect {
    match dir {
        Direction::Left => {
            let x = rect.x.max(other.right());
            Rect::new(x, rect.y, (rect.right() - x).max(0.0), rect.h)
        }
        Direction::Right => Rect::new(
            rect.x,
            rect.y,
            (rect.right().min(other.left()) - rect.x).max(0.0),
            rect.h,
        ),
        Direction::Up => {
            let y = rect.y.max(other.bottom());
            Rect::new(rect.x, y, rect.w, (rect.bottom() - y).max(0.0))
        }
        Direction::Down => Rect::new(
            rect.x,
            rect.y,
            rect.w,
            (rect.bottom().min(other.top()) - rect.y).max(0.0),
        ),
    }
}

/// Of the four single-edge trims of `rect` against `other`, the one keeping
/// the most area. Earlier candidates win ties, in the order left edge, right
/// edge, top edge, bottom edge.
pub fn best_trim(rect: Rect, other: Rect) -> Rect {
    let mut best = trim(rect, other, Direction::Left);
    for dir in [Direction::Right, Direction::Up, Direction::Down] {
        let candidate = trim(rect, other, dir);
        if candidate.area() > best.area() {
            best = candidate;
        }
    }
    best
}

/// Resolve overlaps in a squishing group.
///
/// Items are processed lowest priority first, with ties in slice order. Each
/// visible item is trimmed against every other visible item's current area,
/// so items processed later see the already-trimmed areas of earlier ones.
/// The returned areas line up with `items`, and no two visible results
/// overlap.
pub fn squish(items: &[SquishItem]) -> Vec<Rect> {
    let mut areas: Vec<Rect> = items.iter().map(|i| i.area).collect();
    let mut order: Vec<usize> = (0..items.len()).filter(|i| !items[*i].hidden).collect();
    order.sort_by_key(|i| items[*i].priority);

    for &i in &order {
        let mut rect = areas[i];
        for &j in &order {
            if i != j && rect.overlaps(&areas[j]) {
                rect = best_trim(rect, areas[j]);
            }
        }
        areas[i] = rect;
    }
    areas
}

#[cfg(test)]
mod tests {
    use proptest::{collection, prelude::*};

    use super::*;

    fn item(x: f32, y: f32, w: f32, h: f32, priority: i32) -> SquishItem {
        SquishItem {
            area: Rect::new(x, y, w, h),
            priority,
            hidden: false,
        }
    }

    #[test]
    fn lower_priority_yields() {
        let items = [item(0.0, 0.0, 100.0, 50.0, 1), item(80.0, 0.0, 100.0, 50.0, 0)];
        let out = squish(&items);
        assert_eq!(out[0], items[0].area);
        assert_eq!(out[1], Rect::new(100.0, 0.0, 80.0, 50.0));
    }

    #[test]
    fn picks_largest_remaining_area() {
        // Overlap is a thin horizontal band at the top of the low item.
        let items = [item(0.0, 0.0, 100.0, 20.0, 1), item(0.0, 15.0, 100.0, 50.0, 0)];
        let out = squish(&items);
        assert_eq!(out[1], Rect::new(0.0, 20.0, 100.0, 45.0));
    }

    #[test]
    fn ties_processed_in_order() {
        let items = [item(0.0, 0.0, 60.0, 10.0, 0), item(50.0, 0.0, 60.0, 10.0, 0)];
        let out = squish(&items);
        // the first is squished against the untouched second
        assert_eq!(out[0], Rect::new(0.0, 0.0, 50.0, 10.0));
        assert_eq!(out[1], items[1].area);
    }

    #[test]
    fn identical_rects_degenerate() {
        let items = [item(0.0, 0.0, 10.0, 10.0, 0), item(0.0, 0.0, 10.0, 10.0, 0)];
        let out = squish(&items);
        assert_eq!(out[0].area(), 0.0);
        assert_eq!(out[1], items[1].area);
    }

    #[test]
    fn hidden_items_ignored() {
        let mut hidden = item(0.0, 0.0, 100.0, 100.0, 10);
        hidden.hidden = true;
        let items = [hidden, item(10.0, 10.0, 10.0, 10.0, 0)];
        assert_eq!(squish(&items), vec![items[0].area, items[1].area]);
    }

    fn item_strategy() -> impl Strategy<Value = SquishItem> {
        (0i32..100, 0i32..100, 1i32..80, 1i32..80, -3i32..3, proptest::bool::weighted(0.2))
            .prop_map(|(x, y, w, h, priority, hidden)| SquishItem {
                area: Rect::new(x as f32, y as f32, w as f32, h as f32),
                priority,
                hidden,
            })
    }

    proptest! {
        #[test]
        fn visible_results_never_overlap(items in collection::vec(item_strategy(), 0..8)) {
            let out = squish(&items);
            prop_assert_eq!(out.len(), items.len());
            for i in 0..items.len() {
                if items[i].hidden {
                    prop_assert_eq!(out[i], items[i].area);
                    continue;
                }
                prop_assert!(out[i].area() <= items[i].area.area());
                for j in (i + 1)..items.len() {
                    if !items[j].hidden {
                        prop_assert!(!out[i].overlaps(&out[j]), "{:?} {:?}", out[i], out[j]);
                    }
                }
            }
        }

        #[test]
        fn highest_priority_keeps_its_area(items in collection::vec(item_strategy(), 1..6)) {
            let top = items
                .iter()
                .enumerate()
                .filter(|(_, i)| !i.hidden)
                .max_by_key(|(n, i)| (i.priority, *n))
                .map(|(n, _)| n);
            let out = squish(&items);
            if let Some(top) = top {
                // the last one processed is trimmed against areas that no longer overlap it
                prop_assert_eq!(out[top], items[top].area);
            }
        }
    }
}
