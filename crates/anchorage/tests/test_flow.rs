//! Integration tests for auto-anchor flow between siblings.

#[cfg(test)]
mod tests {
    use anchorage::{
        Anchor, Layout, NodeId, Tree,
        error::Result,
        geom::{Rect, Vec2},
        widgets::{Block, Group},
    };

    fn container(t: &mut Tree) -> NodeId {
        t.insert(Layout::new(Anchor::TopLeft, (200.0, 100.0)), Group)
    }

    fn positions(t: &mut Tree, ids: &[NodeId]) -> Result<Vec<Vec2>> {
        ids.iter().map(|id| Ok(t.area(*id)?.pos())).collect()
    }

    #[test]
    fn inline_items_wrap() -> Result<()> {
        let mut t = Tree::new(Rect::new(0.0, 0.0, 200.0, 100.0));
        let root = container(&mut t);
        let mut items = Vec::new();
        for _ in 0..3 {
            items.push(t.insert_child(
                root,
                Layout::new(Anchor::AutoInline, (80.0, 20.0)),
                Group,
            )?);
        }
        assert_eq!(
            positions(&mut t, &items)?,
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(80.0, 0.0),
                Vec2::new(0.0, 20.0),
            ]
        );
        Ok(())
    }

    #[test]
    fn inline_fits_exactly() -> Result<()> {
        let mut t = Tree::new(Rect::new(0.0, 0.0, 200.0, 100.0));
        let root = container(&mut t);
        let a = t.insert_child(root, Layout::new(Anchor::AutoInline, (100.0, 20.0)), Group)?;
        let b = t.insert_child(root, Layout::new(Anchor::AutoInline, (100.0, 20.0)), Group)?;
        assert_eq!(t.area(a)?, Rect::new(0.0, 0.0, 100.0, 20.0));
        assert_eq!(t.area(b)?, Rect::new(100.0, 0.0, 100.0, 20.0));
        Ok(())
    }

    #[test]
    fn auto_left_stacks_with_offset() -> Result<()> {
        let mut t = Tree::new(Rect::new(0.0, 0.0, 200.0, 100.0));
        let root = container(&mut t);
        let layout = Layout::new(Anchor::AutoLeft, (1.0, 20.0)).offset(0.0, 2.0);
        let a = t.insert_child(root, layout, Group)?;
        let b = t.insert_child(root, layout, Group)?;
        assert_eq!(t.area(a)?, Rect::new(0.0, 2.0, 200.0, 20.0));
        assert_eq!(t.area(b)?, Rect::new(0.0, 24.0, 200.0, 20.0));
        Ok(())
    }

    #[test]
    fn auto_right_and_center() -> Result<()> {
        let mut t = Tree::new(Rect::new(0.0, 0.0, 200.0, 100.0));
        let root = container(&mut t);
        let a = t.insert_child(root, Layout::new(Anchor::AutoLeft, (1.0, 10.0)), Group)?;
        let b = t.insert_child(
            root,
            Layout::new(Anchor::AutoRight, (50.0, 10.0)).offset(5.0, 0.0),
            Group,
        )?;
        let c = t.insert_child(root, Layout::new(Anchor::AutoCenter, (40.0, 10.0)), Group)?;
        assert_eq!(t.area(a)?.pos(), Vec2::new(0.0, 0.0));
        assert_eq!(t.area(b)?.pos(), Vec2::new(145.0, 10.0));
        assert_eq!(t.area(c)?.pos(), Vec2::new(80.0, 20.0));
        Ok(())
    }

    #[test]
    fn inline_vertical_alignment() -> Result<()> {
        let mut t = Tree::new(Rect::new(0.0, 0.0, 200.0, 100.0));
        let root = container(&mut t);
        t.insert_child(
            root,
            Layout::new(Anchor::TopLeft, (40.0, 30.0)).offset(0.0, 10.0),
            Group,
        )?;
        let center = t.insert_child(
            root,
            Layout::new(Anchor::AutoInlineCenter, (40.0, 10.0)),
            Group,
        )?;
        let bottom = t.insert_child(
            root,
            Layout::new(Anchor::AutoInlineBottom, (40.0, 10.0)),
            Group,
        )?;
        // centered on the 30-high item at y 10
        assert_eq!(t.area(center)?.pos(), Vec2::new(40.0, 20.0));
        // bottom-aligned to the centered item
        assert_eq!(t.area(bottom)?.pos(), Vec2::new(80.0, 20.0));
        Ok(())
    }

    #[test]
    fn ignore_overflow_never_wraps() -> Result<()> {
        let mut t = Tree::new(Rect::new(0.0, 0.0, 200.0, 100.0));
        let root = container(&mut t);
        let layout = Layout::new(Anchor::AutoInlineIgnoreOverflow, (120.0, 20.0));
        let a = t.insert_child(root, layout, Group)?;
        let b = t.insert_child(root, layout, Group)?;
        assert_eq!(t.area(a)?.pos(), Vec2::new(0.0, 0.0));
        assert_eq!(t.area(b)?.pos(), Vec2::new(120.0, 0.0));
        Ok(())
    }

    #[test]
    fn hidden_siblings_are_skipped() -> Result<()> {
        let mut t = Tree::new(Rect::new(0.0, 0.0, 200.0, 100.0));
        let root = container(&mut t);
        let layout = Layout::new(Anchor::AutoLeft, (1.0, 20.0));
        let a = t.insert_child(root, layout, Group)?;
        let b = t.insert_child(root, layout, Group)?;
        let c = t.insert_child(root, layout, Group)?;
        assert_eq!(t.area(c)?.y, 40.0);

        assert!(t.set_hidden(b, true)?);
        assert_eq!(t.area(c)?.y, 20.0);
        assert_eq!(t.area(a)?.y, 0.0);

        t.set_hidden(b, false)?;
        assert_eq!(t.area(c)?.y, 40.0);
        Ok(())
    }

    #[test]
    fn non_attachable_siblings_are_skipped() -> Result<()> {
        let mut t = Tree::new(Rect::new(0.0, 0.0, 200.0, 100.0));
        let root = container(&mut t);
        t.insert_child(root, Layout::new(Anchor::AutoLeft, (50.0, 20.0)), Group)?;
        t.insert_child(
            root,
            Layout::new(Anchor::BottomLeft, (1.0, 30.0)).no_auto_attach(),
            Group,
        )?;
        let c = t.insert_child(root, Layout::new(Anchor::AutoInline, (50.0, 10.0)), Group)?;
        assert_eq!(t.area(c)?.pos(), Vec2::new(50.0, 0.0));
        Ok(())
    }

    #[test]
    fn static_siblings_are_attachable() -> Result<()> {
        let mut t = Tree::new(Rect::new(0.0, 0.0, 200.0, 100.0));
        let root = container(&mut t);
        t.insert_child(root, Layout::new(Anchor::BottomLeft, (1.0, 30.0)), Group)?;
        let c = t.insert_child(root, Layout::new(Anchor::AutoLeft, (50.0, 10.0)), Group)?;
        assert_eq!(t.area(c)?.pos(), Vec2::new(0.0, 100.0));
        Ok(())
    }

    #[test]
    fn intrinsic_sizes_flow() -> Result<()> {
        let mut t = Tree::new(Rect::new(0.0, 0.0, 50.0, 100.0));
        let root = t.insert(Layout::fill(), Group);
        let mut ids = Vec::new();
        for _ in 0..4 {
            let layout = Layout::new(Anchor::AutoInline, (1.0, 1.0));
            ids.push(t.insert_child(root, layout, Block::new(20.0, 10.0))?);
        }
        assert_eq!(
            positions(&mut t, &ids)?,
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(20.0, 0.0),
                Vec2::new(0.0, 10.0),
                Vec2::new(20.0, 10.0),
            ]
        );
        Ok(())
    }
}
