use std::io::Write;

use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use crate::{
    NodeId,
    core::tree::Tree,
    error::{Error, Result},
    geom::Rect,
};

/// Traverses a tree of nodes and returns a string showing each node's widget
/// name, layout flags and areas for visual display. Dirty areas are
/// recomputed first. This is a debug function.
pub fn dump(tree: &mut Tree, root: NodeId) -> Result<String> {
    tree.area(root)?;
    let mut buffer = Buffer::ansi();
    dump_node(&mut buffer, tree, root, 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Like [`dump`], without color codes.
pub fn dump_plain(tree: &mut Tree, root: NodeId) -> Result<String> {
    tree.area(root)?;
    let mut buffer = Buffer::no_color();
    dump_node(&mut buffer, tree, root, 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Format a rect for the dump.
fn fmt_rect(r: Rect) -> String {
    format!("x: {}, y: {}, w: {}, h: {}", r.x, r.y, r.w, r.h)
}

/// Helper to write an indented, colored label followed by a value.
fn write_field(buffer: &mut Buffer, indent: &str, label: &str, value: &str) -> Result<()> {
    write!(buffer, "{indent}  ")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(buffer, "{label}")?;
    buffer.reset()?;
    writeln!(buffer, " {value}")?;
    Ok(())
}

/// Walk a node subtree and emit formatted debug output.
fn dump_node(buffer: &mut Buffer, tree: &mut Tree, id: NodeId, level: usize) -> Result<()> {
    let node = tree.node(id).ok_or(Error::NodeNotFound(id))?;
    let indent = "    ".repeat(level);
    let layout = node.layout();
    let hidden = node.hidden();
    let area = node.area();
    let scroll = node.scroll();
    let children = node.children().to_vec();

    write!(buffer, "{indent}")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    write!(buffer, "{}", node.name())?;
    buffer.reset()?;
    write!(buffer, " {id:?} {:?}", layout.anchor)?;

    let mut indicators = Vec::new();
    if hidden {
        indicators.push(("hidden", Color::Yellow));
    }
    if layout.width_from_children {
        indicators.push(("auto-w", Color::Magenta));
    }
    if layout.height_from_children {
        indicators.push(("auto-h", Color::Magenta));
    }
    if layout.scroll {
        indicators.push(("scroll", Color::Blue));
    }
    if layout.squish_children {
        indicators.push(("squish", Color::Blue));
    }
    for (indicator, color) in indicators {
        write!(buffer, " ")?;
        buffer.set_color(ColorSpec::new().set_fg(Some(color)))?;
        write!(buffer, "{indicator}")?;
        buffer.reset()?;
    }
    writeln!(buffer)?;

    write_field(buffer, &indent, "area:", &fmt_rect(area))?;
    let render = tree.render_area(id)?;
    if render != area {
        write_field(buffer, &indent, "render:", &fmt_rect(render))?;
    }
    if layout.scroll {
        write_field(
            buffer,
            &indent,
            "scroll:",
            &format!("{} / {}", scroll.current(), scroll.max()),
        )?;
    }

    if !hidden {
        for child in children {
            dump_node(buffer, tree, child, level + 1)?;
        }
    }
    Ok(())
}
