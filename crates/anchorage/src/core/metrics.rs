//! Layout counters for runtime debugging and profiling.

use std::{
    io::Write,
    ops::{Add, Sub},
    time::Duration,
};

use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use serde::Serialize;

use crate::{
    NodeId,
    error::Result,
    geom::Rect,
};

/// A snapshot of layout statistics collected by a [`Tree`](crate::Tree).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Metrics {
    /// Number of nodes whose layout was recomputed.
    pub force_area_updates: u64,
    /// Number of times a new area was stored on a node.
    pub actual_area_updates: u64,
    /// Number of auto-size recursions.
    pub recursions: u64,
    /// Number of children moved or shrunk by squishing.
    pub squishes: u64,
    /// Wall time spent in top-level layout calls.
    pub layout_time: Duration,
}

impl Metrics {
    /// Reset every counter to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Output a formatted table of the counters to a writer.
    pub fn print_table(&self, w: &mut dyn Write) -> Result<()> {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.load_preset(UTF8_FULL);
        let rows = [
            ("force area updates", self.force_area_updates.to_string()),
            ("actual area updates", self.actual_area_updates.to_string()),
            ("recursions", self.recursions.to_string()),
            ("squishes", self.squishes.to_string()),
            ("layout time", format!("{:?}", self.layout_time)),
        ];
        for (label, value) in rows {
            table.add_row(vec![
                Cell::new(label).fg(Color::Green),
                Cell::new(value),
            ]);
        }
        writeln!(w, "{table}")?;
        Ok(())
    }
}

impl Add for Metrics {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            force_area_updates: self.force_area_updates + other.force_area_updates,
            actual_area_updates: self.actual_area_updates + other.actual_area_updates,
            recursions: self.recursions + other.recursions,
            squishes: self.squishes + other.squishes,
            layout_time: self.layout_time + other.layout_time,
        }
    }
}

impl Sub for Metrics {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            force_area_updates: self.force_area_updates.saturating_sub(other.force_area_updates),
            actual_area_updates: self
                .actual_area_updates
                .saturating_sub(other.actual_area_updates),
            recursions: self.recursions.saturating_sub(other.recursions),
            squishes: self.squishes.saturating_sub(other.squishes),
            layout_time: self.layout_time.saturating_sub(other.layout_time),
        }
    }
}

/// Notifications produced during a layout pass, collected when
/// [`LayoutConfig::record_events`](crate::config::LayoutConfig::record_events) is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutEvent {
    /// A node received a new unscrolled area.
    AreaUpdated {
        /// The updated node.
        node: NodeId,
        /// Its new area.
        area: Rect,
    },
    /// A node's auto-size loop went around again.
    Recursion {
        /// The auto-sized node.
        node: NodeId,
        /// One-based recursion count for this loop.
        iteration: usize,
        /// The child whose extent drove the new size.
        child: Option<NodeId>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_sub() {
        let a = Metrics {
            force_area_updates: 3,
            actual_area_updates: 4,
            recursions: 1,
            squishes: 0,
            layout_time: Duration::from_millis(2),
        };
        let b = a + a;
        assert_eq!(b.actual_area_updates, 8);
        assert_eq!(b - a, a);
        assert_eq!(a - b, Metrics::default());
    }

    #[test]
    fn table_lists_counters() {
        let m = Metrics {
            recursions: 42,
            ..Default::default()
        };
        let mut out = Vec::new();
        m.print_table(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("recursions"));
        assert!(text.contains("42"));
    }
}
