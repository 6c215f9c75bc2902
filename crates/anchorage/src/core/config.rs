//! Engine-wide layout settings.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Settings that apply to every layout pass run by a [`Tree`](crate::Tree).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Tolerance used when comparing sizes and positions. Absorbs float
    /// rounding in auto-size convergence and inline wrapping.
    pub epsilon: f32,
    /// Ambient scale applied to absolute sizes, offsets and padding.
    pub scale: f32,
    /// Hard cap on auto-size recursions for a single node.
    pub max_recursion: usize,
    /// Collect [`LayoutEvent`](crate::LayoutEvent)s for the host to drain.
    pub record_events: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.01,
            scale: 1.0,
            max_recursion: 100,
            record_events: false,
        }
    }
}

impl LayoutConfig {
    /// Construct the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Set the comparison tolerance.
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the ambient scale.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the auto-size recursion cap.
    pub fn with_max_recursion(mut self, max_recursion: usize) -> Self {
        self.max_recursion = max_recursion;
        self
    }

    /// Enable or disable event recording.
    pub fn with_events(mut self, record_events: bool) -> Self {
        self.record_events = record_events;
        self
    }
}
