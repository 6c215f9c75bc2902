use serde::{Deserialize, Serialize};

/// Default distance moved per scroll tick, in unscaled pixels.
pub const DEFAULT_STEP: f32 = 10.0;

/// The scroll state of a scrolling node.
///
/// `current` always lies in `[0, max]`. Changing it moves where children are
/// drawn, never where they are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollBar {
    max: f32,
    current: f32,
    /// Distance moved per tick.
    pub step: f32,
}

impl Default for ScrollBar {
    fn default() -> Self {
        Self {
            max: 0.0,
            current: 0.0,
            step: DEFAULT_STEP,
        }
    }
}

impl ScrollBar {
    /// The largest valid scroll value.
    pub fn max(&self) -> f32 {
        self.max
    }

    /// The current scroll value.
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Is there anything to scroll?
    pub fn is_scrollable(&self) -> bool {
        self.max > 0.0
    }

    /// Set the maximum, clamping the current value into range.
    pub fn set_max(&mut self, max: f32) {
        self.max = max.max(0.0);
        self.current = self.current.min(self.max);
    }

    /// Set the current value, clamped to `[0, max]`. Returns true if it
    /// changed.
    pub fn set(&mut self, value: f32) -> bool {
        let v = value.clamp(0.0, self.max);
        let changed = v != self.current;
        self.current = v;
        changed
    }

    /// Move by a number of ticks. Positive values scroll down.
    pub fn scroll_by(&mut self, ticks: f32) -> bool {
        self.set(self.current + ticks * self.step)
    }
}
