//! Numeric range input control

use std::fmt;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::format;
use crate::model::Value;

/// Formatter for the range's output display.
pub type RangeFormatFn = dyn Fn(f64) -> String + Send + Sync;

/// Configuration for [`Range`].
#[derive(Clone, Default)]
pub struct RangeConfig {
    /// Output label text
    pub label: String,
    /// Control width hint in terminal columns
    pub width: Option<u16>,
    /// Initial value; defaults to the interval midpoint
    pub value: Option<f64>,
    /// Snap increment; `None` means continuous
    pub step: Option<f64>,
    /// Output formatter; defaults to locale-style number formatting
    pub format: Option<Arc<RangeFormatFn>>,
}

/// A numeric range input: a value confined to an interval, optionally
/// snapped to a step grid anchored at the interval minimum.
///
/// The companion control to the table widget. Values assigned from any path
/// are clamped and snapped the same way, and every assignment emits one
/// change notification for the embedder to drain.
pub struct Range {
    min: f64,
    max: f64,
    step: Option<f64>,
    value: f64,
    label: String,
    width: u16,
    format: Arc<RangeFormatFn>,
    pending_changes: usize,
}

impl Range {
    /// Creates a range over `[min, max]`.
    ///
    /// An inverted or non-finite interval is a configuration error.
    pub fn new(interval: [f64; 2], config: RangeConfig) -> Result<Self, ConfigError> {
        let [min, max] = interval;
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(ConfigError::empty_range(min, max));
        }
        let format = config
            .format
            .unwrap_or_else(|| Arc::new(|v| format::format_number(&Value::Float(v))));
        let mut range = Self {
            min,
            max,
            step: config.step,
            value: 0.0,
            label: config.label,
            width: config.width.unwrap_or(180),
            format,
            pending_changes: 0,
        };
        range.value = range.confine(config.value.unwrap_or((min + max) / 2.0));
        Ok(range)
    }

    /// The current value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The interval.
    pub fn interval(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// The output label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The control width hint.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// The formatted value, for the output display.
    pub fn display(&self) -> String {
        (self.format)(self.value)
    }

    /// Assigns a value, clamped to the interval and snapped to the step
    /// grid. Emits one change notification.
    pub fn set_value(&mut self, value: f64) {
        self.value = self.confine(value);
        self.pending_changes += 1;
    }

    /// Drains the pending change-notification count.
    pub fn take_changes(&mut self) -> usize {
        std::mem::take(&mut self.pending_changes)
    }

    fn confine(&self, value: f64) -> f64 {
        let mut v = value.clamp(self.min, self.max);
        if let Some(step) = self.step
            && step > 0.0
        {
            v = self.min + ((v - self.min) / step).round() * step;
            v = v.clamp(self.min, self.max);
        }
        v
    }
}

impl fmt::Debug for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Range")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("step", &self.step)
            .field("value", &self.value)
            .finish()
    }
}
