//! Tunable constants for gesture interpretation.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Configuration for gesture interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// How long the tap history survives without new events (milliseconds).
    pub double_tap_window_ms: f64,
    /// Scale added by a double tap.
    pub double_tap_step: f64,
    /// Divider turning wheel deltas and vertical drag distance into scale.
    pub zoom_divider: f64,
    /// Smallest scale a gesture may produce.
    pub min_scale: f64,
    /// Largest scale a gesture may produce.
    pub max_scale: f64,
    /// Number of event kinds kept in the gesture history.
    pub history_capacity: usize,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            double_tap_window_ms: 400.0,
            double_tap_step: 0.2,
            zoom_divider: 500.0,
            min_scale: 0.05,
            max_scale: 20.0,
            history_capacity: 8,
        }
    }
}

impl GestureConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a TOML config. Missing fields take their defaults.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.double_tap_window_ms.is_finite() && self.double_tap_window_ms > 0.0) {
            return Err(ConfigError::invalid(
                "double_tap_window_ms",
                format!("must be positive, got {}", self.double_tap_window_ms),
            ));
        }
        if !(self.double_tap_step.is_finite() && self.double_tap_step > 0.0) {
            return Err(ConfigError::invalid(
                "double_tap_step",
                format!("must be positive, got {}", self.double_tap_step),
            ));
        }
        if !(self.zoom_divider.is_finite() && self.zoom_divider > 0.0) {
            return Err(ConfigError::invalid(
                "zoom_divider",
                format!("must be positive, got {}", self.zoom_divider),
            ));
        }
        if !(self.min_scale.is_finite() && self.min_scale > 0.0) {
            return Err(ConfigError::invalid(
                "min_scale",
                format!("must be positive, got {}", self.min_scale),
            ));
        }
        if !(self.max_scale.is_finite() && self.max_scale >= self.min_scale) {
            return Err(ConfigError::invalid(
                "max_scale",
                format!(
                    "must be finite and at least min_scale ({}), got {}",
                    self.min_scale, self.max_scale
                ),
            ));
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::invalid("history_capacity", "must be non-zero"));
        }
        Ok(())
    }

    /// Clamp a scale into `[min_scale, max_scale]`.
    #[must_use]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }
}
