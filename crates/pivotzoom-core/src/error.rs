//! Error types for pivotzoom-core.

use thiserror::Error;

/// Reasons a zoom step is skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ZoomError {
    /// Pinch started with both contacts on the same spot.
    #[error("degenerate pinch anchor distance: {0}")]
    DegenerateDistance(f64),

    /// The scaled image has no extent to take a pivot fraction of.
    #[error("degenerate image extent {width}x{height}")]
    DegenerateExtent {
        /// Scaled width
        width: f64,
        /// Scaled height
        height: f64,
    },

    /// The computed scale or position is NaN or infinite.
    #[error("non-finite zoom result (scale {0})")]
    NonFinite(f64),
}

/// Configuration loading and validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON parse error.
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse error.
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("invalid value for {field}: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
