//! Error types for configuration and control input.
//!
//! The per-tick simulation never fails: a saturated pool drops the event
//! and out-of-range curve input is clamped. Only building a world from
//! user-supplied parameters, or naming a focus stage, can go wrong.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Parameter JSON did not parse.
    #[error("invalid parameter JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A rate or threshold is negative or not finite.
    #[error("parameter `{name}` must be finite and non-negative, got {value}")]
    InvalidRate { name: &'static str, value: f32 },

    /// A pool that the cycle cannot run without has no slots.
    #[error("pool `{pool}` needs at least one slot")]
    InvalidCapacity { pool: &'static str },

    #[error("flow path needs at least 2 control points, got {points}")]
    FlowPathTooShort { points: usize },

    #[error("flow path control point {index} is not finite")]
    FlowPathNotFinite { index: usize },

    /// Region boundaries are out of order.
    #[error("invalid regions: {0}")]
    InvalidRegions(&'static str),

    #[error("unknown focus stage `{0}`")]
    UnknownFocus(String),

    #[error("unknown camera view `{0}`")]
    UnknownCamera(String),
}
