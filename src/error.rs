//! Construction-time error types

use thiserror::Error;

/// A game configuration that cannot produce a valid simulation
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// A size, speed, or rate that must be a positive finite number
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    /// A margin or gap that must be zero or more
    #[error("{field} must be zero or more, got {value}")]
    Negative { field: &'static str, value: f32 },

    /// Target grid has no rows or no columns
    #[error("target grid must have at least one row and one column ({rows}x{cols})")]
    EmptyGrid { rows: u32, cols: u32 },

    /// Target grid with more cells than a formation can number
    #[error("target grid of {rows}x{cols} exceeds the {max} target limit")]
    TooManyTargets { rows: u32, cols: u32, max: u32 },

    /// Starting lives set to zero
    #[error("starting lives must be at least 1")]
    NoLives,

    /// An actor or the grid would not fit inside the playfield
    #[error("{what} does not fit inside the {width}x{height} playfield")]
    DoesNotFit {
        what: &'static str,
        width: f32,
        height: f32,
    },

    /// Configuration text could not be parsed
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration file could not be read
    #[error("cannot read configuration from {path}: {source}")]
    Unreadable {
        path: String,
        source: std::io::Error,
    },
}
