//! Error types for the Ripple engine.
//!
//! Only configuration problems are errors in this subsystem. Numeric
//! anomalies are repaired in place, protocol anomalies are logged and
//! ignored, and out-of-range disturbances are dropped.

use std::error::Error;
use std::fmt;

/// Errors detected while validating an engine configuration.
///
/// All of these are fatal at `Init`: the engine refuses to start rather
/// than run with inconsistent buffer sizes.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A tile-grid or per-tile dimension is zero.
    ZeroDimension {
        /// Which dimension was zero.
        name: &'static str,
    },
    /// The template length does not match the declared per-tile cell count.
    TemplateSizeMismatch {
        /// `cells_per_tile_row * cells_per_tile_col`.
        expected: usize,
        /// Length of the template that was supplied.
        got: usize,
    },
    /// The template contains a NaN or infinite depth.
    NonFiniteTemplate {
        /// Index of the first offending value.
        index: usize,
    },
    /// Depth bounds are non-finite or `min >= max`.
    InvalidBounds {
        /// Requested minimum.
        min: f32,
        /// Requested maximum.
        max: f32,
    },
    /// Damping factor is NaN or outside `[0, 1)`.
    InvalidDamping {
        /// The rejected factor.
        value: f32,
    },
    /// The grid is too short to derive a positive damping factor.
    TooFewRowsForDamping {
        /// Total row count of the grid.
        rows: usize,
    },
    /// Total cell count exceeds the largest supported grid.
    CellCountOverflow,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDimension { name } => write!(f, "{name} must be at least 1"),
            Self::TemplateSizeMismatch { expected, got } => {
                write!(f, "template has {got} cells, tile needs {expected}")
            }
            Self::NonFiniteTemplate { index } => {
                write!(f, "template value at index {index} is not finite")
            }
            Self::InvalidBounds { min, max } => {
                write!(f, "depth bounds must be finite with min < max, got [{min}, {max}]")
            }
            Self::InvalidDamping { value } => {
                write!(f, "damping must be in [0, 1), got {value}")
            }
            Self::TooFewRowsForDamping { rows } => {
                write!(f, "cannot derive damping from {rows} total rows (need at least 3)")
            }
            Self::CellCountOverflow => write!(f, "total cell count exceeds the supported grid size"),
        }
    }
}

impl Error for ConfigError {}
