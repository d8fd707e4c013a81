//! Damping factor derivation.
//!
//! The factor scales with the whole grid's row count so the surface
//! settles at the same visual rate regardless of how the grid is split
//! into tiles.

use ripple_core::ConfigError;

/// Default damping for a grid of `total_rows` rows: `(N/2 - 1) / (N/2)`.
///
/// # Errors
///
/// `ConfigError::TooFewRowsForDamping` for fewer than 3 rows, where the
/// formula stops producing a positive factor.
///
/// # Examples
///
/// ```
/// use ripple_propagator::damping_for_rows;
///
/// assert_eq!(damping_for_rows(20).unwrap(), 0.9);
/// assert!(damping_for_rows(2).is_err());
/// ```
pub fn damping_for_rows(total_rows: usize) -> Result<f32, ConfigError> {
    if total_rows < 3 {
        return Err(ConfigError::TooFewRowsForDamping { rows: total_rows });
    }
    let half = total_rows as f32 / 2.0;
    Ok((half - 1.0) / half)
}

/// Check a caller-supplied damping factor lies in `[0, 1)`.
pub fn validate_damping(value: f32) -> Result<f32, ConfigError> {
    if (0.0..1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::InvalidDamping { value })
    }
}
