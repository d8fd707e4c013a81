//! Depth bounds shared by every tile of a grid.

use crate::error::ConfigError;

/// Inclusive `[min, max]` range every cell depth must stay within.
///
/// # Examples
///
/// ```
/// use ripple_core::DepthBounds;
///
/// let bounds = DepthBounds::new(-1.0, 1.0).unwrap();
/// assert_eq!(bounds.baseline(), 0.0);
/// assert_eq!(bounds.clamp(3.0), 1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthBounds {
    min: f32,
    max: f32,
}

impl DepthBounds {
    /// Create a bounds pair.
    ///
    /// Returns `Err(ConfigError::InvalidBounds)` unless both values are
    /// finite and `min < max`.
    pub fn new(min: f32, max: f32) -> Result<Self, ConfigError> {
        if !min.is_finite() || !max.is_finite() || !(min < max) {
            return Err(ConfigError::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound (the depth a pushed cell is forced to).
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Neutral resting depth: the midpoint of the bounds.
    pub fn baseline(&self) -> f32 {
        (self.min + self.max) * 0.5
    }

    /// Width of the range, always strictly positive.
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Clamp `depth` into the bounds. NaN passes through unchanged.
    #[inline]
    pub fn clamp(&self, depth: f32) -> f32 {
        depth.clamp(self.min, self.max)
    }

    /// Whether `depth` lies within the bounds (inclusive).
    #[inline]
    pub fn contains(&self, depth: f32) -> bool {
        depth >= self.min && depth <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_inverted_bounds() {
        assert_eq!(
            DepthBounds::new(1.0, -1.0),
            Err(ConfigError::InvalidBounds { min: 1.0, max: -1.0 })
        );
    }

    #[test]
    fn rejects_empty_range() {
        assert!(DepthBounds::new(0.5, 0.5).is_err());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(DepthBounds::new(f32::NAN, 1.0).is_err());
        assert!(DepthBounds::new(0.0, f32::INFINITY).is_err());
    }

    #[test]
    fn baseline_is_midpoint() {
        let b = DepthBounds::new(2.0, 6.0).unwrap();
        assert_eq!(b.baseline(), 4.0);
        assert_eq!(b.span(), 4.0);
    }

    proptest! {
        #[test]
        fn clamp_lands_inside(lo in -100.0f32..0.0, hi in 0.1f32..100.0, v in -1e6f32..1e6) {
            let b = DepthBounds::new(lo, hi).unwrap();
            prop_assert!(b.contains(b.clamp(v)));
        }
    }
}
