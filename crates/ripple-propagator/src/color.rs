//! Depth-to-colour mapping.
//!
//! Blue stays at 1.0 while red and green track height, so the lowest
//! points render pure blue, the highest white, and everything between as
//! bands of pale blue.

use ripple_core::DepthBounds;
use ripple_field::HeightField;

/// Maps a depth to a normalised `[r, g, b]` triple. Stateless apart from
/// the bounds it normalises against.
///
/// # Examples
///
/// ```
/// use ripple_core::DepthBounds;
/// use ripple_propagator::ColorMapper;
///
/// let mapper = ColorMapper::new(DepthBounds::new(-1.0, 1.0).unwrap());
/// assert_eq!(mapper.color_for(-1.0), [0.0, 0.0, 1.0]);
/// assert_eq!(mapper.color_for(1.0), [1.0, 1.0, 1.0]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ColorMapper {
    bounds: DepthBounds,
}

impl ColorMapper {
    /// Mapper normalising against `bounds`.
    pub fn new(bounds: DepthBounds) -> Self {
        Self { bounds }
    }

    /// `(scale, scale, 1.0)` where `scale` is the depth's clamped position
    /// within the bounds.
    #[inline]
    pub fn color_for(&self, depth: f32) -> [f32; 3] {
        let scale = ((depth - self.bounds.min()) / self.bounds.span()).clamp(0.0, 1.0);
        [scale, scale, 1.0]
    }

    /// Flat RGB buffer (`3 * field.len()` floats) for a whole tile.
    pub fn colorize(&self, field: &HeightField) -> Vec<f32> {
        let mut out = Vec::with_capacity(field.len() * 3);
        for &depth in field.as_slice() {
            out.extend_from_slice(&self.color_for(depth));
        }
        out
    }
}
