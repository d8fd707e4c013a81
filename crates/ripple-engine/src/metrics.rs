//! Per-frame performance metrics for the wave engine.

/// Timing and counters collected during a single frame.
///
/// Durations are in microseconds. The engine overwrites these after every
/// `step()`; the cumulative counters carry across frames.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SweepMetrics {
    /// Wall-clock time for the whole frame.
    pub total_us: u64,
    /// Time spent applying queued disturbances.
    pub drain_us: u64,
    /// Time spent in the propagation sweep and swap.
    pub propagate_us: u64,
    /// Time spent building the position and colour buffers.
    pub colorize_us: u64,
    /// Pushes written to the grid this frame.
    pub pushes_applied: usize,
    /// Pushes dropped this frame (out of range or superseded by a reset).
    pub pushes_discarded: usize,
    /// Cells repaired from NaN to baseline this frame.
    pub nan_substitutions: u64,
    /// Cumulative resets applied since the engine was built.
    pub resets: u64,
    /// Cumulative NaN repairs since the engine was built.
    pub total_nan_substitutions: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = SweepMetrics::default();
        assert_eq!(m.total_us, 0);
        assert_eq!(m.pushes_applied, 0);
        assert_eq!(m.resets, 0);
        assert_eq!(m.total_nan_substitutions, 0);
    }
}
