//! Time management for the frame loop.

/// Simulation clock advanced once per host frame.
///
/// The host supplies wall-clock deltas; the clock clamps them so a frame hitch never
/// produces an oversized integration step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Upper bound on a single step, in seconds.
    max_delta: f32,
    /// Simulated seconds since start.
    elapsed: f64,
    /// Frame count since start.
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl FrameClock {
    /// Create a clock with the given maximum step in seconds. Negative or NaN bounds read as zero.
    pub fn new(max_delta: f32) -> Self {
        Self {
            max_delta: max_delta.max(0.0),
            elapsed: 0.0,
            frame_count: 0,
        }
    }

    /// Begin a new frame and return the clamped delta.
    ///
    /// Negative or non-finite deltas count as zero.
    pub fn advance(&mut self, raw_delta: f32) -> f32 {
        let dt = if raw_delta.is_finite() {
            raw_delta.clamp(0.0, self.max_delta)
        } else {
            0.0
        };
        if dt < raw_delta {
            log::trace!("frame delta {raw_delta:.3}s clamped to {dt:.3}s");
        }
        self.elapsed += dt as f64;
        self.frame_count += 1;
        dt
    }

    /// Simulated time since start in seconds.
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_hitches() {
        let mut clock = FrameClock::new(0.1);
        assert_eq!(clock.advance(0.5), 0.1);
        assert_eq!(clock.advance(0.016), 0.016);
        assert_eq!(clock.frame_count(), 2);
        assert!((clock.elapsed_seconds() - 0.116).abs() < 1e-6);
    }

    #[test]
    fn bad_bound_never_panics() {
        let mut clock = FrameClock::new(f32::NAN);
        assert_eq!(clock.advance(0.016), 0.0);
        let mut clock = FrameClock::new(-1.0);
        assert_eq!(clock.advance(0.016), 0.0);
    }

    #[test]
    fn rejects_bad_deltas() {
        let mut clock = FrameClock::new(0.1);
        assert_eq!(clock.advance(-1.0), 0.0);
        assert_eq!(clock.advance(f32::NAN), 0.0);
        assert_eq!(clock.elapsed_seconds(), 0.0);
    }
}
