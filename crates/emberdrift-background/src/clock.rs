//! Frame throttling and elapsed-time bookkeeping.

/// Logical frames per second the animations are throttled to.
pub const TARGET_FPS: f64 = 45.0;

/// Minimum time between accepted ticks, in milliseconds.
pub const FRAME_INTERVAL_MS: f64 = 1000.0 / TARGET_FPS;

/// Upper bound on the simulated time step, so a long stall does not
/// teleport particles.
pub const MAX_DELTA_SECONDS: f64 = 0.08;

/// Timing handed to an animation for one accepted tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStep {
    /// Seconds since the previous accepted tick, clamped to `0..=MAX_DELTA_SECONDS`.
    pub delta_seconds: f64,
    /// Host timestamp in seconds; drives the vertical wave.
    pub elapsed_seconds: f64,
}

/// Decides which host ticks become frames.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_frame_ms: f64,
    last_tick_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a host tick at `now_ms`. Returns `None` when the tick falls
    /// inside the throttle interval; nothing should be updated or drawn.
    pub fn tick(&mut self, now_ms: f64) -> Option<FrameStep> {
        let last_tick = *self.last_tick_ms.get_or_insert(now_ms);

        if now_ms - self.last_frame_ms < FRAME_INTERVAL_MS {
            return None;
        }

        let delta_seconds = ((now_ms - last_tick) / 1000.0).clamp(0.0, MAX_DELTA_SECONDS);
        self.last_frame_ms = now_ms;
        self.last_tick_ms = Some(now_ms);

        Some(FrameStep {
            delta_seconds,
            elapsed_seconds: now_ms / 1000.0,
        })
    }

    /// Forget the gap while the host was hidden so it is not replayed as motion.
    pub fn resume(&mut self, now_ms: f64) {
        self.last_frame_ms = 0.0;
        self.last_tick_ms = Some(now_ms);
    }

    /// Return to the never-ticked state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_tick_has_zero_delta() {
        let mut clock = FrameClock::new();
        let step = clock.tick(1000.0).unwrap();
        assert_eq!(step.delta_seconds, 0.0);
        assert_relative_eq!(step.elapsed_seconds, 1.0);
    }

    #[test]
    fn test_ticks_inside_interval_are_skipped() {
        let mut clock = FrameClock::new();
        clock.tick(1000.0).unwrap();
        assert!(clock.tick(1010.0).is_none());
        assert!(clock.tick(1022.0).is_none());

        // Skipped ticks do not move the reference point.
        let step = clock.tick(1023.0).unwrap();
        assert_relative_eq!(step.delta_seconds, 0.023, epsilon = 1e-9);
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut clock = FrameClock::new();
        clock.tick(1000.0).unwrap();
        let step = clock.tick(61_000.0).unwrap();
        assert_eq!(step.delta_seconds, MAX_DELTA_SECONDS);
    }

    #[test]
    fn test_resume_discards_hidden_gap() {
        let mut clock = FrameClock::new();
        clock.tick(1000.0).unwrap();
        clock.resume(50_000.0);
        let step = clock.tick(50_016.0).unwrap();
        assert_relative_eq!(step.delta_seconds, 0.016, epsilon = 1e-9);
    }

    #[test]
    fn test_resume_with_stale_frame_time_floors_delta() {
        let mut clock = FrameClock::new();
        clock.tick(1000.0).unwrap();
        clock.resume(2000.0);
        let step = clock.tick(1990.0).unwrap();
        assert_eq!(step.delta_seconds, 0.0);
    }
}
