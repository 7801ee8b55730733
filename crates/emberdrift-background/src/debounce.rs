//! Restart-on-notify debouncing driven by host timestamps.

/// Quiet period required before a resize is applied.
pub const RESIZE_DEBOUNCE_MS: f64 = 160.0;

/// Holds the most recent value until no new value has arrived for `delay_ms`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay_ms: f64,
    pending: Option<(f64, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Record `value`, replacing any pending one and restarting the timer.
    pub fn notify(&mut self, now_ms: f64, value: T) {
        self.pending = Some((now_ms + self.delay_ms, value));
    }

    /// Take the pending value once its quiet period has elapsed.
    pub fn poll(&mut self, now_ms: f64) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if now_ms >= *deadline => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }

    /// Milliseconds until the pending value fires, if any.
    pub fn remaining_ms(&self, now_ms: f64) -> Option<f64> {
        self.pending
            .as_ref()
            .map(|(deadline, _)| (deadline - now_ms).max(0.0))
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(RESIZE_DEBOUNCE_MS)
    }
}
