//! Cancellable animation loop.
//!
//! The host supplies frame timestamps through a [`FrameSource`]; the loop
//! checks its [`CancelToken`] before asking for each frame, so a run always
//! ends after a bounded number of ticks once cancelled.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use emberdrift_canvas::Surface;
use emberdrift_core::Viewport;
use tracing::{debug, info};

use crate::state::{BackgroundState, FrameOutcome};

/// Shared stop flag for an [`AnimationLoop`].
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Supplies monotonically increasing frame timestamps in milliseconds.
pub trait FrameSource {
    /// Block until the next display refresh and return its timestamp, or
    /// `None` when no further frames will come.
    fn next_frame(&mut self) -> Option<f64>;
}

/// A fixed number of evenly spaced timestamps.
#[derive(Debug, Clone)]
pub struct FixedStep {
    next_ms: f64,
    step_ms: f64,
    remaining: usize,
}

impl FixedStep {
    pub fn new(start_ms: f64, step_ms: f64, frames: usize) -> Self {
        Self {
            next_ms: start_ms,
            step_ms,
            remaining: frames,
        }
    }
}

impl FrameSource for FixedStep {
    fn next_frame(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let now = self.next_ms;
        self.next_ms += self.step_ms;
        Some(now)
    }
}

/// Counts from one [`AnimationLoop::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames requested from the source.
    pub requested: u64,
    /// Frames that advanced and repainted.
    pub painted: u64,
}

/// A background bound to the surface it paints on.
#[derive(Debug)]
pub struct AnimationLoop<S: Surface> {
    state: BackgroundState,
    surface: S,
    token: CancelToken,
}

impl<S: Surface> AnimationLoop<S> {
    /// Bind `state` to `surface` and configure both for `viewport`.
    /// Returns `None` when no surface is available; the background is then
    /// simply not shown.
    pub fn attach(surface: Option<S>, viewport: Viewport, state: BackgroundState) -> Option<Self> {
        let Some(surface) = surface else {
            debug!("no drawing surface, background disabled");
            return None;
        };
        let mut animation = Self {
            state,
            surface,
            token: CancelToken::new(),
        };
        animation.configure(viewport);
        info!(
            style = animation.state.style().name(),
            particles = animation.state.particle_count(),
            "background attached"
        );
        Some(animation)
    }

    /// Resize the surface and reseed the particles for `viewport`.
    pub fn configure(&mut self, viewport: Viewport) {
        self.surface.configure(viewport);
        self.state.configure(viewport);
    }

    /// A handle that stops this loop from any thread.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn state(&self) -> &BackgroundState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut BackgroundState {
        &mut self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Handle one host tick. Returns `None` once the loop is stopped.
    pub fn step(&mut self, now_ms: f64) -> Option<FrameOutcome> {
        if self.token.is_cancelled() {
            return None;
        }
        Some(self.state.on_frame(now_ms, &mut self.surface))
    }

    /// Drive frames from `source` until it ends or the loop is stopped.
    pub fn run(&mut self, source: &mut dyn FrameSource) -> RunSummary {
        let mut summary = RunSummary::default();
        while !self.token.is_cancelled() {
            let Some(now_ms) = source.next_frame() else {
                break;
            };
            summary.requested += 1;
            if self.step(now_ms) == Some(FrameOutcome::Painted) {
                summary.painted += 1;
            }
        }
        debug!(?summary, "animation run finished");
        summary
    }

    /// Stop the loop and release the particles.
    pub fn stop(&mut self) {
        if self.token.is_cancelled() {
            return;
        }
        self.token.cancel();
        self.state.dispose();
        info!("background stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emberdrift_canvas::RecordingSurface;
    use emberdrift_core::BackgroundStyle;

    fn attach() -> AnimationLoop<RecordingSurface> {
        AnimationLoop::attach(
            Some(RecordingSurface::new()),
            Viewport::new(700.0, 400.0, 1.0),
            BackgroundState::new(BackgroundStyle::Trails, 99),
        )
        .unwrap()
    }

    #[test]
    fn test_missing_surface_declines() {
        let animation = AnimationLoop::<RecordingSurface>::attach(
            None,
            Viewport::new(700.0, 400.0, 1.0),
            BackgroundState::new(BackgroundStyle::Trails, 1),
        );
        assert!(animation.is_none());
    }

    #[test]
    fn test_run_counts_painted_frames() {
        let mut animation = attach();
        // A 60 Hz refresh throttled to 45 fps paints roughly every other tick.
        let summary = animation.run(&mut FixedStep::new(1000.0, 1000.0 / 60.0, 60));
        assert_eq!(summary.requested, 60);
        assert!(summary.painted > 20 && summary.painted < 60);
    }

    #[test]
    fn test_stop_ends_run_and_releases_particles() {
        let mut animation = attach();
        animation.stop();
        assert!(animation.is_stopped());
        assert_eq!(animation.state().particle_count(), 0);
        assert_eq!(animation.step(5000.0), None);

        let summary = animation.run(&mut FixedStep::new(0.0, 16.0, 10));
        assert_eq!(summary, RunSummary::default());
    }

    #[test]
    fn test_cancel_from_another_thread() {
        let mut animation = attach();
        let token = animation.token();
        std::thread::spawn(move || token.cancel()).join().unwrap();
        assert_eq!(animation.step(1000.0), None);
    }
}
