//! Background animation state management.

use emberdrift_canvas::Surface;
use emberdrift_core::{BackgroundStyle, Viewport};
use fastrand::Rng;
use tracing::{debug, info};

use crate::candles::{CandleField, DriftCandle};
use crate::clock::FrameClock;
use crate::trails::{Trail, TrailField};

/// What happened on a host tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Throttled or hidden; nothing was updated or drawn.
    Skipped,
    /// State advanced and the surface was repainted.
    Painted,
}

/// Owns the particles, timing and random source for one background.
#[derive(Debug)]
pub struct BackgroundState {
    style: BackgroundStyle,
    trails: TrailField,
    candles: CandleField,
    clock: FrameClock,
    viewport: Viewport,
    visible: bool,
    rng: Rng,
}

impl BackgroundState {
    /// Create a state whose randomness is derived from `seed`.
    pub fn new(style: BackgroundStyle, seed: u64) -> Self {
        Self::with_rng(style, Rng::with_seed(seed))
    }

    /// Create a state drawing from an existing generator.
    pub fn with_rng(style: BackgroundStyle, rng: Rng) -> Self {
        Self {
            style,
            trails: TrailField::new(),
            candles: CandleField::new(),
            clock: FrameClock::new(),
            viewport: Viewport::new(0.0, 0.0, 1.0),
            visible: true,
            rng,
        }
    }

    pub fn style(&self) -> BackgroundStyle {
        self.style
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Switch animations, seeding the new one for the current viewport.
    pub fn set_style(&mut self, style: BackgroundStyle) {
        if style == self.style {
            return;
        }
        info!(from = self.style.name(), to = style.name(), "background style changed");
        self.style = style;
        self.reseed();
    }

    /// Adopt a new viewport and reseed the active animation from scratch.
    pub fn configure(&mut self, viewport: Viewport) {
        debug!(?viewport, style = self.style.name(), "configuring background");
        self.viewport = viewport;
        self.reseed();
    }

    fn reseed(&mut self) {
        self.trails.clear();
        self.candles.clear();
        match self.style {
            BackgroundStyle::Trails => self.trails.configure(self.viewport, &mut self.rng),
            BackgroundStyle::Candles => self.candles.configure(self.viewport, &mut self.rng),
            BackgroundStyle::None => {}
        }
    }

    /// Number of live particles in the active animation.
    pub fn particle_count(&self) -> usize {
        match self.style {
            BackgroundStyle::Trails => self.trails.len(),
            BackgroundStyle::Candles => self.candles.len(),
            BackgroundStyle::None => 0,
        }
    }

    pub fn trails(&self) -> &[Trail] {
        self.trails.trails()
    }

    pub fn trails_mut(&mut self) -> &mut [Trail] {
        self.trails.trails_mut()
    }

    pub fn candles(&self) -> &[DriftCandle] {
        self.candles.candles()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Track host visibility. Becoming visible resets the frame clock so the
    /// hidden interval is not simulated.
    pub fn set_visible(&mut self, visible: bool, now_ms: f64) {
        if visible && !self.visible {
            debug!(now_ms, "background resumed");
            self.clock.resume(now_ms);
        }
        self.visible = visible;
    }

    /// Handle one host tick: throttle, advance and repaint.
    pub fn on_frame(&mut self, now_ms: f64, surface: &mut dyn Surface) -> FrameOutcome {
        if !self.visible {
            return FrameOutcome::Skipped;
        }
        let Some(step) = self.clock.tick(now_ms) else {
            return FrameOutcome::Skipped;
        };

        match self.style {
            BackgroundStyle::Trails => self.trails.render(step, surface, &mut self.rng),
            BackgroundStyle::Candles => self.candles.render(step, surface, &mut self.rng),
            BackgroundStyle::None => surface.clear(),
        }
        surface.present();
        FrameOutcome::Painted
    }

    /// Drop all particles and timing state.
    pub fn dispose(&mut self) {
        self.trails.clear();
        self.candles.clear();
        self.clock.reset();
    }
}
