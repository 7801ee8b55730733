//! Candle drift: bullish candles slide right, bearish candles slide left.

use emberdrift_canvas::{Paint, Surface};
use emberdrift_core::{Rgba, Viewport};
use fastrand::Rng;
use kurbo::{BezPath, Rect};
use tracing::debug;

use crate::clock::FrameStep;
use crate::palette::{
    BEARISH_BODY, BEARISH_GLOW, BEARISH_STROKE, BULLISH_BODY, BULLISH_GLOW, BULLISH_STROKE,
    HIGHLIGHT,
};
use crate::random::between;

/// Fewest candles a field is seeded with.
pub const MIN_CANDLES: usize = 14;

/// Shadow blur behind candle bodies.
const BODY_GLOW_BLUR: f64 = 18.0;

/// Number of candles for a viewport of the given logical width.
pub fn candle_count(width: f64) -> usize {
    ((width / 60.0).floor().max(0.0) as usize).max(MIN_CANDLES)
}

/// Direction of travel, which also picks the candle colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    /// Green, moving right.
    Bullish,
    /// Red, moving left.
    Bearish,
}

impl Trend {
    pub fn sign(self) -> f64 {
        match self {
            Trend::Bullish => 1.0,
            Trend::Bearish => -1.0,
        }
    }
}

/// One sliding candle. `x` is the wick line; `y` is the top of the body.
#[derive(Debug, Clone, PartialEq)]
pub struct DriftCandle {
    pub trend: Trend,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub body_height: f64,
    pub wick_height: f64,
    /// Signed horizontal speed in logical pixels per second.
    pub velocity: f64,
    pub color: Rgba,
    pub glow: Rgba,
    pub stroke: Rgba,
}

impl DriftCandle {
    /// Create a candle anywhere across the viewport.
    pub fn spawn(rng: &mut Rng, viewport: Viewport) -> Self {
        let mut candle = Self::random(rng, viewport);
        candle.x = between(rng, 0.0, viewport.width);
        candle.velocity = between(rng, 20.0, 60.0) * candle.trend.sign();
        candle
    }

    fn random(rng: &mut Rng, viewport: Viewport) -> Self {
        let trend = if rng.f64() > 0.5 {
            Trend::Bullish
        } else {
            Trend::Bearish
        };
        let width = between(rng, 6.0, 12.0);
        let body_height = between(rng, viewport.height * 0.12, viewport.height * 0.32);
        let wick_height = between(rng, body_height * 0.35, body_height * 0.8);
        let y = between(
            rng,
            30.0,
            (viewport.height - body_height - 30.0).max(31.0),
        );
        let (color, glow, stroke) = match trend {
            Trend::Bullish => (BULLISH_BODY, BULLISH_GLOW, BULLISH_STROKE),
            Trend::Bearish => (BEARISH_BODY, BEARISH_GLOW, BEARISH_STROKE),
        };
        Self {
            trend,
            x: 0.0,
            y,
            width,
            body_height,
            wick_height,
            velocity: 0.0,
            color,
            glow,
            stroke,
        }
    }

    /// Re-randomize and re-enter from the edge the new trend moves away from.
    pub fn recycle(&mut self, rng: &mut Rng, viewport: Viewport) {
        *self = Self::random(rng, viewport);
        self.velocity = between(rng, 20.0, 60.0) * self.trend.sign();
        let offset = self.width * 2.0;
        self.x = match self.trend {
            Trend::Bullish => -offset,
            Trend::Bearish => viewport.width + offset,
        };
    }

    /// Whether the candle has fully left through the edge it is moving towards.
    pub fn is_gone(&self, viewport_width: f64) -> bool {
        match self.trend {
            Trend::Bullish => self.x - self.width > viewport_width,
            Trend::Bearish => self.x + self.width < 0.0,
        }
    }

    /// Move by one time step. Returns `true` when the candle was recycled.
    pub fn advance(&mut self, delta_seconds: f64, viewport: Viewport, rng: &mut Rng) -> bool {
        self.x += self.velocity * delta_seconds;
        if self.is_gone(viewport.width) {
            self.recycle(rng, viewport);
            return true;
        }
        false
    }

    pub fn paint(&self, surface: &mut dyn Surface) {
        let w = self.width;
        let body_x = self.x - w / 2.0;

        let mut wick = BezPath::new();
        wick.move_to((self.x, self.y - self.wick_height));
        wick.line_to((self.x, self.y + self.body_height + self.wick_height * 0.35));
        surface.stroke_path(&wick, (w * 0.3).max(1.5), &Paint::Solid(self.stroke));

        surface.save();
        surface.set_shadow(self.glow, BODY_GLOW_BLUR);
        surface.fill_rounded_rect(
            Rect::from_origin_size((body_x, self.y), (w, self.body_height)),
            w * 0.4,
            &Paint::Solid(self.color),
        );
        surface.restore();

        surface.fill_rounded_rect(
            Rect::from_origin_size(
                (body_x + w * 0.15, self.y + self.body_height * 0.1),
                (w * 0.25, self.body_height * 0.3),
            ),
            w * 0.2,
            &Paint::Solid(HIGHLIGHT),
        );
    }
}

/// The full set of drift candles for one viewport.
#[derive(Debug, Clone)]
pub struct CandleField {
    candles: Vec<DriftCandle>,
    viewport: Viewport,
}

impl Default for CandleField {
    fn default() -> Self {
        Self::new()
    }
}

impl CandleField {
    pub fn new() -> Self {
        Self {
            candles: Vec::new(),
            viewport: Viewport::new(0.0, 0.0, 1.0),
        }
    }

    /// Discard all candles and seed a fresh set sized for `viewport`.
    pub fn configure(&mut self, viewport: Viewport, rng: &mut Rng) {
        let count = candle_count(viewport.width);
        self.viewport = viewport;
        self.candles = (0..count)
            .map(|_| DriftCandle::spawn(rng, viewport))
            .collect();
        debug!(count, width = viewport.width, "drift candles seeded");
    }

    pub fn candles(&self) -> &[DriftCandle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn clear(&mut self) {
        self.candles.clear();
    }

    /// Clear the surface, then move and paint each candle. `step` comes from
    /// the same throttled and clamped clock as the trails, so a stalled host
    /// cannot launch candles across the screen in one frame.
    pub fn render(&mut self, step: FrameStep, surface: &mut dyn Surface, rng: &mut Rng) {
        let viewport = self.viewport;
        surface.clear();
        for candle in &mut self.candles {
            candle.advance(step.delta_seconds, viewport, rng);
            candle.paint(surface);
        }
    }
}
