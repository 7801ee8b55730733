//! Drifting trails: flowing lines, candlestick bars and glowing sparks.
//!
//! Every trail moves left with a parallax speed and bobs on a sine wave.
//! Trails that leave the left edge are recycled in place just past the right
//! edge, so the field keeps a fixed number of particles between
//! configurations.

use std::f64::consts::TAU;

use emberdrift_canvas::{
    Composite, LinearGradient, LineCap, LineJoin, Paint, RadialGradient, Surface,
};
use emberdrift_core::{Rgba, Viewport};
use fastrand::Rng;
use kurbo::{BezPath, Circle, Point, Rect};
use tracing::debug;

use crate::clock::FrameStep;
use crate::palette::{CANDLE_PALETTE, FLOW_PALETTE, OVERLAY};
use crate::random::{between, choose};

/// A trail is recycled once its trailing edge passes this x coordinate.
pub const RECYCLE_THRESHOLD: f64 = -60.0;

/// Fewest trails a field is seeded with.
pub const MIN_TRAILS: usize = 18;

/// Number of trails for a viewport of the given logical size.
pub fn trail_count(width: f64, height: f64) -> usize {
    let by_size =
        (width / 70.0).floor().max(0.0) as usize + (height / 90.0).floor().max(0.0) as usize;
    by_size.max(MIN_TRAILS)
}

/// Shape family of a trail. Fixed for the trail's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailKind {
    Line,
    Candle,
    Spark,
}

impl TrailKind {
    /// Map a uniform roll in `0..1` to a kind: 45% candle, 30% line, 25% spark.
    pub fn from_roll(roll: f64) -> Self {
        if roll < 0.45 {
            TrailKind::Candle
        } else if roll < 0.75 {
            TrailKind::Line
        } else {
            TrailKind::Spark
        }
    }
}

/// One drifting particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    pub kind: TrailKind,
    /// Parallax depth in `0..1`; deeper trails are faster and larger.
    pub depth: f64,
    pub color: Rgba,
    pub glow: Rgba,
    pub wick_color: Rgba,
    pub opacity: f64,
    /// Leading (left) edge.
    pub x: f64,
    pub base_y: f64,
    /// Current vertical position, `base_y` plus the wave offset.
    pub y: f64,
    pub speed: f64,
    pub wave_speed: f64,
    pub wave_height: f64,
    pub phase: f64,
    pub length: f64,
    pub body_width: f64,
    pub body_height: f64,
    pub spark_radius: f64,
    pub shadow_blur: f64,
}

impl Trail {
    /// Create a trail of random kind and depth somewhere off the right edge.
    pub fn spawn(rng: &mut Rng, viewport: Viewport) -> Self {
        let depth = rng.f64();
        let kind = TrailKind::from_roll(rng.f64());
        Self::spawn_with(rng, viewport, kind, depth)
    }

    /// Create a trail with a chosen kind and depth.
    pub fn spawn_with(rng: &mut Rng, viewport: Viewport, kind: TrailKind, depth: f64) -> Self {
        let mut trail = Self {
            kind,
            depth,
            color: Rgba::TRANSPARENT,
            glow: Rgba::TRANSPARENT,
            wick_color: Rgba::TRANSPARENT,
            opacity: 0.0,
            x: 0.0,
            base_y: 0.0,
            y: 0.0,
            speed: 0.0,
            wave_speed: 0.0,
            wave_height: 0.0,
            phase: 0.0,
            length: 0.0,
            body_width: 0.0,
            body_height: 0.0,
            spark_radius: 0.0,
            shadow_blur: 0.0,
        };
        trail.randomize(rng, viewport);
        trail.x = viewport.width + rng.f64() * viewport.width;
        trail
    }

    /// Re-randomize everything but kind and depth, and move the trail just
    /// past the right edge.
    pub fn recycle(&mut self, rng: &mut Rng, viewport: Viewport) {
        self.randomize(rng, viewport);
        self.x = viewport.width + rng.f64() * viewport.width * 0.4;
    }

    fn randomize(&mut self, rng: &mut Rng, viewport: Viewport) {
        let hue = match self.kind {
            TrailKind::Candle => choose(rng, &CANDLE_PALETTE),
            TrailKind::Line | TrailKind::Spark => choose(rng, &FLOW_PALETTE),
        };
        self.color = hue.color;
        self.glow = hue.glow;
        self.wick_color = hue.wick.unwrap_or(hue.color);

        self.base_y = viewport.height * (0.15 + rng.f64() * 0.7);
        self.wave_speed = between(rng, 0.35, 0.9);
        self.wave_height = between(rng, 8.0, 26.0) + self.depth * 18.0;
        self.phase = rng.f64() * TAU;
        self.opacity = between(rng, 0.34, 0.42);
        self.speed = between(rng, 18.0, 32.0) + self.depth * 32.0;
        self.shadow_blur = between(rng, 16.0, 34.0);

        self.body_width = 0.0;
        self.body_height = 0.0;
        self.spark_radius = 0.0;
        match self.kind {
            TrailKind::Line => {
                self.length = between(rng, 80.0, 180.0);
            }
            TrailKind::Candle => {
                self.length = between(rng, 40.0, 90.0);
                self.body_width = between(rng, 3.0, 6.0);
                self.body_height = between(rng, 30.0, 110.0);
            }
            TrailKind::Spark => {
                self.length = between(rng, 20.0, 60.0);
                self.spark_radius = between(rng, 1.4, 3.2);
            }
        }
    }

    /// Speed multiplier from depth.
    pub fn parallax(&self) -> f64 {
        0.7 + self.depth * 1.5
    }

    /// Move by one time step. Returns `true` when the trail was recycled.
    pub fn advance(
        &mut self,
        delta_seconds: f64,
        elapsed_seconds: f64,
        viewport: Viewport,
        rng: &mut Rng,
    ) -> bool {
        self.x -= self.speed * self.parallax() * delta_seconds;
        self.y = self.base_y
            + (elapsed_seconds * self.wave_speed + self.phase).sin() * self.wave_height;

        if self.x + self.length < RECYCLE_THRESHOLD {
            self.recycle(rng, viewport);
            return true;
        }
        false
    }

    /// Wick lengths above and below a candlestick body.
    pub fn wick_lengths(&self) -> (f64, f64) {
        let wick = self.body_height * 0.75;
        (wick * 0.55, wick * 0.45)
    }

    /// Paint the trail's shape. Alpha, shadow and line style are set by the caller.
    pub fn paint(&self, surface: &mut dyn Surface) {
        match self.kind {
            TrailKind::Line => self.paint_line(surface),
            TrailKind::Candle => self.paint_candle(surface),
            TrailKind::Spark => self.paint_spark(surface),
        }
    }

    fn paint_line(&self, surface: &mut dyn Surface) {
        let start = Point::new(self.x, self.y);
        let end_x = self.x + self.length;
        let arc = self.wave_height * 0.6;

        let mut path = BezPath::new();
        path.move_to(start);
        path.curve_to(
            (self.x + self.length * 0.35, self.y + arc),
            (self.x + self.length * 0.7, self.y - arc * 0.8),
            (end_x, self.y + arc * 0.3),
        );

        let gradient = LinearGradient::new(start, Point::new(end_x, self.y))
            .with_stop(0.0, self.glow)
            .with_stop(0.45, self.color)
            .with_stop(1.0, Rgba::TRANSPARENT);

        surface.stroke_path(&path, 1.4 + self.depth * 2.0, &gradient.into());
    }

    fn paint_candle(&self, surface: &mut dyn Surface) {
        let width = self.body_width;
        let height = self.body_height;
        let top = self.y - height / 2.0;

        let gradient = LinearGradient::new(
            Point::new(self.x, top),
            Point::new(self.x + width, top + height),
        )
        .with_stop(0.0, self.glow)
        .with_stop(0.35, self.color)
        .with_stop(0.65, self.color)
        .with_stop(1.0, self.glow);
        surface.fill_rect(
            Rect::from_origin_size((self.x, top), (width, height)),
            &gradient.into(),
        );

        let wick_width = (width * 0.28).max(0.8);
        let wick_x = self.x + width / 2.0 - wick_width / 2.0;
        let (upper, lower) = self.wick_lengths();
        let wick = Paint::Solid(self.wick_color);
        surface.fill_rect(
            Rect::from_origin_size((wick_x, top - upper), (wick_width, upper)),
            &wick,
        );
        surface.fill_rect(
            Rect::from_origin_size((wick_x, top + height), (wick_width, lower)),
            &wick,
        );
    }

    fn paint_spark(&self, surface: &mut dyn Surface) {
        let radius = self.spark_radius + self.depth * 1.8;
        let center = Point::new(self.x, self.y);
        let gradient = RadialGradient::new(center, 0.0, radius * 2.2)
            .with_stop(0.0, self.color)
            .with_stop(1.0, Rgba::TRANSPARENT);
        surface.fill_circle(Circle::new(center, radius * 2.0), &gradient.into());
    }
}

/// The full set of trails for one viewport.
#[derive(Debug, Clone)]
pub struct TrailField {
    trails: Vec<Trail>,
    viewport: Viewport,
}

impl Default for TrailField {
    fn default() -> Self {
        Self::new()
    }
}

impl TrailField {
    pub fn new() -> Self {
        Self {
            trails: Vec::new(),
            viewport: Viewport::new(0.0, 0.0, 1.0),
        }
    }

    /// Discard all trails and seed a fresh set sized for `viewport`.
    pub fn configure(&mut self, viewport: Viewport, rng: &mut Rng) {
        let count = trail_count(viewport.width, viewport.height);
        self.viewport = viewport;
        self.trails = (0..count).map(|_| Trail::spawn(rng, viewport)).collect();
        debug!(count, width = viewport.width, height = viewport.height, "trails seeded");
    }

    pub fn trails(&self) -> &[Trail] {
        &self.trails
    }

    pub fn trails_mut(&mut self) -> &mut [Trail] {
        &mut self.trails
    }

    pub fn len(&self) -> usize {
        self.trails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }

    pub fn clear(&mut self) {
        self.trails.clear();
    }

    /// Advance every trail by one step. Returns how many were recycled.
    pub fn advance(&mut self, step: FrameStep, rng: &mut Rng) -> usize {
        let viewport = self.viewport;
        self.trails
            .iter_mut()
            .map(|trail| trail.advance(step.delta_seconds, step.elapsed_seconds, viewport, rng))
            .filter(|recycled| *recycled)
            .count()
    }

    /// Paint all trails over a dark wash with additive blending.
    pub fn paint(&self, surface: &mut dyn Surface) {
        let area = Rect::new(0.0, 0.0, self.viewport.width, self.viewport.height);
        surface.clear();
        surface.fill_rect(area, &OVERLAY.into());

        surface.set_composite(Composite::Lighter);
        for trail in &self.trails {
            surface.save();
            surface.set_global_alpha(trail.opacity);
            surface.set_shadow(trail.glow, trail.shadow_blur);
            surface.set_line_style(LineCap::Round, LineJoin::Round);
            trail.paint(surface);
            surface.restore();
        }
        surface.set_composite(Composite::SourceOver);
    }

    /// Advance and repaint for one accepted frame.
    pub fn render(&mut self, step: FrameStep, surface: &mut dyn Surface, rng: &mut Rng) {
        self.advance(step, rng);
        self.paint(surface);
    }
}
