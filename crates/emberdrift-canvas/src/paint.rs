//! Solid and gradient paints.

use emberdrift_core::Rgba;
use kurbo::Point;

/// A color at a position along a gradient, offset in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Rgba,
}

/// Gradient along the line from `start` to `end`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub stops: Vec<GradientStop>,
}

impl LinearGradient {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            stops: Vec::new(),
        }
    }

    /// Append a color stop. Stops must be added in increasing offset order.
    pub fn with_stop(mut self, offset: f64, color: Rgba) -> Self {
        self.stops.push(GradientStop { offset, color });
        self
    }
}

/// Concentric gradient from `inner_radius` to `outer_radius` around `center`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub stops: Vec<GradientStop>,
}

impl RadialGradient {
    pub fn new(center: Point, inner_radius: f64, outer_radius: f64) -> Self {
        Self {
            center,
            inner_radius,
            outer_radius,
            stops: Vec::new(),
        }
    }

    /// Append a color stop. Stops must be added in increasing offset order.
    pub fn with_stop(mut self, offset: f64, color: Rgba) -> Self {
        self.stops.push(GradientStop { offset, color });
        self
    }
}

/// How a shape is filled or stroked.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear(LinearGradient),
    Radial(RadialGradient),
}

impl Paint {
    /// Whether nothing drawn with this paint can be visible.
    pub fn is_invisible(&self) -> bool {
        let stops = match self {
            Paint::Solid(color) => return color.a <= 0.0,
            Paint::Linear(gradient) => &gradient.stops,
            Paint::Radial(gradient) => &gradient.stops,
        };
        stops.iter().all(|stop| stop.color.a <= 0.0)
    }
}

impl From<Rgba> for Paint {
    fn from(color: Rgba) -> Self {
        Paint::Solid(color)
    }
}

impl From<LinearGradient> for Paint {
    fn from(gradient: LinearGradient) -> Self {
        Paint::Linear(gradient)
    }
}

impl From<RadialGradient> for Paint {
    fn from(gradient: RadialGradient) -> Self {
        Paint::Radial(gradient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stops_keep_insertion_order() {
        let gradient = LinearGradient::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0))
            .with_stop(0.0, Rgba::hex(0xff0000))
            .with_stop(0.4, Rgba::hex(0x00ff00))
            .with_stop(1.0, Rgba::hex(0x0000ff));
        let offsets: Vec<f64> = gradient.stops.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, [0.0, 0.4, 1.0]);
    }

    #[test]
    fn test_invisible_paints() {
        assert!(Paint::from(Rgba::TRANSPARENT).is_invisible());
        assert!(!Paint::from(Rgba::hex(0xffffff)).is_invisible());

        let fading = RadialGradient::new(Point::ZERO, 0.0, 4.0)
            .with_stop(0.0, Rgba::hex(0xffffff))
            .with_stop(1.0, Rgba::TRANSPARENT);
        assert!(!Paint::from(fading).is_invisible());
        assert!(Paint::from(LinearGradient::new(Point::ZERO, Point::new(1.0, 0.0))).is_invisible());
    }
}
