//! Logical viewport and backing buffer sizing.

/// Upper bound on the device pixel ratio used for the backing buffer.
pub const MAX_DEVICE_RATIO: f64 = 2.0;

/// Displayed size of the drawing area in logical pixels, plus the ratio of
/// backing pixels per logical pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Logical width.
    pub width: f64,
    /// Logical height.
    pub height: f64,
    /// Backing pixels per logical pixel, capped at [`MAX_DEVICE_RATIO`].
    pub device_ratio: f64,
}

impl Viewport {
    /// Create a viewport. Non-positive or non-finite ratios fall back to 1.
    pub fn new(width: f64, height: f64, device_ratio: f64) -> Self {
        let device_ratio = if device_ratio.is_finite() && device_ratio > 0.0 {
            device_ratio.min(MAX_DEVICE_RATIO)
        } else {
            1.0
        };
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            device_ratio,
        }
    }

    /// Size of the backing buffer in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.device_ratio).round() as u32,
            (self.height * self.device_ratio).round() as u32,
        )
    }

    /// Whether the backing buffer would have no pixels at all.
    pub fn is_empty(&self) -> bool {
        let (w, h) = self.backing_size();
        w == 0 || h == 0
    }
}
