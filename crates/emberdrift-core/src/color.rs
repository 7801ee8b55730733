//! RGBA color with a fractional alpha channel.

/// A straight (non-premultiplied) color, alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);

    /// Create a color from components.
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Self::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 1.0)
    }

    /// Same color with alpha multiplied by `factor`.
    pub fn fade(self, factor: f32) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    /// Alpha scaled to `0..=255`.
    pub fn alpha8(self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_literal() {
        assert_eq!(Rgba::hex(0xff8c00), Rgba::new(255, 140, 0, 1.0));
    }

    #[test]
    fn test_alpha8_rounds() {
        assert_eq!(Rgba::new(0, 0, 0, 0.66).alpha8(), 168);
        assert_eq!(Rgba::new(0, 0, 0, 1.5).alpha8(), 255);
    }

    #[test]
    fn test_fade_clamps() {
        assert_eq!(Rgba::hex(0xffffff).fade(2.0).a, 1.0);
        assert_eq!(Rgba::hex(0xffffff).fade(0.0).a, 0.0);
    }
}
