//! Colors used by the background animations.

use emberdrift_core::Rgba;

/// A base color with its glow, and for candlesticks a wick color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hue {
    pub color: Rgba,
    pub glow: Rgba,
    pub wick: Option<Rgba>,
}

impl Hue {
    const fn flow(color: Rgba, glow: Rgba) -> Self {
        Self {
            color,
            glow,
            wick: None,
        }
    }

    const fn candle(color: Rgba, glow: Rgba, wick: Rgba) -> Self {
        Self {
            color,
            glow,
            wick: Some(wick),
        }
    }
}

/// Palette for flowing lines and sparks.
pub const FLOW_PALETTE: [Hue; 4] = [
    Hue::flow(Rgba::hex(0xff8c00), Rgba::new(255, 140, 0, 0.6)),
    Hue::flow(Rgba::hex(0xffb347), Rgba::new(255, 179, 71, 0.55)),
    Hue::flow(Rgba::hex(0xaa2b2b), Rgba::new(170, 43, 43, 0.5)),
    Hue::flow(Rgba::hex(0x00c46a), Rgba::new(0, 196, 106, 0.55)),
];

/// Palette for candlestick trails: one green, one red.
pub const CANDLE_PALETTE: [Hue; 2] = [
    Hue::candle(
        Rgba::hex(0x00ff66),
        Rgba::new(0, 255, 102, 0.7),
        Rgba::new(0, 255, 140, 0.55),
    ),
    Hue::candle(
        Rgba::hex(0xff3333),
        Rgba::new(255, 51, 51, 0.7),
        Rgba::new(255, 119, 119, 0.55),
    ),
];

/// Dark wash painted under the trails every frame.
pub const OVERLAY: Rgba = Rgba::new(10, 12, 18, 0.66);

// Drift candles.
pub const BULLISH_BODY: Rgba = Rgba::new(74, 222, 128, 0.8);
pub const BULLISH_GLOW: Rgba = Rgba::new(74, 222, 128, 0.35);
pub const BULLISH_STROKE: Rgba = Rgba::new(163, 230, 196, 0.8);
pub const BEARISH_BODY: Rgba = Rgba::new(248, 113, 113, 0.8);
pub const BEARISH_GLOW: Rgba = Rgba::new(248, 113, 113, 0.35);
pub const BEARISH_STROKE: Rgba = Rgba::new(252, 165, 165, 0.8);
pub const HIGHLIGHT: Rgba = Rgba::new(255, 255, 255, 0.12);
