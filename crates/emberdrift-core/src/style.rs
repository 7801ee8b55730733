//! Background style selection.

use serde::{Deserialize, Serialize};

/// Which animation is painted behind the host content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundStyle {
    /// Drifting lines, candlesticks and sparks.
    #[default]
    Trails,
    /// Bullish and bearish candles sliding across the surface.
    Candles,
    /// Nothing is drawn.
    None,
}

impl BackgroundStyle {
    /// Cycle to the next background style.
    pub fn next(self) -> Self {
        match self {
            BackgroundStyle::Trails => BackgroundStyle::Candles,
            BackgroundStyle::Candles => BackgroundStyle::None,
            BackgroundStyle::None => BackgroundStyle::Trails,
        }
    }

    /// Short display name.
    pub fn name(self) -> &'static str {
        match self {
            BackgroundStyle::Trails => "trails",
            BackgroundStyle::Candles => "candles",
            BackgroundStyle::None => "none",
        }
    }
}
