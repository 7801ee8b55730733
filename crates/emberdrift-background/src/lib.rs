//! Background animations for emberdrift.
//!
//! Two animations share one frame clock and paint through
//! [`emberdrift_canvas::Surface`]: drifting trails (lines, candlesticks and
//! sparks riding a parallax wave) and a simpler candle drift. Randomness
//! comes from an injected [`fastrand::Rng`] so runs are reproducible.

mod candles;
mod clock;
mod debounce;
mod palette;
mod random;
mod runner;
mod state;
mod trails;

pub use candles::{CandleField, DriftCandle, MIN_CANDLES, Trend, candle_count};
pub use clock::{FRAME_INTERVAL_MS, FrameClock, FrameStep, MAX_DELTA_SECONDS, TARGET_FPS};
pub use debounce::{Debouncer, RESIZE_DEBOUNCE_MS};
pub use palette::{CANDLE_PALETTE, FLOW_PALETTE, Hue, OVERLAY};
pub use runner::{AnimationLoop, CancelToken, FixedStep, FrameSource, RunSummary};
pub use state::{BackgroundState, FrameOutcome};
pub use trails::{MIN_TRAILS, RECYCLE_THRESHOLD, Trail, TrailField, TrailKind, trail_count};
