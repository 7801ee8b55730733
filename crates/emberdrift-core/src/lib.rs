//! Core types shared by the emberdrift crates.
//!
//! Colors, the logical viewport a background is laid out in, and the set of
//! background styles the host can switch between.

mod color;
mod style;
mod viewport;

pub use color::Rgba;
pub use style::BackgroundStyle;
pub use viewport::{MAX_DEVICE_RATIO, Viewport};
