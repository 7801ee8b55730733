//! Drawing surface abstraction for emberdrift backgrounds.
//!
//! Animations paint through the [`Surface`] trait, which mirrors the small
//! subset of a 2D canvas API they need. [`PixelCanvas`] rasterizes with
//! `vello_cpu` into a premultiplied RGBA pixmap for terminal display, and
//! [`RecordingSurface`] captures calls for inspection.

mod blur;
mod paint;
mod pixel;
mod recording;
mod surface;

pub use paint::{GradientStop, LinearGradient, Paint, RadialGradient};
pub use pixel::PixelCanvas;
pub use recording::{DrawOp, RecordingSurface};
pub use surface::{Composite, GraphicsState, LineCap, LineJoin, Surface};

pub use kurbo;
