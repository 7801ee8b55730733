//! The drawing surface trait.

use emberdrift_core::{Rgba, Viewport};
use kurbo::{BezPath, Circle, Rect};

use crate::paint::Paint;

/// How newly drawn pixels combine with what is already on the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Composite {
    #[default]
    SourceOver,
    /// Additive blending; overlapping glows brighten.
    Lighter,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Drawing state saved and restored by [`Surface::save`] / [`Surface::restore`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphicsState {
    pub global_alpha: f64,
    pub composite: Composite,
    pub shadow_color: Rgba,
    pub shadow_blur: f64,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            global_alpha: 1.0,
            composite: Composite::SourceOver,
            shadow_color: Rgba::TRANSPARENT,
            shadow_blur: 0.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
        }
    }
}

/// A 2D surface animations paint onto. Coordinates are logical pixels.
pub trait Surface {
    /// Resize the backing buffer for `viewport` and reset all drawing state.
    /// The user-space transform becomes a uniform scale by the device ratio.
    fn configure(&mut self, viewport: Viewport);

    /// Erase the whole surface to transparent.
    fn clear(&mut self);

    /// Push the current [`GraphicsState`].
    fn save(&mut self);

    /// Pop the most recently saved [`GraphicsState`]. No-op when nothing is saved.
    fn restore(&mut self);

    fn set_global_alpha(&mut self, alpha: f64);

    fn set_composite(&mut self, composite: Composite);

    fn set_shadow(&mut self, color: Rgba, blur: f64);

    fn set_line_style(&mut self, cap: LineCap, join: LineJoin);

    fn fill_rect(&mut self, rect: Rect, paint: &Paint);

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, paint: &Paint);

    fn fill_circle(&mut self, circle: Circle, paint: &Paint);

    fn stroke_path(&mut self, path: &BezPath, width: f64, paint: &Paint);

    /// Finish a frame. Surfaces that defer rasterization render here.
    fn present(&mut self) {}
}
