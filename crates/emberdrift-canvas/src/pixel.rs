//! [`Surface`] implementation rasterized by `vello_cpu`.
//!
//! Drawing calls are recorded into a `vello_cpu::RenderContext` in device
//! space (logical coordinates scaled by the device ratio) and rendered into
//! the pixmap on [`Surface::present`]. Shadows are rendered into a separate
//! layer around the shape, blurred, and drawn back underneath it. Shadow blur
//! is measured in logical pixels.

use std::fmt;
use std::sync::Arc;

use emberdrift_core::{Rgba, Viewport};
use kurbo::{Affine, BezPath, Cap, Circle, Join, Rect, RoundedRect, Shape, Stroke, Vec2};
use tracing::debug;
use vello_cpu::peniko::{BlendMode, Color, Compose, Gradient, ImageSampler, Mix};
use vello_cpu::{Image, ImageSource, Pixmap, RenderContext};

use crate::blur;
use crate::paint::{GradientStop, Paint};
use crate::surface::{Composite, GraphicsState, LineCap, LineJoin, Surface};

/// Curve flattening tolerance, in logical pixels.
const TOLERANCE: f64 = 0.1;

/// A drawing surface backed by a premultiplied RGBA8 pixmap.
pub struct PixelCanvas {
    ctx: RenderContext,
    pixmap: Pixmap,
    /// Scratch context for shadow layers, reused while the layer size holds.
    shadow_ctx: Option<RenderContext>,
    /// Device pixels per logical pixel.
    scale: f64,
    state: GraphicsState,
    saved: Vec<GraphicsState>,
    /// Commands recorded since the pixmap was last rendered.
    pending: bool,
}

impl fmt::Debug for PixelCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelCanvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("scale", &self.scale)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl PixelCanvas {
    /// Acquire a canvas sized for `viewport`. Returns `None` when the
    /// viewport has no backing pixels to draw into.
    pub fn for_viewport(viewport: Viewport) -> Option<Self> {
        if viewport.is_empty() {
            debug!(?viewport, "viewport has no pixels, canvas unavailable");
            return None;
        }
        let mut canvas = Self {
            ctx: RenderContext::new(1, 1),
            pixmap: Pixmap::new(1, 1),
            shadow_ctx: None,
            scale: 1.0,
            state: GraphicsState::default(),
            saved: Vec::new(),
            pending: false,
        };
        canvas.configure(viewport);
        Some(canvas)
    }

    /// Backing width in device pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.pixmap.width())
    }

    /// Backing height in device pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.pixmap.height())
    }

    /// Premultiplied RGBA8 bytes, row-major, as of the last
    /// [`Surface::present`].
    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Premultiplied components of a device pixel, or `None` outside the
    /// buffer.
    pub fn premul(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let idx = (y as usize * self.width() as usize + x as usize) * 4;
        let px = self.data().get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    fn draw(&mut self, outline: Outline, paint: &Paint) {
        let state = self.state;
        if state.global_alpha <= 0.0 {
            return;
        }
        let alpha = state.global_alpha as f32;
        let blend = blend_mode(state.composite);

        if state.shadow_blur > 0.0 && state.shadow_color.a > 0.0 {
            self.draw_shadow(&outline, state.shadow_color.fade(alpha), state.shadow_blur, blend);
        }
        if paint.is_invisible() {
            return;
        }

        self.ctx.set_transform(Affine::scale(self.scale));
        self.ctx.set_paint_transform(Affine::IDENTITY);
        self.ctx.set_blend_mode(blend);
        set_paint(&mut self.ctx, paint, alpha);
        outline.render(&mut self.ctx);
        self.pending = true;
    }

    /// Render `outline` in `color` into a layer padded by the blur reach,
    /// blur it, and draw the layer at its device position.
    fn draw_shadow(&mut self, outline: &Outline, color: Rgba, blur: f64, blend: BlendMode) {
        let sigma = blur * self.scale / 2.0;
        let reach = blur::reach(sigma) as f64;
        let bounds = outline.bounds().scale_from_origin(self.scale);
        let canvas = Rect::new(0.0, 0.0, f64::from(self.width()), f64::from(self.height()));
        let area = bounds.inflate(reach, reach).expand().intersect(canvas);
        if !area.is_finite() || area.width() < 1.0 || area.height() < 1.0 {
            return;
        }
        let (w, h) = (area.width() as u16, area.height() as u16);
        let origin = Vec2::new(area.x0, area.y0);

        let mut layer = match self.shadow_ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => RenderContext::new(w, h),
        };
        layer.reset();
        layer.set_transform(Affine::translate(-origin) * Affine::scale(self.scale));
        layer.set_paint_transform(Affine::IDENTITY);
        layer.set_paint(to_color(color, 1.0));
        outline.render(&mut layer);
        layer.flush();
        let mut pixmap = Pixmap::new(w, h);
        layer.render_to_pixmap(&mut pixmap);
        self.shadow_ctx = Some(layer);

        blur::blur_rgba8_premul(
            pixmap.data_as_u8_slice_mut(),
            usize::from(w),
            usize::from(h),
            sigma,
        );

        self.ctx.set_transform(Affine::translate(origin));
        self.ctx.set_paint_transform(Affine::IDENTITY);
        self.ctx.set_blend_mode(blend);
        self.ctx.set_paint(Image {
            image: ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: ImageSampler::default(),
        });
        self.ctx
            .fill_rect(&Rect::new(0.0, 0.0, f64::from(w), f64::from(h)));
        self.pending = true;
    }
}

impl Surface for PixelCanvas {
    fn configure(&mut self, viewport: Viewport) {
        let (width, height) = viewport.backing_size();
        let width = u16::try_from(width).unwrap_or(u16::MAX).max(1);
        let height = u16::try_from(height).unwrap_or(u16::MAX).max(1);
        self.ctx = RenderContext::new(width, height);
        self.pixmap = Pixmap::new(width, height);
        self.shadow_ctx = None;
        self.scale = viewport.device_ratio;
        self.state = GraphicsState::default();
        self.saved.clear();
        self.pending = false;
        debug!(width, height, ratio = viewport.device_ratio, "canvas configured");
    }

    fn clear(&mut self) {
        self.ctx.reset();
        self.pending = true;
    }

    fn save(&mut self) {
        self.saved.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        if alpha.is_finite() {
            self.state.global_alpha = alpha.clamp(0.0, 1.0);
        }
    }

    fn set_composite(&mut self, composite: Composite) {
        self.state.composite = composite;
    }

    fn set_shadow(&mut self, color: Rgba, blur: f64) {
        self.state.shadow_color = color;
        self.state.shadow_blur = if blur.is_finite() { blur.max(0.0) } else { 0.0 };
    }

    fn set_line_style(&mut self, cap: LineCap, join: LineJoin) {
        self.state.line_cap = cap;
        self.state.line_join = join;
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.draw(Outline::Fill(rect.abs().to_path(TOLERANCE)), paint);
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, paint: &Paint) {
        let rounded = RoundedRect::from_rect(rect.abs(), radius.max(0.0));
        self.draw(Outline::Fill(rounded.to_path(TOLERANCE)), paint);
    }

    fn fill_circle(&mut self, circle: Circle, paint: &Paint) {
        self.draw(Outline::Fill(circle.to_path(TOLERANCE)), paint);
    }

    fn stroke_path(&mut self, path: &BezPath, width: f64, paint: &Paint) {
        if width <= 0.0 || !width.is_finite() {
            return;
        }
        let stroke = Stroke::new(width)
            .with_caps(to_cap(self.state.line_cap))
            .with_join(to_join(self.state.line_join));
        self.draw(Outline::Stroke(path.clone(), stroke), paint);
    }

    fn present(&mut self) {
        if !self.pending {
            return;
        }
        self.ctx.flush();
        self.pixmap.data_as_u8_slice_mut().fill(0);
        self.ctx.render_to_pixmap(&mut self.pixmap);
        self.pending = false;
    }
}

/// Geometry in logical coordinates.
enum Outline {
    Fill(BezPath),
    Stroke(BezPath, Stroke),
}

impl Outline {
    fn render(&self, ctx: &mut RenderContext) {
        match self {
            Outline::Fill(path) => ctx.fill_path(path),
            Outline::Stroke(path, stroke) => {
                ctx.set_stroke(stroke.clone());
                ctx.stroke_path(path);
            }
        }
    }

    /// Logical bounds including the stroke, with room for miter corners.
    fn bounds(&self) -> Rect {
        match self {
            Outline::Fill(path) => path.bounding_box(),
            Outline::Stroke(path, stroke) => {
                let pad = stroke.width * stroke.miter_limit.max(1.0) / 2.0;
                path.bounding_box().inflate(pad, pad)
            }
        }
    }
}

fn blend_mode(composite: Composite) -> BlendMode {
    match composite {
        Composite::SourceOver => BlendMode::default(),
        Composite::Lighter => BlendMode::new(Mix::Normal, Compose::Plus),
    }
}

fn to_color(color: Rgba, alpha: f32) -> Color {
    let faded = color.fade(alpha);
    Color::from_rgba8(faded.r, faded.g, faded.b, faded.alpha8())
}

fn to_stops(stops: &[GradientStop], alpha: f32) -> Vec<(f32, Color)> {
    stops
        .iter()
        .map(|stop| (stop.offset.clamp(0.0, 1.0) as f32, to_color(stop.color, alpha)))
        .collect()
}

fn set_paint(ctx: &mut RenderContext, paint: &Paint, alpha: f32) {
    match paint {
        Paint::Solid(color) => ctx.set_paint(to_color(*color, alpha)),
        Paint::Linear(gradient) => ctx.set_paint(
            Gradient::new_linear(gradient.start, gradient.end)
                .with_stops(to_stops(&gradient.stops, alpha).as_slice()),
        ),
        Paint::Radial(gradient) => ctx.set_paint(
            Gradient::new_two_point_radial(
                gradient.center,
                gradient.inner_radius.max(0.0) as f32,
                gradient.center,
                gradient.outer_radius.max(0.0) as f32,
            )
            .with_stops(to_stops(&gradient.stops, alpha).as_slice()),
        ),
    }
}

fn to_cap(cap: LineCap) -> Cap {
    match cap {
        LineCap::Butt => Cap::Butt,
        LineCap::Round => Cap::Round,
        LineCap::Square => Cap::Square,
    }
}

fn to_join(join: LineJoin) -> Join {
    match join {
        LineJoin::Miter => Join::Miter,
        LineJoin::Round => Join::Round,
        LineJoin::Bevel => Join::Bevel,
    }
}
