//! A surface that records calls instead of drawing.

use emberdrift_core::{Rgba, Viewport};
use kurbo::{BezPath, Circle, Rect};

use crate::paint::Paint;
use crate::surface::{Composite, LineCap, LineJoin, Surface};

/// One recorded [`Surface`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Configure(Viewport),
    Clear,
    Save,
    Restore,
    GlobalAlpha(f64),
    Composite(Composite),
    Shadow { color: Rgba, blur: f64 },
    LineStyle { cap: LineCap, join: LineJoin },
    FillRect { rect: Rect, paint: Paint },
    FillRoundedRect { rect: Rect, radius: f64, paint: Paint },
    FillCircle { circle: Circle, paint: Paint },
    StrokePath { path: BezPath, width: f64, paint: Paint },
    Present,
}

impl DrawOp {
    /// Whether this op puts pixels on the surface.
    pub fn is_shape(&self) -> bool {
        matches!(
            self,
            DrawOp::FillRect { .. }
                | DrawOp::FillRoundedRect { .. }
                | DrawOp::FillCircle { .. }
                | DrawOp::StrokePath { .. }
        )
    }
}

/// Records every call in order.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    depth: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded ops, oldest first.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Number of `save` calls not yet matched by a `restore`.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Forget everything recorded so far.
    pub fn reset(&mut self) {
        self.ops.clear();
        self.depth = 0;
    }

    /// Recorded shape ops, in order.
    pub fn shapes(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| op.is_shape())
    }
}

impl Surface for RecordingSurface {
    fn configure(&mut self, viewport: Viewport) {
        self.depth = 0;
        self.ops.push(DrawOp::Configure(viewport));
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn save(&mut self) {
        self.depth += 1;
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.ops.push(DrawOp::Restore);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ops.push(DrawOp::GlobalAlpha(alpha));
    }

    fn set_composite(&mut self, composite: Composite) {
        self.ops.push(DrawOp::Composite(composite));
    }

    fn set_shadow(&mut self, color: Rgba, blur: f64) {
        self.ops.push(DrawOp::Shadow { color, blur });
    }

    fn set_line_style(&mut self, cap: LineCap, join: LineJoin) {
        self.ops.push(DrawOp::LineStyle { cap, join });
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.ops.push(DrawOp::FillRect {
            rect,
            paint: paint.clone(),
        });
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, paint: &Paint) {
        self.ops.push(DrawOp::FillRoundedRect {
            rect,
            radius,
            paint: paint.clone(),
        });
    }

    fn fill_circle(&mut self, circle: Circle, paint: &Paint) {
        self.ops.push(DrawOp::FillCircle {
            circle,
            paint: paint.clone(),
        });
    }

    fn stroke_path(&mut self, path: &BezPath, width: f64, paint: &Paint) {
        self.ops.push(DrawOp::StrokePath {
            path: path.clone(),
            width,
            paint: paint.clone(),
        });
    }

    fn present(&mut self) {
        self.ops.push(DrawOp::Present);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order_and_tracks_depth() {
        let mut surface = RecordingSurface::new();
        surface.save();
        surface.set_global_alpha(0.4);
        surface.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), &Rgba::hex(0xffffff).into());
        assert_eq!(surface.depth(), 1);
        surface.restore();

        assert_eq!(surface.depth(), 0);
        assert_eq!(surface.ops().len(), 4);
        assert_eq!(surface.ops()[0], DrawOp::Save);
        assert_eq!(surface.shapes().count(), 1);
    }
}
