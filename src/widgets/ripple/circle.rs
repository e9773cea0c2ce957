use crate::animation::{AnimatedProperty, AnimationTarget};
use crate::renderer::{PaintContext, PaintStyle};
use crate::transform::Transform;
use crate::widgets::{Color, Rect};

use super::config::{FillType, RippleConfig};

/// Paint shared by every circle of one ripple view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePaint {
    pub color: Color,
    pub style: PaintStyle,
    /// Inset from the bounds' inscribed circle; zero for filled discs
    pub stroke_width: f32,
}

impl CirclePaint {
    pub fn from_config(config: &RippleConfig) -> Self {
        let stroke_width = config.effective_stroke_width();
        let style = match config.fill_type {
            FillType::Fill => PaintStyle::Fill,
            FillType::Stroke => PaintStyle::Stroke(stroke_width),
        };
        Self {
            color: config.color,
            style,
            stroke_width,
        }
    }
}

/// One ring of the ripple.
///
/// The circle keeps its own transform properties, which the ripple's
/// animator set writes every frame, and starts out hidden.
#[derive(Debug, Clone, PartialEq)]
pub struct RippleCircle {
    index: usize,
    bounds: Rect,
    scale_x: f32,
    scale_y: f32,
    alpha: f32,
    visible: bool,
}

impl RippleCircle {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            bounds: Rect::default(),
            scale_x: 1.0,
            scale_y: 1.0,
            alpha: 1.0,
            visible: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn scale_x(&self) -> f32 {
        self.scale_x
    }

    pub fn scale_y(&self) -> f32 {
        self.scale_y
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Radius of the painted circle in unscaled coordinates:
    /// half the shorter side, minus the stroke width.
    pub fn draw_radius(&self, stroke_width: f32) -> f32 {
        self.bounds.width.min(self.bounds.height) / 2.0 - stroke_width
    }

    pub fn paint(&self, ctx: &mut PaintContext, paint: &CirclePaint) {
        if !self.visible || self.alpha <= 0.0 {
            return;
        }
        let radius = self.draw_radius(paint.stroke_width);
        if radius <= 0.0 {
            return;
        }

        let center = self.bounds.center();
        ctx.push_transform(Transform::scale_about(
            self.scale_x,
            self.scale_y,
            center.0,
            center.1,
        ));
        ctx.draw_circle(
            center,
            radius,
            paint.color.with_alpha_factor(self.alpha),
            paint.style,
        );
        ctx.pop_transform();
    }
}

impl AnimationTarget for RippleCircle {
    fn set_property(&mut self, property: AnimatedProperty, value: f32) {
        match property {
            AnimatedProperty::ScaleX => self.scale_x = value,
            AnimatedProperty::ScaleY => self.scale_y = value,
            AnimatedProperty::Alpha => self.alpha = value,
        }
    }
}
