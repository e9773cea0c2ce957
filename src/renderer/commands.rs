//! Draw command definitions recorded by the paint context.

use std::sync::Arc;

use resvg::usvg;

use crate::transform::Transform;
use crate::widgets::{Color, Rect};

/// How a shape's outline is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaintStyle {
    /// Solid interior
    Fill,
    /// Outline only, with the given thickness in logical pixels
    Stroke(f32),
}

/// A single draw operation in local coordinates.
///
/// Coordinates are those of the widget that recorded the command; the
/// transform current at record time maps them to the surface.
#[derive(Clone)]
pub enum DrawCommand {
    /// Draw a circle (ripple rings and discs).
    Circle {
        /// Center point in local coordinates
        center: (f32, f32),
        /// Radius in logical pixels
        radius: f32,
        /// Paint color, alpha already folded in
        color: Color,
        style: PaintStyle,
    },

    /// Draw a filled rounded rectangle.
    RoundedRect {
        rect: Rect,
        color: Color,
        /// Corner radius in logical pixels
        radius: f32,
    },

    /// Draw a parsed SVG document scaled into `rect`.
    Svg { tree: Arc<usvg::Tree>, rect: Rect },
}

impl DrawCommand {
    pub fn circle(center: (f32, f32), radius: f32, color: Color, style: PaintStyle) -> Self {
        Self::Circle {
            center,
            radius,
            color,
            style,
        }
    }

    pub fn rounded_rect(rect: Rect, color: Color, radius: f32) -> Self {
        Self::RoundedRect {
            rect,
            color,
            radius,
        }
    }
}

impl std::fmt::Debug for DrawCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawCommand::Circle {
                center,
                radius,
                color,
                style,
            } => f
                .debug_struct("Circle")
                .field("center", center)
                .field("radius", radius)
                .field("color", color)
                .field("style", style)
                .finish(),
            DrawCommand::RoundedRect {
                rect,
                color,
                radius,
            } => f
                .debug_struct("RoundedRect")
                .field("rect", rect)
                .field("color", color)
                .field("radius", radius)
                .finish(),
            DrawCommand::Svg { rect, .. } => f.debug_struct("Svg").field("rect", rect).finish(),
        }
    }
}

/// A draw command together with the transform that was current when it
/// was recorded.
#[derive(Debug, Clone)]
pub struct RecordedCommand {
    pub command: DrawCommand,
    pub transform: Transform,
}
