pub mod commands;
mod software;

use std::sync::Arc;

use resvg::usvg;

use crate::transform::Transform;
use crate::widgets::{Color, Rect};

pub use commands::{DrawCommand, PaintStyle, RecordedCommand};
pub use software::{Frame, SoftwareRenderer};

/// Collects draw commands for one frame.
///
/// Widgets paint in surface coordinates; the transform stack lets them
/// apply per-widget transforms (such as a scale about their own center)
/// that compose parent→child.
pub struct PaintContext {
    commands: Vec<RecordedCommand>,
    /// Transform stack for composing parent→child transformations
    transform_stack: Vec<Transform>,
}

impl PaintContext {
    pub fn new() -> Self {
        Self::with_capacity(16)
    }

    /// Create a new PaintContext with pre-allocated capacity to avoid per-frame allocations
    pub fn with_capacity(commands: usize) -> Self {
        Self {
            commands: Vec::with_capacity(commands),
            transform_stack: Vec::with_capacity(4),
        }
    }

    /// Clear all buffers for reuse, preserving allocated capacity
    pub fn clear(&mut self) {
        self.commands.clear();
        self.transform_stack.clear();
    }

    pub fn draw_circle(
        &mut self,
        center: (f32, f32),
        radius: f32,
        color: Color,
        style: PaintStyle,
    ) {
        self.push(DrawCommand::circle(center, radius, color, style));
    }

    pub fn draw_rounded_rect(&mut self, rect: Rect, color: Color, radius: f32) {
        self.push(DrawCommand::rounded_rect(rect, color, radius));
    }

    pub fn draw_svg(&mut self, tree: Arc<usvg::Tree>, rect: Rect) {
        self.push(DrawCommand::Svg { tree, rect });
    }

    /// Push a transform onto the stack, composed with the current one
    pub fn push_transform(&mut self, transform: Transform) {
        let composed = self.current_transform().then(&transform);
        self.transform_stack.push(composed);
    }

    /// Pop a transform from the stack
    pub fn pop_transform(&mut self) {
        self.transform_stack.pop();
    }

    /// Get the current composed transform
    pub fn current_transform(&self) -> Transform {
        self.transform_stack
            .last()
            .copied()
            .unwrap_or(Transform::IDENTITY)
    }

    pub fn commands(&self) -> &[RecordedCommand] {
        &self.commands
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(RecordedCommand {
            command,
            transform: self.current_transform(),
        });
    }
}

impl Default for PaintContext {
    fn default() -> Self {
        Self::new()
    }
}
