//! A fixed-size box with an optional background and a centered child.
//!
//! Used as the content layer of a ripple view (a badge, an avatar frame).

use std::time::Instant;

use crate::layout::{Constraints, Size};
use crate::renderer::PaintContext;

use super::widget::{ChangeFlags, Color, Rect, Widget};

pub struct Container {
    width: Option<f32>,
    height: Option<f32>,
    background: Color,
    corner_radius: f32,
    child: Option<Box<dyn Widget>>,
    bounds: Rect,
    dirty_flags: ChangeFlags,
}

impl Container {
    pub fn new() -> Self {
        Self {
            width: None,
            height: None,
            background: Color::TRANSPARENT,
            corner_radius: 0.0,
            child: None,
            bounds: Rect::default(),
            dirty_flags: ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
        }
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn child(mut self, child: impl Widget + 'static) -> Self {
        self.child = Some(Box::new(child));
        self
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Container {
    fn advance_animations(&mut self, now: Instant) -> bool {
        self.child
            .as_mut()
            .is_some_and(|child| child.advance_animations(now))
    }

    fn layout(&mut self, constraints: Constraints) -> Size {
        // Unset dimensions wrap the child
        let child_size = self
            .child
            .as_mut()
            .map(|child| child.layout(constraints))
            .unwrap_or_default();
        let size = constraints.constrain(Size::new(
            self.width.unwrap_or(child_size.width),
            self.height.unwrap_or(child_size.height),
        ));

        self.bounds.width = size.width;
        self.bounds.height = size.height;
        self.dirty_flags.remove(ChangeFlags::NEEDS_LAYOUT);
        size
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.bounds.x = x;
        self.bounds.y = y;
        let bounds = self.bounds;
        if let Some(child) = self.child.as_mut() {
            let child_bounds = child.bounds();
            let placed = bounds.centered(child_bounds.width, child_bounds.height);
            child.set_origin(placed.x, placed.y);
        }
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn paint(&self, ctx: &mut PaintContext) {
        if self.background.a > 0.0 {
            ctx.draw_rounded_rect(self.bounds, self.background, self.corner_radius);
        }
        if let Some(child) = &self.child {
            child.paint(ctx);
        }
    }

    fn mark_dirty(&mut self, flags: ChangeFlags) {
        self.dirty_flags |= flags;
    }

    fn needs_layout(&self) -> bool {
        self.dirty_flags.contains(ChangeFlags::NEEDS_LAYOUT)
            || self.child.as_ref().is_some_and(|c| c.needs_layout())
    }

    fn needs_paint(&self) -> bool {
        self.dirty_flags.contains(ChangeFlags::NEEDS_PAINT)
            || self.child.as_ref().is_some_and(|c| c.needs_paint())
    }

    fn clear_dirty(&mut self) {
        self.dirty_flags = ChangeFlags::empty();
        if let Some(child) = self.child.as_mut() {
            child.clear_dirty();
        }
    }
}

pub fn container() -> Container {
    Container::new()
}
