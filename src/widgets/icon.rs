//! SVG icon widget.
//!
//! The document is parsed once on construction and rasterized by the
//! renderer every frame at the icon's laid-out size.

use std::path::Path;
use std::sync::Arc;

use resvg::usvg;

use crate::error::{Result, RippleError};
use crate::layout::{Constraints, Size};
use crate::renderer::PaintContext;

use super::impl_dirty_flags;
use super::widget::{ChangeFlags, Rect, Widget};

pub struct Icon {
    tree: Arc<usvg::Tree>,
    width: Option<f32>,
    height: Option<f32>,
    bounds: Rect,
    dirty_flags: ChangeFlags,
}

impl Icon {
    pub fn from_svg_data(data: &[u8]) -> Result<Self> {
        let tree = usvg::Tree::from_data(data, &usvg::Options::default())
            .map_err(|e| RippleError::Svg(e.to_string()))?;
        Ok(Self {
            tree: Arc::new(tree),
            width: None,
            height: None,
            bounds: Rect::default(),
            dirty_flags: ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
        })
    }

    pub fn from_svg_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_svg_data(&data)
    }

    /// Intrinsic size of the SVG document
    pub fn intrinsic_size(&self) -> Size {
        let size = self.tree.size();
        Size::new(size.width(), size.height())
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    /// Fill in a missing dimension from the intrinsic aspect ratio.
    fn preferred_size(&self) -> Size {
        let intrinsic = self.intrinsic_size();
        let aspect = if intrinsic.height > 0.0 {
            intrinsic.width / intrinsic.height
        } else {
            1.0
        };
        match (self.width, self.height) {
            (Some(w), Some(h)) => Size::new(w, h),
            (Some(w), None) => Size::new(w, w / aspect),
            (None, Some(h)) => Size::new(h * aspect, h),
            (None, None) => intrinsic,
        }
    }
}

impl Widget for Icon {
    fn layout(&mut self, constraints: Constraints) -> Size {
        let size = constraints.constrain(self.preferred_size());
        self.bounds.width = size.width;
        self.bounds.height = size.height;
        self.dirty_flags.remove(ChangeFlags::NEEDS_LAYOUT);
        size
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.bounds.x = x;
        self.bounds.y = y;
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn paint(&self, ctx: &mut PaintContext) {
        if self.bounds.width > 0.0 && self.bounds.height > 0.0 {
            ctx.draw_svg(self.tree.clone(), self.bounds);
        }
    }

    impl_dirty_flags!();
}

pub fn icon(data: &[u8]) -> Result<Icon> {
    Icon::from_svg_data(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, SoftwareRenderer};
    use crate::widgets::Color;

    const SQUARE: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10">
        <rect width="20" height="10" fill="#00FF00"/>
    </svg>"##;

    #[test]
    fn test_intrinsic_size() {
        let icon = icon(SQUARE).unwrap();
        assert_eq!(icon.intrinsic_size(), Size::new(20.0, 10.0));
    }

    #[test]
    fn test_invalid_svg() {
        assert!(matches!(
            Icon::from_svg_data(b"not svg"),
            Err(RippleError::Svg(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Icon::from_svg_file("/definitely/not/here.svg").err().unwrap();
        assert!(matches!(
            err,
            RippleError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound
        ));
    }

    #[test]
    fn test_keeps_aspect_ratio() {
        let mut icon = icon(SQUARE).unwrap().width(40.0);
        let size = icon.layout(Constraints::loose(Size::new(100.0, 100.0)));
        assert_eq!(size, Size::new(40.0, 20.0));
    }

    #[test]
    fn test_paints_svg_into_bounds() {
        let mut icon = icon(SQUARE).unwrap().width(8.0).height(8.0);
        icon.layout(Constraints::loose(Size::new(16.0, 16.0)));
        icon.set_origin(4.0, 4.0);

        let mut ctx = PaintContext::new();
        icon.paint(&mut ctx);
        assert!(matches!(
            ctx.commands()[0].command,
            DrawCommand::Svg { rect, .. } if rect == Rect::new(4.0, 4.0, 8.0, 8.0)
        ));

        let mut renderer = SoftwareRenderer::new(16, 16).unwrap();
        let frame = renderer.render(&ctx, Color::BLACK);
        let inside = frame.pixel(8, 8).unwrap();
        assert!(inside.g > 0.99);
        let outside = frame.pixel(1, 1).unwrap();
        assert_eq!(outside.g, 0.0);
    }
}
