//! CPU rasterization of recorded draw commands through tiny-skia.

use std::path::Path;

use resvg::tiny_skia::{self, FillRule, Paint, PathBuilder, Pixmap, Stroke};

use super::commands::{DrawCommand, PaintStyle, RecordedCommand};
use super::PaintContext;
use crate::error::{Result, RippleError};
use crate::transform::Transform;
use crate::widgets::{Color, Rect};

/// Bezier control point distance for approximating a quarter circle.
const ARC_KAPPA: f32 = 0.552_284_8;

/// A rendered frame.
pub struct Frame {
    pixmap: Pixmap,
}

impl Frame {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Unpremultiplied color of one pixel, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let color = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgba(
            f32::from(color.red()) / 255.0,
            f32::from(color.green()) / 255.0,
            f32::from(color.blue()) / 255.0,
            f32::from(color.alpha()) / 255.0,
        ))
    }

    pub fn to_rgba_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            let color = self
                .pixmap
                .pixel(x, y)
                .map(|p| p.demultiply())
                .unwrap_or(tiny_skia::ColorU8::from_rgba(0, 0, 0, 0));
            image::Rgba([color.red(), color.green(), color.blue(), color.alpha()])
        })
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.to_rgba_image().save(path.as_ref())?;
        Ok(())
    }
}

/// Rasterizes a [`PaintContext`] into a [`Frame`].
pub struct SoftwareRenderer {
    frame: Frame,
}

impl SoftwareRenderer {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            frame: Frame {
                pixmap: allocate(width, height)?,
            },
        })
    }

    pub fn width(&self) -> u32 {
        self.frame.width()
    }

    pub fn height(&self) -> u32 {
        self.frame.height()
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if width != self.width() || height != self.height() {
            log::info!("Resizing surface to {}x{}", width, height);
            self.frame.pixmap = allocate(width, height)?;
        }
        Ok(())
    }

    /// The most recently rendered frame
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn render(&mut self, ctx: &PaintContext, background: Color) -> &Frame {
        let pixmap = &mut self.frame.pixmap;
        pixmap.fill(to_skia_color(background));

        for recorded in ctx.commands() {
            draw(pixmap, recorded);
        }

        &self.frame
    }
}

fn allocate(width: u32, height: u32) -> Result<Pixmap> {
    Pixmap::new(width, height).ok_or(RippleError::Surface { width, height })
}

fn draw(pixmap: &mut Pixmap, recorded: &RecordedCommand) {
    let transform = recorded.transform.to_skia();

    match &recorded.command {
        DrawCommand::Circle {
            center,
            radius,
            color,
            style,
        } => {
            let Some(path) = PathBuilder::from_circle(center.0, center.1, *radius) else {
                return;
            };
            let paint = solid_paint(*color);
            match style {
                PaintStyle::Fill => {
                    pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
                }
                PaintStyle::Stroke(width) => {
                    let stroke = Stroke {
                        width: *width,
                        ..Stroke::default()
                    };
                    pixmap.stroke_path(&path, &paint, &stroke, transform, None);
                }
            }
        }
        DrawCommand::RoundedRect {
            rect,
            color,
            radius,
        } => {
            let Some(path) = rounded_rect_path(*rect, *radius) else {
                return;
            };
            pixmap.fill_path(&path, &solid_paint(*color), FillRule::Winding, transform, None);
        }
        DrawCommand::Svg { tree, rect } => {
            let size = tree.size();
            if size.width() <= 0.0 || size.height() <= 0.0 {
                return;
            }
            let fit = recorded
                .transform
                .then(&Transform::translate(rect.x, rect.y))
                .then(&Transform::scale_xy(
                    rect.width / size.width(),
                    rect.height / size.height(),
                ));
            resvg::render(tree, fit.to_skia(), &mut pixmap.as_mut());
        }
    }
}

fn solid_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia_color(color));
    paint.anti_alias = true;
    paint
}

fn to_skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba(
        color.r.clamp(0.0, 1.0),
        color.g.clamp(0.0, 1.0),
        color.b.clamp(0.0, 1.0),
        color.a.clamp(0.0, 1.0),
    )
    .unwrap_or(tiny_skia::Color::TRANSPARENT)
}

fn rounded_rect_path(rect: Rect, radius: f32) -> Option<tiny_skia::Path> {
    let skia_rect = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height)?;
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
    if r == 0.0 {
        return Some(PathBuilder::from_rect(skia_rect));
    }

    let (left, top) = (rect.x, rect.y);
    let (right, bottom) = (rect.x + rect.width, rect.y + rect.height);
    let k = r * ARC_KAPPA;

    let mut pb = PathBuilder::new();
    pb.move_to(left + r, top);
    pb.line_to(right - r, top);
    pb.cubic_to(right - r + k, top, right, top + r - k, right, top + r);
    pb.line_to(right, bottom - r);
    pb.cubic_to(right, bottom - r + k, right - r + k, bottom, right - r, bottom);
    pb.line_to(left + r, bottom);
    pb.cubic_to(left + r - k, bottom, left, bottom - r + k, left, bottom - r);
    pb.line_to(left, top + r);
    pb.cubic_to(left, top + r - k, left + r - k, top, left + r, top);
    pb.close();
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_single(command: DrawCommand, transform: Transform) -> SoftwareRenderer {
        let mut ctx = PaintContext::new();
        ctx.push_transform(transform);
        match command {
            DrawCommand::Circle {
                center,
                radius,
                color,
                style,
            } => ctx.draw_circle(center, radius, color, style),
            DrawCommand::RoundedRect {
                rect,
                color,
                radius,
            } => ctx.draw_rounded_rect(rect, color, radius),
            DrawCommand::Svg { tree, rect } => ctx.draw_svg(tree, rect),
        }
        let mut renderer = SoftwareRenderer::new(40, 40).unwrap();
        renderer.render(&ctx, Color::BLACK);
        renderer
    }

    fn red_at(renderer: &SoftwareRenderer, x: u32, y: u32) -> f32 {
        renderer.frame().pixel(x, y).unwrap().r
    }

    #[test]
    fn test_zero_sized_surface_is_an_error() {
        assert!(matches!(
            SoftwareRenderer::new(0, 10),
            Err(RippleError::Surface {
                width: 0,
                height: 10
            })
        ));
    }

    #[test]
    fn test_background_fill() {
        let mut renderer = SoftwareRenderer::new(4, 4).unwrap();
        let frame = renderer.render(&PaintContext::new(), Color::WHITE);
        assert_eq!(frame.pixel(2, 2), Some(Color::WHITE));
        assert_eq!(frame.pixel(4, 0), None);
    }

    #[test]
    fn test_filled_circle_covers_center() {
        let renderer = render_single(
            DrawCommand::circle((20.0, 20.0), 10.0, Color::RED, PaintStyle::Fill),
            Transform::IDENTITY,
        );
        assert!(red_at(&renderer, 20, 20) > 0.99);
        assert_eq!(red_at(&renderer, 2, 2), 0.0);
    }

    #[test]
    fn test_stroked_circle_leaves_center_empty() {
        let renderer = render_single(
            DrawCommand::circle((20.0, 20.0), 10.0, Color::RED, PaintStyle::Stroke(2.0)),
            Transform::IDENTITY,
        );
        assert_eq!(red_at(&renderer, 20, 20), 0.0);
        assert!(red_at(&renderer, 30, 20) > 0.5);
    }

    #[test]
    fn test_transform_is_applied() {
        let renderer = render_single(
            DrawCommand::circle((20.0, 20.0), 4.0, Color::RED, PaintStyle::Fill),
            Transform::scale_about(3.0, 3.0, 20.0, 20.0),
        );
        // Unscaled radius 4 would not reach 8px from the center
        assert!(red_at(&renderer, 28, 20) > 0.99);
    }

    #[test]
    fn test_rounded_rect() {
        let renderer = render_single(
            DrawCommand::rounded_rect(Rect::new(10.0, 10.0, 20.0, 20.0), Color::RED, 6.0),
            Transform::IDENTITY,
        );
        assert!(red_at(&renderer, 20, 20) > 0.99);
        // Corner is cut away
        assert!(red_at(&renderer, 10, 10) < 0.5);
    }

    #[test]
    fn test_to_rgba_image_dimensions() {
        let mut renderer = SoftwareRenderer::new(8, 6).unwrap();
        renderer.render(&PaintContext::new(), Color::RED);
        let image = renderer.frame().to_rgba_image();
        assert_eq!(image.dimensions(), (8, 6));
        assert_eq!(image.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_resize() {
        let mut renderer = SoftwareRenderer::new(8, 6).unwrap();
        renderer.resize(16, 12).unwrap();
        assert_eq!((renderer.width(), renderer.height()), (16, 12));
    }
}
