//! The screen that owns a ripple view.
//!
//! [`HostScreen`] ties the ripple's animation to the screen's visible
//! lifetime: it starts the ripple when created and stops it when destroyed,
//! guarding both calls on the view's running flag. It also drives frames:
//! advance animations, lay out, paint, rasterize.

use std::time::{Duration, Instant};

use crate::attributes::{AttributeSet, DisplayMetrics};
use crate::error::Result;
use crate::layout::Constraints;
use crate::renderer::{Frame, PaintContext, SoftwareRenderer};
use crate::widgets::{ChangeFlags, Color, RippleView, Widget};

pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    pub metrics: DisplayMetrics,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 480,
            height: 480,
            background_color: Color::WHITE,
            metrics: DisplayMetrics::default(),
        }
    }
}

pub struct HostScreen {
    config: ScreenConfig,
    ripple: RippleView,
    renderer: SoftwareRenderer,
    paint_ctx: PaintContext,
}

impl HostScreen {
    /// Inflate the ripple view from a layout attribute string.
    pub fn from_layout(layout: &str, config: ScreenConfig) -> Result<Self> {
        let attrs = AttributeSet::parse(layout)?;
        let ripple = RippleView::from_attributes(Some(&attrs), &config.metrics)?;
        Self::with_view(ripple, config)
    }

    pub fn with_view(ripple: RippleView, config: ScreenConfig) -> Result<Self> {
        let renderer = SoftwareRenderer::new(config.width, config.height)?;
        Ok(Self {
            config,
            ripple,
            renderer,
            paint_ctx: PaintContext::with_capacity(16),
        })
    }

    pub fn width(mut self, width: u32) -> Self {
        self.config.width = width;
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.config.height = height;
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.config.background_color = color;
        self.ripple.mark_dirty(ChangeFlags::NEEDS_PAINT);
        self
    }

    pub fn ripple(&self) -> &RippleView {
        &self.ripple
    }

    pub fn ripple_mut(&mut self) -> &mut RippleView {
        &mut self.ripple
    }

    /// The screen became visible.
    pub fn on_create(&mut self, now: Instant) {
        log::info!(
            "Host screen created ({}x{})",
            self.config.width,
            self.config.height
        );
        if !self.ripple.is_ripple_animation_running() {
            self.ripple.start_ripple_animation(now);
        }
    }

    /// The screen is being torn down.
    pub fn on_destroy(&mut self) {
        log::info!("Host screen destroyed");
        if self.ripple.is_ripple_animation_running() {
            self.ripple.stop_ripple_animation();
        }
    }

    /// Produce the frame for `now`.
    ///
    /// Layout and rasterization are skipped when nothing changed since the
    /// previous frame.
    pub fn frame(&mut self, now: Instant) -> Result<&Frame> {
        self.renderer.resize(self.config.width, self.config.height)?;
        let resized = self.ripple.bounds().width != self.config.width as f32
            || self.ripple.bounds().height != self.config.height as f32;

        self.ripple.advance_animations(now);

        if resized || self.ripple.needs_layout() {
            let constraints = Constraints::new(
                0.0,
                0.0,
                self.config.width as f32,
                self.config.height as f32,
            );
            self.ripple.layout(constraints);
            self.ripple.set_origin(0.0, 0.0);
            self.ripple.mark_dirty(ChangeFlags::NEEDS_PAINT);
        }

        if self.ripple.needs_paint() {
            self.paint_ctx.clear();
            self.ripple.paint(&mut self.paint_ctx);
            self.renderer
                .render(&self.paint_ctx, self.config.background_color);
            self.ripple.clear_dirty();
        }

        Ok(self.renderer.frame())
    }

    /// Run the screen for `frames` frames spaced `frame_interval` apart on
    /// a virtual clock, handing each frame to `sink`.
    ///
    /// The ripple is started before the first frame and stopped after the
    /// last one, also when `sink` fails.
    pub fn run<F>(&mut self, frames: usize, frame_interval: Duration, mut sink: F) -> Result<()>
    where
        F: FnMut(usize, &Frame) -> Result<()>,
    {
        let _ = env_logger::try_init();

        let mut now = Instant::now();
        self.on_create(now);

        let result = (0..frames).try_for_each(|index| {
            let frame = self.frame(now)?;
            now += frame_interval;
            sink(index, frame)
        });

        self.on_destroy();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RippleError;
    use crate::widgets::RippleConfig;

    fn small_screen() -> ScreenConfig {
        ScreenConfig {
            width: 64,
            height: 64,
            background_color: Color::BLACK,
            metrics: DisplayMetrics::default(),
        }
    }

    #[test]
    fn test_from_layout_reads_attributes() {
        let host = HostScreen::from_layout(
            r#"radius="4dp" rippleAmount="3" duration="900""#,
            small_screen(),
        )
        .unwrap();
        assert_eq!(host.ripple().circles().len(), 3);
        assert_eq!(host.ripple().config().radius, 4.0);
        assert!(!host.ripple().is_ripple_animation_running());
    }

    #[test]
    fn test_from_layout_errors() {
        assert!(matches!(
            HostScreen::from_layout("radius", small_screen()),
            Err(RippleError::Layout(_))
        ));
        assert!(matches!(
            HostScreen::from_layout(r#"rippleAmount="0""#, small_screen()),
            Err(RippleError::ZeroRippleAmount)
        ));
        let zero_sized = ScreenConfig {
            width: 0,
            ..small_screen()
        };
        assert!(matches!(
            HostScreen::from_layout("", zero_sized),
            Err(RippleError::Surface { .. })
        ));
    }

    #[test]
    fn test_lifecycle_starts_and_stops() {
        let mut host = HostScreen::from_layout("", small_screen()).unwrap();
        let t0 = Instant::now();
        host.on_create(t0);
        assert!(host.ripple().is_ripple_animation_running());
        // A repeated create keeps the first start time
        host.on_create(t0 + Duration::from_secs(1));
        assert!(host.ripple().is_ripple_animation_running());

        host.on_destroy();
        assert!(!host.ripple().is_ripple_animation_running());
        host.on_destroy();
        assert!(!host.ripple().is_ripple_animation_running());
    }

    #[test]
    fn test_frame_draws_ripple_center() {
        let ripple = RippleView::new(RippleConfig::default().radius(8.0)).unwrap();
        let mut host = HostScreen::with_view(ripple, small_screen()).unwrap();

        // Before creation nothing is visible
        let frame = host.frame(Instant::now()).unwrap();
        assert_eq!(frame.pixel(32, 32), Some(Color::BLACK));

        let t0 = Instant::now();
        host.on_create(t0);
        let frame = host.frame(t0).unwrap();
        let center = frame.pixel(32, 32).unwrap();
        assert!(center.r > 0.99);
        assert_eq!(frame.pixel(1, 1), Some(Color::BLACK));
    }

    #[test]
    fn test_stopped_ripple_is_invisible() {
        let ripple = RippleView::new(RippleConfig::default().radius(8.0)).unwrap();
        let mut host = HostScreen::with_view(ripple, small_screen()).unwrap();
        let t0 = Instant::now();
        host.on_create(t0);
        host.frame(t0 + Duration::from_millis(400)).unwrap();
        host.on_destroy();

        let frame = host.frame(t0 + Duration::from_millis(800)).unwrap();
        assert_eq!(frame.pixel(32, 32), Some(Color::BLACK));
    }

    #[test]
    fn test_run_visits_every_frame_and_stops() {
        let mut host = HostScreen::from_layout(r#"radius="4""#, small_screen()).unwrap();
        let mut seen = Vec::new();
        host.run(5, Duration::from_millis(16), |index, frame| {
            seen.push((index, frame.width()));
            Ok(())
        })
        .unwrap();

        assert_eq!(seen, vec![(0, 64), (1, 64), (2, 64), (3, 64), (4, 64)]);
        assert!(!host.ripple().is_ripple_animation_running());
    }

    #[test]
    fn test_run_advances_virtual_clock_per_frame() {
        let mut host = HostScreen::from_layout(
            r#"radius="4" rippleAmount="1" duration="1000" scale="6""#,
            small_screen(),
        )
        .unwrap();
        // 12px right of the center: outside the resting disc, inside it
        // once the ripple has grown past a scale of 3
        let mut covered = Vec::new();
        host.run(4, Duration::from_millis(250), |_, frame| {
            covered.push(frame.pixel(44, 32).unwrap().r > 0.0);
            Ok(())
        })
        .unwrap();

        assert_eq!(covered, vec![false, false, true, true]);
    }

    #[test]
    fn test_run_stops_on_sink_error() {
        let mut host = HostScreen::from_layout("", small_screen()).unwrap();
        let result = host.run(10, Duration::from_millis(16), |index, _| {
            if index == 2 {
                Err(RippleError::Layout("sink failed".to_string()))
            } else {
                Ok(())
            }
        });
        assert!(matches!(result, Err(RippleError::Layout(_))));
        assert!(!host.ripple().is_ripple_animation_running());
    }

    #[test]
    fn test_resize_relayouts() {
        let mut host = HostScreen::from_layout("", small_screen())
            .unwrap()
            .width(32)
            .height(16);
        let frame = host.frame(Instant::now()).unwrap();
        assert_eq!((frame.width(), frame.height()), (32, 16));
        assert_eq!(host.ripple().bounds().width, 32.0);
    }
}
