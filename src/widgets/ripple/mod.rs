//! Concentric ripple widget.
//!
//! A [`RippleView`] stacks `ripple_amount` circles in its center and loops
//! each of them through a grow-and-fade cycle. Circle `i` starts
//! `i * duration / ripple_amount` after the first one, so the rings form a
//! continuous outward wave instead of pulsing in sync. Each cycle restarts
//! from the small, opaque state, so rings only ever travel outward.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use ripple_view::prelude::*;
//!
//! let mut ripple = RippleView::new(RippleConfig::default().ripple_amount(3))?;
//! let t0 = Instant::now();
//! ripple.start_ripple_animation(t0);
//! ripple.advance_animations(t0 + Duration::from_millis(500));
//! assert!(ripple.is_ripple_animation_running());
//! ripple.stop_ripple_animation();
//! assert!(!ripple.is_ripple_animation_running());
//! # Ok::<(), ripple_view::RippleError>(())
//! ```

mod circle;
mod config;

use std::time::Instant;

pub use circle::{CirclePaint, RippleCircle};
pub use config::{
    FillType, RippleConfig, DEFAULT_COLOR, DEFAULT_DURATION_MS, DEFAULT_RADIUS_DP,
    DEFAULT_RIPPLE_COUNT, DEFAULT_SCALE, DEFAULT_STROKE_WIDTH_DP, KNOWN_ATTRIBUTES,
};

use crate::animation::{
    AnimatedProperty, AnimationTarget, AnimatorSet, PropertyAnimator, PropertyUpdate,
    RepeatCount, RepeatMode, TimingFunction,
};
use crate::attributes::{AttributeSet, DisplayMetrics};
use crate::error::{Result, RippleError};
use crate::layout::{Constraints, Size};
use crate::renderer::PaintContext;
use crate::widgets::{ChangeFlags, Rect, Widget};

/// Container that draws looping concentric ripples behind its child.
pub struct RippleView {
    config: RippleConfig,
    paint: CirclePaint,
    circles: Vec<RippleCircle>,
    animator_set: AnimatorSet,
    animation_running: bool,
    child: Option<Box<dyn Widget>>,
    bounds: Rect,
    dirty_flags: ChangeFlags,
}

impl RippleView {
    /// Build the circles and their animator set. The animation is not started.
    pub fn new(config: RippleConfig) -> Result<Self> {
        config.validate()?;

        let delay = config.stagger_delay();
        let mut animator_set = AnimatorSet::new()
            .with_duration(config.duration)
            .with_timing(TimingFunction::AccelerateDecelerate);

        let mut circles = Vec::with_capacity(config.ripple_amount as usize);
        for index in 0..config.ripple_amount as usize {
            circles.push(RippleCircle::new(index));

            let start_delay = delay * index as u32;
            let track = |property, from, to| {
                PropertyAnimator::new(index, property, from, to)
                    .repeat_count(RepeatCount::Infinite)
                    .repeat_mode(RepeatMode::Restart)
                    .start_delay(start_delay)
            };
            animator_set.play_together([
                track(AnimatedProperty::ScaleX, 1.0, config.scale),
                track(AnimatedProperty::ScaleY, 1.0, config.scale),
                track(AnimatedProperty::Alpha, 1.0, 0.0),
            ]);
        }

        log::debug!(
            "Created ripple view: {} circles, stagger {:?}, extent {}px",
            circles.len(),
            delay,
            config.circle_extent()
        );

        Ok(Self {
            paint: CirclePaint::from_config(&config),
            config,
            circles,
            animator_set,
            animation_running: false,
            child: None,
            bounds: Rect::default(),
            dirty_flags: ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
        })
    }

    /// Build from layout attributes.
    ///
    /// A ripple view has to be declared with attributes; `None` is rejected
    /// with [`RippleError::MissingAttributes`]. An empty set yields the
    /// defaults.
    pub fn from_attributes(attrs: Option<&AttributeSet>, metrics: &DisplayMetrics) -> Result<Self> {
        let attrs = attrs.ok_or(RippleError::MissingAttributes)?;
        Self::new(RippleConfig::from_attributes(attrs, metrics)?)
    }

    /// Set the content drawn on top of the ripple, centered.
    pub fn child(mut self, child: impl Widget + 'static) -> Self {
        self.child = Some(Box::new(child));
        self.dirty_flags |= ChangeFlags::NEEDS_LAYOUT;
        self
    }

    pub fn start_ripple_animation(&mut self, now: Instant) {
        if self.is_ripple_animation_running() {
            return;
        }
        for circle in &mut self.circles {
            circle.set_visible(true);
        }
        let updates = self.animator_set.start(now);
        self.apply_updates(&updates);
        self.animation_running = true;
        self.dirty_flags |= ChangeFlags::NEEDS_PAINT;
        log::debug!("Ripple animation started");
    }

    /// Stop immediately; circles jump to their end state (fully scaled and
    /// transparent) instead of freezing mid-cycle.
    pub fn stop_ripple_animation(&mut self) {
        if !self.is_ripple_animation_running() {
            return;
        }
        let updates = self.animator_set.end();
        self.apply_updates(&updates);
        self.animation_running = false;
        log::debug!("Ripple animation stopped");
    }

    pub fn is_ripple_animation_running(&self) -> bool {
        self.animation_running
    }

    pub fn config(&self) -> &RippleConfig {
        &self.config
    }

    pub fn circles(&self) -> &[RippleCircle] {
        &self.circles
    }

    pub fn animator_set(&self) -> &AnimatorSet {
        &self.animator_set
    }

    /// Size the view takes when nothing constrains it: room for a fully
    /// scaled circle.
    pub fn natural_size(&self) -> Size {
        let side = self.config.circle_extent() * self.config.scale;
        Size::new(side, side)
    }

    fn apply_updates(&mut self, updates: &[PropertyUpdate]) {
        for update in updates {
            if let Some(circle) = self.circles.get_mut(update.target) {
                circle.set_property(update.property, update.value);
            }
        }
        if !updates.is_empty() {
            self.dirty_flags |= ChangeFlags::NEEDS_PAINT;
        }
    }

    fn place_children(&mut self) {
        let extent = self.config.circle_extent();
        let circle_bounds = self.bounds.centered(extent, extent);
        for circle in &mut self.circles {
            circle.set_bounds(circle_bounds);
        }

        if let Some(child) = self.child.as_mut() {
            let child_bounds = child.bounds();
            let placed = self
                .bounds
                .centered(child_bounds.width, child_bounds.height);
            child.set_origin(placed.x, placed.y);
        }
    }
}

impl Widget for RippleView {
    fn advance_animations(&mut self, now: Instant) -> bool {
        if self.animation_running {
            let updates = self.animator_set.advance(now);
            self.apply_updates(&updates);
        }
        let child_animating = self
            .child
            .as_mut()
            .is_some_and(|child| child.advance_animations(now));
        self.animation_running || child_animating
    }

    fn layout(&mut self, constraints: Constraints) -> Size {
        let size = if constraints.is_bounded() {
            constraints.max_size()
        } else {
            constraints.constrain(self.natural_size())
        };

        if let Some(child) = self.child.as_mut() {
            child.layout(Constraints::loose(size));
        }

        self.bounds.width = size.width;
        self.bounds.height = size.height;
        self.place_children();
        self.dirty_flags.remove(ChangeFlags::NEEDS_LAYOUT);
        size
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.bounds.x = x;
        self.bounds.y = y;
        self.place_children();
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn paint(&self, ctx: &mut PaintContext) {
        for circle in &self.circles {
            circle.paint(ctx, &self.paint);
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

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::renderer::{DrawCommand, PaintStyle};
    use crate::widgets::container;

    fn ripple(config: RippleConfig) -> RippleView {
        RippleView::new(config).unwrap()
    }

    fn delays(view: &RippleView) -> Vec<Duration> {
        view.animator_set()
            .animators()
            .iter()
            .map(|a| a.get_start_delay())
            .collect()
    }

    #[test]
    fn test_construction_builds_circles_and_tracks() {
        let view = ripple(RippleConfig::default());
        assert_eq!(view.circles().len(), 6);
        assert_eq!(view.animator_set().len(), 18);
        assert!(view.circles().iter().all(|c| !c.is_visible()));
        assert!(!view.is_ripple_animation_running());
        assert!(!view.animator_set().is_running());
    }

    #[test]
    fn test_tracks_share_set_timing() {
        let view = ripple(RippleConfig::default().duration(Duration::from_millis(1800)));
        assert_eq!(view.animator_set().duration(), Duration::from_millis(1800));
        assert!(matches!(
            view.animator_set().timing(),
            TimingFunction::AccelerateDecelerate
        ));
        for animator in view.animator_set().animators() {
            assert_eq!(animator.get_repeat_count(), RepeatCount::Infinite);
            assert_eq!(animator.get_repeat_mode(), RepeatMode::Restart);
        }
    }

    #[test]
    fn test_track_ranges() {
        let view = ripple(RippleConfig::default().ripple_amount(1).scale(4.0));
        let tracks = view.animator_set().animators();
        assert_eq!(
            tracks
                .iter()
                .map(|a| (a.property(), a.from(), a.to()))
                .collect::<Vec<_>>(),
            vec![
                (AnimatedProperty::ScaleX, 1.0, 4.0),
                (AnimatedProperty::ScaleY, 1.0, 4.0),
                (AnimatedProperty::Alpha, 1.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_third_circle_starts_after_one_second() {
        let view = ripple(
            RippleConfig::default()
                .duration(Duration::from_millis(3000))
                .ripple_amount(6),
        );
        let third: Vec<_> = view
            .animator_set()
            .animators()
            .iter()
            .filter(|a| a.target() == 2)
            .map(|a| a.get_start_delay())
            .collect();
        assert_eq!(third, vec![Duration::from_millis(1000); 3]);
    }

    #[test]
    fn test_start_delays_are_staggered() {
        let view = ripple(RippleConfig::default().ripple_amount(4));
        let delays = delays(&view);
        for (i, chunk) in delays.chunks(3).enumerate() {
            let expected = Duration::from_millis(750) * i as u32;
            assert!(chunk.iter().all(|d| *d == expected));
        }
    }

    #[test]
    fn test_zero_ripple_amount_is_rejected() {
        assert!(matches!(
            RippleView::new(RippleConfig::default().ripple_amount(0)),
            Err(RippleError::ZeroRippleAmount)
        ));
    }

    #[test]
    fn test_from_attributes_requires_attributes() {
        let metrics = DisplayMetrics::default();
        assert!(matches!(
            RippleView::from_attributes(None, &metrics),
            Err(RippleError::MissingAttributes)
        ));
        let view = RippleView::from_attributes(Some(&AttributeSet::new()), &metrics).unwrap();
        assert_eq!(view.config(), &RippleConfig::new(&metrics));
    }

    #[test]
    fn test_from_attributes_zero_amount() {
        let attrs = AttributeSet::new().with("rippleAmount", "0");
        assert!(matches!(
            RippleView::from_attributes(Some(&attrs), &DisplayMetrics::default()),
            Err(RippleError::ZeroRippleAmount)
        ));
    }

    #[test]
    fn test_start_makes_circles_visible() {
        let mut view = ripple(RippleConfig::default());
        view.start_ripple_animation(Instant::now());
        assert!(view.is_ripple_animation_running());
        assert!(view.animator_set().is_running());
        assert!(view.circles().iter().all(|c| c.is_visible()));
    }

    #[test]
    fn test_double_start_is_single_start() {
        let mut view = ripple(RippleConfig::default().ripple_amount(2));
        let t0 = Instant::now();
        view.start_ripple_animation(t0);
        // A second start must not restart the clock
        view.start_ripple_animation(t0 + Duration::from_millis(700));
        assert!(view.is_ripple_animation_running());

        view.advance_animations(t0 + Duration::from_millis(1500));
        let mut reference = ripple(RippleConfig::default().ripple_amount(2));
        reference.start_ripple_animation(t0);
        reference.advance_animations(t0 + Duration::from_millis(1500));
        assert_eq!(view.circles(), reference.circles());
    }

    #[test]
    fn test_restart_matches_fresh_start() {
        let config = RippleConfig::default().ripple_amount(3);
        let t0 = Instant::now();
        let mut view = ripple(config.clone());
        view.start_ripple_animation(t0);
        view.advance_animations(t0 + Duration::from_millis(500));
        view.stop_ripple_animation();

        let t1 = t0 + Duration::from_secs(5);
        view.start_ripple_animation(t1);
        // Delayed circles are back at rest, not left at their end state
        assert!(view
            .circles()
            .iter()
            .all(|c| c.scale_x() == 1.0 && c.scale_y() == 1.0 && c.alpha() == 1.0));
        view.advance_animations(t1 + Duration::from_millis(10));

        let mut fresh = ripple(config);
        fresh.start_ripple_animation(t1);
        fresh.advance_animations(t1 + Duration::from_millis(10));
        assert_eq!(view.circles(), fresh.circles());
    }

    #[test]
    fn test_stop_when_not_running_is_noop() {
        let mut view = ripple(RippleConfig::default());
        view.stop_ripple_animation();
        assert!(!view.is_ripple_animation_running());
        assert!(view
            .circles()
            .iter()
            .all(|c| c.scale_x() == 1.0 && c.alpha() == 1.0));
    }

    #[test]
    fn test_start_then_stop() {
        let mut view = ripple(RippleConfig::default());
        view.start_ripple_animation(Instant::now());
        view.stop_ripple_animation();
        assert!(!view.is_ripple_animation_running());
        assert!(!view.animator_set().is_running());
    }

    #[test]
    fn test_stop_jumps_to_end_state() {
        let mut view = ripple(RippleConfig::default().scale(5.0));
        let t0 = Instant::now();
        view.start_ripple_animation(t0);
        view.advance_animations(t0 + Duration::from_millis(1234));
        view.stop_ripple_animation();

        for circle in view.circles() {
            assert_eq!(circle.scale_x(), 5.0);
            assert_eq!(circle.scale_y(), 5.0);
            assert_eq!(circle.alpha(), 0.0);
        }
    }

    #[test]
    fn test_advance_only_moves_started_circles() {
        let mut view = ripple(RippleConfig::default().ripple_amount(2));
        let t0 = Instant::now();
        view.start_ripple_animation(t0);
        assert!(view.advance_animations(t0 + Duration::from_millis(750)));

        let circles = view.circles();
        assert!(circles[0].scale_x() > 1.0);
        assert!(circles[0].alpha() < 1.0);
        // Circle 1 waits for its 1500ms offset
        assert_eq!(circles[1].scale_x(), 1.0);
        assert_eq!(circles[1].alpha(), 1.0);
    }

    #[test]
    fn test_circles_never_shrink_within_a_cycle() {
        let mut view = ripple(RippleConfig::default().ripple_amount(1));
        let t0 = Instant::now();
        view.start_ripple_animation(t0);
        let mut previous = 0.0;
        for ms in (0..3000).step_by(100) {
            view.advance_animations(t0 + Duration::from_millis(ms));
            let scale = view.circles()[0].scale_x();
            assert!(scale >= previous);
            previous = scale;
        }
        // Restart: the next cycle begins small again
        view.advance_animations(t0 + Duration::from_millis(3000));
        assert_eq!(view.circles()[0].scale_x(), 1.0);
    }

    #[test]
    fn test_advance_when_stopped_reports_idle() {
        let mut view = ripple(RippleConfig::default());
        assert!(!view.advance_animations(Instant::now()));
    }

    #[test]
    fn test_layout_centers_circles() {
        let mut view = ripple(RippleConfig::default().radius(10.0));
        let size = view.layout(Constraints::loose(Size::new(200.0, 100.0)));
        assert_eq!(size, Size::new(200.0, 100.0));
        view.set_origin(10.0, 20.0);

        for circle in view.circles() {
            assert_eq!(circle.bounds(), Rect::new(100.0, 60.0, 20.0, 20.0));
        }
    }

    #[test]
    fn test_unbounded_layout_uses_natural_size() {
        let mut view = ripple(RippleConfig::default().radius(10.0).scale(3.0));
        let size = view.layout(Constraints::unbounded());
        assert_eq!(size, Size::new(60.0, 60.0));
    }

    #[test]
    fn test_child_is_centered_and_painted_last() {
        let mut view = ripple(RippleConfig::default().radius(10.0).ripple_amount(2)).child(
            container()
                .width(30.0)
                .height(20.0)
                .background(crate::widgets::Color::WHITE),
        );
        view.layout(Constraints::tight(Size::new(100.0, 100.0)));
        view.set_origin(0.0, 0.0);
        view.start_ripple_animation(Instant::now());

        let mut ctx = PaintContext::new();
        view.paint(&mut ctx);
        let commands = ctx.commands();
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[0].command, DrawCommand::Circle { .. }));
        assert!(matches!(commands[1].command, DrawCommand::Circle { .. }));
        let DrawCommand::RoundedRect { rect, .. } = commands[2].command else {
            panic!("expected the child background last");
        };
        assert_eq!(rect, Rect::new(35.0, 40.0, 30.0, 20.0));
    }

    #[test]
    fn test_stroked_ring_radius() {
        let config = RippleConfig::default()
            .radius(30.0)
            .stroke_width(4.0)
            .fill_type(FillType::Stroke);
        let mut view = ripple(config);
        view.layout(Constraints::tight(Size::new(200.0, 200.0)));
        view.start_ripple_animation(Instant::now());

        let mut ctx = PaintContext::new();
        view.paint(&mut ctx);
        let DrawCommand::Circle { radius, style, .. } = ctx.commands()[0].command else {
            panic!("expected a circle");
        };
        // Bounds are 2 * (30 + 4) = 68 wide: 68 / 2 - 4
        assert_eq!(radius, 30.0);
        assert_eq!(style, PaintStyle::Stroke(4.0));
    }

    #[test]
    fn test_filled_disc_ignores_stroke_width() {
        let config = RippleConfig::default().radius(30.0).stroke_width(4.0);
        let mut view = ripple(config);
        view.layout(Constraints::tight(Size::new(200.0, 200.0)));
        view.start_ripple_animation(Instant::now());

        let mut ctx = PaintContext::new();
        view.paint(&mut ctx);
        let DrawCommand::Circle { radius, style, .. } = ctx.commands()[0].command else {
            panic!("expected a circle");
        };
        assert_eq!(radius, 30.0);
        assert_eq!(style, PaintStyle::Fill);
    }

    #[test]
    fn test_dirty_flags() {
        let mut view = ripple(RippleConfig::default());
        assert!(view.needs_layout());
        view.layout(Constraints::tight(Size::new(50.0, 50.0)));
        assert!(!view.needs_layout());

        view.clear_dirty();
        assert!(!view.needs_paint());
        let t0 = Instant::now();
        view.start_ripple_animation(t0);
        assert!(view.needs_paint());

        view.clear_dirty();
        view.advance_animations(t0 + Duration::from_millis(16));
        assert!(view.needs_paint());
    }
}
