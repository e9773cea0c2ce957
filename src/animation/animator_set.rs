use std::time::{Duration, Instant};

use super::{AnimatedProperty, PropertyAnimator, TimingFunction};

/// Default cycle length when a set is not given one explicitly.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

/// One value produced by the set for one target property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyUpdate {
    pub target: usize,
    pub property: AnimatedProperty,
    pub value: f32,
}

/// A group of property animators played together on one clock.
///
/// The set owns the timing every child shares: a single cycle duration and a
/// single timing curve. Each child contributes only its own value range,
/// start delay and repeat policy. Nothing advances on its own; the caller
/// ticks the set with the current frame time and applies the returned
/// [`PropertyUpdate`]s to its targets.
pub struct AnimatorSet {
    animators: Vec<PropertyAnimator>,
    duration: Duration,
    timing: TimingFunction,
    start_time: Option<Instant>,
}

impl AnimatorSet {
    pub fn new() -> Self {
        Self {
            animators: Vec::new(),
            duration: DEFAULT_DURATION,
            timing: TimingFunction::default(),
            start_time: None,
        }
    }

    /// Set the cycle duration shared by every child animator
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the timing curve shared by every child animator
    pub fn with_timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    pub fn set_timing(&mut self, timing: TimingFunction) {
        self.timing = timing;
    }

    /// Add animators that start together when the set starts.
    pub fn play_together(&mut self, animators: impl IntoIterator<Item = PropertyAnimator>) {
        self.animators.extend(animators);
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn timing(&self) -> &TimingFunction {
        &self.timing
    }

    pub fn animators(&self) -> &[PropertyAnimator] {
        &self.animators
    }

    pub fn len(&self) -> usize {
        self.animators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animators.is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }

    /// Start (or restart) every child at `now`.
    ///
    /// Returns the start value of every track, so targets left at their end
    /// values by a previous [`end`](Self::end) begin from rest again.
    pub fn start(&mut self, now: Instant) -> Vec<PropertyUpdate> {
        log::debug!(
            "Starting animator set: {} animators, duration {:?}",
            self.animators.len(),
            self.duration
        );
        self.start_time = Some(now);
        self.animators
            .iter()
            .map(|animator| PropertyUpdate {
                target: animator.target(),
                property: animator.property(),
                value: animator.from(),
            })
            .collect()
    }

    /// Compute the value of every active track at `now`.
    ///
    /// Tracks still inside their start delay produce no update. Once every
    /// child has played out its repeats the set stops running.
    pub fn advance(&mut self, now: Instant) -> Vec<PropertyUpdate> {
        let Some(start_time) = self.start_time else {
            return Vec::new();
        };

        let elapsed = now.saturating_duration_since(start_time);
        let updates: Vec<PropertyUpdate> = self
            .animators
            .iter()
            .filter_map(|animator| {
                animator
                    .value_at(elapsed, self.duration, &self.timing)
                    .map(|value| PropertyUpdate {
                        target: animator.target(),
                        property: animator.property(),
                        value,
                    })
            })
            .collect();

        log::trace!(
            "Advanced animator set to {:?}: {} updates",
            elapsed,
            updates.len()
        );

        if self.is_finished_at(elapsed) {
            log::debug!("Animator set finished after {:?}", elapsed);
            self.start_time = None;
        }

        updates
    }

    /// Stop immediately, jumping every child to its end value.
    pub fn end(&mut self) -> Vec<PropertyUpdate> {
        log::debug!("Ending animator set");
        self.start_time = None;
        self.animators
            .iter()
            .map(|animator| PropertyUpdate {
                target: animator.target(),
                property: animator.property(),
                value: animator.end_value(),
            })
            .collect()
    }

    /// Whether every child has played out its repeats by `now`. A set that
    /// was never started is not finished.
    pub fn is_finished(&self, now: Instant) -> bool {
        self.start_time
            .is_some_and(|start| self.is_finished_at(now.saturating_duration_since(start)))
    }

    fn is_finished_at(&self, elapsed: Duration) -> bool {
        self.animators
            .iter()
            .all(|animator| animator.is_finished_at(elapsed, self.duration))
    }
}

impl Default for AnimatorSet {
    fn default() -> Self {
        Self::new()
    }
}
