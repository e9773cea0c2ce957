//! Property animators: declarative descriptors of a single value track.
//!
//! A [`PropertyAnimator`] names a target, the property to drive, the value
//! range, a start delay and a repeat policy. It holds no clock of its own;
//! the owning [`AnimatorSet`](super::AnimatorSet) supplies elapsed time,
//! duration and timing curve, and asks for the value at that point.

use std::time::Duration;

use super::{Animatable, TimingFunction};

/// A visual property that an animator can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimatedProperty {
    /// Horizontal scale about the target's center
    ScaleX,
    /// Vertical scale about the target's center
    ScaleY,
    /// Opacity multiplier (0.0 = invisible, 1.0 = opaque)
    Alpha,
}

/// What happens when an animator reaches the end of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatMode {
    /// Jump back to the start value and play forward again
    #[default]
    Restart,
    /// Play the next cycle backwards (ping-pong)
    Reverse,
}

/// How many times an animator repeats after its first cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatCount {
    /// Loop until the owning set is ended
    Infinite,
    /// Repeat `n` extra times (so `Count(0)` plays once)
    Count(u32),
}

impl Default for RepeatCount {
    fn default() -> Self {
        RepeatCount::Count(0)
    }
}

/// Receives property values written by an animator set.
pub trait AnimationTarget {
    fn set_property(&mut self, property: AnimatedProperty, value: f32);
}

/// Descriptor of one animated property track.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyAnimator {
    target: usize,
    property: AnimatedProperty,
    from: f32,
    to: f32,
    start_delay: Duration,
    repeat_count: RepeatCount,
    repeat_mode: RepeatMode,
}

impl PropertyAnimator {
    /// Animate `property` of the target at index `target` from `from` to `to`.
    ///
    /// The animator plays once, without delay, until configured otherwise.
    pub fn new(target: usize, property: AnimatedProperty, from: f32, to: f32) -> Self {
        Self {
            target,
            property,
            from,
            to,
            start_delay: Duration::ZERO,
            repeat_count: RepeatCount::default(),
            repeat_mode: RepeatMode::default(),
        }
    }

    /// Set the offset between the set starting and this track starting
    pub fn start_delay(mut self, delay: Duration) -> Self {
        self.start_delay = delay;
        self
    }

    pub fn repeat_count(mut self, count: RepeatCount) -> Self {
        self.repeat_count = count;
        self
    }

    pub fn repeat_mode(mut self, mode: RepeatMode) -> Self {
        self.repeat_mode = mode;
        self
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn property(&self) -> AnimatedProperty {
        self.property
    }

    pub fn from(&self) -> f32 {
        self.from
    }

    pub fn to(&self) -> f32 {
        self.to
    }

    pub fn get_start_delay(&self) -> Duration {
        self.start_delay
    }

    pub fn get_repeat_count(&self) -> RepeatCount {
        self.repeat_count
    }

    pub fn get_repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }

    /// The value this track holds once it has been ended.
    pub fn end_value(&self) -> f32 {
        match (self.repeat_count, self.repeat_mode) {
            // An odd number of repeats in reverse mode finishes on the way back
            (RepeatCount::Count(n), RepeatMode::Reverse) if n % 2 == 1 => self.from,
            _ => self.to,
        }
    }

    /// Value of the track `elapsed` after the owning set started.
    ///
    /// Returns `None` while the start delay is still running, in which case
    /// the target keeps whatever value it already has.
    pub fn value_at(
        &self,
        elapsed: Duration,
        duration: Duration,
        timing: &TimingFunction,
    ) -> Option<f32> {
        let active = elapsed.checked_sub(self.start_delay)?;
        if duration.is_zero() {
            return Some(self.end_value());
        }

        let cycle = duration.as_nanos();
        let played = active.as_nanos();
        let iteration = played / cycle;

        if let RepeatCount::Count(n) = self.repeat_count {
            if iteration > u128::from(n) {
                return Some(self.end_value());
            }
        }

        let mut fraction = ((played % cycle) as f64 / cycle as f64) as f32;
        if self.repeat_mode == RepeatMode::Reverse && iteration % 2 == 1 {
            fraction = 1.0 - fraction;
        }

        Some(f32::lerp(&self.from, &self.to, timing.evaluate(fraction)))
    }

    /// Whether a finite track has played all of its cycles.
    pub fn is_finished_at(&self, elapsed: Duration, duration: Duration) -> bool {
        match self.repeat_count {
            RepeatCount::Infinite => false,
            RepeatCount::Count(n) => {
                let total = duration.saturating_mul(n.saturating_add(1));
                elapsed >= self.start_delay.saturating_add(total)
            }
        }
    }
}
