//! Frame-driven property animation.
//!
//! Widgets describe what should move with [`PropertyAnimator`]s, group them
//! in an [`AnimatorSet`], and tick the set once per frame. The set returns
//! [`PropertyUpdate`]s which the widget applies to its [`AnimationTarget`]s.

mod animatable;
mod animator;
mod animator_set;
mod timing;

pub use animatable::Animatable;
pub use animator::{AnimatedProperty, AnimationTarget, PropertyAnimator, RepeatCount, RepeatMode};
pub use animator_set::{AnimatorSet, PropertyUpdate, DEFAULT_DURATION};
pub use timing::TimingFunction;
