//! An observable scalar that can be set directly or animated toward a target.

use std::time::Duration;

use directional_toggle_core::Signal;
use directional_toggle_core::logging::targets;

use super::spring::{SpringAnimation, SpringConfig};
use super::timing::{TimingAnimation, TimingConfig};

/// How an [`AnimatedValue`] should travel to a new target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationSpec {
    /// Fixed-duration eased motion.
    Timing(TimingConfig),
    /// Physics-based spring motion.
    Spring(SpringConfig),
}

#[derive(Debug, Clone)]
enum Running {
    Timing(TimingAnimation),
    Spring(SpringAnimation),
}

impl Running {
    fn target(&self) -> f32 {
        match self {
            Running::Timing(anim) => anim.target(),
            Running::Spring(anim) => anim.target(),
        }
    }

    fn advance(&mut self, dt: Duration) -> f32 {
        match self {
            Running::Timing(anim) => anim.advance(dt),
            Running::Spring(anim) => anim.advance(dt),
        }
    }

    fn is_finished(&self) -> bool {
        match self {
            Running::Timing(anim) => anim.is_finished(),
            Running::Spring(anim) => anim.is_finished(),
        }
    }

    fn velocity(&self) -> f32 {
        match self {
            Running::Spring(anim) => anim.velocity(),
            Running::Timing(_) => 0.0,
        }
    }
}

/// An animated scalar with change notification.
///
/// The value is advanced explicitly with [`tick`](Self::tick), which keeps
/// animation deterministic and independent of any particular frame clock.
/// Every change to the value is announced through
/// [`value_changed`](Self::value_changed).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use directional_toggle::animation::{AnimatedValue, AnimationSpec, TimingConfig};
///
/// let mut offset = AnimatedValue::new(0.0);
/// offset.animate_to(100.0, AnimationSpec::Timing(TimingConfig::new(Duration::from_millis(100))));
/// assert!(offset.is_animating());
///
/// offset.tick(Duration::from_millis(100));
/// assert_eq!(offset.value(), 100.0);
/// assert!(!offset.is_animating());
/// ```
pub struct AnimatedValue {
    value: f32,
    running: Option<Running>,
    animations_started: u64,
    /// Emitted with the new value whenever it changes.
    pub value_changed: Signal<f32>,
}

impl AnimatedValue {
    /// Create a value at rest.
    pub fn new(value: f32) -> Self {
        Self {
            value,
            running: None,
            animations_started: 0,
            value_changed: Signal::new(),
        }
    }

    /// The current value.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// The value the running animation is heading for, or the current value.
    pub fn target(&self) -> f32 {
        self.running
            .as_ref()
            .map_or(self.value, Running::target)
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.running.is_some()
    }

    /// Number of animations started over this value's lifetime.
    #[inline]
    pub fn animations_started(&self) -> u64 {
        self.animations_started
    }

    /// Jump to `value`, cancelling any running animation.
    pub fn set(&mut self, value: f32) {
        self.running = None;
        self.store(value);
    }

    /// Stop any running animation, leaving the value where it is.
    pub fn stop(&mut self) {
        if self.running.take().is_some() {
            tracing::trace!(target: targets::ANIMATION, value = self.value, "animation stopped");
        }
    }

    /// Start animating toward `target`, replacing any running animation.
    ///
    /// A spring inherits the velocity of a spring it replaces.
    pub fn animate_to(&mut self, target: f32, spec: AnimationSpec) {
        let velocity = self.running.as_ref().map_or(0.0, Running::velocity);
        let running = match spec {
            AnimationSpec::Timing(config) => {
                Running::Timing(TimingAnimation::new(self.value, target, config))
            }
            AnimationSpec::Spring(config) => {
                Running::Spring(SpringAnimation::new(config, self.value, velocity, target))
            }
        };

        self.animations_started += 1;
        tracing::trace!(
            target: targets::ANIMATION,
            from = self.value,
            to = target,
            ?spec,
            "animation started"
        );

        if running.is_finished() {
            self.running = None;
            self.store(target);
        } else {
            self.running = Some(running);
        }
    }

    /// Advance the running animation by `dt`.
    ///
    /// Returns `true` while an animation is still in progress.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(running) = self.running.as_mut() else {
            return false;
        };

        let next = running.advance(dt);
        let finished = running.is_finished();
        if finished {
            self.running = None;
            tracing::trace!(target: targets::ANIMATION, value = next, "animation finished");
        }
        self.store(next);
        !finished
    }

    fn store(&mut self, value: f32) {
        if self.value != value {
            self.value = value;
            self.value_changed.emit(value);
        }
    }
}

impl Default for AnimatedValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl std::fmt::Debug for AnimatedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimatedValue")
            .field("value", &self.value)
            .field("target", &self.target())
            .field("animating", &self.is_animating())
            .finish()
    }
}

static_assertions::assert_impl_all!(AnimatedValue: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_set_cancels_animation() {
        let mut value = AnimatedValue::new(0.0);
        value.animate_to(10.0, AnimationSpec::Timing(TimingConfig::default()));
        value.set(5.0);

        assert!(!value.is_animating());
        assert_eq!(value.value(), 5.0);
        assert_eq!(value.target(), 5.0);
    }

    #[test]
    fn test_stop_keeps_value() {
        let mut value = AnimatedValue::new(0.0);
        value.animate_to(
            100.0,
            AnimationSpec::Timing(TimingConfig::new(Duration::from_millis(100))),
        );
        value.tick(Duration::from_millis(50));
        let mid = value.value();
        value.stop();

        assert!(!value.is_animating());
        assert_eq!(value.value(), mid);
        assert!(!value.tick(Duration::from_millis(50)));
        assert_eq!(value.value(), mid);
    }

    #[test]
    fn test_zero_duration_applies_immediately() {
        let mut value = AnimatedValue::new(0.0);
        value.animate_to(42.0, AnimationSpec::Timing(TimingConfig::new(Duration::ZERO)));

        assert!(!value.is_animating());
        assert_eq!(value.value(), 42.0);
        assert_eq!(value.animations_started(), 1);
    }

    #[test]
    fn test_spring_runs_to_target() {
        let mut value = AnimatedValue::new(80.0);
        value.animate_to(100.0, AnimationSpec::Spring(SpringConfig::new(200.0, 50.0, 1.0)));
        assert_eq!(value.target(), 100.0);

        let mut frames = 0;
        while value.tick(Duration::from_millis(16)) {
            frames += 1;
            assert!(frames < 1000);
        }
        assert_eq!(value.value(), 100.0);
    }

    #[test]
    fn test_changes_are_announced() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut value = AnimatedValue::new(0.0);

        let seen_clone = seen.clone();
        value.value_changed.connect(move |v| seen_clone.lock().push(*v));

        value.set(0.0);
        assert!(seen.lock().is_empty());

        value.set(3.0);
        value.animate_to(5.0, AnimationSpec::Timing(TimingConfig::new(Duration::from_millis(20))));
        value.tick(Duration::from_millis(10));
        value.tick(Duration::from_millis(10));

        let seen = seen.lock();
        assert_eq!(seen.first(), Some(&3.0));
        assert_eq!(seen.last(), Some(&5.0));
        assert_eq!(seen.len(), 3);
    }
}
