//! Time-based animation with a fixed duration and an easing curve.

use std::time::Duration;

use super::easing::{Easing, lerp_eased};

/// Parameters of a time-based animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingConfig {
    /// Total duration of the animation.
    pub duration: Duration,
    /// Easing applied to the progress.
    pub easing: Easing,
}

impl TimingConfig {
    /// Create a timing configuration with the default easing.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            easing: Easing::default(),
        }
    }

    /// Set the easing curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::new(Duration::from_millis(150))
    }
}

/// A running time-based animation between two values.
#[derive(Debug, Clone)]
pub struct TimingAnimation {
    from: f32,
    to: f32,
    config: TimingConfig,
    elapsed: Duration,
}

impl TimingAnimation {
    /// Start a timing animation from `from` to `to`.
    pub fn new(from: f32, to: f32, config: TimingConfig) -> Self {
        Self {
            from,
            to,
            config,
            elapsed: Duration::ZERO,
        }
    }

    /// The value this animation ends at.
    #[inline]
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Progress from 0.0 to 1.0.
    pub fn progress(&self) -> f32 {
        if self.config.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.config.duration.as_secs_f32()).min(1.0)
    }

    /// Whether the full duration has elapsed.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.config.duration
    }

    /// Current animated value.
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        lerp_eased(self.config.easing, self.from, self.to, self.progress())
    }

    /// Advance by `dt` and return the new value.
    pub fn advance(&mut self, dt: Duration) -> f32 {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.value()
    }
}
