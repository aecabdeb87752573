//! Physics-based spring animation.
//!
//! A damped harmonic oscillator pulls the value toward its target. Each
//! advance evaluates the oscillator's closed-form solution, so the motion is
//! stable for any positive stiffness and damping and does not depend on how
//! the caller slices time.

use std::time::Duration;

use directional_toggle_core::logging::targets;

/// Distance from the target below which the spring may come to rest.
pub const REST_DISPLACEMENT: f32 = 0.01;

/// Speed below which the spring may come to rest.
pub const REST_SPEED: f32 = 2.0;

/// Damping ratios this close to one are solved as critically damped.
const CRITICAL_TOLERANCE: f64 = 1e-4;

/// Physical parameters of a spring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    /// Spring constant; higher is snappier.
    pub stiffness: f32,
    /// Resistance proportional to velocity.
    pub damping: f32,
    /// Mass of the animated object.
    pub mass: f32,
}

impl SpringConfig {
    /// Create a spring configuration.
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Whether every parameter is finite and positive.
    pub fn is_valid(&self) -> bool {
        [self.stiffness, self.damping, self.mass]
            .iter()
            .all(|value| value.is_finite() && *value > 0.0)
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::new(200.0, 20.0, 1.0)
    }
}

/// A running spring animation.
#[derive(Debug, Clone)]
pub struct SpringAnimation {
    config: SpringConfig,
    position: f32,
    velocity: f32,
    target: f32,
    at_rest: bool,
}

impl SpringAnimation {
    /// Start a spring at `position` with `velocity`, heading for `target`.
    pub fn new(config: SpringConfig, position: f32, velocity: f32, target: f32) -> Self {
        let mut spring = Self {
            config,
            position,
            velocity,
            target,
            at_rest: false,
        };
        if !config.is_valid() {
            tracing::warn!(target: targets::ANIMATION, ?config, "unusable spring, jumping to target");
            spring.finish();
        }
        spring.settle_if_resting();
        spring
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Whether the spring has come to rest on its target.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.at_rest
    }

    /// Advance the simulation by `dt` and return the new position.
    pub fn advance(&mut self, dt: Duration) -> f32 {
        if self.at_rest {
            return self.position;
        }

        let (displacement, velocity) = self.solve(dt.as_secs_f64());
        if displacement.is_finite() && velocity.is_finite() {
            self.position = self.target + displacement as f32;
            self.velocity = velocity as f32;
            self.settle_if_resting();
        } else {
            self.finish();
        }
        self.position
    }

    /// Displacement from the target and velocity after `t` seconds.
    fn solve(&self, t: f64) -> (f64, f64) {
        let stiffness = f64::from(self.config.stiffness);
        let damping = f64::from(self.config.damping);
        let mass = f64::from(self.config.mass);
        let x0 = f64::from(self.position - self.target);
        let v0 = f64::from(self.velocity);

        let omega = (stiffness / mass).sqrt();
        let zeta = damping / (2.0 * (stiffness * mass).sqrt());

        if (zeta - 1.0).abs() < CRITICAL_TOLERANCE {
            let decay = (-omega * t).exp();
            let b = v0 + omega * x0;
            (decay * (x0 + b * t), decay * (v0 - omega * b * t))
        } else if zeta < 1.0 {
            let a = zeta * omega;
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            let decay = (-a * t).exp();
            let (sin, cos) = (omega_d * t).sin_cos();
            let x = decay * (x0 * cos + (v0 + a * x0) / omega_d * sin);
            let v = decay * (v0 * cos - (a * v0 + omega * omega * x0) / omega_d * sin);
            (x, v)
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            // Slow root taken from the product of the roots to avoid cancellation.
            let r1 = -omega / (zeta + root);
            let r2 = -omega * (zeta + root);
            let c1 = (v0 - r2 * x0) / (r1 - r2);
            let c2 = x0 - c1;
            let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
            (c1 * e1 + c2 * e2, r1 * c1 * e1 + r2 * c2 * e2)
        }
    }

    fn finish(&mut self) {
        self.position = self.target;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    fn settle_if_resting(&mut self) {
        if (self.position - self.target).abs() < REST_DISPLACEMENT
            && self.velocity.abs() < REST_SPEED
        {
            self.finish();
        }
    }
}
