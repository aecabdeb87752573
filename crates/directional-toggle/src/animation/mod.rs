//! Animation primitives used by the toggle.
//!
//! - [`Easing`] curves and [`TimingAnimation`] for fixed-duration motion
//! - [`SpringAnimation`] for physics-based settling
//! - [`AnimatedValue`], an observable scalar driven by either of the above

mod animated_value;
mod easing;
mod spring;
mod timing;

pub use animated_value::{AnimatedValue, AnimationSpec};
pub use easing::{Easing, ease, lerp_eased};
pub use spring::{REST_DISPLACEMENT, REST_SPEED, SpringAnimation, SpringConfig};
pub use timing::{TimingAnimation, TimingConfig};
