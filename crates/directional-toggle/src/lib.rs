//! Directional Toggle - an animated, draggable multi-option switch.
//!
//! A [`DirectionalToggle`] shows a row or column of options with a sliding
//! thumb. Tapping an option animates the thumb there; dragging moves it
//! freely along the track and snaps to the nearest option on release. Label
//! colors follow the thumb continuously.
//!
//! The widget is headless: the host feeds it a measured size with
//! [`DirectionalToggle::resize`], pointer events with
//! [`DirectionalToggle::handle_pointer`], frame time with
//! [`DirectionalToggle::tick`], and draws it through a [`Painter`].
//! Change notifications are delivered on the main cycle of the
//! [`EventLoop`] of the thread that connected them.
//!
//! This crate re-exports the core signal and event-loop types.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use directional_toggle::{DirectionalToggle, EventLoop, PointerEvent, Size, ToggleOption};
//!
//! let main_loop = EventLoop::new();
//! let mut toggle = DirectionalToggle::new(vec![
//!     ToggleOption::text("Day"),
//!     ToggleOption::text("Week"),
//! ])
//! .with_value("Day");
//! toggle.resize(Size::new(200.0, 36.0));
//!
//! // Drag the thumb most of the way across.
//! toggle.handle_pointer(&PointerEvent::started(50.0, 18.0));
//! toggle.handle_pointer(&PointerEvent::moved(120.0, 18.0));
//! toggle.handle_pointer(&PointerEvent::ended(120.0, 18.0));
//! assert_eq!(toggle.active_index(), Some(1));
//!
//! while toggle.tick(Duration::from_millis(16)) {}
//! assert_eq!(toggle.offset(), 100.0);
//! main_loop.process_pending();
//! ```

pub use directional_toggle_core::*;

pub mod animation;
pub mod gesture;
mod toggle;
mod types;

pub use gesture::{PointerEvent, TouchPhase};
pub use toggle::{
    AnimationConfig, ConfigError, DirectionalToggle, FALLBACK_DAMPING, FALLBACK_DURATION_MS,
    FALLBACK_STIFFNESS, OptionValue, Painter, ToggleConfig, ToggleOption, ToggleStyle,
    label_color,
};
pub use types::{Color, Orientation, Point, Rect, RoundedRect, Size};
