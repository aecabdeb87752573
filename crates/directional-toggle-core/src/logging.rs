//! Logging facilities for Directional Toggle.
//!
//! Everything is instrumented through the `tracing` crate. Libraries never
//! install a subscriber; applications choose one:
//!
//! ```ignore
//! use tracing_subscriber::EnvFilter;
//!
//! tracing_subscriber::fmt()
//!     .with_env_filter(EnvFilter::new("directional_toggle=debug"))
//!     .init();
//! ```
//!
//! The [`targets`] constants name each subsystem so they can be filtered
//! individually, e.g. `directional_toggle::gesture=trace`.

use std::time::Instant;

/// Target names for log filtering.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "directional_toggle_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "directional_toggle_core::signal";
    /// Main-cycle event loop target.
    pub const EVENT_LOOP: &str = "directional_toggle_core::event_loop";
    /// Toggle widget state machine target.
    pub const TOGGLE: &str = "directional_toggle::toggle";
    /// Gesture recognition target.
    pub const GESTURE: &str = "directional_toggle::gesture";
    /// Animated value target.
    pub const ANIMATION: &str = "directional_toggle::animation";
    /// Configuration loading target.
    pub const CONFIG: &str = "directional_toggle::config";
    /// Performance span target.
    pub const PERF: &str = "directional_toggle::perf";
}

/// A guard that records how long an operation took.
///
/// The span is entered on creation. When the guard drops, the elapsed time is
/// reported at `trace` level under [`targets::PERF`].
///
/// # Example
///
/// ```
/// use directional_toggle_core::PerfSpan;
///
/// {
///     let _span = PerfSpan::new("layout");
///     // ... measured work ...
/// }
/// ```
pub struct PerfSpan {
    name: &'static str,
    started: Instant,
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::trace_span!(target: "directional_toggle::perf", "perf", operation = name);
        Self {
            name,
            started: Instant::now(),
            span: span.entered(),
        }
    }

    /// Name of the measured operation.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for PerfSpan {
    fn drop(&mut self) {
        tracing::trace!(
            target: targets::PERF,
            operation = self.name,
            elapsed_us = self.started.elapsed().as_micros() as u64,
            "operation finished"
        );
    }
}
