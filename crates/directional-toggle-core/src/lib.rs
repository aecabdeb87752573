//! Core systems for Directional Toggle.
//!
//! This crate provides the foundational pieces the toggle widget is built on:
//!
//! - **Signal/Slot System**: Type-safe notification with direct and queued delivery
//! - **Event Loop**: A per-thread main cycle that runs queued slot invocations
//! - **Logging**: `tracing` targets and a lightweight performance span
//!
//! # Signal/Slot Example
//!
//! ```
//! use directional_toggle_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Deferred Delivery Example
//!
//! Slots connected with [`ConnectionType::Queued`] run on the main cycle of the
//! thread that connected them, never inside the emitting call:
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use directional_toggle_core::{ConnectionType, EventLoop, Signal};
//!
//! let main_loop = EventLoop::new();
//! let signal = Signal::<()>::new();
//! let ran = Arc::new(AtomicBool::new(false));
//!
//! let ran_clone = ran.clone();
//! signal.connect_with_type(
//!     move |_| ran_clone.store(true, Ordering::SeqCst),
//!     ConnectionType::Queued,
//! );
//!
//! signal.emit(());
//! assert!(!ran.load(Ordering::SeqCst));
//!
//! main_loop.process_pending();
//! assert!(ran.load(Ordering::SeqCst));
//! ```

mod error;
pub mod event_loop;
pub mod invocation;
pub mod logging;
pub mod signal;

pub use error::{EventLoopError, SignalError};
pub use event_loop::{EventLoop, EventLoopHandle};
pub use logging::PerfSpan;
pub use signal::{ConnectionId, ConnectionType, Signal};
