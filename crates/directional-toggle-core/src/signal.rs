//! Signal/slot system for Directional Toggle.
//!
//! Signals are emitted by a widget when its state changes, and connected slots
//! (callbacks) are invoked in response.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The signal type for emitting notifications
//! - [`ConnectionId`] - Identifier returned when connecting a slot
//! - [`ConnectionType`] - How a slot is invoked (Direct, Queued, Auto)
//!
//! # Connection Types
//!
//! - **Direct**: Slot is called immediately in the emitting thread
//! - **Queued**: Slot execution is posted to the main cycle of the thread that
//!   connected it (see [`EventLoop`](crate::EventLoop))
//! - **Auto**: Direct if emitted on the connecting thread, Queued otherwise
//!
//! When no event loop was current on the connecting thread, or that loop has
//! since been dropped, queued slots run immediately as a fallback. This keeps
//! headless use and early initialization working.
//!
//! # Example
//!
//! ```
//! use directional_toggle_core::Signal;
//!
//! let text_changed = Signal::<String>::new();
//!
//! let conn_id = text_changed.connect(|text| {
//!     println!("Text changed to: {}", text);
//! });
//!
//! text_changed.emit("Hello, World!".to_string());
//! text_changed.disconnect(conn_id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::ThreadId;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::SignalError;
use crate::event_loop::{EventLoop, EventLoopHandle};
use crate::invocation::QueuedInvocation;
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    pub struct ConnectionId;
}

/// Specifies how a connected slot is invoked when the signal is emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionType {
    /// Invoke the slot immediately in the emitting thread.
    Direct,

    /// Post the slot invocation to the connecting thread's event loop.
    ///
    /// The slot never runs inside `emit`, so it may freely mutate application
    /// state that the emitter is in the middle of updating.
    Queued,

    /// Direct on the connecting thread, Queued from any other thread.
    #[default]
    Auto,
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// Internal storage for a single connection.
struct Connection<Args> {
    slot: Slot<Args>,
    connection_type: ConnectionType,
    /// The thread this connection was created on.
    target_thread: ThreadId,
    /// The event loop current on that thread when connecting, if any.
    target_loop: Option<EventLoopHandle>,
}

/// A type-safe signal that can have multiple connected slots.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a tuple for several.
///
/// # Thread Safety
///
/// `Signal<Args>` is `Send + Sync` when `Args: Send`.
pub struct Signal<Args> {
    connections: Mutex<SlotMap<ConnectionId, Connection<Args>>>,
    blocked: AtomicBool,
}

impl<Args: Clone + Send + 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: Clone + Send + 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot with [`ConnectionType::Auto`].
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connect_with_type(slot, ConnectionType::Auto)
    }

    /// Connect a slot with a specific connection type.
    ///
    /// # Example
    ///
    /// ```
    /// use directional_toggle_core::{ConnectionType, Signal};
    ///
    /// let signal = Signal::<i32>::new();
    /// signal.connect_with_type(|n| println!("{}", n), ConnectionType::Direct);
    /// signal.connect_with_type(|n| println!("{}", n), ConnectionType::Queued);
    /// signal.emit(42);
    /// ```
    pub fn connect_with_type<F>(&self, slot: F, connection_type: ConnectionType) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let connection = Connection {
            slot: Arc::new(slot),
            connection_type,
            target_thread: std::thread::current().id(),
            target_loop: EventLoop::current_handle(),
        };
        self.connections.lock().insert(connection)
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect a slot, reporting unknown IDs as an error.
    pub fn try_disconnect(&self, id: ConnectionId) -> Result<(), SignalError> {
        if self.disconnect(id) {
            Ok(())
        } else {
            Err(SignalError::InvalidConnection)
        }
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block or unblock emission. While blocked, `emit()` does nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots per their connection type.
    ///
    /// Slots are snapshotted before any of them run, so a slot may connect to or
    /// disconnect from this signal without deadlocking.
    #[tracing::instrument(skip_all, target = "directional_toggle_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        let current_thread = std::thread::current().id();
        let deliveries = self.snapshot();
        tracing::trace!(target: targets::SIGNAL, connection_count = deliveries.len(), "emitting signal");

        for delivery in deliveries {
            let direct = match delivery.connection_type {
                ConnectionType::Direct => true,
                ConnectionType::Auto => delivery.target_thread == current_thread,
                ConnectionType::Queued => false,
            };
            if direct {
                (delivery.slot)(&args);
            } else {
                Self::queue_invocation(delivery.slot, delivery.target_loop, args.clone());
            }
        }
    }

    /// Emit with every slot deferred to its event loop, regardless of type.
    ///
    /// Returns the number of slots that were queued, or 0 if the signal is blocked.
    pub fn emit_queued(&self, args: Args) -> usize {
        if self.is_blocked() {
            return 0;
        }

        let deliveries = self.snapshot();
        let count = deliveries.len();
        for delivery in deliveries {
            Self::queue_invocation(delivery.slot, delivery.target_loop, args.clone());
        }
        count
    }

    fn snapshot(&self) -> Vec<Delivery<Args>> {
        self.connections
            .lock()
            .values()
            .map(|conn| Delivery {
                slot: conn.slot.clone(),
                connection_type: conn.connection_type,
                target_thread: conn.target_thread,
                target_loop: conn.target_loop.clone(),
            })
            .collect()
    }

    fn queue_invocation(slot: Slot<Args>, target: Option<EventLoopHandle>, args: Args) {
        let invocation = QueuedInvocation::new(move || slot(&args));

        let Some(handle) = target else {
            tracing::debug!(
                target: targets::SIGNAL,
                "no event loop for queued slot, executing immediately"
            );
            invocation.execute();
            return;
        };

        // The loop may have gone away since the slot connected; deliver anyway.
        if let Err(invocation) = handle.try_post(invocation) {
            tracing::debug!(
                target: targets::SIGNAL,
                "event loop closed for queued slot, executing immediately"
            );
            invocation.execute();
        }
    }
}

struct Delivery<Args> {
    slot: Slot<Args>,
    connection_type: ConnectionType,
    target_thread: ThreadId,
    target_loop: Option<EventLoopHandle>,
}

static_assertions::assert_impl_all!(Signal<i32>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_signal_connect_emit() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(42);
        signal.emit(100);

        assert_eq!(*received.lock(), vec![42, 100]);
    }

    #[test]
    fn test_signal_disconnect() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        let conn_id = signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(1);
        assert!(signal.disconnect(conn_id));
        assert_eq!(signal.try_disconnect(conn_id), Err(SignalError::InvalidConnection));
        signal.emit(2);

        assert_eq!(*received.lock(), vec![1]);
    }

    #[test]
    fn test_signal_blocked() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(1);
        signal.set_blocked(true);
        signal.emit(2);
        assert_eq!(signal.emit_queued(2), 0);
        signal.set_blocked(false);
        signal.emit(3);

        assert_eq!(*received.lock(), vec![1, 3]);
    }

    #[test]
    fn test_disconnect_all() {
        let signal = Signal::<()>::new();
        for _ in 0..5 {
            signal.connect(|_| {});
        }

        assert_eq!(signal.connection_count(), 5);
        signal.disconnect_all();
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_queued_without_loop_runs_immediately() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect_with_type(
            move |&value| received_clone.lock().push(value),
            ConnectionType::Queued,
        );

        signal.emit(42);
        assert_eq!(*received.lock(), vec![42]);
    }

    #[test]
    fn test_queued_waits_for_event_loop() {
        let main_loop = EventLoop::new();
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect_with_type(
            move |&value| received_clone.lock().push(value),
            ConnectionType::Queued,
        );

        signal.emit(7);
        assert!(received.lock().is_empty());
        assert_eq!(main_loop.pending_count(), 1);

        main_loop.process_pending();
        assert_eq!(*received.lock(), vec![7]);
    }

    #[test]
    fn test_queued_after_loop_dropped_runs_immediately() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));
        {
            let _main_loop = EventLoop::new();
            let received_clone = received.clone();
            signal.connect_with_type(
                move |&value| received_clone.lock().push(value),
                ConnectionType::Queued,
            );
        }

        signal.emit(5);
        assert_eq!(*received.lock(), vec![5]);
    }

    #[test]
    fn test_auto_from_other_thread_is_queued() {
        let main_loop = EventLoop::new();
        let signal = Arc::new(Signal::<i32>::new());
        let slot_thread = Arc::new(Mutex::new(None));

        let slot_thread_clone = slot_thread.clone();
        signal.connect(move |_| {
            *slot_thread_clone.lock() = Some(std::thread::current().id());
        });

        let signal_clone = signal.clone();
        std::thread::spawn(move || signal_clone.emit(1)).join().unwrap();

        assert!(slot_thread.lock().is_none());
        main_loop.process_pending();
        assert_eq!(*slot_thread.lock(), Some(std::thread::current().id()));
    }

    #[test]
    fn test_emit_queued_defers_direct_slots() {
        let main_loop = EventLoop::new();
        let signal = Signal::<i32>::new();
        let count = Arc::new(Mutex::new(0));

        let count_clone = count.clone();
        signal.connect_with_type(move |_| *count_clone.lock() += 1, ConnectionType::Direct);

        assert_eq!(signal.emit_queued(1), 1);
        assert_eq!(*count.lock(), 0);
        main_loop.process_pending();
        assert_eq!(*count.lock(), 1);
    }

    #[test]
    fn test_slot_may_disconnect_itself_during_emit() {
        let signal = Arc::new(Signal::<()>::new());
        let id_cell: Arc<Mutex<Option<ConnectionId>>> = Arc::new(Mutex::new(None));

        let signal_clone = signal.clone();
        let id_clone = id_cell.clone();
        let id = signal.connect_with_type(
            move |_| {
                if let Some(id) = *id_clone.lock() {
                    signal_clone.disconnect(id);
                }
            },
            ConnectionType::Direct,
        );
        *id_cell.lock() = Some(id);

        signal.emit(());
        assert_eq!(signal.connection_count(), 0);
    }
}
