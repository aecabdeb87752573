//! Queued invocations for deferred slot delivery.
//!
//! A [`QueuedInvocation`] wraps a slot together with its arguments so it can run
//! later on the main cycle of the thread that owns the receiving slot.
//!
//! # How It Works
//!
//! 1. When a signal is emitted through a `Queued` connection (or an `Auto`
//!    connection from a foreign thread) the slot call is boxed here.
//!
//! 2. The invocation is posted to the [`EventLoopHandle`](crate::EventLoopHandle)
//!    captured when the slot was connected.
//!
//! 3. When that loop processes pending events, the invocation is executed.

use std::sync::atomic::{AtomicU64, Ordering};

/// Global invocation counter for unique IDs.
static NEXT_INVOCATION_ID: AtomicU64 = AtomicU64::new(1);

/// A type-erased queued invocation that can be executed later.
pub struct QueuedInvocation {
    id: u64,
    invoke: Box<dyn FnOnce() + Send>,
}

impl QueuedInvocation {
    /// Create a new queued invocation.
    pub fn new<F>(invoke: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            id: NEXT_INVOCATION_ID.fetch_add(1, Ordering::SeqCst),
            invoke: Box::new(invoke),
        }
    }

    /// Unique identifier of this invocation.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Execute the invocation.
    pub fn execute(self) {
        (self.invoke)();
    }
}

impl std::fmt::Debug for QueuedInvocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueuedInvocation").field("id", &self.id).finish()
    }
}
