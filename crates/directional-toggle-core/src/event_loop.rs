//! Main-cycle event loop for deferred work.
//!
//! Each UI thread owns at most one active [`EventLoop`]. While it is alive, the
//! loop is registered as the thread's *current* loop, so signals connected on
//! that thread know where queued slot invocations must be delivered.
//!
//! Work can be posted from any thread through a cloneable [`EventLoopHandle`];
//! it only runs when the owning thread calls [`EventLoop::process_pending`].
//!
//! # Example
//!
//! ```
//! use directional_toggle_core::EventLoop;
//!
//! let main_loop = EventLoop::new();
//! let handle = main_loop.handle();
//!
//! std::thread::spawn(move || {
//!     handle.post_task(|| println!("runs on the main cycle")).unwrap();
//! })
//! .join()
//! .unwrap();
//!
//! assert_eq!(main_loop.process_pending(), 1);
//! ```

use std::cell::RefCell;
use std::marker::PhantomData;
use std::thread::ThreadId;

use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::error::EventLoopError;
use crate::invocation::QueuedInvocation;
use crate::logging::targets;

// Thread-local storage for the current loop handle (the loop itself is not Send).
thread_local! {
    static CURRENT_LOOP: RefCell<Option<EventLoopHandle>> = const { RefCell::new(None) };
}

/// A cloneable, thread-safe handle for posting work to an [`EventLoop`].
#[derive(Clone, Debug)]
pub struct EventLoopHandle {
    sender: Sender<QueuedInvocation>,
    owner: ThreadId,
}

impl EventLoopHandle {
    /// Post a queued invocation to the loop.
    ///
    /// Fails with [`EventLoopError::Closed`] once the loop has been dropped.
    pub fn post(&self, invocation: QueuedInvocation) -> Result<(), EventLoopError> {
        let id = invocation.id();
        self.sender.send(invocation).map_err(|_| EventLoopError::Closed)?;
        tracing::trace!(target: targets::EVENT_LOOP, invocation_id = id, "posted invocation");
        Ok(())
    }

    /// Post an invocation, handing it back if the loop has been dropped.
    pub(crate) fn try_post(&self, invocation: QueuedInvocation) -> Result<(), QueuedInvocation> {
        self.sender.send(invocation).map_err(|err| err.into_inner())
    }

    /// Post a closure to run on the loop's thread.
    pub fn post_task<F>(&self, task: F) -> Result<(), EventLoopError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.post(QueuedInvocation::new(task))
    }

    /// The thread that owns the loop behind this handle.
    pub fn owner_thread(&self) -> ThreadId {
        self.owner
    }
}

/// A per-thread queue of deferred work, processed explicitly by its owner.
///
/// Creating a loop makes it the current loop of the calling thread; dropping it
/// restores whichever loop was current before.
pub struct EventLoop {
    receiver: Receiver<QueuedInvocation>,
    handle: EventLoopHandle,
    previous: Option<EventLoopHandle>,
    // Pinned to the creating thread.
    _not_send: PhantomData<*const ()>,
}

impl EventLoop {
    /// Create a loop and register it as the current thread's loop.
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        let handle = EventLoopHandle {
            sender,
            owner: std::thread::current().id(),
        };
        let previous = CURRENT_LOOP.with(|current| current.replace(Some(handle.clone())));
        tracing::debug!(target: targets::EVENT_LOOP, "event loop installed");

        Self {
            receiver,
            handle,
            previous,
            _not_send: PhantomData,
        }
    }

    /// Handle of the loop registered on the calling thread, if any.
    pub fn current_handle() -> Option<EventLoopHandle> {
        CURRENT_LOOP.with(|current| current.borrow().clone())
    }

    /// Get a handle for posting work to this loop.
    pub fn handle(&self) -> EventLoopHandle {
        self.handle.clone()
    }

    /// Number of invocations waiting to run.
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Whether any work is waiting.
    pub fn has_pending(&self) -> bool {
        !self.receiver.is_empty()
    }

    /// Run the invocations that were pending when this call started.
    ///
    /// Work posted by the invocations themselves waits for the next call.
    /// Returns the number of invocations executed.
    #[tracing::instrument(skip_all, target = "directional_toggle_core::event_loop", level = "trace")]
    pub fn process_pending(&self) -> usize {
        let count = self.receiver.len();
        let mut processed = 0;
        for _ in 0..count {
            match self.receiver.try_recv() {
                Ok(invocation) => {
                    invocation.execute();
                    processed += 1;
                }
                Err(_) => break,
            }
        }
        if processed > 0 {
            tracing::trace!(target: targets::EVENT_LOOP, processed, "processed pending invocations");
        }
        processed
    }

    /// Run pending work until the queue is empty.
    ///
    /// Unlike [`process_pending`](Self::process_pending), this also runs work that
    /// executed invocations post while draining.
    pub fn drain(&self) -> usize {
        let mut total = 0;
        loop {
            let processed = self.process_pending();
            if processed == 0 {
                return total;
            }
            total += processed;
        }
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EventLoop {
    fn drop(&mut self) {
        let previous = self.previous.take();
        // A loop dropped out of creation order leaves the newer registration in place.
        let _ = CURRENT_LOOP.try_with(|current| {
            let mut current = current.borrow_mut();
            let is_self = current
                .as_ref()
                .is_some_and(|h| h.sender.same_channel(&self.handle.sender));
            if is_self {
                *current = previous;
            }
        });
        tracing::debug!(target: targets::EVENT_LOOP, "event loop removed");
    }
}

impl std::fmt::Debug for EventLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLoop")
            .field("pending", &self.pending_count())
            .finish()
    }
}

static_assertions::assert_impl_all!(EventLoopHandle: Send, Sync);
static_assertions::assert_not_impl_any!(EventLoop: Send, Sync);
