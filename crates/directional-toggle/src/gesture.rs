//! Axis-locked pan and tap recognition from raw pointer events.
//!
//! [`PanRecognizer`] tracks a single pointer. It stays undecided while the
//! pointer moves within the slop radius; beyond it the gesture either becomes
//! a pan along the recognizer's axis or fails, handing the pointer back to
//! whoever else wants it. A release without leaving the slop radius is a tap.
//!
//! ```
//! use directional_toggle::gesture::{GestureState, PanRecognizer, PointerEvent, RecognizedGesture};
//! use directional_toggle::Orientation;
//!
//! let mut recognizer = PanRecognizer::new(Orientation::Horizontal);
//! recognizer.process(&PointerEvent::started(10.0, 10.0));
//!
//! let gesture = recognizer.process(&PointerEvent::moved(40.0, 12.0));
//! assert!(matches!(
//!     gesture,
//!     Some(RecognizedGesture::Pan { state: GestureState::Started, translation, .. }) if translation == 30.0
//! ));
//! ```

use directional_toggle_core::logging::targets;

use crate::types::{Orientation, Point};

/// Default maximum movement for a tap in pixels.
///
/// Movement beyond this threshold decides between pan and failure.
pub const DEFAULT_TAP_SLOP: f32 = 10.0;

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    /// The pointer went down.
    Started,
    /// The pointer moved while down.
    Moved,
    /// The pointer was released.
    Ended,
    /// The system took the pointer away.
    Cancelled,
}

/// A pointer event in the widget's local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: TouchPhase,
    pub position: Point,
}

impl PointerEvent {
    pub fn new(phase: TouchPhase, position: Point) -> Self {
        Self { phase, position }
    }

    pub fn started(x: f32, y: f32) -> Self {
        Self::new(TouchPhase::Started, Point::new(x, y))
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(TouchPhase::Moved, Point::new(x, y))
    }

    pub fn ended(x: f32, y: f32) -> Self {
        Self::new(TouchPhase::Ended, Point::new(x, y))
    }

    pub fn cancelled(x: f32, y: f32) -> Self {
        Self::new(TouchPhase::Cancelled, Point::new(x, y))
    }
}

/// State of a continuous gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Started,
    Updated,
    Ended,
    Cancelled,
}

/// Output of the recognizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecognizedGesture {
    /// Pointer released without leaving the slop radius.
    Tap { position: Point },
    /// Pan along the recognizer's axis.
    Pan {
        state: GestureState,
        /// Movement along the axis since the pointer went down.
        translation: f32,
        position: Point,
    },
    /// Movement left the slop radius across the axis; the pointer is not claimed.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecognizerState {
    Idle,
    Possible,
    Panning,
    Failed,
}

/// Single-pointer pan/tap recognizer locked to one axis.
#[derive(Debug, Clone)]
pub struct PanRecognizer {
    axis: Orientation,
    slop: f32,
    state: RecognizerState,
    start: Point,
}

impl PanRecognizer {
    /// Create a recognizer with the default slop.
    pub fn new(axis: Orientation) -> Self {
        Self {
            axis,
            slop: DEFAULT_TAP_SLOP,
            state: RecognizerState::Idle,
            start: Point::ZERO,
        }
    }

    /// Set the slop radius.
    pub fn with_slop(mut self, slop: f32) -> Self {
        self.slop = slop.max(0.0);
        self
    }

    #[inline]
    pub fn axis(&self) -> Orientation {
        self.axis
    }

    /// Change the axis. Any gesture in progress is dropped.
    pub fn set_axis(&mut self, axis: Orientation) {
        self.axis = axis;
        self.reset();
    }

    /// Whether a pan is currently claimed.
    #[inline]
    pub fn is_panning(&self) -> bool {
        self.state == RecognizerState::Panning
    }

    /// Whether a pointer is tracked and not yet handed back.
    #[inline]
    pub fn is_tracking(&self) -> bool {
        matches!(
            self.state,
            RecognizerState::Possible | RecognizerState::Panning
        )
    }

    /// Forget the tracked pointer.
    pub fn reset(&mut self) {
        self.state = RecognizerState::Idle;
    }

    /// Feed one pointer event and return the recognized gesture, if any.
    pub fn process(&mut self, event: &PointerEvent) -> Option<RecognizedGesture> {
        let position = event.position;
        let translation = self.axis.main(position) - self.axis.main(self.start);

        match (event.phase, self.state) {
            (TouchPhase::Started, state) => {
                let interrupted = state == RecognizerState::Panning;
                let cancelled_translation = translation;
                self.start = position;
                self.state = RecognizerState::Possible;
                interrupted.then(|| {
                    tracing::debug!(target: targets::GESTURE, "pan interrupted by new pointer");
                    RecognizedGesture::Pan {
                        state: GestureState::Cancelled,
                        translation: cancelled_translation,
                        position,
                    }
                })
            }
            (TouchPhase::Moved, RecognizerState::Possible) => {
                let dx = position.x - self.start.x;
                let dy = position.y - self.start.y;
                if (dx * dx + dy * dy).sqrt() <= self.slop {
                    return None;
                }

                let cross = self.axis.cross(position) - self.axis.cross(self.start);
                if cross.abs() > translation.abs() {
                    tracing::trace!(target: targets::GESTURE, cross, translation, "pan failed");
                    self.state = RecognizerState::Failed;
                    return Some(RecognizedGesture::Failed);
                }

                tracing::trace!(target: targets::GESTURE, translation, "pan started");
                self.state = RecognizerState::Panning;
                Some(RecognizedGesture::Pan {
                    state: GestureState::Started,
                    translation,
                    position,
                })
            }
            (TouchPhase::Moved, RecognizerState::Panning) => Some(RecognizedGesture::Pan {
                state: GestureState::Updated,
                translation,
                position,
            }),
            (TouchPhase::Ended, RecognizerState::Possible) => {
                self.state = RecognizerState::Idle;
                tracing::trace!(target: targets::GESTURE, x = position.x, y = position.y, "tap");
                Some(RecognizedGesture::Tap { position })
            }
            (TouchPhase::Ended, RecognizerState::Panning) => {
                self.state = RecognizerState::Idle;
                tracing::trace!(target: targets::GESTURE, translation, "pan ended");
                Some(RecognizedGesture::Pan {
                    state: GestureState::Ended,
                    translation,
                    position,
                })
            }
            (TouchPhase::Cancelled, RecognizerState::Panning) => {
                self.state = RecognizerState::Idle;
                tracing::trace!(target: targets::GESTURE, "pan cancelled");
                Some(RecognizedGesture::Pan {
                    state: GestureState::Cancelled,
                    translation,
                    position,
                })
            }
            (TouchPhase::Ended | TouchPhase::Cancelled, _) => {
                self.state = RecognizerState::Idle;
                None
            }
            (TouchPhase::Moved, RecognizerState::Idle | RecognizerState::Failed) => None,
        }
    }
}
