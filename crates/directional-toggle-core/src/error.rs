//! Error types for Directional Toggle core systems.

use std::fmt;

/// Event-loop specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventLoopError {
    /// The event loop owning the handle has been dropped.
    Closed,
}

impl fmt::Display for EventLoopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "The event loop has been dropped"),
        }
    }
}

impl std::error::Error for EventLoopError {}

/// Signal-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    /// The connection ID is invalid or has already been disconnected.
    InvalidConnection,
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConnection => write!(f, "Invalid or disconnected connection ID"),
        }
    }
}

impl std::error::Error for SignalError {}
