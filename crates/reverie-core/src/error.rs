#![forbid(unsafe_code)]

//! Engine error types.
//!
//! All fallible construction and API-path misuse reports through
//! [`MotionError`]. Event delivery never errors: samples arriving after a
//! dispose are dropped silently (see [`crate::lifecycle`]), and a missing
//! observation mechanism fails open rather than failing closed.

use std::fmt;

use crate::lifecycle::SignalKind;

/// Errors surfaced by engine components.
///
/// Construction-time validation is strict: bad configuration is rejected
/// with a descriptive error, never silently clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MotionError {
    /// A configuration value was rejected at construction time.
    InvalidConfig {
        /// Which value was rejected and why.
        what: &'static str,
    },
    /// An API method was called on a disposed component.
    Disposed {
        /// The component that was already disposed.
        component: &'static str,
    },
    /// A signal class was subscribed twice within one active period.
    AlreadySubscribed {
        /// The signal class that was already held.
        kind: SignalKind,
    },
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { what } => write!(f, "invalid configuration: {what}"),
            Self::Disposed { component } => write!(f, "{component} used after dispose"),
            Self::AlreadySubscribed { kind } => {
                write!(f, "signal class already subscribed: {kind:?}")
            }
        }
    }
}

impl std::error::Error for MotionError {}
