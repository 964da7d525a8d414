#![forbid(unsafe_code)]

//! Suspendable observer lifecycle shared by all stateful components.
//!
//! Components subscribe to classes of host signals (pointer moves,
//! intersection geometry, frame ticks), hold each subscription exactly
//! once per active period, and release everything synchronously on
//! dispose. [`SignalBinding`] enforces both halves of the disposal
//! contract:
//!
//! - **API path**: methods called on a disposed component are programmer
//!   errors and fail with [`MotionError::Disposed`]
//!   ([`ensure_active`](SignalBinding::ensure_active)).
//! - **Event path**: signals still in flight when a component is disposed
//!   are dropped without effect and without error
//!   ([`delivers`](SignalBinding::delivers)).
//!
//! # Invariants
//!
//! 1. A signal class is held at most once per active period.
//! 2. `dispose()` releases every held class before returning.
//! 3. A disposed binding never reports `delivers() == true` again.
//! 4. `dispose()` is idempotent on the binding itself; component-level
//!    double-dispose checks live in the components.

use bitflags::bitflags;
use tracing::{debug, trace};

use crate::error::MotionError;

bitflags! {
    /// Classes of host signal a component may hold.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SignalKind: u8 {
        /// Discrete pointer-move events.
        const POINTER = 1 << 0;
        /// Intersection / geometry observation callbacks.
        const INTERSECTION = 1 << 1;
        /// The per-frame render tick.
        const FRAME = 1 << 2;
    }
}

/// Tracks which signal classes a component currently holds.
#[derive(Debug, Clone)]
pub struct SignalBinding {
    component: &'static str,
    held: SignalKind,
    disposed: bool,
}

impl SignalBinding {
    /// Create an unbound, active binding for the named component.
    pub fn new(component: &'static str) -> Self {
        Self {
            component,
            held: SignalKind::empty(),
            disposed: false,
        }
    }

    /// Acquire one or more signal classes for the current active period.
    ///
    /// Any overlap with an already-held class is rejected.
    pub fn subscribe(&mut self, kind: SignalKind) -> Result<(), MotionError> {
        self.ensure_active()?;
        if self.held.intersects(kind) {
            return Err(MotionError::AlreadySubscribed { kind });
        }
        self.held.insert(kind);
        debug!(component = self.component, ?kind, "signal subscribed");
        Ok(())
    }

    /// Release a signal class. Releasing a class that is not held is a
    /// no-op.
    pub fn release(&mut self, kind: SignalKind) {
        if self.held.intersects(kind) {
            self.held.remove(kind);
            debug!(component = self.component, ?kind, "signal released");
        }
    }

    /// Release every held class and mark the binding disposed. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.held = SignalKind::empty();
        self.disposed = true;
        debug!(component = self.component, "disposed");
    }

    /// Whether [`dispose`](Self::dispose) has run.
    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Whether all of `kind` is currently held.
    #[inline]
    pub fn holds(&self, kind: SignalKind) -> bool {
        self.held.contains(kind)
    }

    /// Event-path guard: whether a signal of class `kind` should be
    /// delivered. False (with a trace) after release or dispose.
    pub fn delivers(&self, kind: SignalKind) -> bool {
        if self.disposed || !self.held.contains(kind) {
            trace!(component = self.component, ?kind, "signal dropped");
            return false;
        }
        true
    }

    /// API-path guard: error if the component was disposed.
    pub fn ensure_active(&self) -> Result<(), MotionError> {
        if self.disposed {
            return Err(MotionError::Disposed {
                component: self.component,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_is_exactly_once_per_active_period() {
        let mut binding = SignalBinding::new("test");
        binding.subscribe(SignalKind::POINTER).unwrap();
        assert_eq!(
            binding.subscribe(SignalKind::POINTER),
            Err(MotionError::AlreadySubscribed {
                kind: SignalKind::POINTER
            })
        );
        // A disjoint class is still available.
        binding.subscribe(SignalKind::FRAME).unwrap();
    }

    #[test]
    fn overlapping_set_is_rejected_whole() {
        let mut binding = SignalBinding::new("test");
        binding.subscribe(SignalKind::FRAME).unwrap();
        let both = SignalKind::FRAME | SignalKind::POINTER;
        assert!(binding.subscribe(both).is_err());
        assert!(!binding.holds(SignalKind::POINTER));
    }

    #[test]
    fn release_stops_delivery_and_allows_resubscribe() {
        let mut binding = SignalBinding::new("test");
        binding.subscribe(SignalKind::INTERSECTION).unwrap();
        assert!(binding.delivers(SignalKind::INTERSECTION));

        binding.release(SignalKind::INTERSECTION);
        assert!(!binding.delivers(SignalKind::INTERSECTION));

        binding.subscribe(SignalKind::INTERSECTION).unwrap();
        assert!(binding.delivers(SignalKind::INTERSECTION));
    }

    #[test]
    fn dispose_releases_everything_and_blocks_api() {
        let mut binding = SignalBinding::new("test");
        binding
            .subscribe(SignalKind::POINTER | SignalKind::FRAME)
            .unwrap();
        binding.dispose();
        binding.dispose(); // idempotent

        assert!(binding.is_disposed());
        assert!(!binding.delivers(SignalKind::POINTER));
        assert!(!binding.delivers(SignalKind::FRAME));
        assert_eq!(
            binding.ensure_active(),
            Err(MotionError::Disposed { component: "test" })
        );
        assert!(binding.subscribe(SignalKind::POINTER).is_err());
    }
}
