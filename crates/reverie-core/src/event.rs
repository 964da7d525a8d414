#![forbid(unsafe_code)]

//! Pointer samples and pointer-move coalescing.
//!
//! The engine's only inputs are pointer samples, region geometry (passed
//! as [`crate::geometry::Region`] pairs), and the frame tick. Hosts that
//! receive device-rate pointer input should drain it through
//! [`PointerCoalescer`] so handlers run at most once per batch, with the
//! latest position.
//!
//! The coalescer uses a "latest wins" strategy: it holds at most one
//! pending sample and every operation is O(1). Discrete events only update
//! target values; painting happens on the frame tick.

use crate::geometry::Vec2;

/// A pointer position sample in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Position in viewport coordinates.
    pub position: Vec2,
}

impl PointerSample {
    /// Create a sample at the given position.
    #[inline]
    pub const fn new(position: Vec2) -> Self {
        Self { position }
    }
}

/// Collapses bursts of pointer moves into a single latest-wins sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerCoalescer {
    pending: Option<PointerSample>,
    folded: u64,
}

impl PointerCoalescer {
    /// Create an empty coalescer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer move. An existing pending sample is replaced.
    pub fn offer(&mut self, sample: PointerSample) {
        if self.pending.replace(sample).is_some() {
            self.folded += 1;
        }
    }

    /// Take the pending sample, if any. Call once per drain point
    /// (typically once per frame).
    pub fn drain(&mut self) -> Option<PointerSample> {
        self.pending.take()
    }

    /// Whether a sample is waiting to be drained.
    #[inline]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of samples folded away since construction.
    #[inline]
    pub fn folded(&self) -> u64 {
        self.folded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_sample_wins() {
        let mut coalescer = PointerCoalescer::new();
        coalescer.offer(PointerSample::new(Vec2::new(10.0, 10.0)));
        coalescer.offer(PointerSample::new(Vec2::new(20.0, 25.0)));
        coalescer.offer(PointerSample::new(Vec2::new(30.0, 35.0)));

        let drained = coalescer.drain().unwrap();
        assert_eq!(drained.position, Vec2::new(30.0, 35.0));
        assert_eq!(coalescer.folded(), 2);
    }

    #[test]
    fn drain_clears_pending() {
        let mut coalescer = PointerCoalescer::new();
        coalescer.offer(PointerSample::new(Vec2::ZERO));
        assert!(coalescer.has_pending());
        assert!(coalescer.drain().is_some());
        assert!(!coalescer.has_pending());
        assert!(coalescer.drain().is_none());
    }
}
