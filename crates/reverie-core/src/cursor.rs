#![forbid(unsafe_code)]

//! Custom cursor tracking: raw and smoothed pointer state plus hover
//! target resolution.
//!
//! [`CursorTracker`] owns the canonical pointer subscription. `raw` is
//! updated synchronously on every pointer sample (latest wins, no
//! buffering); `smoothed` advances exactly once per frame tick by
//! exponential interpolation, decoupling device-rate input from
//! display-rate painting. Hover targets are resolved by element identity
//! through a registered hit list, and identity changes emit a discrete
//! [`HoverChange`] rather than requiring per-frame polling.
//!
//! # Snapshot consistency
//!
//! Consumers read through [`CursorFeed`], a cloneable handle over the
//! snapshot published at the end of each [`frame`](CursorTracker::frame).
//! Within one tick every reader observes an identical state. Only one
//! canonical tracker should own the raw pointer subscription; a second
//! tracker duplicates listeners rather than sharing state — share a
//! [`CursorFeed`] instead.
//!
//! # Invariants
//!
//! 1. `raw` always reflects the latest delivered pointer sample.
//! 2. `smoothed` changes only inside `frame`, once per tick.
//! 3. `hover_target` changes only when the element identity under the raw
//!    position changes, never on geometry alone.
//! 4. `stop()` releases the pointer and frame subscriptions synchronously;
//!    later deliveries are dropped without effect or panic.

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;
use arc_swap::ArcSwap;
use tracing::debug;

use crate::error::MotionError;
use crate::geometry::{Region, Vec2};
use crate::lifecycle::{SignalBinding, SignalKind};
use crate::smoothing::Smoothed;

/// Default per-tick smoothing factor.
const DEFAULT_SMOOTHING: f64 = 0.18;

// ---------------------------------------------------------------------------
// Target identity
// ---------------------------------------------------------------------------

/// Identity of an interactive element. Compared by id, never by geometry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(Arc<str>);

impl TargetId {
    /// Create an id.
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TargetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TargetId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TargetId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Hit registry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct HitTarget {
    region: Region,
    z: i32,
    seq: u64,
}

/// Registered interactive regions for hover resolution.
///
/// Topmost wins: highest `z`, ties broken by most recent registration.
#[derive(Debug, Clone, Default)]
pub struct HitRegistry {
    targets: AHashMap<TargetId, HitTarget>,
    next_seq: u64,
}

impl HitRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a target region at the given z order.
    pub fn register(&mut self, id: TargetId, region: Region, z: i32) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.targets.insert(id, HitTarget { region, z, seq });
    }

    /// Update a registered target's region after a layout change.
    /// Returns false for unknown ids.
    pub fn update_region(&mut self, id: &TargetId, region: Region) -> bool {
        match self.targets.get_mut(id) {
            Some(target) => {
                target.region = region;
                true
            }
            None => false,
        }
    }

    /// Remove a target. Returns false for unknown ids.
    pub fn remove(&mut self, id: &TargetId) -> bool {
        self.targets.remove(id).is_some()
    }

    /// Number of registered targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether no targets are registered.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Topmost target under `point`, if any.
    pub fn hit_test(&self, point: Vec2) -> Option<&TargetId> {
        self.targets
            .iter()
            .filter(|(_, target)| target.region.contains(point))
            .max_by_key(|(_, target)| (target.z, target.seq))
            .map(|(id, _)| id)
    }
}

// ---------------------------------------------------------------------------
// State and configuration
// ---------------------------------------------------------------------------

/// Render-ready cursor state.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CursorState {
    /// Latest known pointer position (synchronous with pointer events).
    pub raw: Vec2,
    /// Exponentially smoothed position (advances once per frame tick).
    pub smoothed: Vec2,
    /// Identity of the interactive element under the raw position.
    pub hover_target: Option<TargetId>,
}

/// Discrete hover-identity transition.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverChange {
    /// Previous hover target.
    pub from: Option<TargetId>,
    /// New hover target.
    pub to: Option<TargetId>,
}

/// Configuration for [`CursorTracker::start`].
#[derive(Debug, Clone, Copy)]
pub struct CursorConfig {
    smoothing: f64,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            smoothing: DEFAULT_SMOOTHING,
        }
    }
}

impl CursorConfig {
    /// Default configuration (smoothing factor 0.18).
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-tick smoothing factor in `(0, 1]`; lower lags more.
    /// Validated when the tracker starts.
    #[must_use]
    pub fn smoothing(mut self, k: f64) -> Self {
        self.smoothing = k;
        self
    }
}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

/// Tracks and smooths the pointer, resolving hover targets by identity.
pub struct CursorTracker {
    raw: Vec2,
    smoothed: Smoothed<Vec2>,
    hover: Option<TargetId>,
    registry: HitRegistry,
    binding: SignalBinding,
    published: Arc<ArcSwap<CursorState>>,
}

impl fmt::Debug for CursorTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorTracker")
            .field("raw", &self.raw)
            .field("smoothed", &self.smoothed.value())
            .field("hover", &self.hover)
            .field("targets", &self.registry.len())
            .field("stopped", &self.binding.is_disposed())
            .finish()
    }
}

impl CursorTracker {
    /// Start tracking; acquires the pointer-move and frame-tick
    /// subscriptions.
    pub fn start(config: CursorConfig) -> Result<Self, MotionError> {
        let smoothed = Smoothed::new(Vec2::ZERO, config.smoothing)?;
        let mut binding = SignalBinding::new("CursorTracker");
        binding.subscribe(SignalKind::POINTER | SignalKind::FRAME)?;
        debug!(smoothing = config.smoothing, "cursor tracker started");
        Ok(Self {
            raw: Vec2::ZERO,
            smoothed,
            hover: None,
            registry: HitRegistry::new(),
            binding,
            published: Arc::new(ArcSwap::from_pointee(CursorState::default())),
        })
    }

    /// Register an interactive region for hover resolution.
    pub fn register_target(
        &mut self,
        id: impl Into<TargetId>,
        region: Region,
        z: i32,
    ) -> Result<(), MotionError> {
        self.binding.ensure_active()?;
        self.registry.register(id.into(), region, z);
        Ok(())
    }

    /// Update a registered region after a layout change.
    pub fn update_target(&mut self, id: &TargetId, region: Region) -> Result<bool, MotionError> {
        self.binding.ensure_active()?;
        Ok(self.registry.update_region(id, region))
    }

    /// Remove a registered region.
    pub fn remove_target(&mut self, id: &TargetId) -> Result<bool, MotionError> {
        self.binding.ensure_active()?;
        Ok(self.registry.remove(id))
    }

    /// The hit registry (read-only).
    pub fn registry(&self) -> &HitRegistry {
        &self.registry
    }

    /// Deliver a pointer sample. Updates `raw` synchronously and resolves
    /// the hover target; returns the transition when identity changed.
    pub fn pointer_moved(&mut self, position: Vec2) -> Option<HoverChange> {
        if !self.binding.delivers(SignalKind::POINTER) {
            return None;
        }
        self.raw = position;
        self.smoothed.retarget(position);
        let over = self.registry.hit_test(position).cloned();
        self.transition_hover(over)
    }

    /// Deliver "pointer left the surface". Clears the hover target; the
    /// last raw position is retained.
    pub fn pointer_left(&mut self) -> Option<HoverChange> {
        if !self.binding.delivers(SignalKind::POINTER) {
            return None;
        }
        self.transition_hover(None)
    }

    fn transition_hover(&mut self, over: Option<TargetId>) -> Option<HoverChange> {
        if over == self.hover {
            return None;
        }
        let change = HoverChange {
            from: self.hover.take(),
            to: over.clone(),
        };
        debug!(from = ?change.from, to = ?change.to, "hover target changed");
        self.hover = over;
        Some(change)
    }

    /// Advance one frame tick and publish the snapshot all feeds observe
    /// for this tick.
    pub fn frame(&mut self) {
        if !self.binding.delivers(SignalKind::FRAME) {
            return;
        }
        self.smoothed.tick();
        self.published.store(Arc::new(self.live_state()));
    }

    fn live_state(&self) -> CursorState {
        CursorState {
            raw: self.raw,
            smoothed: self.smoothed.value(),
            hover_target: self.hover.clone(),
        }
    }

    /// The tracker-side view of the current state, ahead of publication.
    /// Errors after [`stop`](Self::stop).
    pub fn state(&self) -> Result<CursorState, MotionError> {
        self.binding.ensure_active()?;
        Ok(self.live_state())
    }

    /// A cloneable read handle over the published snapshot.
    ///
    /// Feeds stay readable after `stop()`, returning the final snapshot.
    pub fn feed(&self) -> Result<CursorFeed, MotionError> {
        self.binding.ensure_active()?;
        Ok(CursorFeed {
            inner: Arc::clone(&self.published),
        })
    }

    /// Stop tracking: releases all subscriptions synchronously. Errors on
    /// double stop.
    pub fn stop(&mut self) -> Result<(), MotionError> {
        self.binding.ensure_active()?;
        self.binding.dispose();
        Ok(())
    }

    /// Whether [`stop`](Self::stop) has run.
    pub fn is_stopped(&self) -> bool {
        self.binding.is_disposed()
    }
}

/// Cloneable reader over the per-tick published [`CursorState`].
#[derive(Clone)]
pub struct CursorFeed {
    inner: Arc<ArcSwap<CursorState>>,
}

impl CursorFeed {
    /// The snapshot published by the most recent frame tick.
    pub fn latest(&self) -> Arc<CursorState> {
        self.inner.load_full()
    }
}

impl fmt::Debug for CursorFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorFeed")
            .field("latest", &self.inner.load_full())
            .finish()
    }
}
