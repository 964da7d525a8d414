#![forbid(unsafe_code)]

//! Visibility triggering for scroll-reveal effects.
//!
//! A [`VisibilityTrigger`] watches one rendered region and reports whether
//! it has entered the viewport, once or repeatedly, with a configurable
//! pre-trigger margin. Hosts feed it geometry whenever layout or scroll
//! position changes; the trigger computes the intersection ratio itself,
//! or accepts a precomputed ratio via
//! [`sample_ratio`](VisibilityTrigger::sample_ratio).
//!
//! Hosts must deliver an initial sample at mount time: a region already
//! intersecting the viewport fires on that first sample rather than
//! waiting for a geometry change.
//!
//! # Invariants
//!
//! 1. A zero-area region never triggers, at any threshold.
//! 2. With `once`, the first positive transition releases the intersection
//!    subscription; later samples are inert.
//! 3. Without `once`, the ratio dropping below threshold flips visibility
//!    back off, re-arming reveal-on-entry.
//! 4. Samples after `dispose()` are dropped without effect or panic.
//!
//! # Failure Modes
//!
//! - Host cannot observe intersections at all: construct with
//!   [`VisibilityTrigger::fail_open`]; content is visible immediately and
//!   permanently, never failed closed.

use tracing::debug;

use crate::error::MotionError;
use crate::geometry::Region;
use crate::lifecycle::{SignalBinding, SignalKind};

/// Default intersection ratio required to count as visible.
const DEFAULT_THRESHOLD: f64 = 0.2;

/// Default pre-trigger margin in px (negative insets the viewport).
const DEFAULT_ROOT_MARGIN: f64 = -80.0;

/// Configuration for [`VisibilityTrigger::observe`].
#[derive(Debug, Clone, Copy)]
pub struct VisibilityOptions {
    threshold: f64,
    root_margin: f64,
    once: bool,
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            root_margin: DEFAULT_ROOT_MARGIN,
            once: true,
        }
    }
}

impl VisibilityOptions {
    /// Default options: threshold 0.2, root margin −80 px, latch once.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intersection ratio in `[0, 1]` required to count as visible.
    /// A threshold of 0 means any positive intersection.
    #[must_use]
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Signed margin applied to every viewport edge before the
    /// intersection test. Negative values inset the viewport.
    #[must_use]
    pub fn root_margin(mut self, margin: f64) -> Self {
        self.root_margin = margin;
        self
    }

    /// Latch on the first positive transition instead of re-triggering.
    #[must_use]
    pub fn once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    fn validate(&self) -> Result<(), MotionError> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(MotionError::InvalidConfig {
                what: "visibility threshold must be in [0, 1]",
            });
        }
        if !self.root_margin.is_finite() {
            return Err(MotionError::InvalidConfig {
                what: "root margin must be finite",
            });
        }
        Ok(())
    }
}

/// Continuously updated visibility of one watched region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VisibilityState {
    /// Whether the region currently counts as visible.
    pub is_visible: bool,
    /// Whether the region has ever counted as visible.
    pub has_triggered_once: bool,
}

/// Watches a region and reports viewport entry/exit.
#[derive(Debug, Clone)]
pub struct VisibilityTrigger {
    options: VisibilityOptions,
    state: VisibilityState,
    binding: SignalBinding,
}

impl VisibilityTrigger {
    /// Start observing with the given options.
    pub fn observe(options: VisibilityOptions) -> Result<Self, MotionError> {
        options.validate()?;
        let mut binding = SignalBinding::new("VisibilityTrigger");
        binding.subscribe(SignalKind::INTERSECTION)?;
        Ok(Self {
            options,
            state: VisibilityState::default(),
            binding,
        })
    }

    /// Construct a trigger that is immediately and permanently visible,
    /// for hosts without an intersection signal.
    pub fn fail_open() -> Self {
        debug!("visibility observation unavailable, failing open");
        Self {
            options: VisibilityOptions::default(),
            state: VisibilityState {
                is_visible: true,
                has_triggered_once: true,
            },
            // Holds no subscription; all samples are dropped.
            binding: SignalBinding::new("VisibilityTrigger"),
        }
    }

    /// Deliver a geometry sample. The intersection ratio is computed
    /// against the viewport adjusted by the configured root margin.
    pub fn sample(&mut self, region: Region, viewport: Region) {
        let effective = viewport.expand(self.options.root_margin);
        self.sample_ratio(region.visible_ratio(&effective));
    }

    /// Deliver a precomputed intersection ratio in `[0, 1]`.
    pub fn sample_ratio(&mut self, ratio: f64) {
        if !self.binding.delivers(SignalKind::INTERSECTION) {
            return;
        }
        let crossed = if self.options.threshold == 0.0 {
            ratio > 0.0
        } else {
            ratio >= self.options.threshold
        };
        if crossed {
            if !self.state.is_visible {
                debug!(ratio, "region entered viewport");
            }
            self.state.is_visible = true;
            if !self.state.has_triggered_once {
                self.state.has_triggered_once = true;
                if self.options.once {
                    self.binding.release(SignalKind::INTERSECTION);
                }
            }
        } else if !self.options.once && self.state.is_visible {
            debug!(ratio, "region left viewport");
            self.state.is_visible = false;
        }
    }

    /// Current state. Errors after [`dispose`](Self::dispose).
    pub fn state(&self) -> Result<VisibilityState, MotionError> {
        self.binding.ensure_active()?;
        Ok(self.state)
    }

    /// Whether the region currently counts as visible. Errors after
    /// [`dispose`](Self::dispose).
    pub fn is_visible(&self) -> Result<bool, MotionError> {
        self.binding.ensure_active()?;
        Ok(self.state.is_visible)
    }

    /// Whether the trigger still holds its intersection subscription.
    /// False after a `once` latch and after dispose.
    pub fn is_observing(&self) -> bool {
        self.binding.holds(SignalKind::INTERSECTION)
    }

    /// Release the observation. Errors if already disposed.
    pub fn dispose(&mut self) -> Result<(), MotionError> {
        self.binding.ensure_active()?;
        self.binding.dispose();
        Ok(())
    }

    /// Whether [`dispose`](Self::dispose) has run.
    pub fn is_disposed(&self) -> bool {
        self.binding.is_disposed()
    }
}
