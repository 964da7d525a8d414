#![forbid(unsafe_code)]

//! Staggered reveal scheduling.
//!
//! [`RevealSchedule`] maps ordered content units (characters, cards, list
//! rows) to the elapsed time at which each becomes visible: deterministic
//! offsets `base + i * per_unit`, queried through a pure, rewindable
//! lookup. [`SequenceReveal`] anchors a schedule's clock origin to the
//! moment a [`VisibilityTrigger`] first fires, so per-character reveals
//! start when their section scrolls into view — and never start if it
//! does not.
//!
//! # Invariants
//!
//! 1. Offsets are monotonically non-decreasing in unit index, so the
//!    visible set is always the prefix `0..n`.
//! 2. `visible_units` is a pure lookup: re-querying with an earlier
//!    elapsed time returns the earlier (smaller) prefix again.
//! 3. One schedule, one clock origin: all units share a single elapsed
//!    reading per query; there are no per-unit timers.
//! 4. An empty schedule is immediately complete.

use std::ops::Range;
use std::time::Duration;

use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::clock::MotionClock;
use crate::error::MotionError;
use crate::geometry::Region;
use crate::visibility::{VisibilityOptions, VisibilityTrigger};

/// One entry of a reveal schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealEntry {
    /// Index of the content unit.
    pub unit_index: usize,
    /// Elapsed time at which the unit becomes visible.
    pub start_offset: Duration,
}

/// Deterministic mapping from content unit to reveal time.
///
/// Immutable once constructed; negative delays are unrepresentable by
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealSchedule {
    unit_count: usize,
    per_unit_delay: Duration,
    base_delay: Duration,
}

impl RevealSchedule {
    /// Build a schedule of `unit_count` units starting `base_delay` after
    /// the clock origin, `per_unit_delay` apart.
    pub const fn new(unit_count: usize, per_unit_delay: Duration, base_delay: Duration) -> Self {
        Self {
            unit_count,
            per_unit_delay,
            base_delay,
        }
    }

    /// Schedule one unit per extended grapheme cluster of `text`.
    pub fn for_text(text: &str, per_unit_delay: Duration, base_delay: Duration) -> Self {
        Self::new(text.graphemes(true).count(), per_unit_delay, base_delay)
    }

    /// Number of scheduled units.
    #[inline]
    pub fn unit_count(&self) -> usize {
        self.unit_count
    }

    /// Delay between consecutive units.
    #[inline]
    pub fn per_unit_delay(&self) -> Duration {
        self.per_unit_delay
    }

    /// Delay before the first unit.
    #[inline]
    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Whether the schedule has no units.
    pub fn is_empty(&self) -> bool {
        self.unit_count == 0
    }

    fn offset_at(&self, unit_index: usize) -> Duration {
        let i = u32::try_from(unit_index).unwrap_or(u32::MAX);
        self.base_delay
            .saturating_add(self.per_unit_delay.saturating_mul(i))
    }

    /// Reveal time of unit `unit_index`, if it exists.
    pub fn offset_of(&self, unit_index: usize) -> Option<Duration> {
        (unit_index < self.unit_count).then(|| self.offset_at(unit_index))
    }

    /// All entries in unit order.
    pub fn entries(&self) -> impl Iterator<Item = RevealEntry> + '_ {
        (0..self.unit_count).map(|i| RevealEntry {
            unit_index: i,
            start_offset: self.offset_at(i),
        })
    }

    /// Units visible at `elapsed` — always the prefix `0..n`.
    pub fn visible_units(&self, elapsed: Duration) -> Range<usize> {
        0..self.revealed_count(elapsed)
    }

    /// Number of units whose reveal time is at or before `elapsed`.
    pub fn revealed_count(&self, elapsed: Duration) -> usize {
        if self.unit_count == 0 || elapsed < self.base_delay {
            return 0;
        }
        if self.per_unit_delay.is_zero() {
            return self.unit_count;
        }
        let past_base = elapsed - self.base_delay;
        let steps = (past_base.as_nanos() / self.per_unit_delay.as_nanos())
            .min(self.unit_count as u128) as usize;
        (steps + 1).min(self.unit_count)
    }

    /// Whether every unit is visible at `elapsed`.
    pub fn is_complete(&self, elapsed: Duration) -> bool {
        self.revealed_count(elapsed) == self.unit_count
    }
}

// ---------------------------------------------------------------------------
// SequenceReveal
// ---------------------------------------------------------------------------

/// A reveal schedule anchored to first visibility.
///
/// Owns its trigger; the host routes geometry samples and frame ticks
/// through it. The elapsed clock starts the moment the trigger first
/// reports visible; until then — and forever, if it never fires — no
/// units are revealed and the pre-reveal presentation stands.
#[derive(Debug, Clone)]
pub struct SequenceReveal {
    schedule: RevealSchedule,
    trigger: VisibilityTrigger,
    clock: MotionClock,
    armed: bool,
}

impl SequenceReveal {
    /// Couple a schedule to a visibility trigger.
    pub fn new(schedule: RevealSchedule, trigger: VisibilityTrigger) -> Self {
        Self {
            schedule,
            trigger,
            clock: MotionClock::new(),
            armed: false,
        }
    }

    /// Build a per-grapheme reveal for `text`, observing with `options`.
    pub fn for_text(
        text: &str,
        per_unit_delay: Duration,
        base_delay: Duration,
        options: VisibilityOptions,
    ) -> Result<Self, MotionError> {
        Ok(Self::new(
            RevealSchedule::for_text(text, per_unit_delay, base_delay),
            VisibilityTrigger::observe(options)?,
        ))
    }

    /// Route a geometry sample to the underlying trigger.
    pub fn sample(&mut self, region: Region, viewport: Region) {
        self.trigger.sample(region, viewport);
        self.arm_if_visible();
    }

    /// Advance the reveal clock by one frame delta. Before the trigger
    /// fires this is a no-op; after [`dispose`](Self::dispose) the tick is
    /// dropped and the revealed prefix freezes.
    pub fn frame(&mut self, dt: Duration) {
        if self.armed && !self.trigger.is_disposed() {
            self.clock.tick_delta(dt);
        }
    }

    fn arm_if_visible(&mut self) {
        if self.armed {
            return;
        }
        let visible = self.trigger.state().map(|s| s.is_visible).unwrap_or(false);
        if visible {
            self.armed = true;
            self.clock.reset();
            debug!(units = self.schedule.unit_count(), "reveal armed");
        }
    }

    /// Units visible right now.
    pub fn visible_units(&self) -> Range<usize> {
        if !self.armed {
            return 0..0;
        }
        self.schedule.visible_units(self.clock.elapsed())
    }

    /// Number of units visible right now.
    pub fn revealed_count(&self) -> usize {
        self.visible_units().end
    }

    /// Whether every unit is visible.
    pub fn is_complete(&self) -> bool {
        self.armed && self.schedule.is_complete(self.clock.elapsed())
    }

    /// Whether the clock origin has been anchored.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// The underlying schedule.
    pub fn schedule(&self) -> &RevealSchedule {
        &self.schedule
    }

    /// The underlying trigger.
    pub fn trigger(&self) -> &VisibilityTrigger {
        &self.trigger
    }

    /// Release the underlying observation. Errors if already disposed.
    pub fn dispose(&mut self) -> Result<(), MotionError> {
        self.trigger.dispose()
    }
}
