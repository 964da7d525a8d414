#![forbid(unsafe_code)]

//! Core: viewport-reactive interaction and animation primitives.
//!
//! # Role in Reverie
//! `reverie-core` is the engine layer of a single-page portfolio
//! presentation. It owns the stateful, timing-sensitive primitives that
//! page sections reuse; the hosting renderer composes them and maps their
//! per-frame outputs to visual transforms (translation, opacity, scale).
//!
//! # Primary responsibilities
//! - **VisibilityTrigger**: scroll-reveal gating with pre-trigger margins,
//!   once-latching or re-triggering, failing open when unobservable.
//! - **MagneticField**: bounded pointer attraction for interactive
//!   controls, as a pure geometry function.
//! - **CursorTracker**: raw + smoothed cursor state, hover-identity
//!   transitions, and per-tick snapshot publication.
//! - **SequenceReveal**: visibility-anchored per-unit stagger schedules
//!   (character-by-character and card-by-card reveals).
//!
//! # How it fits in the system
//! Components subscribe to host-level signals — pointer moves,
//! intersection geometry, the frame tick — through
//! [`lifecycle::SignalBinding`] and republish derived plain values each
//! frame. Discrete events only update target values; the frame tick is
//! the single place continuous visual state advances. No component owns
//! another; composition happens in the hosting renderer (`reverie-harness`
//! is the reference host).

pub mod clock;
pub mod cursor;
pub mod error;
pub mod event;
pub mod geometry;
pub mod lifecycle;
pub mod magnetic;
pub mod reveal;
pub mod smoothing;
pub mod theme;
pub mod visibility;

pub use clock::MotionClock;
pub use cursor::{
    CursorConfig, CursorFeed, CursorState, CursorTracker, HitRegistry, HoverChange, TargetId,
};
pub use error::MotionError;
pub use event::{PointerCoalescer, PointerSample};
pub use geometry::{Region, Vec2};
pub use lifecycle::{SignalBinding, SignalKind};
pub use magnetic::{MagneticField, MagneticOffset};
pub use reveal::{RevealEntry, RevealSchedule, SequenceReveal};
pub use smoothing::{Interpolate, Smoothed};
pub use theme::ThemeMode;
pub use visibility::{VisibilityOptions, VisibilityState, VisibilityTrigger};
