#![forbid(unsafe_code)]

//! Deterministic host simulation for the Reverie engine.
//!
//! The harness is the reference host: scripted pointer, scroll, and frame
//! timelines ([`script`]) drive a composed portfolio page ([`scene`]),
//! and every frame's engine outputs are captured as JSONL snapshots with
//! a blake3 digest ([`snapshot`]). Replaying the same script against a
//! fresh scene must produce the same digest; that equality is the
//! determinism gate for the whole engine.

pub mod scene;
pub mod script;
pub mod snapshot;

pub use scene::PortfolioScene;
pub use script::{FIXED_DT, HostCommand, Script, demo_script};
pub use snapshot::{ButtonSnapshot, FrameSnapshot, SectionSnapshot, SnapshotLog};
