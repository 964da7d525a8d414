#![forbid(unsafe_code)]

//! JSONL snapshot capture and digests.
//!
//! Every scripted frame serializes the scene's engine outputs as one JSON
//! line. The blake3 digest over the stream is the determinism
//! fingerprint: two replays of the same script against fresh scenes must
//! produce identical digests.

use reverie_core::CursorState;
use serde::Serialize;

/// Per-frame view of one watched section.
#[derive(Debug, Clone, Serialize)]
pub struct SectionSnapshot {
    /// Section id.
    pub id: &'static str,
    /// Whether the section currently counts as visible.
    pub visible: bool,
    /// Number of revealed content units.
    pub revealed: usize,
}

/// Per-frame view of one magnetic control.
#[derive(Debug, Clone, Serialize)]
pub struct ButtonSnapshot {
    /// Control id.
    pub id: String,
    /// Raw magnetic strength for this frame.
    pub strength: f64,
    /// Glided horizontal displacement in px.
    pub offset_x: f64,
    /// Glided vertical displacement in px.
    pub offset_y: f64,
}

/// Engine outputs captured after one frame tick.
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    /// Frame counter.
    pub frame: u64,
    /// Document scroll position.
    pub scroll_y: f64,
    /// Document-root theme class.
    pub theme: &'static str,
    /// Whether the navbar is condensed.
    pub navbar_condensed: bool,
    /// Whether the hero caret is on this frame.
    pub caret_visible: bool,
    /// Published cursor state.
    pub cursor: CursorState,
    /// Section states in layout order.
    pub sections: Vec<SectionSnapshot>,
    /// Magnetic control states in registration order.
    pub buttons: Vec<ButtonSnapshot>,
}

/// Accumulated JSONL snapshot stream.
#[derive(Debug, Clone, Default)]
pub struct SnapshotLog {
    lines: Vec<String>,
}

impl SnapshotLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one snapshot as a JSON line.
    pub fn push(&mut self, snapshot: &FrameSnapshot) -> serde_json::Result<()> {
        self.lines.push(serde_json::to_string(snapshot)?);
        Ok(())
    }

    /// Number of captured frames.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether no frames were captured.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The captured lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The full stream as one JSONL document.
    pub fn to_jsonl(&self) -> String {
        self.lines.join("\n")
    }

    /// Hex blake3 digest over the JSONL stream.
    pub fn digest(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for line in &self.lines {
            hasher.update(line.as_bytes());
            hasher.update(b"\n");
        }
        hasher.finalize().to_hex().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(frame: u64) -> FrameSnapshot {
        FrameSnapshot {
            frame,
            scroll_y: 0.0,
            theme: "dark",
            navbar_condensed: false,
            caret_visible: true,
            cursor: CursorState::default(),
            sections: vec![],
            buttons: vec![],
        }
    }

    #[test]
    fn identical_streams_share_a_digest() {
        let mut a = SnapshotLog::new();
        let mut b = SnapshotLog::new();
        for i in 0..3 {
            a.push(&snapshot(i)).unwrap();
            b.push(&snapshot(i)).unwrap();
        }
        assert_eq!(a.digest(), b.digest());
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn different_streams_diverge() {
        let mut a = SnapshotLog::new();
        let mut b = SnapshotLog::new();
        a.push(&snapshot(0)).unwrap();
        b.push(&snapshot(1)).unwrap();
        assert_ne!(a.digest(), b.digest());
    }
}
