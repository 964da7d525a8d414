#![forbid(unsafe_code)]

//! Scripted host timelines.
//!
//! A [`Script`] is a fixed sequence of host commands replayed against a
//! scene at a fixed frame delta. Identical scripts against identical
//! scenes produce identical snapshot streams; the double-run digest check
//! in [`crate::snapshot`] relies on this.

use std::time::Duration;

use reverie_core::Vec2;

/// Fixed frame delta for scripted runs (62.5 fps).
pub const FIXED_DT: Duration = Duration::from_millis(16);

/// One scripted host command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostCommand {
    /// Advance one frame at [`FIXED_DT`].
    Frame,
    /// Move the pointer to a viewport position.
    PointerMove(Vec2),
    /// The pointer left the surface.
    PointerLeave,
    /// Scroll the document to `y`.
    ScrollTo(f64),
    /// Flip the presentation mode.
    ToggleTheme,
}

/// Builder for deterministic command sequences.
#[derive(Debug, Clone, Default)]
pub struct Script {
    commands: Vec<HostCommand>,
}

impl Script {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one frame tick.
    #[must_use]
    pub fn frame(mut self) -> Self {
        self.commands.push(HostCommand::Frame);
        self
    }

    /// Append `n` frame ticks.
    #[must_use]
    pub fn frames(mut self, n: usize) -> Self {
        self.commands
            .extend(std::iter::repeat_n(HostCommand::Frame, n));
        self
    }

    /// Append a single pointer move.
    #[must_use]
    pub fn pointer_move(mut self, x: f64, y: f64) -> Self {
        self.commands.push(HostCommand::PointerMove(Vec2::new(x, y)));
        self
    }

    /// Append a linear pointer sweep: one move and one frame per step.
    #[must_use]
    pub fn pointer_sweep(mut self, from: Vec2, to: Vec2, steps: usize) -> Self {
        for i in 0..steps {
            let t = (i + 1) as f64 / steps as f64;
            self.commands.push(HostCommand::PointerMove(from.lerp(to, t)));
            self.commands.push(HostCommand::Frame);
        }
        self
    }

    /// Append a pointer-leave event.
    #[must_use]
    pub fn pointer_leave(mut self) -> Self {
        self.commands.push(HostCommand::PointerLeave);
        self
    }

    /// Append a scroll to `y`.
    #[must_use]
    pub fn scroll_to(mut self, y: f64) -> Self {
        self.commands.push(HostCommand::ScrollTo(y));
        self
    }

    /// Append a theme toggle.
    #[must_use]
    pub fn toggle_theme(mut self) -> Self {
        self.commands.push(HostCommand::ToggleTheme);
        self
    }

    /// The command sequence.
    pub fn commands(&self) -> &[HostCommand] {
        &self.commands
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the script is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// The stock demo script used by the binary and the determinism tests:
/// settle, sweep the hero call-to-action, read through the sections,
/// flip the theme, and let everything glide back to rest.
pub fn demo_script() -> Script {
    Script::new()
        .frames(5)
        .pointer_move(640.0, 400.0)
        .frames(3)
        .pointer_sweep(Vec2::new(300.0, 540.0), Vec2::new(760.0, 548.0), 40)
        .frames(30)
        .scroll_to(400.0)
        .frames(10)
        .scroll_to(900.0)
        .frames(20)
        .scroll_to(1700.0)
        .frames(20)
        .toggle_theme()
        .frames(5)
        .pointer_leave()
        .frames(40)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_emits_one_move_and_one_frame_per_step() {
        let script = Script::new().pointer_sweep(Vec2::ZERO, Vec2::new(100.0, 0.0), 4);
        assert_eq!(script.len(), 8);
        assert_eq!(
            script.commands()[6],
            HostCommand::PointerMove(Vec2::new(100.0, 0.0))
        );
    }

    #[test]
    fn demo_script_is_stable() {
        assert_eq!(demo_script().commands(), demo_script().commands());
    }
}
