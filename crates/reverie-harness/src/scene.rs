#![forbid(unsafe_code)]

//! The reference host: a composed portfolio page.
//!
//! Mirrors the page the engine was built for: a hero headline revealed
//! character by character once the hero scrolls into view (it is in view
//! at mount, so it fires from the initial sample), magnetic
//! call-to-action buttons, a smoothed custom cursor, per-section card
//! reveals, a navbar that condenses past a scroll depth, and a light/dark
//! toggle. Everything is driven by scripted host commands at a fixed
//! frame delta.
//!
//! Pointer moves land in a coalescer and are drained once per frame, so a
//! device-rate storm between two ticks costs one hit test. Magnetic
//! targets are recomputed per frame from the published cursor snapshot,
//! and each button glides toward its raw offset (and back to rest when
//! the pointer leaves its influence bounds).

use std::time::Duration;

use tracing::{debug, info};

use reverie_core::{
    CursorConfig, CursorFeed, CursorTracker, MagneticField, MagneticOffset, MotionClock,
    MotionError, PointerCoalescer, PointerSample, Region, RevealSchedule, SequenceReveal,
    Smoothed, TargetId, ThemeMode, Vec2, VisibilityOptions, VisibilityTrigger,
};

use crate::script::{FIXED_DT, HostCommand, Script};
use crate::snapshot::{ButtonSnapshot, FrameSnapshot, SectionSnapshot, SnapshotLog};

/// Scroll depth past which the navbar condenses.
const NAVBAR_CONDENSE_AT: f64 = 50.0;

/// Hero caret blink frequency in Hz.
const CARET_BLINK_HZ: f64 = 1.25;

/// The hero headline typed out on first view.
const HERO_HEADLINE: &str = "Building Digital Experiences That Make an Impact";

/// A page section watched for scroll reveal. Bounds are document
/// coordinates; they are projected into the viewport on every scroll.
struct SectionSlot {
    id: &'static str,
    bounds: Region,
    reveal: SequenceReveal,
}

/// A magnetic control: raw field samples glide through a smoother.
struct ButtonSlot {
    id: TargetId,
    bounds: Region,
    field: MagneticField,
    glide: Smoothed<Vec2>,
    last: MagneticOffset,
}

/// The composed demo page.
pub struct PortfolioScene {
    viewport: Region,
    scroll_y: f64,
    cursor: CursorTracker,
    feed: CursorFeed,
    coalescer: PointerCoalescer,
    pointer_on_surface: bool,
    sections: Vec<SectionSlot>,
    buttons: Vec<ButtonSlot>,
    theme: ThemeMode,
    navbar_condensed: bool,
    clock: MotionClock,
    frame_index: u64,
}

impl PortfolioScene {
    /// Build the demo page: a full-height hero followed by six content
    /// sections, five magnetic controls in the hero, one cursor tracker.
    pub fn demo(viewport_width: f64, viewport_height: f64) -> Result<Self, MotionError> {
        let viewport = Region::from_size(viewport_width, viewport_height);
        let mut cursor = CursorTracker::start(CursorConfig::default())?;
        let feed = cursor.feed()?;

        let mut sections = vec![SectionSlot {
            id: "hero",
            bounds: Region::new(0.0, 0.0, viewport_width, viewport_height),
            reveal: SequenceReveal::for_text(
                HERO_HEADLINE,
                Duration::from_millis(50),
                Duration::from_millis(300),
                VisibilityOptions::new().threshold(0.2).root_margin(-80.0),
            )?,
        }];
        let section_ids = [
            "about",
            "skills",
            "projects",
            "experience",
            "testimonials",
            "contact",
        ];
        for (i, id) in section_ids.into_iter().enumerate() {
            let top = viewport_height * (i as f64 + 1.0);
            sections.push(SectionSlot {
                id,
                bounds: Region::new(0.0, top, viewport_width, viewport_height * 0.9),
                // Six cards cascade in at 80 ms strides.
                reveal: SequenceReveal::new(
                    RevealSchedule::new(6, Duration::from_millis(80), Duration::from_millis(120)),
                    VisibilityTrigger::observe(VisibilityOptions::new())?,
                ),
            });
        }

        let button_specs: [(&str, Region); 5] = [
            ("view-work", Region::new(420.0, 520.0, 180.0, 56.0)),
            ("get-in-touch", Region::new(640.0, 520.0, 180.0, 56.0)),
            ("github", Region::new(520.0, 620.0, 48.0, 48.0)),
            ("linkedin", Region::new(590.0, 620.0, 48.0, 48.0)),
            ("twitter", Region::new(660.0, 620.0, 48.0, 48.0)),
        ];
        let mut buttons = Vec::new();
        for (z, (id, bounds)) in button_specs.into_iter().enumerate() {
            let id = TargetId::from(id);
            cursor.register_target(id.clone(), bounds, z as i32)?;
            buttons.push(ButtonSlot {
                id,
                bounds,
                field: MagneticField::new(120.0, 24.0)?,
                glide: Smoothed::new(Vec2::ZERO, 0.25)?,
                last: MagneticOffset::ZERO,
            });
        }

        let mut scene = Self {
            viewport,
            scroll_y: 0.0,
            cursor,
            feed,
            coalescer: PointerCoalescer::new(),
            pointer_on_surface: false,
            sections,
            buttons,
            theme: ThemeMode::default(),
            navbar_condensed: false,
            clock: MotionClock::new(),
            frame_index: 0,
        };
        // Mount-time sample: regions already on screen fire immediately.
        scene.resample_sections();
        Ok(scene)
    }

    fn view_region(bounds: Region, scroll_y: f64) -> Region {
        Region::new(bounds.x, bounds.y - scroll_y, bounds.width, bounds.height)
    }

    fn resample_sections(&mut self) {
        let viewport = self.viewport;
        let scroll_y = self.scroll_y;
        for section in &mut self.sections {
            section
                .reveal
                .sample(Self::view_region(section.bounds, scroll_y), viewport);
        }
    }

    /// Apply one host command.
    pub fn apply(&mut self, command: HostCommand) {
        match command {
            HostCommand::Frame => self.step_frame(),
            HostCommand::PointerMove(position) => {
                self.pointer_on_surface = true;
                self.coalescer.offer(PointerSample::new(position));
            }
            HostCommand::PointerLeave => {
                // Deliver any pending move first, then the leave.
                if let Some(sample) = self.coalescer.drain() {
                    self.cursor.pointer_moved(sample.position);
                }
                self.pointer_on_surface = false;
                self.cursor.pointer_left();
            }
            HostCommand::ScrollTo(y) => self.scroll_to(y),
            HostCommand::ToggleTheme => {
                self.theme.toggle();
                debug!(class = self.theme.class_name(), "theme toggled");
            }
        }
    }

    fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y.max(0.0);
        self.navbar_condensed = self.scroll_y > NAVBAR_CONDENSE_AT;
        self.resample_sections();

        if self.cursor.is_stopped() {
            return;
        }
        let scroll_y = self.scroll_y;
        let updates: Vec<(TargetId, Region)> = self
            .buttons
            .iter()
            .map(|b| (b.id.clone(), Self::view_region(b.bounds, scroll_y)))
            .collect();
        for (id, region) in updates {
            let _ = self.cursor.update_target(&id, region);
        }
    }

    fn step_frame(&mut self) {
        if let Some(sample) = self.coalescer.drain() {
            if let Some(change) = self.cursor.pointer_moved(sample.position) {
                debug!(from = ?change.from, to = ?change.to, "cursor presentation switch");
            }
        }
        self.cursor.frame();
        let pointer = self.feed.latest().raw;

        let scroll_y = self.scroll_y;
        let on_surface = self.pointer_on_surface;
        for button in &mut self.buttons {
            let view = Self::view_region(button.bounds, scroll_y);
            let target = if on_surface && button.field.influence_bounds(view).contains(pointer) {
                button.field.compute_offset(pointer, view)
            } else {
                MagneticOffset::ZERO
            };
            button.last = target;
            button.glide.retarget(target.displacement());
            button.glide.tick();
        }

        for section in &mut self.sections {
            section.reveal.frame(FIXED_DT);
        }
        self.clock.tick_delta(FIXED_DT);
        self.frame_index += 1;
    }

    /// Whether the hero caret is on this frame.
    pub fn caret_visible(&self) -> bool {
        self.clock.phase(CARET_BLINK_HZ) < 0.5
    }

    /// Capture the engine outputs for the current frame.
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            frame: self.frame_index,
            scroll_y: self.scroll_y,
            theme: self.theme.class_name(),
            navbar_condensed: self.navbar_condensed,
            caret_visible: self.caret_visible(),
            cursor: (*self.feed.latest()).clone(),
            sections: self
                .sections
                .iter()
                .map(|s| SectionSnapshot {
                    id: s.id,
                    visible: s
                        .reveal
                        .trigger()
                        .state()
                        .map(|state| state.is_visible)
                        .unwrap_or(false),
                    revealed: s.reveal.revealed_count(),
                })
                .collect(),
            buttons: self
                .buttons
                .iter()
                .map(|b| ButtonSnapshot {
                    id: b.id.as_str().to_owned(),
                    strength: b.last.strength,
                    offset_x: b.glide.value().x,
                    offset_y: b.glide.value().y,
                })
                .collect(),
        }
    }

    /// Replay a script, capturing one snapshot per frame.
    pub fn run(&mut self, script: &Script) -> serde_json::Result<SnapshotLog> {
        let mut log = SnapshotLog::new();
        for command in script.commands() {
            self.apply(*command);
            if matches!(command, HostCommand::Frame) {
                log.push(&self.snapshot())?;
            }
        }
        info!(frames = log.len(), digest = %log.digest(), "script replay complete");
        Ok(log)
    }

    /// Current theme.
    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    /// Whether the navbar is condensed.
    pub fn navbar_condensed(&self) -> bool {
        self.navbar_condensed
    }

    /// Current scroll position.
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// A read handle over the published cursor state.
    pub fn cursor_feed(&self) -> CursorFeed {
        self.feed.clone()
    }

    /// Revealed unit count for a section, by id.
    pub fn section_revealed(&self, id: &str) -> Option<usize> {
        self.sections
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.reveal.revealed_count())
    }

    /// Whether a section currently counts as visible, by id.
    pub fn section_visible(&self, id: &str) -> Option<bool> {
        self.sections.iter().find(|s| s.id == id).map(|s| {
            s.reveal
                .trigger()
                .state()
                .map(|state| state.is_visible)
                .unwrap_or(false)
        })
    }

    /// Glided displacement of a magnetic control, by id.
    pub fn button_offset(&self, id: &str) -> Option<Vec2> {
        self.buttons
            .iter()
            .find(|b| b.id.as_str() == id)
            .map(|b| b.glide.value())
    }

    /// Raw magnetic strength of a control for the current frame, by id.
    pub fn button_strength(&self, id: &str) -> Option<f64> {
        self.buttons
            .iter()
            .find(|b| b.id.as_str() == id)
            .map(|b| b.last.strength)
    }

    /// Tear the scene down: stop the cursor and release every
    /// observation. Errors if already disposed.
    pub fn dispose(&mut self) -> Result<(), MotionError> {
        self.cursor.stop()?;
        for section in &mut self.sections {
            section.reveal.dispose()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hero_is_visible_from_the_mount_sample() {
        let scene = PortfolioScene::demo(1280.0, 800.0).unwrap();
        assert_eq!(scene.section_visible("hero"), Some(true));
        assert_eq!(scene.section_visible("about"), Some(false));
    }

    #[test]
    fn navbar_condenses_past_the_scroll_depth() {
        let mut scene = PortfolioScene::demo(1280.0, 800.0).unwrap();
        scene.apply(HostCommand::ScrollTo(49.0));
        assert!(!scene.navbar_condensed());
        scene.apply(HostCommand::ScrollTo(51.0));
        assert!(scene.navbar_condensed());
        scene.apply(HostCommand::ScrollTo(0.0));
        assert!(!scene.navbar_condensed());
    }

    #[test]
    fn theme_toggle_round_trips() {
        let mut scene = PortfolioScene::demo(1280.0, 800.0).unwrap();
        assert_eq!(scene.theme(), ThemeMode::Dark);
        scene.apply(HostCommand::ToggleTheme);
        assert_eq!(scene.theme(), ThemeMode::Light);
    }
}
