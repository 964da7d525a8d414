//! End-to-end tests for the scripted portfolio scene.

use reverie_core::Vec2;
use reverie_harness::{HostCommand, PortfolioScene, Script, demo_script};

fn scene() -> PortfolioScene {
    PortfolioScene::demo(1280.0, 800.0).unwrap()
}

#[test]
fn demo_replay_is_deterministic() {
    let script = demo_script();

    let first = scene().run(&script).unwrap();
    let second = scene().run(&script).unwrap();

    assert!(!first.is_empty());
    assert_eq!(first.len(), second.len());
    assert_eq!(first.digest(), second.digest());
}

#[test]
fn hero_headline_types_out_from_the_mount_sample() {
    let mut page = scene();
    assert_eq!(page.section_revealed("hero"), Some(0));

    // 60 frames at 16 ms: 960 ms elapsed, 300 ms base, 50 ms per
    // grapheme -> 14 characters on screen.
    let script = Script::new().frames(60);
    page.run(&script).unwrap();
    assert_eq!(page.section_revealed("hero"), Some(14));
}

#[test]
fn sections_reveal_only_after_scrolling_to_them() {
    let mut page = scene();
    let script = Script::new().frames(30);
    page.run(&script).unwrap();
    assert_eq!(page.section_visible("about"), Some(false));
    assert_eq!(page.section_revealed("about"), Some(0));

    let script = Script::new().scroll_to(900.0).frames(40);
    page.run(&script).unwrap();
    assert_eq!(page.section_visible("about"), Some(true));
    // 640 ms elapsed, 120 ms base, 80 ms stride: all six cards are in.
    assert_eq!(page.section_revealed("about"), Some(6));
}

#[test]
fn navbar_condenses_with_scroll_depth() {
    let mut page = scene();
    page.apply(HostCommand::ScrollTo(400.0));
    assert!(page.navbar_condensed());
    page.apply(HostCommand::ScrollTo(10.0));
    assert!(!page.navbar_condensed());
}

#[test]
fn magnetic_button_engages_and_glides_back_to_rest() {
    let mut page = scene();

    // Dead center of the "view-work" control: full strength, no pull.
    let script = Script::new().pointer_move(510.0, 548.0).frames(2);
    page.run(&script).unwrap();
    assert_eq!(page.button_strength("view-work"), Some(1.0));
    assert_eq!(page.button_offset("view-work"), Some(Vec2::ZERO));

    // Off-center inside the radius: bounded pull toward the pointer.
    let script = Script::new().pointer_move(560.0, 560.0).frames(20);
    page.run(&script).unwrap();
    let offset = page.button_offset("view-work").unwrap();
    assert!(offset.length() > 1.0);
    assert!(offset.length() <= 24.0);
    assert!(offset.x > 0.0 && offset.y > 0.0);

    // Pointer gone: the glide decays all the way back to zero.
    let script = Script::new().pointer_leave().frames(100);
    page.run(&script).unwrap();
    assert_eq!(page.button_strength("view-work"), Some(0.0));
    assert_eq!(page.button_offset("view-work"), Some(Vec2::ZERO));
}

#[test]
fn hovering_a_control_switches_the_cursor_presentation() {
    let mut page = scene();
    let feed = page.cursor_feed();

    let script = Script::new().pointer_move(510.0, 548.0).frames(1);
    page.run(&script).unwrap();
    assert_eq!(
        feed.latest().hover_target.as_ref().map(|id| id.as_str()),
        Some("view-work")
    );

    let script = Script::new().pointer_move(100.0, 100.0).frames(1);
    page.run(&script).unwrap();
    assert_eq!(feed.latest().hover_target, None);
}

#[test]
fn disposed_scene_freezes_without_panicking() {
    let mut page = scene();
    let script = Script::new()
        .pointer_move(510.0, 548.0)
        .frames(30)
        .scroll_to(900.0)
        .frames(10);
    page.run(&script).unwrap();

    page.dispose().unwrap();
    assert!(page.dispose().is_err());

    let before_cursor = (*page.cursor_feed().latest()).clone();
    let before_hero = page.section_revealed("hero");

    let script = Script::new()
        .pointer_move(999.0, 700.0)
        .frames(20)
        .scroll_to(1500.0)
        .frames(5);
    page.run(&script).unwrap();

    assert_eq!(*page.cursor_feed().latest(), before_cursor);
    assert_eq!(page.section_revealed("hero"), before_hero);
}
