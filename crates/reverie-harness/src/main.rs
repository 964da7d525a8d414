#![forbid(unsafe_code)]

//! Replays the stock demo script twice and prints the snapshot digest.
//!
//! Exits non-zero when the two replays diverge. Set `RUST_LOG` to see
//! engine lifecycle events (e.g. `RUST_LOG=reverie_core=debug`).

use reverie_harness::{PortfolioScene, demo_script};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let script = demo_script();

    let mut first_scene = PortfolioScene::demo(1280.0, 800.0)?;
    let first = first_scene.run(&script)?;

    let mut second_scene = PortfolioScene::demo(1280.0, 800.0)?;
    let second = second_scene.run(&script)?;

    println!("frames: {}", first.len());
    println!("digest: {}", first.digest());
    if first.digest() != second.digest() {
        eprintln!("replay mismatch: {}", second.digest());
        std::process::exit(1);
    }
    println!("replay: identical");
    Ok(())
}
