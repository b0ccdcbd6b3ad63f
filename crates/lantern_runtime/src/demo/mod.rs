//! A small playable game wired through the whole pipeline.
//!
//! Three rooms, a mailbox with a leaflet, two lamps to tell apart, a sword,
//! and a troll guarding the cellar. Killing the troll wins.

pub mod events;
pub mod verbs;
pub mod words;
pub mod world;

use lantern_foundation::Result;

pub use world::{DemoWorld, Place, Thing};

use crate::config::SessionConfig;
use crate::session::Session;

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 0x1a27_e4e5;

/// Creates a session playing the demo.
///
/// # Errors
///
/// Returns an error if the demo's tables are inconsistent.
pub fn new_session(config: SessionConfig, seed: u64) -> Result<Session<DemoWorld>> {
    let (parser, words) = words::build()?;
    let actions = verbs::registry(words);
    let clock = events::clock()?;
    Session::new(parser, actions, clock, DemoWorld::new(seed), config)
}

/// The text shown when a game starts.
#[must_use]
pub fn opening(world: &DemoWorld) -> String {
    format!(
        "LANTERN: a small adventure\nType \"quit\" to stop, \"save\" or \"restore\" to keep your place.\n\n{}",
        verbs::describe_room(world)
    )
}
