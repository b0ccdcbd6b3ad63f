//! Sessions, REPL, save/restore, and a demo world for Lantern.
//!
//! This crate provides:
//! - [`Session`] - One game's explicit context: world, parser, handlers, clock
//! - [`Repl`] - The interactive loop, with `save` and `restore` meta commands
//! - [`serialize`] - `MessagePack` save files
//! - [`demo`] - A small game wired through the whole pipeline

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod demo;
pub mod editor;
pub mod repl;
pub mod serialize;
pub mod session;

pub use config::SessionConfig;
pub use editor::{LineEditor, ReadResult, RustylineEditor, ScriptedEditor};
pub use repl::Repl;
pub use session::{CoreState, SaveGame, Session, TurnOutcome, TurnStatus};
