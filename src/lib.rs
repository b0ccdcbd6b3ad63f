//! Lantern - command understanding and turn execution for text adventures
//!
//! This crate re-exports all layers of the Lantern system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: lantern_runtime    - Session, REPL, save/restore, demo world
//! Layer 2: lantern_engine     - Command dispatcher, clock/scheduler
//! Layer 1: lantern_parser     - Vocabulary, lexer, grammar, matcher, resolver
//! Layer 0: lantern_foundation - Core types (WordId, ObjectId, flags, Error)
//! ```

pub use lantern_engine as engine;
pub use lantern_foundation as foundation;
pub use lantern_parser as parser;
pub use lantern_runtime as runtime;
