//! Integration tests for the lantern_parser crate.
//!
//! Tests for the command pipeline:
//! - Vocabulary and lexing
//! - Rule matching
//! - Object resolution and disambiguation
//! - The full parser, including clarification resume

mod disambiguation;
mod fixtures;
mod matcher;
mod pipeline;
mod properties;
