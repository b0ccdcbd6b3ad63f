//! Core handles, word interning, object flags, and errors for Lantern.
//!
//! This crate provides:
//! - [`WordId`] and [`Interner`] - Interned vocabulary words
//! - [`ObjectId`], [`ActionId`], [`EventId`] - Opaque handles into collaborators
//! - [`ObjectFlags`] - Object property bits queried during resolution
//! - [`LocationClass`] / [`LocationMask`] - Reachability classes for slot constraints
//! - [`Error`] - Rich error types with context for setup and persistence failures

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod flags;
pub mod ids;
pub mod intern;

pub use error::{Error, ErrorContext, ErrorKind};
pub use flags::{LocationClass, LocationMask, ObjectFlags};
pub use ids::{ActionId, EventId, ObjectId};
pub use intern::{Interner, WordId};

/// Result type alias using Lantern's Error type.
pub type Result<T> = std::result::Result<T, Error>;
