//! Command dispatch and the turn clock for Lantern.
//!
//! This crate provides:
//! - [`ActionRegistry`] - Default verb handlers, per-object actions, pre- and post-actions
//! - [`Dispatcher`] - The fixed pre/object/default/post pipeline and pronoun updates
//! - [`Scheduler`] - Serializable background event state
//! - [`Clock`] - Per-turn ticking with event callbacks

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod action;
pub mod clock;
pub mod dispatch;

pub use action::{ActionOutcome, ActionRegistry, Flow, Handler, Invocation, PreAction};
pub use clock::{Clock, EventCallback, EventClass, EventState, ScheduledEvent, Scheduler, TickReport};
pub use dispatch::{DispatchReport, Dispatcher};
