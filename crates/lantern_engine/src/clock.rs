//! The turn clock.
//!
//! Background events count down once per completed turn. While the win
//! condition is unmet only demons count down; once it is met only
//! interrupts do. Simultaneously due events fire in declaration order.
//!
//! [`Scheduler`] is plain data and can be saved. [`Clock`] pairs it with
//! the callbacks, which are registered again on restore.

use std::collections::HashMap;
use std::fmt;

use lantern_foundation::{ActionId, Error, EventId, Result};
use lantern_parser::WorldModel;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::action::{ActionOutcome, Flow};

// =============================================================================
// Events
// =============================================================================

/// Which half of the schedule an event belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventClass {
    /// Runs until the win condition is met.
    Demon,
    /// Runs once the win condition is met.
    Interrupt,
}

/// Lifecycle state of an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventState {
    /// Counting down.
    Armed(u32),
    /// Fires on this tick.
    Due,
    /// Not counting.
    Disarmed,
}

/// A background event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    /// Identity.
    pub id: EventId,
    /// Ticks until it fires.
    pub remaining: u32,
    /// Whether it counts down.
    pub enabled: bool,
    /// Ticks between firings; 0 for one-shot.
    pub interval: u32,
    /// Demon or interrupt.
    pub class: EventClass,
    /// Callback to run when it fires.
    pub callback: ActionId,
}

impl ScheduledEvent {
    /// A demon firing after one tick.
    #[must_use]
    pub fn demon(id: EventId, callback: ActionId) -> Self {
        Self {
            id,
            remaining: 1,
            enabled: true,
            interval: 0,
            class: EventClass::Demon,
            callback,
        }
    }

    /// An interrupt firing after one tick.
    #[must_use]
    pub fn interrupt(id: EventId, callback: ActionId) -> Self {
        Self {
            class: EventClass::Interrupt,
            ..Self::demon(id, callback)
        }
    }

    /// Sets the ticks until the first firing.
    #[must_use]
    pub fn after(mut self, ticks: u32) -> Self {
        self.remaining = ticks;
        self
    }

    /// Makes the event recur every `interval` ticks.
    #[must_use]
    pub fn every(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    /// Starts the event disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Returns true if the event re-arms after firing.
    #[must_use]
    pub fn is_recurring(&self) -> bool {
        self.interval > 0
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> EventState {
        match (self.enabled, self.remaining) {
            (false, _) => EventState::Disarmed,
            (true, 0) => EventState::Due,
            (true, n) => EventState::Armed(n),
        }
    }
}

// =============================================================================
// Scheduler
// =============================================================================

/// The event list and turn counter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheduler {
    events: Vec<ScheduledEvent>,
    turn: u64,
}

impl Scheduler {
    /// Creates an empty scheduler at turn 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an event. A countdown below 1 is raised to 1.
    ///
    /// # Errors
    ///
    /// Returns a duplicate event error if the id is already scheduled.
    pub fn schedule(&mut self, mut event: ScheduledEvent) -> Result<()> {
        if self.get(event.id).is_some() {
            return Err(Error::duplicate_event(event.id));
        }
        event.remaining = event.remaining.max(1);
        debug!("scheduled {} in {} ticks", event.id, event.remaining);
        self.events.push(event);
        Ok(())
    }

    /// Lets an event count down.
    ///
    /// # Errors
    ///
    /// Returns an unknown event error if the id is not scheduled.
    pub fn enable(&mut self, id: EventId) -> Result<()> {
        let event = self.get_mut(id)?;
        event.enabled = true;
        event.remaining = event.remaining.max(1);
        Ok(())
    }

    /// Stops an event counting down.
    ///
    /// # Errors
    ///
    /// Returns an unknown event error if the id is not scheduled.
    pub fn disable(&mut self, id: EventId) -> Result<()> {
        self.get_mut(id)?.enabled = false;
        Ok(())
    }

    /// Re-arms an event to fire after `ticks` (at least 1) and enables it.
    ///
    /// # Errors
    ///
    /// Returns an unknown event error if the id is not scheduled.
    pub fn requeue(&mut self, id: EventId, ticks: u32) -> Result<()> {
        let event = self.get_mut(id)?;
        event.remaining = ticks.max(1);
        event.enabled = true;
        Ok(())
    }

    /// Removes an event.
    ///
    /// # Errors
    ///
    /// Returns an unknown event error if the id is not scheduled.
    pub fn remove(&mut self, id: EventId) -> Result<ScheduledEvent> {
        let index = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| Error::unknown_event(id))?;
        Ok(self.events.remove(index))
    }

    /// Looks up an event.
    #[must_use]
    pub fn get(&self, id: EventId) -> Option<&ScheduledEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    fn get_mut(&mut self, id: EventId) -> Result<&mut ScheduledEvent> {
        self.events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| Error::unknown_event(id))
    }

    /// Iterates events in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ScheduledEvent> {
        self.events.iter()
    }

    /// Turns completed so far.
    #[must_use]
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Number of scheduled events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if nothing is scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Advances one turn and returns the events that fired, in order.
    ///
    /// Recurring events re-arm to their interval; one-shot events disarm.
    pub fn advance(&mut self, win_condition_met: bool) -> Vec<EventId> {
        self.turn += 1;
        let live = if win_condition_met {
            EventClass::Interrupt
        } else {
            EventClass::Demon
        };

        let mut fired = Vec::new();
        for event in self.events.iter_mut().filter(|e| e.enabled && e.class == live) {
            event.remaining = event.remaining.saturating_sub(1);
            if event.remaining > 0 {
                continue;
            }
            fired.push(event.id);
            if event.is_recurring() {
                event.remaining = event.interval;
            } else {
                event.enabled = false;
            }
        }
        fired
    }
}

// =============================================================================
// Clock
// =============================================================================

/// An event callback. It may reschedule events, including itself.
pub type EventCallback<W> = Box<dyn Fn(&mut W, &mut Scheduler) -> ActionOutcome>;

/// What one tick produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The turn just completed.
    pub turn: u64,
    /// Events that fired, in order.
    pub fired: Vec<EventId>,
    /// Messages from callbacks.
    pub messages: Vec<String>,
    /// Combined session control.
    pub flow: Flow,
}

/// A scheduler with its callbacks.
pub struct Clock<W> {
    scheduler: Scheduler,
    callbacks: HashMap<ActionId, EventCallback<W>>,
}

impl<W> Default for Clock<W> {
    fn default() -> Self {
        Self {
            scheduler: Scheduler::new(),
            callbacks: HashMap::new(),
        }
    }
}

impl<W> fmt::Debug for Clock<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clock")
            .field("scheduler", &self.scheduler)
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

impl<W: WorldModel> Clock<W> {
    /// Creates a clock with no events.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the callback for an action id.
    pub fn register<F>(&mut self, callback: ActionId, f: F)
    where
        F: Fn(&mut W, &mut Scheduler) -> ActionOutcome + 'static,
    {
        self.callbacks.insert(callback, Box::new(f));
    }

    /// Gets the scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Gets the scheduler mutably.
    pub fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    /// Replaces the scheduler state, keeping the callbacks.
    pub fn restore(&mut self, scheduler: Scheduler) {
        self.scheduler = scheduler;
    }

    /// Completes one turn: advances the live events and runs the callbacks
    /// of those that fired. A fatal callback stops the rest.
    pub fn tick(&mut self, world: &mut W) -> TickReport {
        let fired = self.scheduler.advance(world.is_win_condition_met());
        let mut report = TickReport {
            turn: self.scheduler.turn(),
            ..TickReport::default()
        };

        for &id in &fired {
            let Some(callback) = self.scheduler.get(id).map(|e| e.callback) else {
                continue;
            };
            let Some(f) = self.callbacks.get(&callback) else {
                warn!("{id} fired but {callback:?} has no callback");
                continue;
            };
            debug!("{id} fired on turn {}", report.turn);

            let outcome = f(world, &mut self.scheduler);
            if let Some(message) = outcome.message.filter(|m| !m.is_empty()) {
                report.messages.push(message);
            }
            report.flow = std::mem::take(&mut report.flow).then(outcome.flow);
            if report.flow.is_fatal() {
                break;
            }
        }

        report.fired = fired;
        report
    }
}
