//! Demo background events.

use lantern_engine::{ActionOutcome, Clock, ScheduledEvent, Scheduler};
use lantern_foundation::{EventId, ObjectFlags, ObjectId, Result};
use log::warn;

use super::words::actions;
use super::world::{CELLAR, DemoWorld, LANTERN, LIVING_ROOM, WEST_OF_HOUSE};

/// Lantern battery drain.
pub const BATTERY: EventId = EventId::new(1);
/// The thief's wandering.
pub const THIEF: EventId = EventId::new(2);
/// The troll's attacks.
pub const TROLL: EventId = EventId::new(3);
/// The victory announcement.
pub const VICTORY: EventId = EventId::new(4);

/// Ticks between the thief's moves.
pub const THIEF_INTERVAL: u32 = 5;

const THIEF_ROUTE: [ObjectId; 3] = [LIVING_ROOM, CELLAR, WEST_OF_HOUSE];

/// Builds the demo clock with its events scheduled.
///
/// # Errors
///
/// Returns a duplicate event error if two events share an id.
pub fn clock() -> Result<Clock<DemoWorld>> {
    let mut clock = Clock::new();
    clock.register(actions::BATTERY, battery);
    clock.register(actions::THIEF, thief);
    clock.register(actions::TROLL, troll);
    clock.register(actions::VICTORY, |_: &mut DemoWorld, _: &mut Scheduler| {
        ActionOutcome::quit("With the troll gone, the way is clear. You have won!")
    });

    let scheduler = clock.scheduler_mut();
    scheduler.schedule(ScheduledEvent::demon(BATTERY, actions::BATTERY).every(1))?;
    scheduler.schedule(ScheduledEvent::demon(THIEF, actions::THIEF).after(THIEF_INTERVAL).every(THIEF_INTERVAL))?;
    scheduler.schedule(ScheduledEvent::demon(TROLL, actions::TROLL).every(1))?;
    scheduler.schedule(ScheduledEvent::interrupt(VICTORY, actions::VICTORY))?;
    Ok(clock)
}

fn battery(world: &mut DemoWorld, _: &mut Scheduler) -> ActionOutcome {
    if !world.has(LANTERN, ObjectFlags::ON) {
        return ActionOutcome::pass();
    }
    match world.drain_battery() {
        0 => {
            world.set_flag(LANTERN, ObjectFlags::ON, false);
            ActionOutcome::pass_with("The brass lantern flickers and goes out.")
        }
        10 => ActionOutcome::pass_with("The lamp appears a bit dimmer."),
        5 => ActionOutcome::pass_with("The lamp is nearly out."),
        _ => ActionOutcome::pass(),
    }
}

fn thief(world: &mut DemoWorld, _: &mut Scheduler) -> ActionOutcome {
    let stop = (world.thief_stop() + 1) % THIEF_ROUTE.len();
    world.set_thief_stop(stop);
    if THIEF_ROUTE[stop] == world.here() {
        ActionOutcome::pass_with("A seedy-looking individual with a large bag passes through the room.")
    } else {
        ActionOutcome::pass()
    }
}

fn troll(world: &mut DemoWorld, scheduler: &mut Scheduler) -> ActionOutcome {
    if !world.troll_alive() {
        if let Err(err) = scheduler.disable(TROLL) {
            warn!("troll event: {err}");
        }
        return ActionOutcome::pass();
    }
    if world.here() != CELLAR {
        return ActionOutcome::pass();
    }
    if world.roll(6) < 5 {
        return ActionOutcome::pass_with("The troll's axe barely misses your ear.");
    }
    if world.wound_player(1) == 0 {
        ActionOutcome::fatal("The troll's axe finds its mark.", "You have died.")
    } else {
        ActionOutcome::pass_with("The troll swings his axe and it nicks your arm.")
    }
}
