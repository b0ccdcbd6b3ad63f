//! Clock and scheduler tests.

use lantern_engine::{ActionOutcome, Clock, EventClass, Flow, ScheduledEvent, Scheduler};
use lantern_foundation::{ActionId, EventId};
use proptest::prelude::*;

use crate::stage::Stage;

const COUNT: ActionId = ActionId::new(10);
const FINALE: ActionId = ActionId::new(11);
const DOOM: ActionId = ActionId::new(12);
const ECHO: ActionId = ActionId::new(13);

fn clock() -> Clock<Stage> {
    let mut clock = Clock::new();
    clock.register(COUNT, |stage: &mut Stage, _: &mut Scheduler| {
        stage.ticks += 1;
        ActionOutcome::silent()
    });
    clock.register(FINALE, |_: &mut Stage, _: &mut Scheduler| ActionOutcome::quit("You have won!"));
    clock.register(DOOM, |_: &mut Stage, _: &mut Scheduler| {
        ActionOutcome::fatal("The ceiling collapses.", "You have died.")
    });
    clock.register(ECHO, |stage: &mut Stage, scheduler: &mut Scheduler| {
        scheduler.requeue(EventId::new(4), 3).unwrap();
        ActionOutcome::handled(format!("Echo {}.", stage.ticks))
    });
    clock
}

#[test]
fn demons_run_until_the_win() {
    let mut clock = clock();
    let mut stage = Stage::new();
    clock
        .scheduler_mut()
        .schedule(ScheduledEvent::demon(EventId::new(1), COUNT).every(1))
        .unwrap();
    clock
        .scheduler_mut()
        .schedule(ScheduledEvent::interrupt(EventId::new(2), FINALE))
        .unwrap();

    for _ in 0..3 {
        assert_eq!(clock.tick(&mut stage).flow, Flow::Continue);
    }
    assert_eq!(stage.ticks, 3);

    stage.won = true;
    let report = clock.tick(&mut stage);
    assert_eq!(report.turn, 4);
    assert_eq!(report.fired, vec![EventId::new(2)]);
    assert_eq!(report.messages, vec!["You have won!"]);
    assert_eq!(report.flow, Flow::Quit);
    assert_eq!(stage.ticks, 3);
}

#[test]
fn fatal_callback_stops_the_tick() {
    let mut clock = clock();
    let mut stage = Stage::new();
    clock
        .scheduler_mut()
        .schedule(ScheduledEvent::demon(EventId::new(1), DOOM))
        .unwrap();
    clock
        .scheduler_mut()
        .schedule(ScheduledEvent::demon(EventId::new(2), COUNT))
        .unwrap();

    let report = clock.tick(&mut stage);
    assert_eq!(report.fired, vec![EventId::new(1), EventId::new(2)]);
    assert_eq!(report.messages, vec!["The ceiling collapses."]);
    assert!(report.flow.is_fatal());
    assert_eq!(stage.ticks, 0);
}

#[test]
fn callbacks_can_requeue_themselves() {
    let mut clock = clock();
    let mut stage = Stage::new();
    clock
        .scheduler_mut()
        .schedule(ScheduledEvent::demon(EventId::new(4), ECHO).after(2))
        .unwrap();

    let fired_on: Vec<u64> = (0..8)
        .filter_map(|_| {
            let report = clock.tick(&mut stage);
            (!report.fired.is_empty()).then_some(report.turn)
        })
        .collect();
    assert_eq!(fired_on, vec![2, 5, 8]);
}

#[test]
fn missing_callback_is_skipped() {
    let mut clock = clock();
    let mut stage = Stage::new();
    clock
        .scheduler_mut()
        .schedule(ScheduledEvent::demon(EventId::new(9), ActionId::new(99)))
        .unwrap();

    let report = clock.tick(&mut stage);
    assert_eq!(report.fired, vec![EventId::new(9)]);
    assert!(report.messages.is_empty());
    assert_eq!(report.flow, Flow::Continue);
}

#[test]
fn restore_keeps_callbacks() {
    let mut clock = clock();
    let mut stage = Stage::new();
    let mut saved = Scheduler::new();
    saved
        .schedule(ScheduledEvent::demon(EventId::new(1), COUNT).every(2))
        .unwrap();

    clock.restore(saved.clone());
    assert_eq!(clock.scheduler(), &saved);
    clock.tick(&mut stage);
    clock.tick(&mut stage);
    assert_eq!(stage.ticks, 1);
}

fn event() -> impl Strategy<Value = (u32, u32, bool, bool)> {
    (1..20u32, 0..6u32, any::<bool>(), any::<bool>())
}

proptest! {
    #[test]
    fn firing_follows_the_countdown(events in prop::collection::vec(event(), 0..8), turns in 1..40u64) {
        let mut scheduler = Scheduler::new();
        for (i, &(after, every, interrupt, enabled)) in events.iter().enumerate() {
            let id = EventId::new(u32::try_from(i).unwrap());
            let mut event = if interrupt {
                ScheduledEvent::interrupt(id, COUNT)
            } else {
                ScheduledEvent::demon(id, COUNT)
            };
            event = event.after(after).every(every);
            if !enabled {
                event = event.disabled();
            }
            scheduler.schedule(event).unwrap();
        }

        for turn in 1..=turns {
            let fired = scheduler.advance(false);
            prop_assert_eq!(scheduler.turn(), turn);

            let expected: Vec<EventId> = events
                .iter()
                .enumerate()
                .filter(|&(_, &(after, every, interrupt, enabled))| {
                    let (after, every) = (u64::from(after), u64::from(every));
                    enabled
                        && !interrupt
                        && (turn == after || (every > 0 && turn > after && (turn - after) % every == 0))
                })
                .map(|(i, _)| EventId::new(u32::try_from(i).unwrap()))
                .collect();
            prop_assert_eq!(fired, expected);
        }

        for event in scheduler.iter().filter(|e| e.class == EventClass::Interrupt) {
            let (after, ..) = events[event.id.0 as usize];
            prop_assert_eq!(event.remaining, after);
        }
    }
}
