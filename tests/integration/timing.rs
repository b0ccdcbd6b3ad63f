//! Background events seen through play.

use lantern_runtime::TurnStatus;
use lantern_runtime::demo::events::THIEF_INTERVAL;
use lantern_runtime::demo::world::{CELLAR, LANTERN_BATTERY, TROLL_HEALTH};

use crate::play::{say, script, seeded, session};

const THIEF: &str = "A seedy-looking individual with a large bag passes through the room.";

#[test]
fn thief_passes_on_its_interval() {
    let mut s = session();
    let mut seen_on = Vec::new();
    for _ in 0..3 * THIEF_INTERVAL {
        let lines = say(&mut s, "wait");
        if lines.iter().any(|l| l == THIEF) {
            seen_on.push(s.turn_count());
        }
    }
    // The route reaches West of House on its second stop.
    assert_eq!(seen_on, vec![2 * u64::from(THIEF_INTERVAL)]);
}

#[test]
fn lantern_battery_runs_down() {
    let mut s = session();
    script(&mut s, &["e", "take brass lamp", "turn lantern on"]);

    let mut transcript = Vec::new();
    for _ in 0..LANTERN_BATTERY {
        transcript.extend(say(&mut s, "z"));
    }
    assert!(transcript.iter().any(|l| l == "The lamp appears a bit dimmer."));
    assert!(transcript.iter().any(|l| l == "The lamp is nearly out."));
    assert!(transcript.iter().any(|l| l == "The brass lantern flickers and goes out."));
    assert_eq!(s.world().battery(), 0);
    assert_eq!(say(&mut s, "turn on lantern"), vec!["The brass lantern has run out of power."]);
}

#[test]
fn killing_the_troll_wins() {
    let mut s = session();
    s.world_mut().wound_troll(TROLL_HEALTH);

    let outcome = s.turn("wait");
    assert_eq!(
        outcome.lines,
        vec!["Time passes...", "With the troll gone, the way is clear. You have won!"]
    );
    assert_eq!(outcome.status, TurnStatus::Quit);
}

#[test]
fn lingering_with_the_troll_is_fatal() {
    let mut s = session();
    s.world_mut().set_here(CELLAR);

    let mut last = None;
    for _ in 0..200 {
        let outcome = s.turn("wait");
        if outcome.status.is_finished() {
            last = Some(outcome);
            break;
        }
    }
    let outcome = last.expect("the troll should land three blows");
    assert_eq!(outcome.lines.last().map(String::as_str), Some("The troll's axe finds its mark."));
    assert_eq!(
        outcome.status,
        TurnStatus::Fatal {
            reason: "You have died.".to_string()
        }
    );
    assert_eq!(s.world().health(), 0);
}

#[test]
fn combat_is_repeatable_for_a_seed() {
    let moves = [
        "e",
        "take sword",
        "d",
        "kill troll with sword",
        "kill troll with sword",
        "kill troll with sword",
        "kill troll with sword",
    ];
    let mut a = seeded(99);
    let mut b = seeded(99);
    assert_eq!(script(&mut a, &moves), script(&mut b, &moves));
    assert_eq!(a.world(), b.world());
}
