//! Saving and restoring a session.

use lantern_foundation::ErrorKind;
use lantern_runtime::demo::Place;
use lantern_runtime::demo::world::{LANTERN, LIVING_ROOM, SWORD, WEST_OF_HOUSE};

use crate::play::{say, script, session};

#[test]
fn restore_rewinds_world_and_clock() {
    let mut s = session();
    script(&mut s, &["e", "take sword"]);
    let bytes = s.save().unwrap();
    let core = s.core_state();

    script(&mut s, &["drop sword", "w", "wait"]);
    assert_eq!(s.world().here(), WEST_OF_HOUSE);
    assert_eq!(s.turn_count(), 5);

    s.restore(&bytes).unwrap();
    assert_eq!(s.world().here(), LIVING_ROOM);
    assert_eq!(s.world().place(SWORD), Place::Carried);
    assert_eq!(s.turn_count(), 2);
    assert_eq!(s.core_state(), core);
    assert_eq!(s.pronouns().it(), Some(SWORD));
}

#[test]
fn pending_question_survives() {
    let mut s = session();
    script(&mut s, &["e", "take lamp"]);
    let bytes = s.save().unwrap();

    say(&mut s, "wait");
    assert!(s.pending_question().is_none());

    s.restore(&bytes).unwrap();
    assert_eq!(
        s.pending_question(),
        Some("Which lamp do you mean, the brass lantern or the rusty lamp?")
    );
    assert_eq!(say(&mut s, "brass"), vec!["Taken."]);
    assert_eq!(s.world().place(LANTERN), Place::Carried);
}

#[test]
fn restore_revives_a_finished_session() {
    let mut s = session();
    let bytes = s.save().unwrap();

    assert!(s.turn("quit").status.is_finished());
    s.restore(&bytes).unwrap();
    assert!(s.finished().is_none());
    assert_eq!(say(&mut s, "wait"), vec!["Time passes..."]);
}

#[test]
fn handlers_still_run_after_restore() {
    let mut a = session();
    let mut b = session();
    script(&mut a, &["open mailbox", "e"]);
    b.restore(&a.save().unwrap()).unwrap();

    let lines = ["take all", "inventory", "w", "read leaflet"];
    assert_eq!(script(&mut a, &lines), script(&mut b, &lines));
}

#[test]
fn garbage_leaves_the_session_alone() {
    let mut s = session();
    say(&mut s, "e");
    let before = s.core_state();

    let err = s.restore(b"not a save").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::SerializationError(_)));
    assert_eq!(s.core_state(), before);
    assert_eq!(s.world().here(), LIVING_ROOM);
}

#[test]
fn missing_file_is_an_error() {
    let mut s = session();
    let path = std::env::temp_dir().join("lantern-no-such-save.sav");
    assert!(s.restore_from_file(&path).is_err());
    assert_eq!(s.turn_count(), 0);
}
