//! End-to-end parses against the fixture room.

use lantern_foundation::{LocationClass, ObjectFlags};
use lantern_parser::{DirectObject, ParseFailure, ParseResult, ParserConfig, PronounState, ResolvedCommand};

use crate::fixtures::{self, ATTACK_WITH, TAKE, lamp_room};

fn command(result: ParseResult) -> ResolvedCommand {
    match result {
        ParseResult::Command(cmd) => cmd,
        other => panic!("expected a command, got {other:?}"),
    }
}

fn failure(result: ParseResult) -> String {
    match result {
        ParseResult::Failed(failure) => failure.to_string(),
        other => panic!("expected a failure, got {other:?}"),
    }
}

#[test]
fn ambiguous_take_asks_then_resumes() {
    let parser = fixtures::parser();
    let room = lamp_room();
    let pronouns = PronounState::new();

    let ParseResult::Clarify(suspended) = parser.parse("take lamp", &room.world, &pronouns) else {
        panic!("expected a clarification");
    };
    assert_eq!(
        suspended.question(),
        "Which lamp do you mean, the brass lantern or the rusty lamp?"
    );
    assert_eq!(suspended.slot(), 0);

    let cmd = command(parser.resume(suspended, "the brass one", &room.world, &pronouns));
    assert_eq!(cmd.action(), TAKE);
    assert_eq!(cmd.direct(), &DirectObject::One(room.lantern));
}

#[test]
fn unclear_answer_asks_again() {
    let parser = fixtures::parser();
    let room = lamp_room();
    let pronouns = PronounState::new();

    let ParseResult::Clarify(suspended) = parser.parse("take lamp", &room.world, &pronouns) else {
        panic!("expected a clarification");
    };
    let again = parser.resume(suspended.clone(), "lamp", &room.world, &pronouns);
    assert_eq!(again, ParseResult::Clarify(suspended));
}

#[test]
fn new_command_abandons_the_question() {
    let parser = fixtures::parser();
    let room = lamp_room();
    let pronouns = PronounState::new();

    let ParseResult::Clarify(suspended) = parser.parse("take lamp", &room.world, &pronouns) else {
        panic!("expected a clarification");
    };
    let cmd = command(parser.resume(suspended, "get the sword", &room.world, &pronouns));
    assert_eq!(cmd.direct(), &DirectObject::One(room.sword));
}

#[test]
fn numeric_answer() {
    let parser = fixtures::parser();
    let room = lamp_room();
    let pronouns = PronounState::new();

    let ParseResult::Clarify(suspended) = parser.parse("take lamp", &room.world, &pronouns) else {
        panic!("expected a clarification");
    };
    let cmd = command(parser.resume(suspended, "2", &room.world, &pronouns));
    assert_eq!(cmd.direct(), &DirectObject::One(room.rusty));
}

#[test]
fn take_all_in_order() {
    let parser = fixtures::parser();
    let room = lamp_room();
    let cmd = command(parser.parse("take all", &room.world, &PronounState::new()));
    assert_eq!(
        cmd.direct(),
        &DirectObject::Many(vec![room.lantern, room.rusty, room.sword])
    );
}

#[test]
fn second_object_is_bound() {
    let parser = fixtures::parser();
    let mut room = lamp_room();
    let troll = room.world.add("troll", &["troll"], &[], ObjectFlags::ACTOR);

    let cmd = command(parser.parse("kill the troll with the blade", &room.world, &PronounState::new()));
    assert_eq!(cmd.action(), ATTACK_WITH);
    assert_eq!(cmd.direct().single(), Some(troll));
    assert_eq!(cmd.indirect(), Some(room.sword));
}

#[test]
fn pronoun_refers_to_last_object() {
    let parser = fixtures::parser();
    let room = lamp_room();
    let mut pronouns = PronounState::new();

    assert_eq!(
        failure(parser.parse("take it", &room.world, &pronouns)),
        "I don't know what you're referring to."
    );

    pronouns.set_it(room.rusty);
    let cmd = command(parser.parse("take it", &room.world, &pronouns));
    assert_eq!(cmd.direct().single(), Some(room.rusty));
}

#[test]
fn pronoun_never_reaches_hidden_objects() {
    let parser = fixtures::parser();
    let mut room = lamp_room();
    let mut pronouns = PronounState::new();
    pronouns.set_it(room.rusty);
    room.world.hide(room.rusty);

    assert_eq!(
        failure(parser.parse("take it", &room.world, &pronouns)),
        "I don't know what you're referring to."
    );
    assert_eq!(
        failure(parser.parse("take rusty lamp", &room.world, &pronouns)),
        "You can't see any rusty lamp here!"
    );
}

#[test]
fn failure_messages() {
    let parser = fixtures::parser();
    let mut room = lamp_room();
    let pronouns = PronounState::new();
    let fail = |input: &str| failure(parser.parse(input, &room.world, &pronouns));

    assert_eq!(fail(""), "I beg your pardon?");
    assert_eq!(fail("the"), "I beg your pardon?");
    assert_eq!(fail("brass lamp"), "There was no verb in that sentence!");
    assert_eq!(fail("take"), "What do you want to take?");
    assert_eq!(fail("open sword north"), "You used the word \"open\" in a way that I don't understand.");
    assert_eq!(fail("take xyzzy"), "I don't know the word \"xyzzy\".");
    assert_eq!(fail("take blue coin"), "You can't see any blue coin here!");
    assert_eq!(fail("drop sword"), "You don't have the sword.");
    assert_eq!(fail("open sword"), "You can't open the sword.");
    assert_eq!(fail("open all"), "You can't use multiple objects with \"open\".");

    room.world.place(room.sword, LocationClass::NotReachable);
    let fail = |input: &str| failure(parser.parse(input, &room.world, &pronouns));
    assert_eq!(fail("take sword"), "You can't reach the sword.");
}

#[test]
fn nothing_for_all() {
    let parser = fixtures::parser();
    let world = fixtures::FixtureWorld::new();
    let result = parser.parse("take all", &world, &PronounState::new());
    assert_eq!(result, ParseResult::Failed(ParseFailure::NothingForAll { verb: "take".into() }));
    assert_eq!(failure(result), "There is nothing here to take.");
}

#[test]
fn suggestions_when_enabled() {
    let parser = fixtures::parser().with_config(ParserConfig::new().with_suggestions(true));
    let room = lamp_room();
    assert_eq!(
        failure(parser.parse("take lanturn", &room.world, &PronounState::new())),
        "I don't know the word \"lanturn\". Did you mean \"lantern\"?"
    );
}
