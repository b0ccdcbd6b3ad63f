//! Tie-break and clarification tests.

use lantern_foundation::ObjectFlags;
use lantern_parser::{Answer, Disambiguator, Lexer, NounPhrase, ObjectConstraint, Word};

use crate::fixtures::{self, lamp_room};

#[test]
fn tie_break_needs_exactly_one_preferred() {
    let mut room = lamp_room();
    let both = [room.lantern, room.rusty];

    let light = ObjectConstraint::new().prefer(ObjectFlags::LIGHT);
    assert_eq!(Disambiguator::tie_break(&both, &light, &room.world), Some(room.lantern));

    let takeable = ObjectConstraint::new().prefer(ObjectFlags::TAKEABLE);
    assert_eq!(Disambiguator::tie_break(&both, &takeable, &room.world), None);

    assert_eq!(Disambiguator::tie_break(&both, &ObjectConstraint::new(), &room.world), None);

    let third = room.world.add("red lamp", &["lamp"], &["red"], ObjectFlags::empty());
    assert_eq!(
        Disambiguator::tie_break(&[room.rusty, third], &light, &room.world),
        None
    );
}

#[test]
fn question_lists_candidates_in_order() {
    let room = lamp_room();
    let phrase = NounPhrase::noun(Word::new("lamp"));
    let clarification = Disambiguator::clarify(&phrase, vec![room.lantern, room.rusty], &room.world);

    assert_eq!(
        clarification.question,
        "Which lamp do you mean, the brass lantern or the rusty lamp?"
    );
    assert_eq!(clarification.candidates, vec![room.lantern, room.rusty]);
}

#[test]
fn three_candidates_use_commas() {
    let mut room = lamp_room();
    let red = room.world.add("red lamp", &["lamp"], &["red"], ObjectFlags::empty());
    let phrase = NounPhrase::noun(Word::new("lamp"));
    let clarification = Disambiguator::clarify(&phrase, vec![room.lantern, room.rusty, red], &room.world);

    assert_eq!(
        clarification.question,
        "Which lamp do you mean, the brass lantern, the rusty lamp, or the red lamp?"
    );
}

#[test]
fn answers() {
    let room = lamp_room();
    let vocab = fixtures::vocabulary();
    let phrase = NounPhrase::noun(Word::new("lamp"));
    let clarification = Disambiguator::clarify(&phrase, vec![room.lantern, room.rusty], &room.world);
    let answer = |input: &str, numeric: bool| {
        let tokens = Lexer::tokenize(input, &vocab);
        Disambiguator::answer(&tokens, &clarification, &room.world, &vocab, numeric)
    };

    assert_eq!(answer("the brass one", true), Answer::Chosen(room.lantern));
    assert_eq!(answer("old", true), Answer::Chosen(room.rusty));
    assert_eq!(answer("rusty lamp", true), Answer::Chosen(room.rusty));
    assert_eq!(answer("2", true), Answer::Chosen(room.rusty));
    assert_eq!(answer("2", false), Answer::Unclear);
    assert_eq!(answer("3", true), Answer::Unclear);
    assert_eq!(answer("lamp", true), Answer::Unclear);
    assert_eq!(answer("sword", true), Answer::Unclear);
    assert_eq!(answer("take the sword", true), Answer::NewCommand);
}

#[test]
fn shared_adjectives_are_skipped_when_naming() {
    let mut world = fixtures::FixtureWorld::new();
    let shiny = world.add("brass lamp", &["lamp"], &["brass", "shiny"], ObjectFlags::empty());
    let dented = world.add("brass lamp", &["lamp"], &["brass", "dented"], ObjectFlags::empty());
    let phrase = NounPhrase::noun(Word::new("lamp"));

    let clarification = Disambiguator::clarify(&phrase, vec![shiny, dented], &world);
    assert_eq!(
        clarification.question,
        "Which lamp do you mean, the shiny lamp or the dented lamp?"
    );
}
