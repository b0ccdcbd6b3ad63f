//! Rule selection tests.

use lantern_parser::{GrammarTable, Lexer, Matcher, ParseOutcome, Quantifier, RuleMatch, Vocabulary};

use crate::fixtures::{self, ATTACK, ATTACK_WITH, EXAMINE, LOOK, PUT, TAKE, WALK};

struct Tables {
    vocab: Vocabulary,
    grammar: GrammarTable,
}

fn tables() -> Tables {
    let vocab = fixtures::vocabulary();
    let grammar = fixtures::grammar(&vocab);
    Tables { vocab, grammar }
}

fn run(tables: &Tables, input: &str) -> ParseOutcome {
    let tokens = Lexer::tokenize(input, &tables.vocab);
    Matcher::match_tokens(&tokens, &tables.grammar, &tables.vocab, true)
}

fn matched(outcome: ParseOutcome) -> RuleMatch {
    match outcome {
        ParseOutcome::Matched(m) => m,
        other => panic!("expected a match, got {other:?}"),
    }
}

#[test]
fn verb_only_rule() {
    let t = tables();
    let m = matched(run(&t, "look"));
    assert_eq!(m.action, LOOK);
    assert!(m.phrases.is_empty());
}

#[test]
fn preposition_selects_the_rule() {
    let t = tables();
    let m = matched(run(&t, "look at the lamp"));
    assert_eq!(m.action, EXAMINE);
    assert_eq!(m.phrases.len(), 1);
}

#[test]
fn two_object_rule() {
    let t = tables();
    let m = matched(run(&t, "put brass lamp into box"));
    assert_eq!(m.action, PUT);
    assert_eq!(m.phrases[0].to_string(), "brass lamp");
    assert_eq!(m.phrases[1].to_string(), "box");
}

#[test]
fn more_specific_rule_wins() {
    let t = tables();
    assert_eq!(matched(run(&t, "kill troll with sword")).action, ATTACK_WITH);
    assert_eq!(matched(run(&t, "kill troll")).action, ATTACK);
}

#[test]
fn matching_is_deterministic() {
    let t = tables();
    let first = run(&t, "attack the troll with the blade");
    for _ in 0..5 {
        assert_eq!(run(&t, "attack the troll with the blade"), first);
    }
}

#[test]
fn all_except_phrase() {
    let t = tables();
    let m = matched(run(&t, "take everything but the sword"));
    assert_eq!(m.action, TAKE);
    assert!(matches!(m.phrases[0].quantifier, Quantifier::AllExcept(_)));
}

#[test]
fn bare_direction_uses_implicit_verb() {
    let t = tables();
    let m = matched(run(&t, "n"));
    assert_eq!(m.action, WALK);
    assert_eq!(m.direction, t.vocab.id("north"));

    let tokens = Lexer::tokenize("n", &t.vocab);
    assert_eq!(
        Matcher::match_tokens(&tokens, &t.grammar, &t.vocab, false),
        ParseOutcome::NoSuchVerb
    );
}

#[test]
fn explicit_direction() {
    let t = tables();
    let m = matched(run(&t, "go south"));
    assert_eq!(m.direction, t.vocab.id("south"));
}

#[test]
fn missing_object_is_incomplete() {
    let t = tables();
    let take = t.vocab.id("take").unwrap();
    assert_eq!(
        run(&t, "take"),
        ParseOutcome::NoRuleFits {
            verb: take,
            incomplete: true
        }
    );
}

#[test]
fn leftover_words_do_not_fit() {
    let t = tables();
    let open = t.vocab.id("open").unwrap();
    assert_eq!(
        run(&t, "open box north"),
        ParseOutcome::NoRuleFits {
            verb: open,
            incomplete: false
        }
    );
}

#[test]
fn words_before_the_verb_do_not_fit() {
    let t = tables();
    let take = t.vocab.id("take").unwrap();
    assert!(matches!(run(&t, "lamp take"), ParseOutcome::NoRuleFits { verb, .. } if verb == take));
}

#[test]
fn no_verb_at_all() {
    let t = tables();
    assert_eq!(run(&t, "brass lamp"), ParseOutcome::NoSuchVerb);
}

#[test]
fn unknown_words_are_reported() {
    let t = tables();
    assert_eq!(run(&t, "take the frobozz"), ParseOutcome::UnknownWord("frobozz".into()));
    assert_eq!(run(&t, "xyzzy"), ParseOutcome::UnknownWord("xyzzy".into()));
}
