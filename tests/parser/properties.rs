//! Property tests for the parse pipeline.

use lantern_parser::{Category, Lexer, Matcher, PronounState};
use proptest::prelude::*;

use crate::fixtures::{self, lamp_room};

/// Words the fixture vocabulary knows, plus a few it doesn't.
const WORDS: &[&str] = &[
    "take", "get", "drop", "put", "in", "into", "open", "look", "at", "walk", "go", "attack", "kill", "with",
    "north", "n", "s", "lamp", "lantern", "sword", "blade", "box", "troll", "brass", "rusty", "old", "red", "it",
    "them", "all", "everything", "except", "but", "the", "a", "one", "xyzzy", "frob", "2",
];

const TAKE_WORDS: &[&str] = &["take", "get", "grab"];

fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 0..8).prop_map(|words| words.join(" "))
}

fn arbitrary_string() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 0..200).prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn lexer_never_panics(input in arbitrary_string()) {
        let vocab = fixtures::vocabulary();
        for token in Lexer::tokenize(&input, &vocab) {
            prop_assert!(!token.text.is_empty());
            prop_assert!(!vocab.is_buzzword(&token.text));
        }
    }

    #[test]
    fn case_never_changes_senses(input in sentence()) {
        let vocab = fixtures::vocabulary();
        prop_assert_eq!(
            Lexer::tokenize(&input, &vocab),
            Lexer::tokenize(&input.to_uppercase(), &vocab)
        );
    }

    #[test]
    fn synonyms_fold_in_any_case(word in prop::sample::select(TAKE_WORDS), upper in any::<bool>()) {
        let vocab = fixtures::vocabulary();
        let input = if upper { word.to_uppercase() } else { word.to_string() };
        let tokens = Lexer::tokenize(&input, &vocab);
        prop_assert_eq!(tokens[0].canonical(Category::Verb), vocab.id("take"));
    }

    #[test]
    fn matching_is_deterministic(input in sentence()) {
        let vocab = fixtures::vocabulary();
        let grammar = fixtures::grammar(&vocab);
        let tokens = Lexer::tokenize(&input, &vocab);
        let first = Matcher::match_tokens(&tokens, &grammar, &vocab, true);
        prop_assert_eq!(Matcher::match_tokens(&tokens, &grammar, &vocab, true), first);
    }

    #[test]
    fn parsing_never_panics(input in sentence()) {
        let parser = fixtures::parser();
        let room = lamp_room();
        let first = parser.parse(&input, &room.world, &PronounState::new());
        prop_assert_eq!(parser.parse(&input, &room.world, &PronounState::new()), first);
    }
}
