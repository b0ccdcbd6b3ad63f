//! Disambiguation of multiple candidates.
//!
//! A silent tie-break is tried first. Failing that, a clarification
//! question is produced and the next input line is read as an answer
//! against just the pending candidates.

use lantern_foundation::ObjectId;
use serde::{Deserialize, Serialize};

use crate::grammar::ObjectConstraint;
use crate::lexer::Token;
use crate::noun_phrase::NounPhrase;
use crate::vocabulary::{Category, Vocabulary};
use crate::world::WorldModel;

/// A pending clarification question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clarification {
    /// The question shown to the player.
    pub question: String,
    /// The candidates, in the order they were named.
    pub candidates: Vec<ObjectId>,
}

/// How a clarification answer was interpreted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Answer {
    /// The answer picks exactly one candidate.
    Chosen(ObjectId),
    /// The answer is a new command and should be parsed fresh.
    NewCommand,
    /// The answer matches zero or several candidates; ask again.
    Unclear,
}

/// Narrows candidate sets.
pub struct Disambiguator;

impl Disambiguator {
    /// Picks the single candidate carrying the slot's preferred flags, if
    /// exactly one does.
    pub fn tie_break<W: WorldModel + ?Sized>(
        candidates: &[ObjectId],
        constraint: &ObjectConstraint,
        world: &W,
    ) -> Option<ObjectId> {
        if constraint.preferred.is_empty() {
            return None;
        }
        let mut preferred = candidates
            .iter()
            .copied()
            .filter(|&o| world.object_flags(o).contains(constraint.preferred));
        match (preferred.next(), preferred.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    /// Builds the clarification question for an ambiguous phrase.
    ///
    /// Each candidate is named by an adjective no other candidate shares.
    /// The object's usual name is kept when it already carries that
    /// adjective, or when no such adjective exists.
    pub fn clarify<W: WorldModel + ?Sized>(
        phrase: &NounPhrase,
        candidates: Vec<ObjectId>,
        world: &W,
    ) -> Clarification {
        let names: Vec<String> = candidates
            .iter()
            .map(|&o| format!("the {}", distinguishing_name(o, &candidates, world)))
            .collect();
        let listed = match names.as_slice() {
            [] => String::new(),
            [one] => one.clone(),
            [init @ .., last] if init.len() == 1 => format!("{} or {last}", init[0]),
            [init @ .., last] => format!("{}, or {last}", init.join(", ")),
        };
        Clarification {
            question: format!("Which {phrase} do you mean, {listed}?"),
            candidates,
        }
    }

    /// Interprets an answer to a clarification question.
    ///
    /// Any verb in the answer makes it a new command. Otherwise a number
    /// picks the n-th candidate (when allowed), and nouns and adjectives
    /// must all apply to exactly one candidate.
    pub fn answer<W: WorldModel + ?Sized>(
        tokens: &[Token],
        clarification: &Clarification,
        world: &W,
        vocabulary: &Vocabulary,
        allow_numeric: bool,
    ) -> Answer {
        if tokens.iter().any(|t| t.can_be(Category::Verb)) {
            return Answer::NewCommand;
        }

        if allow_numeric {
            if let [only] = tokens {
                if let Ok(n) = only.text.parse::<usize>() {
                    return match n.checked_sub(1).and_then(|i| clarification.candidates.get(i)) {
                        Some(&chosen) => Answer::Chosen(chosen),
                        None => Answer::Unclear,
                    };
                }
            }
        }

        let content: Vec<&Token> = tokens
            .iter()
            .filter(|t| t.can_be(Category::Noun) || t.can_be(Category::Adjective))
            .collect();
        if content.is_empty() {
            return Answer::Unclear;
        }

        let mut matching = clarification
            .candidates
            .iter()
            .copied()
            .filter(|&o| content.iter().all(|t| applies(t, o, world, vocabulary)));
        match (matching.next(), matching.next()) {
            (Some(only), None) => Answer::Chosen(only),
            _ => Answer::Unclear,
        }
    }
}

fn distinguishing_name<W: WorldModel + ?Sized>(object: ObjectId, candidates: &[ObjectId], world: &W) -> String {
    let name = world.describe(object);
    let unique = world.object_adjectives(object).iter().find(|adj| {
        candidates
            .iter()
            .filter(|&&other| other != object)
            .all(|&other| !world.object_adjectives(other).contains(adj))
    });
    match unique {
        Some(adj) if !name.split_whitespace().any(|w| w == adj.as_str()) => {
            let noun = world.object_synonyms(object).first().map_or("thing", String::as_str);
            format!("{adj} {noun}")
        }
        _ => name,
    }
}

fn applies<W: WorldModel + ?Sized>(token: &Token, object: ObjectId, world: &W, vocabulary: &Vocabulary) -> bool {
    let noun = token.canonical(Category::Noun).map(|id| vocabulary.name(id));
    let adjective = token.canonical(Category::Adjective).map(|id| vocabulary.name(id));
    let named = |s: &String, canonical: Option<&str>| *s == token.text || Some(s.as_str()) == canonical;

    world.object_synonyms(object).iter().any(|s| named(s, noun))
        || world.object_adjectives(object).iter().any(|s| named(s, adjective))
}
