//! Syntax pattern matching.
//!
//! Finds the verb, then walks the verb's rules in specificity order and
//! returns the first rule that consumes the whole token stream. Object
//! slots take a greedy, maximal noun phrase.

use lantern_foundation::{ActionId, WordId};
use log::debug;

use crate::grammar::{GrammarTable, RuleId, Slot, SyntaxRule};
use crate::lexer::Token;
use crate::noun_phrase::{NounPhrase, Quantifier, Word};
use crate::vocabulary::{Category, Vocabulary};

/// A successful rule match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleMatch {
    /// The matched rule.
    pub rule: RuleId,
    /// The canonical verb.
    pub verb: WordId,
    /// The rule's action.
    pub action: ActionId,
    /// One noun phrase per object slot, in pattern order.
    pub phrases: Vec<NounPhrase>,
    /// The canonical direction, if the rule has a direction slot.
    pub direction: Option<WordId>,
}

/// The result of matching a token stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseOutcome {
    /// A rule consumed the whole input.
    Matched(RuleMatch),
    /// No token could act as a verb.
    NoSuchVerb,
    /// The verb is known but none of its rules fit.
    NoRuleFits {
        /// The canonical verb.
        verb: WordId,
        /// True if some rule only failed because input ended at an object slot.
        incomplete: bool,
    },
    /// An unknown word sat where a meaningful word was required.
    UnknownWord(String),
}

/// How one rule fared against the input.
enum Attempt {
    Fit(RuleMatch),
    Mismatch,
    Incomplete,
    Unknown(usize),
}

/// Noun phrase scanning result.
enum Scan {
    Phrase(NounPhrase, usize),
    End,
    Unknown(usize),
    NotAPhrase,
}

/// Matches token streams against the grammar table.
pub struct Matcher;

impl Matcher {
    /// Selects the rule that fits `tokens`.
    ///
    /// With `implicit_directions`, input without a verb that starts with a
    /// direction is matched as the grammar's implicit direction verb.
    #[must_use]
    pub fn match_tokens(
        tokens: &[Token],
        grammar: &GrammarTable,
        vocabulary: &Vocabulary,
        implicit_directions: bool,
    ) -> ParseOutcome {
        let first_unknown = || {
            tokens
                .iter()
                .find(|t| t.is_unknown())
                .map(|t| ParseOutcome::UnknownWord(t.text.clone()))
        };

        let (verb, start) = match tokens.iter().position(|t| t.can_be(Category::Verb)) {
            Some(index) => {
                let Some(verb) = tokens[index].canonical(Category::Verb) else {
                    return ParseOutcome::NoSuchVerb;
                };
                if index > 0 {
                    debug!("words before verb {:?}", vocabulary.name(verb));
                    return first_unknown().unwrap_or(ParseOutcome::NoRuleFits {
                        verb,
                        incomplete: false,
                    });
                }
                (verb, index + 1)
            }
            None => {
                let walk = grammar.implicit_direction_verb().filter(|_| implicit_directions);
                match (walk, tokens.first()) {
                    (Some(walk), Some(first)) if first.can_be(Category::Direction) => (walk, 0),
                    _ => return first_unknown().unwrap_or(ParseOutcome::NoSuchVerb),
                }
            }
        };

        let mut incomplete = false;
        let mut unknown: Option<usize> = None;

        for rule in grammar.rules_for(verb) {
            match Self::try_rule(tokens, start, rule, vocabulary) {
                Attempt::Fit(matched) => {
                    debug!(
                        "matched {:?} with rule {:?}",
                        vocabulary.name(verb),
                        matched.rule
                    );
                    return ParseOutcome::Matched(matched);
                }
                Attempt::Incomplete => incomplete = true,
                Attempt::Unknown(index) => {
                    unknown.get_or_insert(index);
                }
                Attempt::Mismatch => {}
            }
        }

        if let Some(index) = unknown {
            return ParseOutcome::UnknownWord(tokens[index].text.clone());
        }
        debug!("no rule fits {:?} (incomplete: {incomplete})", vocabulary.name(verb));
        ParseOutcome::NoRuleFits { verb, incomplete }
    }

    fn try_rule(tokens: &[Token], start: usize, rule: &SyntaxRule, vocabulary: &Vocabulary) -> Attempt {
        let mut pos = start;
        let mut phrases = Vec::new();
        let mut direction = None;

        for slot in rule.pattern.iter().skip(1) {
            match slot {
                Slot::Object(_) => match Self::scan_phrase(tokens, pos, vocabulary, true) {
                    Scan::Phrase(phrase, end) => {
                        phrases.push(phrase);
                        pos = end;
                    }
                    Scan::End => return Attempt::Incomplete,
                    Scan::Unknown(index) => return Attempt::Unknown(index),
                    Scan::NotAPhrase => return Attempt::Mismatch,
                },
                Slot::Preposition(expected) => match tokens.get(pos) {
                    Some(token) if token.canonical(Category::Preposition) == Some(*expected) => pos += 1,
                    Some(token) if token.is_unknown() => return Attempt::Unknown(pos),
                    _ => return Attempt::Mismatch,
                },
                Slot::Direction => match tokens.get(pos) {
                    Some(token) => match token.canonical(Category::Direction) {
                        Some(dir) => {
                            direction = Some(dir);
                            pos += 1;
                        }
                        None if token.is_unknown() => return Attempt::Unknown(pos),
                        None => return Attempt::Mismatch,
                    },
                    None => return Attempt::Incomplete,
                },
                Slot::Verb => return Attempt::Mismatch,
            }
        }

        if pos < tokens.len() {
            return match tokens[pos..].iter().position(Token::is_unknown) {
                Some(offset) => Attempt::Unknown(pos + offset),
                None => Attempt::Mismatch,
            };
        }

        Attempt::Fit(RuleMatch {
            rule: rule.id,
            verb: rule.verb,
            action: rule.action,
            phrases,
            direction,
        })
    }

    /// Scans a maximal noun phrase starting at `start`.
    fn scan_phrase(tokens: &[Token], start: usize, vocabulary: &Vocabulary, allow_all: bool) -> Scan {
        let Some(first) = tokens.get(start) else {
            return Scan::End;
        };
        if first.is_unknown() {
            return Scan::Unknown(start);
        }

        if let Some(canonical) = first.canonical(Category::Pronoun) {
            if let Some(class) = vocabulary.pronoun_class(canonical) {
                let word = word_for(first, Category::Pronoun, vocabulary);
                return Scan::Phrase(NounPhrase::pronoun(word, class).with_span(start, start + 1), start + 1);
            }
        }

        if first.can_be(Category::All) {
            if !allow_all {
                return Scan::NotAPhrase;
            }
            let mut end = start + 1;
            let mut phrase = NounPhrase::all();
            if tokens.get(end).is_some_and(|t| t.can_be(Category::Except)) {
                match Self::scan_phrase(tokens, end + 1, vocabulary, false) {
                    Scan::Phrase(inner, inner_end) => {
                        phrase = phrase.with_quantifier(Quantifier::AllExcept(Box::new(inner)));
                        end = inner_end;
                    }
                    other => return other,
                }
            }
            return Scan::Phrase(phrase.with_span(start, end), end);
        }

        let mut run_end = start;
        while tokens
            .get(run_end)
            .is_some_and(|t| t.can_be(Category::Adjective) || t.can_be(Category::Noun))
        {
            run_end += 1;
        }

        let mut head = None;
        for (index, token) in tokens.iter().enumerate().take(run_end).skip(start) {
            if token.can_be(Category::Noun) {
                head = Some(index);
            }
            if !token.can_be(Category::Adjective) {
                break;
            }
        }

        match head {
            Some(head) => {
                let mut phrase = NounPhrase::noun(word_for(&tokens[head], Category::Noun, vocabulary));
                for token in &tokens[start..head] {
                    phrase = phrase.with_adjective(word_for(token, Category::Adjective, vocabulary));
                }
                Scan::Phrase(phrase.with_span(start, head + 1), head + 1)
            }
            None => match tokens.get(run_end) {
                Some(token) if token.is_unknown() => Scan::Unknown(run_end),
                None if run_end > start => Scan::End,
                _ => Scan::NotAPhrase,
            },
        }
    }
}

fn word_for(token: &Token, category: Category, vocabulary: &Vocabulary) -> Word {
    match token.canonical(category) {
        Some(id) => Word::folded(token.text.clone(), vocabulary.name(id)),
        None => Word::new(token.text.clone()),
    }
}
