//! Main parser pipeline.
//!
//! Orchestrates the flow from raw input to a [`ResolvedCommand`]:
//! tokenize, match a rule, resolve each object slot in order, and either
//! finish, fail with a player-facing [`ParseFailure`], or suspend on a
//! clarification question.

use lantern_foundation::{ObjectId, WordId};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::command::{DirectObject, ResolvedCommand};
use crate::config::ParserConfig;
use crate::disambiguation::{Answer, Clarification, Disambiguator};
use crate::grammar::{GrammarTable, RuleId, SyntaxRule};
use crate::lexer::{Lexer, Token};
use crate::matcher::{Matcher, ParseOutcome};
use crate::noun_phrase::NounPhrase;
use crate::pronouns::{PronounClass, PronounState};
use crate::resolver::{EmptyReason, Resolution, Resolver};
use crate::vocabulary::Vocabulary;
use crate::world::WorldModel;

/// Result of parsing player input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseResult {
    /// A command ready for dispatch.
    Command(ResolvedCommand),
    /// Parsing is suspended on a clarification question.
    Clarify(SuspendedParse),
    /// The input could not be understood. Display is the player message.
    Failed(ParseFailure),
}

/// Why a line could not be turned into a command.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseFailure {
    /// Nothing was typed.
    #[error("I beg your pardon?")]
    Empty,

    /// An unrecognized word where a meaningful one was required.
    #[error("I don't know the word \"{word}\".{}", did_you_mean(.suggestion.as_deref()))]
    UnknownWord {
        /// The word as typed.
        word: String,
        /// A close vocabulary word, if suggestions are on.
        suggestion: Option<String>,
    },

    /// No verb in the input.
    #[error("There was no verb in that sentence!")]
    NoSuchVerb,

    /// The verb is known but the sentence shape is not.
    #[error("You used the word \"{verb}\" in a way that I don't understand.")]
    NoRuleFits {
        /// The canonical verb.
        verb: String,
    },

    /// The input stopped where an object was expected.
    #[error("What do you want to {verb}?")]
    Incomplete {
        /// The canonical verb.
        verb: String,
    },

    /// Nothing visible answers to the phrase.
    #[error("You can't see any {phrase} here!")]
    NotVisible {
        /// The phrase as typed.
        phrase: String,
    },

    /// The object must be held.
    #[error("You don't have the {object}.")]
    NotHeld {
        /// The object's name.
        object: String,
    },

    /// The object is out of reach.
    #[error("You can't reach the {object}.")]
    Unreachable {
        /// The object's name.
        object: String,
    },

    /// The object lacks a required property.
    #[error("You can't {verb} the {object}.")]
    Unsuitable {
        /// The canonical verb.
        verb: String,
        /// The object's name.
        object: String,
    },

    /// A pronoun with no referent.
    #[error("I don't know what you're referring to.")]
    PronounUnbound {
        /// The pronoun class used.
        pronoun: PronounClass,
    },

    /// "all" selected nothing.
    #[error("There is nothing here to {verb}.")]
    NothingForAll {
        /// The canonical verb.
        verb: String,
    },

    /// Several objects in a slot that takes one.
    #[error("You can't use multiple objects with \"{verb}\".")]
    MultipleNotAllowed {
        /// The canonical verb.
        verb: String,
    },
}

fn did_you_mean(suggestion: Option<&str>) -> String {
    suggestion.map_or_else(String::new, |s| format!(" Did you mean \"{s}\"?"))
}

impl ParseFailure {
    /// True for failures of resolution rather than of sentence shape.
    #[must_use]
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            Self::NotVisible { .. }
                | Self::NotHeld { .. }
                | Self::Unreachable { .. }
                | Self::Unsuitable { .. }
                | Self::PronounUnbound { .. }
                | Self::NothingForAll { .. }
        )
    }
}

/// One resolved object slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
enum Binding {
    One(ObjectId),
    Many(Vec<ObjectId>),
}

/// Parser state preserved while a clarification question is pending.
///
/// Plain data: it can be saved with the rest of the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspendedParse {
    rule: RuleId,
    phrases: Vec<NounPhrase>,
    resolved: Vec<Binding>,
    direction: Option<WordId>,
    clarification: Clarification,
}

impl SuspendedParse {
    /// The question to show the player.
    #[must_use]
    pub fn question(&self) -> &str {
        &self.clarification.question
    }

    /// The pending clarification.
    #[must_use]
    pub fn clarification(&self) -> &Clarification {
        &self.clarification
    }

    /// The rule being completed.
    #[must_use]
    pub fn rule(&self) -> RuleId {
        self.rule
    }

    /// Index of the object slot awaiting an answer.
    #[must_use]
    pub fn slot(&self) -> usize {
        self.resolved.len()
    }
}

/// The command parser.
#[derive(Clone, Debug)]
pub struct Parser {
    vocabulary: Vocabulary,
    grammar: GrammarTable,
    config: ParserConfig,
}

impl Parser {
    /// Creates a parser with the default configuration.
    #[must_use]
    pub fn new(vocabulary: Vocabulary, grammar: GrammarTable) -> Self {
        Self {
            vocabulary,
            grammar,
            config: ParserConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Gets the vocabulary.
    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Gets the grammar.
    #[must_use]
    pub fn grammar(&self) -> &GrammarTable {
        &self.grammar
    }

    /// Gets the configuration.
    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Tokenizes input against this parser's vocabulary.
    #[must_use]
    pub fn tokenize(&self, input: &str) -> Vec<Token> {
        Lexer::tokenize(input, &self.vocabulary)
    }

    /// Parses a fresh command.
    pub fn parse<W: WorldModel + ?Sized>(&self, input: &str, world: &W, pronouns: &PronounState) -> ParseResult {
        let tokens = self.tokenize(input);
        if tokens.is_empty() {
            return ParseResult::Failed(ParseFailure::Empty);
        }

        match Matcher::match_tokens(
            &tokens,
            &self.grammar,
            &self.vocabulary,
            self.config.implicit_directions,
        ) {
            ParseOutcome::Matched(matched) => match self.grammar.rule(matched.rule) {
                Some(rule) => self.resolve_slots(
                    rule,
                    matched.phrases,
                    Vec::new(),
                    matched.direction,
                    world,
                    pronouns,
                ),
                None => ParseResult::Failed(ParseFailure::NoSuchVerb),
            },
            ParseOutcome::NoSuchVerb => ParseResult::Failed(ParseFailure::NoSuchVerb),
            ParseOutcome::NoRuleFits { verb, incomplete } => {
                let verb = self.vocabulary.name(verb).to_string();
                ParseResult::Failed(if incomplete {
                    ParseFailure::Incomplete { verb }
                } else {
                    ParseFailure::NoRuleFits { verb }
                })
            }
            ParseOutcome::UnknownWord(word) => {
                let suggestion = if self.config.suggest_words {
                    self.vocabulary
                        .suggest(&word, self.config.max_suggestion_distance)
                        .map(str::to_string)
                } else {
                    None
                };
                ParseResult::Failed(ParseFailure::UnknownWord { word, suggestion })
            }
        }
    }

    /// Continues a suspended parse with the player's answer.
    ///
    /// An answer containing a verb is parsed as a fresh command. An answer
    /// matching zero or several candidates asks the same question again.
    pub fn resume<W: WorldModel + ?Sized>(
        &self,
        suspended: SuspendedParse,
        input: &str,
        world: &W,
        pronouns: &PronounState,
    ) -> ParseResult {
        let Some(rule) = self.grammar.rule(suspended.rule) else {
            warn!("suspended parse refers to unknown rule {:?}", suspended.rule);
            return self.parse(input, world, pronouns);
        };

        let tokens = self.tokenize(input);
        match Disambiguator::answer(
            &tokens,
            &suspended.clarification,
            world,
            &self.vocabulary,
            self.config.allow_numeric_choices,
        ) {
            Answer::NewCommand => {
                debug!("clarification abandoned for a new command");
                self.parse(input, world, pronouns)
            }
            Answer::Unclear => ParseResult::Clarify(suspended),
            Answer::Chosen(object) => {
                let SuspendedParse {
                    phrases,
                    mut resolved,
                    direction,
                    ..
                } = suspended;
                resolved.push(Binding::One(object));
                self.resolve_slots(rule, phrases, resolved, direction, world, pronouns)
            }
        }
    }

    fn resolve_slots<W: WorldModel + ?Sized>(
        &self,
        rule: &SyntaxRule,
        phrases: Vec<NounPhrase>,
        mut resolved: Vec<Binding>,
        direction: Option<WordId>,
        world: &W,
        pronouns: &PronounState,
    ) -> ParseResult {
        let verb = self.vocabulary.name(rule.verb).to_string();

        while resolved.len() < phrases.len() {
            let index = resolved.len();
            let phrase = &phrases[index];
            let Some(constraint) = rule.object_constraint(index) else {
                return ParseResult::Failed(ParseFailure::NoRuleFits { verb });
            };
            if phrase.is_plural() && !constraint.many {
                return ParseResult::Failed(ParseFailure::MultipleNotAllowed { verb });
            }

            match Resolver::resolve(phrase, constraint, world, pronouns) {
                Resolution::Single(object) => resolved.push(Binding::One(object)),
                Resolution::Many(objects) => {
                    if !constraint.many {
                        return ParseResult::Failed(ParseFailure::MultipleNotAllowed { verb });
                    }
                    resolved.push(Binding::Many(objects));
                }
                Resolution::Multiple(candidates) => {
                    if let Some(object) = Disambiguator::tie_break(&candidates, constraint, world) {
                        debug!("tie broken in favour of {object:?}");
                        resolved.push(Binding::One(object));
                        continue;
                    }
                    let clarification = Disambiguator::clarify(phrase, candidates, world);
                    return ParseResult::Clarify(SuspendedParse {
                        rule: rule.id,
                        phrases,
                        resolved,
                        direction,
                        clarification,
                    });
                }
                Resolution::Empty(reason) => {
                    return ParseResult::Failed(Self::empty_failure(reason, phrase, verb, world));
                }
            }
        }

        let mut bound = resolved.into_iter();
        let direct = match bound.next() {
            None => DirectObject::None,
            Some(Binding::One(object)) => DirectObject::One(object),
            Some(Binding::Many(objects)) => DirectObject::Many(objects),
        };
        let indirect = match bound.next() {
            Some(Binding::One(object)) => Some(object),
            Some(Binding::Many(objects)) => objects.first().copied(),
            None => None,
        };

        match ResolvedCommand::new(rule, direct, indirect, direction) {
            Ok(command) => ParseResult::Command(command),
            Err(err) => {
                warn!("{err}");
                ParseResult::Failed(ParseFailure::NoRuleFits { verb })
            }
        }
    }

    fn empty_failure<W: WorldModel + ?Sized>(
        reason: EmptyReason,
        phrase: &NounPhrase,
        verb: String,
        world: &W,
    ) -> ParseFailure {
        match reason {
            EmptyReason::NotVisible => match phrase.pronoun_class() {
                Some(pronoun) => ParseFailure::PronounUnbound { pronoun },
                None => ParseFailure::NotVisible {
                    phrase: phrase.to_string(),
                },
            },
            EmptyReason::NotHeld(object) => ParseFailure::NotHeld {
                object: world.describe(object),
            },
            EmptyReason::Unreachable(object) => ParseFailure::Unreachable {
                object: world.describe(object),
            },
            EmptyReason::Unsuitable(object) => ParseFailure::Unsuitable {
                verb,
                object: world.describe(object),
            },
            EmptyReason::PronounUnbound(pronoun) => ParseFailure::PronounUnbound { pronoun },
            EmptyReason::NothingForAll => ParseFailure::NothingForAll { verb },
        }
    }
}
