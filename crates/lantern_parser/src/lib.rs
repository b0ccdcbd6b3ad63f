//! Command understanding for text adventure games.
//!
//! This crate turns a line of player input like "take brass lamp" or
//! "attack troll with sword" into a [`ResolvedCommand`] naming the action to
//! run and the world objects it applies to.
//!
//! # Architecture
//!
//! ```text
//! "attack the troll with sword"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ LEXER           │  → [attack:Verb, troll:Noun, with:Prep, sword:Noun]
//! └─────────────────┘     ("the" is a buzzword and is dropped)
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MATCHER         │  → rule: attack OBJECT with OBJECT
//! │ (GrammarTable)  │     phrases: [troll], [sword]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ RESOLVER        │  → troll → Single(ObjectId(7))
//! │                 │     sword → Multiple(..) → Disambiguator
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ RESOLVED        │  → ResolvedCommand { verb: attack, direct, indirect }
//! │ COMMAND         │     or a SuspendedParse awaiting a clarification
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`vocabulary`] - Canonical words, categories, synonyms, buzzwords
//! - [`lexer`] - Raw input to classified tokens
//! - [`grammar`] - Syntax rules indexed by verb
//! - [`matcher`] - Rule selection and noun phrase extraction
//! - [`noun_phrase`] - Noun phrases and quantifiers
//! - [`world`] - The world-model collaborator interface
//! - [`resolver`] - Noun phrase to object resolution
//! - [`disambiguation`] - Tie-breaking and clarification questions
//! - [`pronouns`] - Pronoun referent tracking
//! - [`command`] - The resolved, executable command
//! - [`parser`] - Pipeline orchestration and suspension
//! - [`config`] - Parser options

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod command;
pub mod config;
pub mod disambiguation;
pub mod grammar;
pub mod lexer;
pub mod matcher;
pub mod noun_phrase;
pub mod parser;
pub mod pronouns;
pub mod resolver;
pub mod vocabulary;
pub mod world;

#[cfg(test)]
mod testing;

pub use command::{DirectObject, ResolvedCommand};
pub use config::ParserConfig;
pub use disambiguation::{Answer, Clarification, Disambiguator};
pub use grammar::{GrammarTable, ObjectConstraint, RuleBuilder, RuleId, Slot, SyntaxRule};
pub use lexer::{Lexer, Token};
pub use matcher::{Matcher, ParseOutcome, RuleMatch};
pub use noun_phrase::{Head, NounPhrase, Quantifier, Word};
pub use parser::{ParseFailure, ParseResult, Parser, SuspendedParse};
pub use pronouns::{PronounClass, PronounState};
pub use resolver::{EmptyReason, Resolution, Resolver};
pub use vocabulary::{Category, Sense, Vocabulary, VocabularyEntry};
pub use world::WorldModel;
