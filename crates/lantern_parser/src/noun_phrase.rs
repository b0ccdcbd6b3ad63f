//! Noun phrase representation.
//!
//! A noun phrase is what the matcher extracts for one object slot: "the
//! brass lamp", "it", "all except the sword".

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pronouns::PronounClass;

/// A word as typed plus the canonical word it folds to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// The surface text.
    pub text: String,
    /// The canonical text for the sense used.
    pub canonical: String,
}

impl Word {
    /// Creates a word whose surface and canonical text are the same.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            canonical: text.clone(),
            text,
        }
    }

    /// Creates a word with a distinct canonical form.
    #[must_use]
    pub fn folded(text: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            canonical: canonical.into(),
        }
    }

    /// Returns true if either form equals `other`.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.text == other || self.canonical == other
    }
}

/// The head of a noun phrase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Head {
    /// An ordinary noun.
    Noun(Word),
    /// A pronoun standing for remembered objects.
    Pronoun {
        /// The word typed.
        word: Word,
        /// Which pronoun slot to read.
        class: PronounClass,
    },
}

/// Quantifier for noun phrases.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quantifier {
    /// A specific object ("the sword").
    Specific,
    /// Everything suitable ("all").
    All,
    /// Everything suitable except what the inner phrase names.
    AllExcept(Box<NounPhrase>),
}

/// A parsed noun phrase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounPhrase {
    /// The head word; absent for a bare "all".
    pub head: Option<Head>,
    /// Adjectives modifying the head, in input order.
    pub adjectives: Vec<Word>,
    /// Quantifier.
    pub quantifier: Quantifier,
    /// Token span consumed, as a half-open range of token indices.
    pub span: (usize, usize),
}

impl NounPhrase {
    /// Creates a phrase headed by a noun.
    #[must_use]
    pub fn noun(noun: Word) -> Self {
        Self {
            head: Some(Head::Noun(noun)),
            adjectives: Vec::new(),
            quantifier: Quantifier::Specific,
            span: (0, 0),
        }
    }

    /// Creates a pronoun phrase.
    #[must_use]
    pub fn pronoun(word: Word, class: PronounClass) -> Self {
        Self {
            head: Some(Head::Pronoun { word, class }),
            adjectives: Vec::new(),
            quantifier: Quantifier::Specific,
            span: (0, 0),
        }
    }

    /// Creates a bare "all" phrase.
    #[must_use]
    pub fn all() -> Self {
        Self {
            head: None,
            adjectives: Vec::new(),
            quantifier: Quantifier::All,
            span: (0, 0),
        }
    }

    /// Adds an adjective.
    #[must_use]
    pub fn with_adjective(mut self, adjective: Word) -> Self {
        self.adjectives.push(adjective);
        self
    }

    /// Sets the quantifier.
    #[must_use]
    pub fn with_quantifier(mut self, quantifier: Quantifier) -> Self {
        self.quantifier = quantifier;
        self
    }

    /// Sets the consumed span.
    #[must_use]
    pub fn with_span(mut self, start: usize, end: usize) -> Self {
        self.span = (start, end);
        self
    }

    /// Returns true for "all" and "all except".
    #[must_use]
    pub fn is_plural(&self) -> bool {
        !matches!(self.quantifier, Quantifier::Specific)
    }

    /// Returns the pronoun class if the head is a pronoun.
    #[must_use]
    pub fn pronoun_class(&self) -> Option<PronounClass> {
        match &self.head {
            Some(Head::Pronoun { class, .. }) => Some(*class),
            _ => None,
        }
    }

    /// Returns the head noun, if the head is a noun.
    #[must_use]
    pub fn head_noun(&self) -> Option<&Word> {
        match &self.head {
            Some(Head::Noun(word)) => Some(word),
            _ => None,
        }
    }
}

impl fmt::Display for NounPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<&str> = Vec::new();
        if self.is_plural() {
            parts.push("all");
        }
        if let Quantifier::AllExcept(_) = self.quantifier {
            parts.push("except");
        }
        write!(f, "{}", parts.join(" "))?;
        if let Quantifier::AllExcept(inner) = &self.quantifier {
            write!(f, " {inner}")?;
        }

        let mut words: Vec<&str> = self.adjectives.iter().map(|a| a.text.as_str()).collect();
        match &self.head {
            Some(Head::Noun(word) | Head::Pronoun { word, .. }) => words.push(&word.text),
            None => {}
        }
        if !words.is_empty() {
            if self.is_plural() {
                f.write_str(" ")?;
            }
            f.write_str(&words.join(" "))?;
        }
        Ok(())
    }
}
