//! Input tokenization.
//!
//! Converts raw player input into a stream of classified tokens. The lexer
//! never fails: words it does not recognize become unknown tokens and it is
//! up to the matcher to reject them.

use lantern_foundation::WordId;
use log::trace;

use crate::vocabulary::{Category, Sense, Vocabulary};

/// A classified word from player input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The lowercased surface text.
    pub text: String,
    /// Every sense the word has. Empty for unknown words.
    pub senses: Vec<Sense>,
}

impl Token {
    /// Returns true if the vocabulary does not know this word.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.senses.is_empty()
    }

    /// Returns true if this token can act in the given category.
    #[must_use]
    pub fn can_be(&self, category: Category) -> bool {
        self.senses.iter().any(|s| s.category == category)
    }

    /// Returns the canonical word for the given category, if any.
    #[must_use]
    pub fn canonical(&self, category: Category) -> Option<WordId> {
        self.senses
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.canonical)
    }
}

/// Tokenizes player input against a vocabulary.
pub struct Lexer;

impl Lexer {
    /// Tokenizes a raw input line.
    ///
    /// - Converts words to lowercase
    /// - Splits on whitespace and the break characters `. , " ! ? ; :`
    /// - Strips apostrophes inside words
    /// - Drops buzzwords
    #[must_use]
    pub fn tokenize(input: &str, vocabulary: &Vocabulary) -> Vec<Token> {
        Self::words(input)
            .into_iter()
            .filter(|word| !vocabulary.is_buzzword(word))
            .map(|word| {
                let senses = vocabulary.senses(&word).to_vec();
                trace!("token {word:?} -> {senses:?}");
                Token { text: word, senses }
            })
            .collect()
    }

    /// Splits input into lowercase words without classifying them.
    #[must_use]
    pub fn words(input: &str) -> Vec<String> {
        let mut words = Vec::new();
        let mut current = String::new();

        for ch in input.chars() {
            match ch {
                '.' | ',' | '"' | '!' | '?' | ';' | ':' => {
                    flush(&mut current, &mut words);
                }
                '\'' => {}
                c if c.is_whitespace() => {
                    flush(&mut current, &mut words);
                }
                c => current.extend(c.to_lowercase()),
            }
        }
        flush(&mut current, &mut words);

        words
    }
}

fn flush(current: &mut String, words: &mut Vec<String>) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}
