//! String interning for vocabulary words.
//!
//! Every surface word and every canonical word the vocabulary knows is
//! interned once, so the lexer and matcher compare words by id.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Interned word identifier.
///
/// Surface words ("lamp") and canonical words ("lantern") share one id space.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WordId(pub(crate) u32);

impl WordId {
    /// Returns the raw index of this word.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WordId({})", self.0)
    }
}

/// Interner for vocabulary words.
///
/// Words are stored lowercase exactly as given; normalization is the
/// lexer's job. Not thread-safe; the parse pipeline is single-threaded.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interner {
    /// Word storage, indexed by `WordId`.
    words: Vec<Arc<str>>,
    /// Map from word text to `WordId`.
    word_map: HashMap<Arc<str>, WordId>,
}

impl Interner {
    /// Creates a new empty interner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a word, returning its [`WordId`].
    ///
    /// # Panics
    ///
    /// Panics if the number of interned words exceeds `u32::MAX`.
    pub fn intern(&mut self, word: &str) -> WordId {
        if let Some(&id) = self.word_map.get(word) {
            return id;
        }

        let idx = u32::try_from(self.words.len()).expect("too many interned words");
        let arc: Arc<str> = word.into();
        self.words.push(arc.clone());

        let id = WordId(idx);
        self.word_map.insert(arc, id);
        id
    }

    /// Looks up a word without interning it.
    #[must_use]
    pub fn lookup(&self, word: &str) -> Option<WordId> {
        self.word_map.get(word).copied()
    }

    /// Gets the text of an interned word.
    #[must_use]
    pub fn resolve(&self, id: WordId) -> Option<&str> {
        self.words.get(id.0 as usize).map(AsRef::as_ref)
    }

    /// Iterates over every interned word in interning order.
    pub fn words(&self) -> impl Iterator<Item = (WordId, &str)> {
        self.words
            .iter()
            .enumerate()
            .map(|(idx, word)| (WordId(idx as u32), word.as_ref()))
    }

    /// Returns the number of interned words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if nothing has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
