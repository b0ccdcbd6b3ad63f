//! The vocabulary: canonical words, categories, and synonym folding.
//!
//! Every word the parser understands is defined here once, with the
//! categories it can act as. A surface word may carry several senses (e.g.
//! "light" as both a verb and an adjective) but at most one canonical word
//! per category. Buzzwords are filler ("the", "please") dropped by the lexer.

use std::collections::{HashMap, HashSet};
use std::fmt;

use lantern_foundation::{Error, Interner, Result, WordId};
use serde::{Deserialize, Serialize};

use crate::pronouns::PronounClass;

/// The grammatical role a word can play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Starts a command: "take", "open".
    Verb,
    /// Heads a noun phrase: "lamp", "mailbox".
    Noun,
    /// Narrows a noun phrase: "brass", "small".
    Adjective,
    /// Links object slots: "with", "in".
    Preposition,
    /// A compass or relative direction: "north", "up".
    Direction,
    /// Stands for a remembered object: "it", "them".
    Pronoun,
    /// The plural quantifier: "all", "every".
    All,
    /// Introduces an exception to "all": "except", "but".
    Except,
}

impl Category {
    /// A human-readable name for error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Verb => "verb",
            Self::Noun => "noun",
            Self::Adjective => "adjective",
            Self::Preposition => "preposition",
            Self::Direction => "direction",
            Self::Pronoun => "pronoun",
            Self::All => "quantifier",
            Self::Except => "exception word",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One meaning of a surface word: a category and the canonical word it folds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Sense {
    /// The category this sense belongs to.
    pub category: Category,
    /// The canonical word for this sense.
    pub canonical: WordId,
}

/// A canonical word with every category it acts as and its surface synonyms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VocabularyEntry {
    /// The canonical word id.
    pub canonical: WordId,
    /// Categories this word can act as.
    pub categories: Vec<Category>,
    /// Surface words other than the canonical one that fold to it.
    pub synonyms: Vec<WordId>,
}

/// The canonical word table.
#[derive(Clone, Debug, Default)]
pub struct Vocabulary {
    interner: Interner,
    entries: Vec<VocabularyEntry>,
    entry_index: HashMap<WordId, usize>,
    /// Surface word -> senses.
    lexicon: HashMap<WordId, Vec<Sense>>,
    buzzwords: HashSet<WordId>,
    pronouns: HashMap<WordId, PronounClass>,
}

fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

impl Vocabulary {
    /// Creates an empty vocabulary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a canonical word in a category, with its synonyms.
    ///
    /// Redefining the same word in the same category is a no-op that may add
    /// synonyms.
    ///
    /// # Errors
    ///
    /// Returns a vocabulary conflict if any of the surface words already
    /// folds to a different canonical word in this category. Nothing is
    /// recorded in that case.
    pub fn define(&mut self, category: Category, canonical: &str, synonyms: &[&str]) -> Result<WordId> {
        let canonical_id = self.interner.intern(&normalize(canonical));
        let mut surfaces = vec![canonical_id];
        for synonym in synonyms {
            let id = self.interner.intern(&normalize(synonym));
            if !surfaces.contains(&id) {
                surfaces.push(id);
            }
        }

        for &surface in &surfaces {
            if let Some(existing) = self.sense_in(surface, category) {
                if existing != canonical_id {
                    return Err(Error::vocabulary_conflict(self.name(surface), category.name()));
                }
            }
        }

        for &surface in &surfaces {
            let senses = self.lexicon.entry(surface).or_default();
            if !senses.iter().any(|s| s.category == category) {
                senses.push(Sense {
                    category,
                    canonical: canonical_id,
                });
            }
        }

        let index = match self.entry_index.get(&canonical_id) {
            Some(&index) => index,
            None => {
                self.entries.push(VocabularyEntry {
                    canonical: canonical_id,
                    categories: Vec::new(),
                    synonyms: Vec::new(),
                });
                self.entry_index.insert(canonical_id, self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        let entry = &mut self.entries[index];
        if !entry.categories.contains(&category) {
            entry.categories.push(category);
        }
        for &surface in &surfaces[1..] {
            if !entry.synonyms.contains(&surface) {
                entry.synonyms.push(surface);
            }
        }

        Ok(canonical_id)
    }

    /// Defines a verb.
    ///
    /// # Errors
    ///
    /// See [`Vocabulary::define`].
    pub fn verb(&mut self, canonical: &str, synonyms: &[&str]) -> Result<WordId> {
        self.define(Category::Verb, canonical, synonyms)
    }

    /// Defines a noun.
    ///
    /// # Errors
    ///
    /// See [`Vocabulary::define`].
    pub fn noun(&mut self, canonical: &str, synonyms: &[&str]) -> Result<WordId> {
        self.define(Category::Noun, canonical, synonyms)
    }

    /// Defines an adjective.
    ///
    /// # Errors
    ///
    /// See [`Vocabulary::define`].
    pub fn adjective(&mut self, canonical: &str, synonyms: &[&str]) -> Result<WordId> {
        self.define(Category::Adjective, canonical, synonyms)
    }

    /// Defines a preposition.
    ///
    /// # Errors
    ///
    /// See [`Vocabulary::define`].
    pub fn preposition(&mut self, canonical: &str, synonyms: &[&str]) -> Result<WordId> {
        self.define(Category::Preposition, canonical, synonyms)
    }

    /// Defines a direction.
    ///
    /// # Errors
    ///
    /// See [`Vocabulary::define`].
    pub fn direction(&mut self, canonical: &str, synonyms: &[&str]) -> Result<WordId> {
        self.define(Category::Direction, canonical, synonyms)
    }

    /// Defines the words for a pronoun class. The canonical word is the
    /// class's own word ("it", "them", ...).
    ///
    /// # Errors
    ///
    /// See [`Vocabulary::define`].
    pub fn pronoun(&mut self, class: PronounClass, synonyms: &[&str]) -> Result<WordId> {
        let id = self.define(Category::Pronoun, class.word(), synonyms)?;
        self.pronouns.insert(id, class);
        Ok(id)
    }

    /// Defines the plural quantifier words.
    ///
    /// # Errors
    ///
    /// See [`Vocabulary::define`].
    pub fn all_words(&mut self, canonical: &str, synonyms: &[&str]) -> Result<WordId> {
        self.define(Category::All, canonical, synonyms)
    }

    /// Defines the words that introduce an exception to "all".
    ///
    /// # Errors
    ///
    /// See [`Vocabulary::define`].
    pub fn except_words(&mut self, canonical: &str, synonyms: &[&str]) -> Result<WordId> {
        self.define(Category::Except, canonical, synonyms)
    }

    /// Marks words as buzzwords.
    pub fn buzzwords(&mut self, words: &[&str]) {
        for word in words {
            let id = self.interner.intern(&normalize(word));
            self.buzzwords.insert(id);
        }
    }

    /// Returns every sense of a surface word, ignoring case. Unknown words
    /// have none.
    #[must_use]
    pub fn senses(&self, word: &str) -> &[Sense] {
        self.id(word)
            .and_then(|id| self.lexicon.get(&id))
            .map_or(&[], Vec::as_slice)
    }

    /// Returns the canonical word a surface word folds to in a category,
    /// ignoring case.
    #[must_use]
    pub fn canonical(&self, word: &str, category: Category) -> Option<WordId> {
        self.senses(word)
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.canonical)
    }

    /// Returns true if the word is a buzzword with no other meaning.
    #[must_use]
    pub fn is_buzzword(&self, word: &str) -> bool {
        self.id(word)
            .is_some_and(|id| self.buzzwords.contains(&id) && !self.lexicon.contains_key(&id))
    }

    /// Returns the pronoun class of a canonical pronoun word.
    #[must_use]
    pub fn pronoun_class(&self, canonical: WordId) -> Option<PronounClass> {
        self.pronouns.get(&canonical).copied()
    }

    /// Returns the text of a word id.
    #[must_use]
    pub fn name(&self, id: WordId) -> &str {
        self.interner.resolve(id).unwrap_or("?")
    }

    /// Looks up the id of a word without defining it.
    #[must_use]
    pub fn id(&self, word: &str) -> Option<WordId> {
        self.interner.lookup(&normalize(word))
    }

    /// Returns the entry for a canonical word.
    #[must_use]
    pub fn entry(&self, canonical: WordId) -> Option<&VocabularyEntry> {
        self.entry_index.get(&canonical).map(|&i| &self.entries[i])
    }

    /// Iterates over every entry in definition order.
    pub fn entries(&self) -> impl Iterator<Item = &VocabularyEntry> {
        self.entries.iter()
    }

    /// Iterates over every meaningful surface word in definition order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.interner
            .words()
            .filter(|(id, _)| self.lexicon.contains_key(id))
            .map(|(_, word)| word)
    }

    /// Returns the number of canonical entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the known word closest to `word` within `max_distance` edits.
    ///
    /// Ties go to the earliest defined word.
    #[must_use]
    pub fn suggest(&self, word: &str, max_distance: usize) -> Option<&str> {
        let word = normalize(word);
        let mut best: Option<(usize, &str)> = None;
        for candidate in self.words() {
            let distance = edit_distance(&word, candidate);
            if distance == 0 || distance > max_distance {
                continue;
            }
            if best.is_none_or(|(d, _)| distance < d) {
                best = Some((distance, candidate));
            }
        }
        best.map(|(_, w)| w)
    }

    fn sense_in(&self, surface: WordId, category: Category) -> Option<WordId> {
        self.lexicon
            .get(&surface)?
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.canonical)
    }
}

/// Levenshtein distance over chars.
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != *cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
