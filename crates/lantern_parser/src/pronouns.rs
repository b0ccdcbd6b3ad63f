//! Pronoun tracking state.
//!
//! Tracks referents for pronouns like "it", "him", "her", "them". The
//! dispatcher updates this after every successfully executed command; the
//! resolver only reads it.

use std::fmt;

use lantern_foundation::ObjectId;
use serde::{Deserialize, Serialize};

/// The pronoun classes the resolver understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PronounClass {
    /// Neuter singular.
    It,
    /// Plural.
    Them,
    /// Masculine singular.
    Him,
    /// Feminine singular.
    Her,
}

impl PronounClass {
    /// All classes, in a fixed order.
    pub const ALL: [Self; 4] = [Self::It, Self::Them, Self::Him, Self::Her];

    /// The canonical word for this class.
    #[must_use]
    pub const fn word(self) -> &'static str {
        match self {
            Self::It => "it",
            Self::Them => "them",
            Self::Him => "him",
            Self::Her => "her",
        }
    }
}

impl fmt::Display for PronounClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}

/// State for pronoun resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PronounState {
    /// "it" referent (neuter singular)
    it: Option<ObjectId>,
    /// "him" referent (masculine singular)
    him: Option<ObjectId>,
    /// "her" referent (feminine singular)
    her: Option<ObjectId>,
    /// "them" referent (plural)
    them: Vec<ObjectId>,
}

impl PronounState {
    /// Creates a new pronoun state with no referents.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the "it" referent.
    pub fn set_it(&mut self, object: ObjectId) {
        self.it = Some(object);
    }

    /// Sets the "him" referent.
    pub fn set_him(&mut self, object: ObjectId) {
        self.him = Some(object);
    }

    /// Sets the "her" referent.
    pub fn set_her(&mut self, object: ObjectId) {
        self.her = Some(object);
    }

    /// Sets the "them" referent.
    pub fn set_them(&mut self, objects: Vec<ObjectId>) {
        self.them = objects;
    }

    /// Returns the referents bound to a pronoun class.
    ///
    /// An empty result means the pronoun is unbound.
    #[must_use]
    pub fn referents(&self, class: PronounClass) -> Vec<ObjectId> {
        match class {
            PronounClass::It => self.it.into_iter().collect(),
            PronounClass::Him => self.him.into_iter().collect(),
            PronounClass::Her => self.her.into_iter().collect(),
            PronounClass::Them => self.them.clone(),
        }
    }

    /// Gets the "it" referent.
    #[must_use]
    pub fn it(&self) -> Option<ObjectId> {
        self.it
    }

    /// Gets the "him" referent.
    #[must_use]
    pub fn him(&self) -> Option<ObjectId> {
        self.him
    }

    /// Gets the "her" referent.
    #[must_use]
    pub fn her(&self) -> Option<ObjectId> {
        self.her
    }

    /// Gets the "them" referents.
    #[must_use]
    pub fn them(&self) -> &[ObjectId] {
        &self.them
    }

    /// Clears all pronoun referents.
    pub fn clear(&mut self) {
        self.it = None;
        self.him = None;
        self.her = None;
        self.them.clear();
    }
}
