//! Noun phrase resolution.
//!
//! Maps a noun phrase to objects drawn from the visibility set:
//!
//! 1. Pronouns read [`PronounState`] and skip name matching, but a referent
//!    must still be visible and not flagged `INVISIBLE`.
//! 2. "all" starts from every visible object not flagged `INVISIBLE` or
//!    `NO_ALL`, keeps those with the slot's preferred flags, and removes
//!    whatever the "except" phrase names.
//! 3. Otherwise objects must answer to the head noun and every adjective.
//! 4. Finally every candidate must satisfy the slot constraint: required
//!    flags and an allowed location class.

use lantern_foundation::{LocationClass, LocationMask, ObjectFlags, ObjectId};
use log::debug;

use crate::grammar::ObjectConstraint;
use crate::noun_phrase::{Head, NounPhrase, Quantifier};
use crate::pronouns::{PronounClass, PronounState};
use crate::world::WorldModel;

/// Why a phrase resolved to nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmptyReason {
    /// Nothing visible answers to the phrase.
    NotVisible,
    /// The named object must be held and is not.
    NotHeld(ObjectId),
    /// The named object is out of reach.
    Unreachable(ObjectId),
    /// The named object lacks a required flag.
    Unsuitable(ObjectId),
    /// The pronoun has no referent yet.
    PronounUnbound(PronounClass),
    /// "all" matched nothing.
    NothingForAll,
}

/// Result of resolving one noun phrase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// No suitable object.
    Empty(EmptyReason),
    /// Exactly one object.
    Single(ObjectId),
    /// Several equally good candidates; needs disambiguation.
    Multiple(Vec<ObjectId>),
    /// A deliberate plural selection ("all", "them").
    Many(Vec<ObjectId>),
}

/// Resolves noun phrases against the world.
pub struct Resolver;

impl Resolver {
    /// Resolves a phrase for an object slot.
    pub fn resolve<W: WorldModel + ?Sized>(
        phrase: &NounPhrase,
        constraint: &ObjectConstraint,
        world: &W,
        pronouns: &PronounState,
    ) -> Resolution {
        let resolution = if let Some(class) = phrase.pronoun_class() {
            Self::resolve_pronoun(class, constraint, world, pronouns)
        } else if phrase.is_plural() {
            Self::resolve_all(phrase, constraint, world, pronouns)
        } else {
            Self::resolve_named(phrase, constraint, world)
        };
        debug!("resolved {phrase:?} -> {resolution:?}");
        resolution
    }

    fn resolve_pronoun<W: WorldModel + ?Sized>(
        class: PronounClass,
        constraint: &ObjectConstraint,
        world: &W,
        pronouns: &PronounState,
    ) -> Resolution {
        let referents = pronouns.referents(class);
        if referents.is_empty() {
            return Resolution::Empty(EmptyReason::PronounUnbound(class));
        }

        let visible = world.visible_objects();
        let seen: Vec<_> = referents
            .into_iter()
            .filter(|o| visible.contains(o))
            .filter(|&o| !world.object_flags(o).contains(ObjectFlags::INVISIBLE))
            .collect();
        let Some(&first) = seen.first() else {
            return Resolution::Empty(EmptyReason::NotVisible);
        };

        let suitable: Vec<_> = seen
            .iter()
            .copied()
            .filter(|&o| Self::satisfies(world, o, constraint))
            .collect();

        match suitable.as_slice() {
            [] => Resolution::Empty(Self::reason(world, first, constraint)),
            [only] => Resolution::Single(*only),
            _ => Resolution::Many(suitable),
        }
    }

    fn resolve_all<W: WorldModel + ?Sized>(
        phrase: &NounPhrase,
        constraint: &ObjectConstraint,
        world: &W,
        pronouns: &PronounState,
    ) -> Resolution {
        let excluded: Vec<ObjectId> = match &phrase.quantifier {
            Quantifier::AllExcept(inner) => match inner.pronoun_class() {
                Some(class) => pronouns.referents(class),
                None => world
                    .visible_objects()
                    .into_iter()
                    .filter(|&o| Self::matches_phrase(world, o, inner))
                    .collect(),
            },
            _ => Vec::new(),
        };

        let objects: Vec<_> = world
            .visible_objects()
            .into_iter()
            .filter(|&o| {
                let flags = world.object_flags(o);
                !flags.intersects(ObjectFlags::INVISIBLE | ObjectFlags::NO_ALL)
                    && flags.contains(constraint.preferred)
            })
            .filter(|&o| Self::satisfies(world, o, constraint))
            .filter(|o| !excluded.contains(o))
            .collect();

        if objects.is_empty() {
            Resolution::Empty(EmptyReason::NothingForAll)
        } else {
            Resolution::Many(objects)
        }
    }

    fn resolve_named<W: WorldModel + ?Sized>(
        phrase: &NounPhrase,
        constraint: &ObjectConstraint,
        world: &W,
    ) -> Resolution {
        let named: Vec<_> = world
            .visible_objects()
            .into_iter()
            .filter(|&o| !world.object_flags(o).contains(ObjectFlags::INVISIBLE))
            .filter(|&o| Self::matches_phrase(world, o, phrase))
            .collect();

        let Some(&first) = named.first() else {
            return Resolution::Empty(EmptyReason::NotVisible);
        };

        let suitable: Vec<_> = named
            .iter()
            .copied()
            .filter(|&o| Self::satisfies(world, o, constraint))
            .collect();

        match suitable.as_slice() {
            [] => Resolution::Empty(Self::reason(world, first, constraint)),
            [only] => Resolution::Single(*only),
            _ => Resolution::Multiple(suitable),
        }
    }

    /// Returns true if the object answers to the phrase's head noun and
    /// every one of its adjectives.
    pub fn matches_phrase<W: WorldModel + ?Sized>(world: &W, object: ObjectId, phrase: &NounPhrase) -> bool {
        let Some(Head::Noun(noun)) = &phrase.head else {
            return false;
        };
        let synonyms = world.object_synonyms(object);
        if !synonyms.iter().any(|s| noun.matches(s)) {
            return false;
        }
        let adjectives = world.object_adjectives(object);
        phrase
            .adjectives
            .iter()
            .all(|adj| adjectives.iter().any(|a| adj.matches(a)))
    }

    /// Returns true if the object meets the slot constraint.
    pub fn satisfies<W: WorldModel + ?Sized>(world: &W, object: ObjectId, constraint: &ObjectConstraint) -> bool {
        let room = world.current_room();
        world.object_flags(object).contains(constraint.required)
            && constraint.locations.allows(world.location_class(object, room))
    }

    fn reason<W: WorldModel + ?Sized>(world: &W, object: ObjectId, constraint: &ObjectConstraint) -> EmptyReason {
        let class = world.location_class(object, world.current_room());
        if constraint.locations.allows(class) {
            EmptyReason::Unsuitable(object)
        } else if constraint.locations == LocationMask::HELD {
            EmptyReason::NotHeld(object)
        } else if class == LocationClass::Held {
            EmptyReason::Unsuitable(object)
        } else {
            EmptyReason::Unreachable(object)
        }
    }
}
