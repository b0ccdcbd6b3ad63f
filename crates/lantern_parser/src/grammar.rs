//! Syntax rules and the grammar table.
//!
//! A syntax rule is a verb, an ordered pattern of slots, and the action to
//! run. Rules sharing a verb are tried most specific first: more object
//! slots beat fewer, then more literal slots (prepositions, directions) beat
//! fewer, then declaration order.

use std::collections::HashMap;

use lantern_foundation::{ActionId, Error, LocationMask, ObjectFlags, Result, WordId};
use serde::{Deserialize, Serialize};

/// Identity of a syntax rule within its grammar table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleId(pub u32);

/// Constraints on what may fill an object slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObjectConstraint {
    /// Flags every candidate must carry.
    pub required: ObjectFlags,
    /// Flags that win silent tie-breaks and restrict "all".
    pub preferred: ObjectFlags,
    /// Where candidates may be.
    pub locations: LocationMask,
    /// Whether the slot accepts several objects ("all", "them").
    pub many: bool,
}

impl Default for ObjectConstraint {
    fn default() -> Self {
        Self {
            required: ObjectFlags::empty(),
            preferred: ObjectFlags::empty(),
            locations: LocationMask::REACHABLE,
            many: false,
        }
    }
}

impl ObjectConstraint {
    /// An unconstrained slot accepting any reachable object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the given flags.
    #[must_use]
    pub fn require(mut self, flags: ObjectFlags) -> Self {
        self.required |= flags;
        self
    }

    /// Prefers the given flags.
    #[must_use]
    pub fn prefer(mut self, flags: ObjectFlags) -> Self {
        self.preferred |= flags;
        self
    }

    /// Restricts the allowed locations.
    #[must_use]
    pub fn locations(mut self, locations: LocationMask) -> Self {
        self.locations = locations;
        self
    }

    /// Accepts several objects.
    #[must_use]
    pub fn many(mut self) -> Self {
        self.many = true;
        self
    }
}

/// One position in a syntax rule's pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    /// The verb itself. Always first.
    Verb,
    /// A noun phrase naming one or more objects.
    Object(ObjectConstraint),
    /// This exact preposition.
    Preposition(WordId),
    /// Any direction word.
    Direction,
}

/// A syntax rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxRule {
    /// Rule identity.
    pub id: RuleId,
    /// The canonical verb.
    pub verb: WordId,
    /// The slot pattern, starting with [`Slot::Verb`].
    pub pattern: Vec<Slot>,
    /// The handler to run.
    pub action: ActionId,
}

impl SyntaxRule {
    /// Returns the number of object slots.
    #[must_use]
    pub fn object_slots(&self) -> usize {
        self.pattern
            .iter()
            .filter(|s| matches!(s, Slot::Object(_)))
            .count()
    }

    /// Returns the constraint of the n-th object slot.
    #[must_use]
    pub fn object_constraint(&self, n: usize) -> Option<&ObjectConstraint> {
        self.pattern
            .iter()
            .filter_map(|s| match s {
                Slot::Object(c) => Some(c),
                _ => None,
            })
            .nth(n)
    }

    /// Returns true if the pattern has a direction slot.
    #[must_use]
    pub fn takes_direction(&self) -> bool {
        self.pattern.contains(&Slot::Direction)
    }

    /// Specificity key; higher sorts first.
    #[must_use]
    pub fn specificity(&self) -> (usize, usize) {
        let literals = self
            .pattern
            .iter()
            .filter(|s| matches!(s, Slot::Preposition(_) | Slot::Direction))
            .count();
        (self.object_slots(), literals)
    }
}

/// Builds a syntax rule pattern.
#[derive(Clone, Debug)]
pub struct RuleBuilder {
    verb: WordId,
    action: ActionId,
    pattern: Vec<Slot>,
}

impl RuleBuilder {
    /// Starts a rule for `verb` that runs `action`.
    #[must_use]
    pub fn new(verb: WordId, action: ActionId) -> Self {
        Self {
            verb,
            action,
            pattern: vec![Slot::Verb],
        }
    }

    /// Appends an object slot.
    #[must_use]
    pub fn object(mut self, constraint: ObjectConstraint) -> Self {
        self.pattern.push(Slot::Object(constraint));
        self
    }

    /// Appends a preposition slot.
    #[must_use]
    pub fn preposition(mut self, preposition: WordId) -> Self {
        self.pattern.push(Slot::Preposition(preposition));
        self
    }

    /// Appends a direction slot.
    #[must_use]
    pub fn direction(mut self) -> Self {
        self.pattern.push(Slot::Direction);
        self
    }

    /// Appends an arbitrary slot.
    #[must_use]
    pub fn slot(mut self, slot: Slot) -> Self {
        self.pattern.push(slot);
        self
    }

    fn validate(&self) -> Result<()> {
        let fail = |message: &str| Err(Error::invalid_grammar(format!("{:?}", self.verb), message));

        if self.pattern.first() != Some(&Slot::Verb) {
            return fail("pattern must start with the verb");
        }
        if self.pattern.iter().filter(|s| **s == Slot::Verb).count() != 1 {
            return fail("pattern must contain exactly one verb slot");
        }
        let objects: Vec<_> = self
            .pattern
            .iter()
            .filter_map(|s| match s {
                Slot::Object(c) => Some(c),
                _ => None,
            })
            .collect();
        if objects.len() > 2 {
            return fail("at most two object slots are allowed");
        }
        if objects.iter().skip(1).any(|c| c.many) {
            return fail("only the direct object slot may accept several objects");
        }
        if self.pattern.iter().filter(|s| **s == Slot::Direction).count() > 1 {
            return fail("at most one direction slot is allowed");
        }
        Ok(())
    }
}

/// The closed set of syntax rules, indexed by verb.
#[derive(Clone, Debug, Default)]
pub struct GrammarTable {
    rules: Vec<SyntaxRule>,
    /// Verb -> rule indices, most specific first.
    by_verb: HashMap<WordId, Vec<usize>>,
    implicit_direction_verb: Option<WordId>,
}

impl GrammarTable {
    /// Creates an empty grammar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule.
    ///
    /// # Errors
    ///
    /// Returns an invalid grammar error if the pattern is malformed.
    pub fn add(&mut self, builder: RuleBuilder) -> Result<RuleId> {
        builder.validate()?;

        let index = self.rules.len();
        let id = RuleId(u32::try_from(index).map_err(|_| Error::internal("too many syntax rules"))?);
        self.rules.push(SyntaxRule {
            id,
            verb: builder.verb,
            pattern: builder.pattern,
            action: builder.action,
        });

        let rules = &self.rules;
        let indices = self.by_verb.entry(builder.verb).or_default();
        indices.push(index);
        // Stable: equal specificity keeps declaration order.
        indices.sort_by(|&a, &b| rules[b].specificity().cmp(&rules[a].specificity()));

        Ok(id)
    }

    /// Sets the verb a bare direction ("north") stands for.
    pub fn set_implicit_direction_verb(&mut self, verb: WordId) {
        self.implicit_direction_verb = Some(verb);
    }

    /// The verb a bare direction stands for.
    #[must_use]
    pub fn implicit_direction_verb(&self) -> Option<WordId> {
        self.implicit_direction_verb
    }

    /// Returns the rules for a verb, most specific first.
    pub fn rules_for(&self, verb: WordId) -> impl Iterator<Item = &SyntaxRule> {
        self.by_verb
            .get(&verb)
            .into_iter()
            .flatten()
            .map(|&i| &self.rules[i])
    }

    /// Returns true if any rule uses this verb.
    #[must_use]
    pub fn has_verb(&self, verb: WordId) -> bool {
        self.by_verb.contains_key(&verb)
    }

    /// Iterates every rule in declaration order.
    pub fn rules(&self) -> impl Iterator<Item = &SyntaxRule> {
        self.rules.iter()
    }

    /// Looks up a rule by id.
    #[must_use]
    pub fn rule(&self, id: RuleId) -> Option<&SyntaxRule> {
        self.rules.get(id.0 as usize)
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
