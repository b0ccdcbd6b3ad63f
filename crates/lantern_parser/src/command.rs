//! The resolved, executable command.

use lantern_foundation::{ActionId, Error, ObjectId, Result, WordId};
use serde::{Deserialize, Serialize};

use crate::grammar::{RuleId, SyntaxRule};

/// The direct object of a command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectObject {
    /// The rule has no object slots.
    None,
    /// A single object.
    One(ObjectId),
    /// An ordered set of objects from "all" or "them".
    Many(Vec<ObjectId>),
}

impl DirectObject {
    /// Returns the objects in order.
    #[must_use]
    pub fn objects(&self) -> &[ObjectId] {
        match self {
            Self::None => &[],
            Self::One(object) => std::slice::from_ref(object),
            Self::Many(objects) => objects,
        }
    }

    /// Returns the object if there is exactly one.
    #[must_use]
    pub fn single(&self) -> Option<ObjectId> {
        match self {
            Self::One(object) => Some(*object),
            _ => None,
        }
    }
}

/// A fully resolved command, ready for dispatch.
///
/// Every object slot of the rule is filled; construction fails otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedCommand {
    rule: RuleId,
    verb: WordId,
    action: ActionId,
    direct: DirectObject,
    indirect: Option<ObjectId>,
    direction: Option<WordId>,
}

impl ResolvedCommand {
    /// Builds a command for `rule`.
    ///
    /// # Errors
    ///
    /// Returns an invalid grammar error if the objects or direction do not
    /// fill the rule's slots exactly.
    pub fn new(
        rule: &SyntaxRule,
        direct: DirectObject,
        indirect: Option<ObjectId>,
        direction: Option<WordId>,
    ) -> Result<Self> {
        let slots = rule.object_slots();
        let fail = |message: &str| Err(Error::invalid_grammar(format!("{:?}", rule.verb), message));

        match (&direct, slots) {
            (DirectObject::None, 0) => {}
            (DirectObject::None, _) => return fail("direct object slot is empty"),
            (DirectObject::Many(objects), _) if objects.is_empty() => {
                return fail("direct object slot is empty");
            }
            (_, 0) => return fail("rule takes no objects"),
            _ => {}
        }
        if (slots == 2) != indirect.is_some() {
            return fail("indirect object does not match the rule");
        }
        if rule.takes_direction() != direction.is_some() {
            return fail("direction does not match the rule");
        }

        Ok(Self {
            rule: rule.id,
            verb: rule.verb,
            action: rule.action,
            direct,
            indirect,
            direction,
        })
    }

    /// The same command applied to one of its direct objects.
    #[must_use]
    pub fn for_object(&self, object: ObjectId) -> Self {
        Self {
            direct: DirectObject::One(object),
            ..self.clone()
        }
    }

    /// The rule that matched.
    #[must_use]
    pub fn rule(&self) -> RuleId {
        self.rule
    }

    /// The canonical verb.
    #[must_use]
    pub fn verb(&self) -> WordId {
        self.verb
    }

    /// The default handler.
    #[must_use]
    pub fn action(&self) -> ActionId {
        self.action
    }

    /// The direct object(s).
    #[must_use]
    pub fn direct(&self) -> &DirectObject {
        &self.direct
    }

    /// The indirect object.
    #[must_use]
    pub fn indirect(&self) -> Option<ObjectId> {
        self.indirect
    }

    /// The canonical direction.
    #[must_use]
    pub fn direction(&self) -> Option<WordId> {
        self.direction
    }
}
