//! Object property flags and reachability classes.
//!
//! The world model reports an [`ObjectFlags`] set for every object. Syntax
//! rules constrain object slots with required and preferred flag sets plus a
//! [`LocationMask`] of acceptable [`LocationClass`]es.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A set of object property bits.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectFlags(u32);

impl ObjectFlags {
    /// Can be picked up.
    pub const TAKEABLE: Self = Self(1 << 0);
    /// Can be opened and closed.
    pub const OPENABLE: Self = Self(1 << 1);
    /// Currently open.
    pub const OPEN: Self = Self(1 << 2);
    /// Holds other objects.
    pub const CONTAINER: Self = Self(1 << 3);
    /// Contents are visible even when closed.
    pub const TRANSPARENT: Self = Self(1 << 4);
    /// Things rest on top of it.
    pub const SURFACE: Self = Self(1 << 5);
    /// Locked shut.
    pub const LOCKED: Self = Self(1 << 6);
    /// Never enters resolution.
    pub const INVISIBLE: Self = Self(1 << 7);
    /// Skipped by "all".
    pub const NO_ALL: Self = Self(1 << 8);
    /// A living actor.
    pub const ACTOR: Self = Self(1 << 9);
    /// Referred to as "him".
    pub const MALE: Self = Self(1 << 10);
    /// Referred to as "her".
    pub const FEMALE: Self = Self(1 << 11);
    /// Usable in combat.
    pub const WEAPON: Self = Self(1 << 12);
    /// A light source.
    pub const LIGHT: Self = Self(1 << 13);
    /// Switched on or lit.
    pub const ON: Self = Self(1 << 14);
    /// Has text to read.
    pub const READABLE: Self = Self(1 << 15);
    /// Has been handled by the player.
    pub const TOUCHED: Self = Self(1 << 16);
    /// A door.
    pub const DOOR: Self = Self(1 << 17);
    /// Can be worn.
    pub const WEARABLE: Self = Self(1 << 18);
    /// Edible.
    pub const FOOD: Self = Self(1 << 19);
    /// A tool.
    pub const TOOL: Self = Self(1 << 20);

    const NAMES: [(Self, &'static str); 21] = [
        (Self::TAKEABLE, "takeable"),
        (Self::OPENABLE, "openable"),
        (Self::OPEN, "open"),
        (Self::CONTAINER, "container"),
        (Self::TRANSPARENT, "transparent"),
        (Self::SURFACE, "surface"),
        (Self::LOCKED, "locked"),
        (Self::INVISIBLE, "invisible"),
        (Self::NO_ALL, "no-all"),
        (Self::ACTOR, "actor"),
        (Self::MALE, "male"),
        (Self::FEMALE, "female"),
        (Self::WEAPON, "weapon"),
        (Self::LIGHT, "light"),
        (Self::ON, "on"),
        (Self::READABLE, "readable"),
        (Self::TOUCHED, "touched"),
        (Self::DOOR, "door"),
        (Self::WEARABLE, "wearable"),
        (Self::FOOD, "food"),
        (Self::TOOL, "tool"),
    ];

    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns the raw bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns true if no flag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every flag in `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if any flag in `other` is set in `self`.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns the union of both sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Sets the given flags.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Clears the given flags.
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// Sets or clears the given flags.
    pub fn set(&mut self, other: Self, value: bool) {
        if value {
            self.insert(other);
        } else {
            self.remove(other);
        }
    }
}

impl BitOr for ObjectFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for ObjectFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.insert(rhs);
    }
}

impl fmt::Debug for ObjectFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = Self::NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "ObjectFlags({})", names.join(" | "))
    }
}

/// Where an object sits relative to the player.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LocationClass {
    /// Carried by the player, directly or in a carried container.
    Held,
    /// Lying in the current room.
    InRoom,
    /// Inside an open or transparent container reachable from the room.
    InOpenContainer,
    /// Visible but out of reach, or elsewhere entirely.
    NotReachable,
}

impl LocationClass {
    const fn bit(self) -> u8 {
        match self {
            Self::Held => 1 << 0,
            Self::InRoom => 1 << 1,
            Self::InOpenContainer => 1 << 2,
            Self::NotReachable => 1 << 3,
        }
    }
}

/// A set of acceptable [`LocationClass`]es for an object slot.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LocationMask(u8);

impl LocationMask {
    /// Only carried objects.
    pub const HELD: Self = Self(LocationClass::Held.bit());
    /// Only objects in the room itself.
    pub const IN_ROOM: Self = Self(LocationClass::InRoom.bit());
    /// Only objects inside open containers.
    pub const IN_OPEN_CONTAINER: Self = Self(LocationClass::InOpenContainer.bit());
    /// Only unreachable objects.
    pub const NOT_REACHABLE: Self = Self(LocationClass::NotReachable.bit());
    /// Anything the player can touch.
    pub const REACHABLE: Self = Self(Self::HELD.0 | Self::IN_ROOM.0 | Self::IN_OPEN_CONTAINER.0);
    /// Anything visible at all.
    pub const ANY: Self = Self(Self::REACHABLE.0 | Self::NOT_REACHABLE.0);

    /// Returns true if objects of this class satisfy the mask.
    #[must_use]
    pub const fn allows(self, class: LocationClass) -> bool {
        self.0 & class.bit() != 0
    }

    /// Returns the union of both masks.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for LocationMask {
    fn default() -> Self {
        Self::REACHABLE
    }
}

impl BitOr for LocationMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Debug for LocationMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let classes: Vec<_> = [
            LocationClass::Held,
            LocationClass::InRoom,
            LocationClass::InOpenContainer,
            LocationClass::NotReachable,
        ]
        .into_iter()
        .filter(|class| self.allows(*class))
        .map(|class| format!("{class:?}"))
        .collect();
        write!(f, "LocationMask({})", classes.join(" | "))
    }
}
