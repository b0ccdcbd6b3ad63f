//! The demo world: three rooms, a few items, and a troll.
//!
//! Rooms and items share one id space. Objects are stored in a persistent
//! vector so a save is a cheap clone of the whole world.

use im::Vector;
use lantern_foundation::{LocationClass, ObjectFlags, ObjectId};
use lantern_parser::WorldModel;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// West of House.
pub const WEST_OF_HOUSE: ObjectId = ObjectId::new(0);
/// Living Room.
pub const LIVING_ROOM: ObjectId = ObjectId::new(1);
/// Cellar.
pub const CELLAR: ObjectId = ObjectId::new(2);
/// The small mailbox.
pub const MAILBOX: ObjectId = ObjectId::new(3);
/// The leaflet inside the mailbox.
pub const LEAFLET: ObjectId = ObjectId::new(4);
/// The brass lantern.
pub const LANTERN: ObjectId = ObjectId::new(5);
/// The rusty lamp.
pub const RUSTY_LAMP: ObjectId = ObjectId::new(6);
/// The elvish sword.
pub const SWORD: ObjectId = ObjectId::new(7);
/// The trophy case.
pub const TROPHY_CASE: ObjectId = ObjectId::new(8);
/// The troll.
pub const TROLL: ObjectId = ObjectId::new(9);

/// Where a thing is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Place {
    /// Out of play.
    Nowhere,
    /// In the player's hands.
    Carried,
    /// In a room or container.
    In(ObjectId),
}

/// A room or an item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thing {
    /// Short name, e.g. "brass lantern".
    pub name: String,
    /// Nouns it answers to.
    pub synonyms: Vec<String>,
    /// Adjectives it answers to.
    pub adjectives: Vec<String>,
    /// Property flags.
    pub flags: ObjectFlags,
    /// Where it is. Rooms are `Nowhere`.
    pub place: Place,
    /// Long description.
    pub description: String,
    /// Text for readable things.
    pub text: Option<String>,
    /// Exits, for rooms: canonical direction and destination.
    pub exits: Vec<(String, ObjectId)>,
    /// True for rooms.
    pub is_room: bool,
}

impl Thing {
    fn room(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            synonyms: Vec::new(),
            adjectives: Vec::new(),
            flags: ObjectFlags::empty(),
            place: Place::Nowhere,
            description: description.to_string(),
            text: None,
            exits: Vec::new(),
            is_room: true,
        }
    }

    fn item(name: &str, synonyms: &[&str], adjectives: &[&str], flags: ObjectFlags, place: Place) -> Self {
        Self {
            name: name.to_string(),
            synonyms: synonyms.iter().map(ToString::to_string).collect(),
            adjectives: adjectives.iter().map(ToString::to_string).collect(),
            flags,
            place,
            description: String::new(),
            text: None,
            exits: Vec::new(),
            is_room: false,
        }
    }

    fn described(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    fn with_exit(mut self, direction: &str, to: ObjectId) -> Self {
        self.exits.push((direction.to_string(), to));
        self
    }
}

/// The demo game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoWorld {
    things: Vector<Thing>,
    here: ObjectId,
    health: u32,
    troll_health: u32,
    battery: u32,
    thief_stop: usize,
    seed: u64,
    rolls: u64,
    won: bool,
}

/// Player hit points at the start.
pub const PLAYER_HEALTH: u32 = 3;
/// Troll hit points at the start.
pub const TROLL_HEALTH: u32 = 2;
/// Lantern turns at the start.
pub const LANTERN_BATTERY: u32 = 30;

impl DemoWorld {
    /// Builds the starting world. `seed` drives combat rolls.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let at = Place::In;
        let things = vec![
            Thing::room(
                "West of House",
                "You are standing in an open field west of a white house.",
            )
            .with_exit("east", LIVING_ROOM),
            Thing::room(
                "Living Room",
                "You are in the living room. A dark staircase leads down.",
            )
            .with_exit("west", WEST_OF_HOUSE)
            .with_exit("down", CELLAR),
            Thing::room("Cellar", "You are in a damp cellar. Stairs lead up.").with_exit("up", LIVING_ROOM),
            Thing::item(
                "small mailbox",
                &["mailbox", "box"],
                &["small"],
                ObjectFlags::CONTAINER | ObjectFlags::OPENABLE,
                at(WEST_OF_HOUSE),
            )
            .described("It's a small mailbox."),
            Thing::item(
                "leaflet",
                &["leaflet", "booklet", "mail"],
                &[],
                ObjectFlags::TAKEABLE | ObjectFlags::READABLE,
                at(MAILBOX),
            )
            .with_text("WELCOME TO LANTERN! This is a small game of adventure and peril."),
            Thing::item(
                "brass lantern",
                &["lantern", "lamp"],
                &["brass"],
                ObjectFlags::TAKEABLE | ObjectFlags::LIGHT,
                at(LIVING_ROOM),
            )
            .described("A battery-powered brass lantern."),
            Thing::item(
                "rusty lamp",
                &["lamp"],
                &["rusty", "old"],
                ObjectFlags::TAKEABLE,
                at(LIVING_ROOM),
            )
            .described("An old oil lamp, rusted beyond use."),
            Thing::item(
                "elvish sword",
                &["sword", "blade"],
                &["elvish", "antique"],
                ObjectFlags::TAKEABLE | ObjectFlags::WEAPON,
                at(LIVING_ROOM),
            )
            .described("An elvish sword of great antiquity."),
            Thing::item(
                "trophy case",
                &["case"],
                &["trophy", "glass"],
                ObjectFlags::CONTAINER | ObjectFlags::OPENABLE | ObjectFlags::TRANSPARENT | ObjectFlags::NO_ALL,
                at(LIVING_ROOM),
            )
            .described("A handsome glass trophy case."),
            Thing::item(
                "troll",
                &["troll"],
                &["nasty"],
                ObjectFlags::ACTOR | ObjectFlags::MALE | ObjectFlags::NO_ALL,
                at(CELLAR),
            )
            .described("A nasty-looking troll, brandishing a bloody axe, blocks all passages out of the room."),
        ];

        Self {
            things: things.into_iter().collect(),
            here: WEST_OF_HOUSE,
            health: PLAYER_HEALTH,
            troll_health: TROLL_HEALTH,
            battery: LANTERN_BATTERY,
            thief_stop: 0,
            seed,
            rolls: 0,
            won: false,
        }
    }

    /// Gets a thing.
    #[must_use]
    pub fn thing(&self, object: ObjectId) -> Option<&Thing> {
        self.things.get(object.index() as usize)
    }

    fn thing_mut(&mut self, object: ObjectId) -> Option<&mut Thing> {
        self.things.get_mut(object.index() as usize)
    }

    /// The player's room.
    #[must_use]
    pub fn here(&self) -> ObjectId {
        self.here
    }

    /// Moves the player.
    pub fn set_here(&mut self, room: ObjectId) {
        self.here = room;
    }

    /// Where a thing is.
    #[must_use]
    pub fn place(&self, object: ObjectId) -> Place {
        self.thing(object).map_or(Place::Nowhere, |t| t.place)
    }

    /// Moves a thing.
    pub fn move_to(&mut self, object: ObjectId, place: Place) {
        if let Some(thing) = self.thing_mut(object) {
            thing.place = place;
        }
    }

    /// Returns true if the thing has every flag in `flags`.
    #[must_use]
    pub fn has(&self, object: ObjectId, flags: ObjectFlags) -> bool {
        self.object_flags(object).contains(flags)
    }

    /// Sets or clears flags on a thing.
    pub fn set_flag(&mut self, object: ObjectId, flags: ObjectFlags, on: bool) {
        if let Some(thing) = self.thing_mut(object) {
            thing.flags.set(flags, on);
        }
    }

    /// Things directly inside `place`, in id order.
    #[must_use]
    pub fn contents(&self, place: Place) -> Vec<ObjectId> {
        self.ids().filter(|&o| self.place(o) == place).collect()
    }

    /// Returns true if `inner` is inside `outer`, at any depth.
    #[must_use]
    pub fn is_inside(&self, inner: ObjectId, outer: ObjectId) -> bool {
        let mut current = self.place(inner);
        while let Place::In(parent) = current {
            if parent == outer {
                return true;
            }
            current = self.place(parent);
        }
        false
    }

    /// The destination of an exit from the current room.
    #[must_use]
    pub fn exit(&self, direction: &str) -> Option<ObjectId> {
        self.thing(self.here)?
            .exits
            .iter()
            .find(|(d, _)| d == direction)
            .map(|&(_, to)| to)
    }

    /// Player hit points.
    #[must_use]
    pub fn health(&self) -> u32 {
        self.health
    }

    /// Takes hit points from the player. Returns the remaining health.
    pub fn wound_player(&mut self, damage: u32) -> u32 {
        self.health = self.health.saturating_sub(damage);
        self.health
    }

    /// Troll hit points.
    #[must_use]
    pub fn troll_health(&self) -> u32 {
        self.troll_health
    }

    /// Returns true while the troll is in play.
    #[must_use]
    pub fn troll_alive(&self) -> bool {
        self.troll_health > 0
    }

    /// Takes hit points from the troll. Returns the remaining health.
    pub fn wound_troll(&mut self, damage: u32) -> u32 {
        self.troll_health = self.troll_health.saturating_sub(damage);
        if self.troll_health == 0 {
            self.move_to(TROLL, Place::Nowhere);
            self.won = true;
        }
        self.troll_health
    }

    /// Lantern turns left.
    #[must_use]
    pub fn battery(&self) -> u32 {
        self.battery
    }

    /// Uses one turn of lantern power. Returns what is left.
    pub fn drain_battery(&mut self) -> u32 {
        self.battery = self.battery.saturating_sub(1);
        self.battery
    }

    /// Index into the thief's route.
    #[must_use]
    pub fn thief_stop(&self) -> usize {
        self.thief_stop
    }

    /// Moves the thief along his route.
    pub fn set_thief_stop(&mut self, stop: usize) {
        self.thief_stop = stop;
    }

    /// Rolls a number in `1..=sides`. Deterministic for a given seed and
    /// number of earlier rolls, so restored games replay identically.
    pub fn roll(&mut self, sides: u32) -> u32 {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed.wrapping_add(self.rolls));
        self.rolls += 1;
        rng.gen_range(1..=sides.max(1))
    }

    /// Marks the game as won.
    pub fn set_won(&mut self, won: bool) {
        self.won = won;
    }

    fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        (0..self.things.len()).filter_map(|i| u32::try_from(i).ok().map(ObjectId::new))
    }

    fn is_open(&self, container: ObjectId) -> bool {
        self.has(container, ObjectFlags::OPEN)
    }

    fn is_seen(&self, object: ObjectId) -> bool {
        match self.place(object) {
            Place::Carried => true,
            Place::In(parent) if parent == self.here => true,
            Place::In(parent) if self.thing(parent).is_some_and(|t| !t.is_room) => {
                (self.is_open(parent) || self.has(parent, ObjectFlags::TRANSPARENT)) && self.is_seen(parent)
            }
            _ => false,
        }
    }

    fn class_in(&self, object: ObjectId, room: ObjectId) -> LocationClass {
        match self.place(object) {
            Place::Carried => LocationClass::Held,
            Place::In(parent) if parent == room => LocationClass::InRoom,
            Place::In(parent) if self.thing(parent).is_some_and(|t| !t.is_room) => {
                let reachable = self.class_in(parent, room) != LocationClass::NotReachable;
                if reachable && self.is_open(parent) {
                    LocationClass::InOpenContainer
                } else {
                    LocationClass::NotReachable
                }
            }
            _ => LocationClass::NotReachable,
        }
    }
}

impl WorldModel for DemoWorld {
    fn visible_objects(&self) -> Vec<ObjectId> {
        self.ids()
            .filter(|&o| self.thing(o).is_some_and(|t| !t.is_room))
            .filter(|&o| self.is_seen(o))
            .collect()
    }

    fn object_flags(&self, object: ObjectId) -> ObjectFlags {
        self.thing(object).map_or(ObjectFlags::empty(), |t| t.flags)
    }

    fn object_synonyms(&self, object: ObjectId) -> &[String] {
        self.thing(object).map_or(&[], |t| t.synonyms.as_slice())
    }

    fn object_adjectives(&self, object: ObjectId) -> &[String] {
        self.thing(object).map_or(&[], |t| t.adjectives.as_slice())
    }

    fn current_room(&self) -> ObjectId {
        self.here
    }

    fn location_class(&self, object: ObjectId, room: ObjectId) -> LocationClass {
        self.class_in(object, room)
    }

    fn is_win_condition_met(&self) -> bool {
        self.won
    }

    fn describe(&self, object: ObjectId) -> String {
        self.thing(object).map_or_else(|| "thing".to_string(), |t| t.name.clone())
    }
}
