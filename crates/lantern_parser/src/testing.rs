//! A minimal in-memory world for unit tests.

use lantern_foundation::{LocationClass, ObjectFlags, ObjectId};

use crate::world::WorldModel;

struct TestObject {
    synonyms: Vec<String>,
    adjectives: Vec<String>,
    flags: ObjectFlags,
    location: LocationClass,
    hidden: bool,
}

pub(crate) struct TestWorld {
    objects: Vec<TestObject>,
    won: bool,
}

impl TestWorld {
    pub(crate) fn new() -> Self {
        Self {
            objects: Vec::new(),
            won: false,
        }
    }

    /// Adds an object lying in the room. Ids start at 1; 0 is the room.
    pub(crate) fn add(&mut self, noun: &str, adjectives: &[&str], flags: ObjectFlags) -> ObjectId {
        self.objects.push(TestObject {
            synonyms: vec![noun.to_string()],
            adjectives: adjectives.iter().map(ToString::to_string).collect(),
            flags,
            location: LocationClass::InRoom,
            hidden: false,
        });
        ObjectId::new(self.objects.len() as u32)
    }

    pub(crate) fn set_location(&mut self, object: ObjectId, location: LocationClass) {
        self.objects[object.index() as usize - 1].location = location;
    }

    pub(crate) fn set_flags(&mut self, object: ObjectId, flags: ObjectFlags) {
        self.objects[object.index() as usize - 1].flags = flags;
    }

    /// Keeps the object in the room but drops it from the visible set, as
    /// a dark room would.
    pub(crate) fn hide(&mut self, object: ObjectId) {
        self.objects[object.index() as usize - 1].hidden = true;
    }

    fn get(&self, object: ObjectId) -> &TestObject {
        &self.objects[object.index() as usize - 1]
    }
}

impl WorldModel for TestWorld {
    fn visible_objects(&self) -> Vec<ObjectId> {
        (1..=self.objects.len() as u32)
            .map(ObjectId::new)
            .filter(|&o| !self.get(o).hidden)
            .collect()
    }

    fn object_flags(&self, object: ObjectId) -> ObjectFlags {
        self.get(object).flags
    }

    fn object_synonyms(&self, object: ObjectId) -> &[String] {
        &self.get(object).synonyms
    }

    fn object_adjectives(&self, object: ObjectId) -> &[String] {
        &self.get(object).adjectives
    }

    fn current_room(&self) -> ObjectId {
        ObjectId::new(0)
    }

    fn location_class(&self, object: ObjectId, _room: ObjectId) -> LocationClass {
        self.get(object).location
    }

    fn is_win_condition_met(&self) -> bool {
        self.won
    }
}
