//! The world-model collaborator.
//!
//! The parser never owns objects. It queries whatever implements
//! [`WorldModel`] for what is visible and what each object is called.

use lantern_foundation::{LocationClass, ObjectFlags, ObjectId};

/// Read access to the game world, as needed for resolution and dispatch.
pub trait WorldModel {
    /// Objects the player can currently perceive, in a stable order.
    fn visible_objects(&self) -> Vec<ObjectId>;

    /// Property flags of an object.
    fn object_flags(&self, object: ObjectId) -> ObjectFlags;

    /// Nouns the object answers to.
    fn object_synonyms(&self, object: ObjectId) -> &[String];

    /// Adjectives the object answers to.
    fn object_adjectives(&self, object: ObjectId) -> &[String];

    /// The room the player is in.
    fn current_room(&self) -> ObjectId;

    /// Where the object is relative to the player in `room`.
    fn location_class(&self, object: ObjectId, room: ObjectId) -> LocationClass;

    /// Whether the game has been won.
    fn is_win_condition_met(&self) -> bool;

    /// A short name for messages, e.g. "brass lantern".
    fn describe(&self, object: ObjectId) -> String {
        let mut words: Vec<&str> = self
            .object_adjectives(object)
            .first()
            .map(String::as_str)
            .into_iter()
            .collect();
        words.push(
            self.object_synonyms(object)
                .first()
                .map_or("thing", String::as_str),
        );
        words.join(" ")
    }
}
