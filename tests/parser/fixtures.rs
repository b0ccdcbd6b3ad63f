//! Shared vocabulary, grammar, and world for parser tests.

use lantern_foundation::{ActionId, LocationClass, LocationMask, ObjectFlags, ObjectId};
use lantern_parser::{
    GrammarTable, ObjectConstraint, Parser, PronounClass, RuleBuilder, Vocabulary, WorldModel,
};

pub const TAKE: ActionId = ActionId::new(1);
pub const DROP: ActionId = ActionId::new(2);
pub const PUT: ActionId = ActionId::new(3);
pub const OPEN: ActionId = ActionId::new(4);
pub const LOOK: ActionId = ActionId::new(5);
pub const EXAMINE: ActionId = ActionId::new(6);
pub const WALK: ActionId = ActionId::new(7);
pub const ATTACK: ActionId = ActionId::new(8);
pub const ATTACK_WITH: ActionId = ActionId::new(9);

pub fn vocabulary() -> Vocabulary {
    let mut vocab = Vocabulary::new();
    vocab.verb("take", &["get", "grab"]).unwrap();
    vocab.verb("drop", &[]).unwrap();
    vocab.verb("put", &["place"]).unwrap();
    vocab.verb("open", &[]).unwrap();
    vocab.verb("look", &["l"]).unwrap();
    vocab.verb("walk", &["go"]).unwrap();
    vocab.verb("attack", &["kill", "hit"]).unwrap();
    vocab.preposition("in", &["into"]).unwrap();
    vocab.preposition("at", &[]).unwrap();
    vocab.preposition("with", &[]).unwrap();
    vocab.direction("north", &["n"]).unwrap();
    vocab.direction("south", &["s"]).unwrap();
    vocab.noun("lamp", &[]).unwrap();
    vocab.noun("lantern", &[]).unwrap();
    vocab.noun("sword", &["blade"]).unwrap();
    vocab.noun("box", &["crate"]).unwrap();
    vocab.noun("troll", &[]).unwrap();
    vocab.noun("coin", &[]).unwrap();
    vocab.adjective("brass", &[]).unwrap();
    vocab.adjective("rusty", &["old"]).unwrap();
    vocab.adjective("red", &[]).unwrap();
    vocab.adjective("blue", &[]).unwrap();
    vocab.pronoun(PronounClass::It, &[]).unwrap();
    vocab.pronoun(PronounClass::Them, &[]).unwrap();
    vocab.pronoun(PronounClass::Him, &[]).unwrap();
    vocab.pronoun(PronounClass::Her, &[]).unwrap();
    vocab.all_words("all", &["everything"]).unwrap();
    vocab.except_words("except", &["but"]).unwrap();
    vocab.buzzwords(&["the", "a", "one"]);
    vocab
}

pub fn grammar(vocab: &Vocabulary) -> GrammarTable {
    let word = |w: &str| vocab.id(w).unwrap();
    let mut grammar = GrammarTable::new();
    grammar
        .add(RuleBuilder::new(word("take"), TAKE).object(ObjectConstraint::new().prefer(ObjectFlags::TAKEABLE).many()))
        .unwrap();
    grammar
        .add(RuleBuilder::new(word("drop"), DROP).object(ObjectConstraint::new().locations(LocationMask::HELD).many()))
        .unwrap();
    grammar
        .add(
            RuleBuilder::new(word("put"), PUT)
                .object(ObjectConstraint::new())
                .preposition(word("in"))
                .object(ObjectConstraint::new().require(ObjectFlags::CONTAINER)),
        )
        .unwrap();
    grammar
        .add(RuleBuilder::new(word("open"), OPEN).object(ObjectConstraint::new().require(ObjectFlags::OPENABLE)))
        .unwrap();
    grammar.add(RuleBuilder::new(word("look"), LOOK)).unwrap();
    grammar
        .add(
            RuleBuilder::new(word("look"), EXAMINE)
                .preposition(word("at"))
                .object(ObjectConstraint::new().locations(LocationMask::ANY)),
        )
        .unwrap();
    grammar.add(RuleBuilder::new(word("walk"), WALK).direction()).unwrap();
    grammar
        .add(RuleBuilder::new(word("attack"), ATTACK).object(ObjectConstraint::new().require(ObjectFlags::ACTOR)))
        .unwrap();
    grammar
        .add(
            RuleBuilder::new(word("attack"), ATTACK_WITH)
                .object(ObjectConstraint::new().require(ObjectFlags::ACTOR))
                .preposition(word("with"))
                .object(ObjectConstraint::new().prefer(ObjectFlags::WEAPON)),
        )
        .unwrap();
    grammar.set_implicit_direction_verb(word("walk"));
    grammar
}

pub fn parser() -> Parser {
    let vocab = vocabulary();
    let grammar = grammar(&vocab);
    Parser::new(vocab, grammar)
}

struct Object {
    name: String,
    synonyms: Vec<String>,
    adjectives: Vec<String>,
    flags: ObjectFlags,
    class: LocationClass,
    visible: bool,
}

/// A single room holding a flat list of objects. Ids start at 1.
pub struct FixtureWorld {
    objects: Vec<Object>,
    pub won: bool,
}

impl FixtureWorld {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            won: false,
        }
    }

    /// Adds an object lying in the room.
    pub fn add(&mut self, name: &str, synonyms: &[&str], adjectives: &[&str], flags: ObjectFlags) -> ObjectId {
        self.objects.push(Object {
            name: name.to_string(),
            synonyms: synonyms.iter().map(ToString::to_string).collect(),
            adjectives: adjectives.iter().map(ToString::to_string).collect(),
            flags,
            class: LocationClass::InRoom,
            visible: true,
        });
        ObjectId::new(u32::try_from(self.objects.len()).unwrap())
    }

    pub fn place(&mut self, object: ObjectId, class: LocationClass) {
        self.get_mut(object).class = class;
    }

    pub fn hide(&mut self, object: ObjectId) {
        self.get_mut(object).visible = false;
    }

    fn get(&self, object: ObjectId) -> &Object {
        &self.objects[object.index() as usize - 1]
    }

    fn get_mut(&mut self, object: ObjectId) -> &mut Object {
        &mut self.objects[object.index() as usize - 1]
    }
}

impl WorldModel for FixtureWorld {
    fn visible_objects(&self) -> Vec<ObjectId> {
        (1..=self.objects.len())
            .map(|i| ObjectId::new(u32::try_from(i).unwrap()))
            .filter(|&o| self.get(o).visible)
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
        self.get(object).class
    }

    fn is_win_condition_met(&self) -> bool {
        self.won
    }

    fn describe(&self, object: ObjectId) -> String {
        self.get(object).name.clone()
    }
}

/// The usual two-lamp room: a brass lantern, a rusty lamp, and a sword.
pub struct LampRoom {
    pub world: FixtureWorld,
    pub lantern: ObjectId,
    pub rusty: ObjectId,
    pub sword: ObjectId,
}

pub fn lamp_room() -> LampRoom {
    let mut world = FixtureWorld::new();
    let lantern = world.add(
        "brass lantern",
        &["lantern", "lamp"],
        &["brass"],
        ObjectFlags::TAKEABLE | ObjectFlags::LIGHT,
    );
    let rusty = world.add("rusty lamp", &["lamp"], &["rusty", "old"], ObjectFlags::TAKEABLE);
    let sword = world.add("sword", &["sword", "blade"], &[], ObjectFlags::TAKEABLE | ObjectFlags::WEAPON);
    LampRoom {
        world,
        lantern,
        rusty,
        sword,
    }
}
