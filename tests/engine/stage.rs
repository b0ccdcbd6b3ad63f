//! A small world for engine tests.

use lantern_foundation::{ActionId, LocationClass, LocationMask, ObjectFlags, ObjectId};
use lantern_parser::{GrammarTable, ObjectConstraint, Parser, PronounClass, RuleBuilder, Vocabulary, WorldModel};

pub const TAKE: ActionId = ActionId::new(1);
pub const DROP: ActionId = ActionId::new(2);
pub const EXAMINE: ActionId = ActionId::new(3);
pub const WAIT: ActionId = ActionId::new(4);

struct Prop {
    names: Vec<String>,
    flags: ObjectFlags,
    held: bool,
}

/// One room. Ids start at 1.
#[derive(Default)]
pub struct Stage {
    props: Vec<Prop>,
    /// Win condition.
    pub won: bool,
    /// Free-form counter for callbacks.
    pub ticks: u32,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, flags: ObjectFlags) -> ObjectId {
        self.props.push(Prop {
            names: vec![name.to_string()],
            flags,
            held: false,
        });
        ObjectId::new(u32::try_from(self.props.len()).unwrap())
    }

    pub fn held(&self, object: ObjectId) -> bool {
        self.prop(object).held
    }

    pub fn set_held(&mut self, object: ObjectId, held: bool) {
        self.props[object.index() as usize - 1].held = held;
    }

    fn prop(&self, object: ObjectId) -> &Prop {
        &self.props[object.index() as usize - 1]
    }
}

impl WorldModel for Stage {
    fn visible_objects(&self) -> Vec<ObjectId> {
        (1..=self.props.len())
            .map(|i| ObjectId::new(u32::try_from(i).unwrap()))
            .collect()
    }

    fn object_flags(&self, object: ObjectId) -> ObjectFlags {
        self.prop(object).flags
    }

    fn object_synonyms(&self, object: ObjectId) -> &[String] {
        &self.prop(object).names
    }

    fn object_adjectives(&self, _object: ObjectId) -> &[String] {
        &[]
    }

    fn current_room(&self) -> ObjectId {
        ObjectId::new(0)
    }

    fn location_class(&self, object: ObjectId, _room: ObjectId) -> LocationClass {
        if self.prop(object).held {
            LocationClass::Held
        } else {
            LocationClass::InRoom
        }
    }

    fn is_win_condition_met(&self) -> bool {
        self.won
    }

    fn describe(&self, object: ObjectId) -> String {
        self.prop(object).names[0].clone()
    }
}

pub fn parser() -> Parser {
    let mut vocab = Vocabulary::new();
    let take = vocab.verb("take", &["get"]).unwrap();
    let drop = vocab.verb("drop", &[]).unwrap();
    let examine = vocab.verb("examine", &["x"]).unwrap();
    let wait = vocab.verb("wait", &["z"]).unwrap();
    for noun in ["apple", "pear", "guard", "statue"] {
        vocab.noun(noun, &[]).unwrap();
    }
    vocab.pronoun(PronounClass::It, &[]).unwrap();
    vocab.pronoun(PronounClass::Them, &[]).unwrap();
    vocab.pronoun(PronounClass::Him, &[]).unwrap();
    vocab.all_words("all", &[]).unwrap();
    vocab.buzzwords(&["the"]);

    let mut grammar = GrammarTable::new();
    grammar
        .add(RuleBuilder::new(take, TAKE).object(ObjectConstraint::new().prefer(ObjectFlags::TAKEABLE).many()))
        .unwrap();
    grammar
        .add(RuleBuilder::new(drop, DROP).object(ObjectConstraint::new().locations(LocationMask::HELD).many()))
        .unwrap();
    grammar.add(RuleBuilder::new(examine, EXAMINE).object(ObjectConstraint::new())).unwrap();
    grammar.add(RuleBuilder::new(wait, WAIT)).unwrap();
    Parser::new(vocab, grammar)
}
