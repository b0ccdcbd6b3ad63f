//! Demo vocabulary and syntax rules.

use lantern_foundation::{LocationMask, ObjectFlags, Result, WordId};
use lantern_parser::{GrammarTable, ObjectConstraint, Parser, PronounClass, RuleBuilder, Vocabulary};

/// Default handler ids used by the demo grammar.
pub mod actions {
    use lantern_foundation::ActionId;

    /// Describe the room.
    pub const LOOK: ActionId = ActionId::new(1);
    /// Describe an object.
    pub const EXAMINE: ActionId = ActionId::new(2);
    /// Pick something up.
    pub const TAKE: ActionId = ActionId::new(3);
    /// Put something down.
    pub const DROP: ActionId = ActionId::new(4);
    /// Put something in a container.
    pub const PUT: ActionId = ActionId::new(5);
    /// Open a container.
    pub const OPEN: ActionId = ActionId::new(6);
    /// Close a container.
    pub const CLOSE: ActionId = ActionId::new(7);
    /// Read something.
    pub const READ: ActionId = ActionId::new(8);
    /// Switch a light on.
    pub const LIGHT_ON: ActionId = ActionId::new(9);
    /// Switch a light off.
    pub const LIGHT_OFF: ActionId = ActionId::new(10);
    /// Fight, with or without a weapon.
    pub const ATTACK: ActionId = ActionId::new(11);
    /// Move through an exit.
    pub const WALK: ActionId = ActionId::new(12);
    /// List what the player carries.
    pub const INVENTORY: ActionId = ActionId::new(13);
    /// Let a turn pass.
    pub const WAIT: ActionId = ActionId::new(14);
    /// End the game.
    pub const QUIT: ActionId = ActionId::new(15);

    /// Drain the lantern.
    pub const BATTERY: ActionId = ActionId::new(100);
    /// Move the thief.
    pub const THIEF: ActionId = ActionId::new(101);
    /// Let the troll swing.
    pub const TROLL: ActionId = ActionId::new(102);
    /// Announce victory.
    pub const VICTORY: ActionId = ActionId::new(103);
}

/// Canonical ids of the words handlers care about.
#[derive(Clone, Copy, Debug)]
pub struct Words {
    /// "look"
    pub look: WordId,
    /// "examine"
    pub examine: WordId,
    /// "take"
    pub take: WordId,
    /// "walk"
    pub walk: WordId,
    /// The six directions with their room-exit names.
    pub directions: [(WordId, &'static str); 6],
}

impl Words {
    /// The exit name for a canonical direction word.
    #[must_use]
    pub fn exit_name(&self, direction: WordId) -> Option<&'static str> {
        self.directions.iter().find(|(id, _)| *id == direction).map(|&(_, name)| name)
    }
}

/// Builds the demo parser.
///
/// # Errors
///
/// Returns a vocabulary or grammar error if the tables are inconsistent.
pub fn build() -> Result<(Parser, Words)> {
    let mut vocab = Vocabulary::new();

    let look = vocab.verb("look", &["l"])?;
    let examine = vocab.verb("examine", &["x", "inspect", "describe"])?;
    let take = vocab.verb("take", &["get", "grab"])?;
    let drop = vocab.verb("drop", &["discard"])?;
    let put = vocab.verb("put", &["place", "insert"])?;
    let open = vocab.verb("open", &[])?;
    let close = vocab.verb("close", &["shut"])?;
    let read = vocab.verb("read", &[])?;
    let turn = vocab.verb("turn", &["switch"])?;
    let attack = vocab.verb("attack", &["kill", "hit", "fight"])?;
    let walk = vocab.verb("walk", &["go", "run"])?;
    let inventory = vocab.verb("inventory", &["i", "inv"])?;
    let wait = vocab.verb("wait", &["z"])?;
    let quit = vocab.verb("quit", &["q"])?;

    let at = vocab.preposition("at", &[])?;
    let inside = vocab.preposition("in", &["into", "inside"])?;
    let on = vocab.preposition("on", &[])?;
    let off = vocab.preposition("off", &[])?;
    let with = vocab.preposition("with", &["using"])?;

    let directions = [
        (vocab.direction("north", &["n"])?, "north"),
        (vocab.direction("south", &["s"])?, "south"),
        (vocab.direction("east", &["e"])?, "east"),
        (vocab.direction("west", &["w"])?, "west"),
        (vocab.direction("up", &["u"])?, "up"),
        (vocab.direction("down", &["d"])?, "down"),
    ];

    vocab.noun("mailbox", &["box"])?;
    vocab.noun("leaflet", &["booklet", "mail"])?;
    vocab.noun("lantern", &[])?;
    vocab.noun("lamp", &[])?;
    vocab.noun("sword", &["blade"])?;
    vocab.noun("case", &[])?;
    vocab.noun("troll", &[])?;

    vocab.adjective("small", &[])?;
    vocab.adjective("brass", &[])?;
    vocab.adjective("rusty", &["old"])?;
    vocab.adjective("elvish", &["antique"])?;
    vocab.adjective("trophy", &["glass"])?;
    vocab.adjective("nasty", &[])?;

    vocab.pronoun(PronounClass::It, &[])?;
    vocab.pronoun(PronounClass::Them, &[])?;
    vocab.pronoun(PronounClass::Him, &[])?;
    vocab.pronoun(PronounClass::Her, &[])?;
    vocab.all_words("all", &["every", "everything"])?;
    vocab.except_words("except", &["but"])?;
    vocab.buzzwords(&["the", "a", "an", "please", "one"]);

    let anywhere = ObjectConstraint::new().locations(LocationMask::ANY);
    let reachable = ObjectConstraint::new;
    let light = || reachable().require(ObjectFlags::LIGHT);

    let mut grammar = GrammarTable::new();
    grammar.add(RuleBuilder::new(look, actions::LOOK))?;
    grammar.add(RuleBuilder::new(look, actions::EXAMINE).preposition(at).object(anywhere))?;
    grammar.add(RuleBuilder::new(examine, actions::EXAMINE).object(anywhere))?;
    grammar.add(RuleBuilder::new(take, actions::TAKE).object(reachable().prefer(ObjectFlags::TAKEABLE).many()))?;
    grammar.add(RuleBuilder::new(drop, actions::DROP).object(reachable().locations(LocationMask::HELD).many()))?;
    grammar.add(
        RuleBuilder::new(put, actions::PUT)
            .object(reachable().locations(LocationMask::HELD))
            .preposition(inside)
            .object(reachable().require(ObjectFlags::CONTAINER)),
    )?;
    grammar.add(RuleBuilder::new(open, actions::OPEN).object(reachable().require(ObjectFlags::OPENABLE)))?;
    grammar.add(RuleBuilder::new(close, actions::CLOSE).object(reachable().require(ObjectFlags::OPENABLE)))?;
    grammar.add(RuleBuilder::new(read, actions::READ).object(reachable().require(ObjectFlags::READABLE)))?;
    grammar.add(RuleBuilder::new(turn, actions::LIGHT_ON).preposition(on).object(light()))?;
    grammar.add(RuleBuilder::new(turn, actions::LIGHT_ON).object(light()).preposition(on))?;
    grammar.add(RuleBuilder::new(turn, actions::LIGHT_OFF).preposition(off).object(light()))?;
    grammar.add(RuleBuilder::new(turn, actions::LIGHT_OFF).object(light()).preposition(off))?;
    grammar.add(
        RuleBuilder::new(attack, actions::ATTACK)
            .object(reachable().require(ObjectFlags::ACTOR))
            .preposition(with)
            .object(reachable().prefer(ObjectFlags::WEAPON).locations(LocationMask::HELD)),
    )?;
    grammar.add(RuleBuilder::new(attack, actions::ATTACK).object(reachable().require(ObjectFlags::ACTOR)))?;
    grammar.add(RuleBuilder::new(walk, actions::WALK).direction())?;
    grammar.add(RuleBuilder::new(inventory, actions::INVENTORY))?;
    grammar.add(RuleBuilder::new(wait, actions::WAIT))?;
    grammar.add(RuleBuilder::new(quit, actions::QUIT))?;
    grammar.set_implicit_direction_verb(walk);

    let words = Words {
        look,
        examine,
        take,
        walk,
        directions,
    };
    Ok((Parser::new(vocab, grammar), words))
}
