//! Parse-then-dispatch tests.

use lantern_engine::{ActionOutcome, ActionRegistry, DispatchReport, Dispatcher, Flow};
use lantern_foundation::{ErrorKind, ObjectFlags, ObjectId};
use lantern_parser::{ParseResult, Parser, PronounState, WorldModel};

use crate::stage::{self, DROP, EXAMINE, Stage, TAKE, WAIT};

struct Game {
    parser: Parser,
    registry: ActionRegistry<Stage>,
    stage: Stage,
    pronouns: PronounState,
    apple: ObjectId,
    pear: ObjectId,
    guard: ObjectId,
}

fn game() -> Game {
    let parser = stage::parser();
    let mut stage = Stage::new();
    let apple = stage.add("apple", ObjectFlags::TAKEABLE);
    let pear = stage.add("pear", ObjectFlags::TAKEABLE);
    let guard = stage.add("guard", ObjectFlags::ACTOR | ObjectFlags::MALE);
    stage.add("statue", ObjectFlags::empty());

    let mut registry = ActionRegistry::new();
    registry.register(TAKE, |stage: &mut Stage, inv| match inv.direct {
        Some(object) if stage.held(object) => ActionOutcome::handled("You already have that!"),
        Some(object) => {
            stage.set_held(object, true);
            ActionOutcome::handled("Taken.")
        }
        None => ActionOutcome::pass(),
    });
    registry.register(DROP, |stage: &mut Stage, inv| {
        if let Some(object) = inv.direct {
            stage.set_held(object, false);
        }
        ActionOutcome::handled("Dropped.")
    });
    registry.register(EXAMINE, |stage: &mut Stage, inv| {
        let name = inv.direct.map(|o| stage.describe(o)).unwrap_or_default();
        ActionOutcome::handled(format!("You see nothing special about the {name}."))
    });
    registry.register(WAIT, |_, _| ActionOutcome::handled("Time passes..."));

    let take = parser.vocabulary().id("take").unwrap();
    registry.register_object(guard, take, |_, _| ActionOutcome::handled("The guard glares at you."));

    Game {
        parser,
        registry,
        stage,
        pronouns: PronounState::new(),
        apple,
        pear,
        guard,
    }
}

impl Game {
    fn play(&mut self, input: &str) -> DispatchReport {
        let command = match self.parser.parse(input, &self.stage, &self.pronouns) {
            ParseResult::Command(command) => command,
            other => panic!("{input:?} did not parse: {other:?}"),
        };
        Dispatcher::execute(&self.registry, &mut self.stage, &mut self.pronouns, &command).unwrap()
    }
}

#[test]
fn grammar_is_fully_handled() {
    let g = game();
    assert!(g.registry.validate(g.parser.grammar()).is_ok());

    let empty: ActionRegistry<Stage> = ActionRegistry::new();
    let err = empty.validate(g.parser.grammar()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownAction(_)));
}

#[test]
fn take_all_then_drop_them() {
    let mut g = game();

    let report = g.play("take all");
    assert_eq!(report.messages, vec!["apple: Taken.", "pear: Taken."]);
    assert!(g.stage.held(g.apple) && g.stage.held(g.pear));
    assert_eq!(g.pronouns.them(), &[g.apple, g.pear]);

    let report = g.play("drop them");
    assert_eq!(report.messages, vec!["apple: Dropped.", "pear: Dropped."]);
    assert!(!g.stage.held(g.apple));
}

#[test]
fn it_follows_the_last_object() {
    let mut g = game();
    g.play("get the pear");
    assert_eq!(g.pronouns.it(), Some(g.pear));

    let report = g.play("take it");
    assert_eq!(report.messages, vec!["You already have that!"]);
}

#[test]
fn object_handler_claims_before_default() {
    let mut g = game();
    let report = g.play("x guard");
    assert_eq!(report.messages, vec!["You see nothing special about the guard."]);
    assert_eq!(g.pronouns.him(), Some(g.guard));

    let report = g.play("take him");
    assert_eq!(report.messages, vec!["The guard glares at you."]);
    assert!(!g.stage.held(g.guard));
}

#[test]
fn verb_only_command() {
    let mut g = game();
    let report = g.play("z");
    assert!(report.handled);
    assert_eq!(report.messages, vec!["Time passes..."]);
    assert_eq!(report.flow, Flow::Continue);
    assert_eq!(g.pronouns.it(), None);
}
