//! Demo action handlers.

use lantern_engine::{ActionOutcome, ActionRegistry, Invocation};
use lantern_foundation::{ObjectFlags, ObjectId};
use lantern_parser::WorldModel;

use super::words::{Words, actions};
use super::world::{CELLAR, DemoWorld, Place, SWORD, TROLL};

/// Builds the handler registry for the demo.
#[must_use]
pub fn registry(words: Words) -> ActionRegistry<DemoWorld> {
    let mut registry = ActionRegistry::new();

    registry.register(actions::LOOK, |world: &mut DemoWorld, _: &Invocation| {
        ActionOutcome::handled(describe_room(world))
    });
    registry.register(actions::EXAMINE, examine);
    registry.register(actions::TAKE, take);
    registry.register(actions::DROP, |world: &mut DemoWorld, inv: &Invocation| {
        let Some(object) = inv.direct else {
            return ActionOutcome::pass();
        };
        let here = world.here();
        world.move_to(object, Place::In(here));
        ActionOutcome::handled("Dropped.")
    });
    registry.register(actions::PUT, put);
    registry.register(actions::OPEN, open);
    registry.register(actions::CLOSE, |world: &mut DemoWorld, inv: &Invocation| {
        let Some(object) = inv.direct else {
            return ActionOutcome::pass();
        };
        if !world.has(object, ObjectFlags::OPEN) {
            return ActionOutcome::handled("It is already closed.");
        }
        world.set_flag(object, ObjectFlags::OPEN, false);
        ActionOutcome::handled("Closed.")
    });
    registry.register(actions::READ, |world: &mut DemoWorld, inv: &Invocation| {
        let text = inv
            .direct
            .and_then(|o| world.thing(o))
            .and_then(|t| t.text.clone())
            .unwrap_or_else(|| "There's nothing written on it.".to_string());
        ActionOutcome::handled(text)
    });
    registry.register(actions::LIGHT_ON, |world: &mut DemoWorld, inv: &Invocation| switch(world, inv, true));
    registry.register(actions::LIGHT_OFF, |world: &mut DemoWorld, inv: &Invocation| switch(world, inv, false));
    registry.register(actions::ATTACK, attack);
    registry.register(actions::WALK, move |world: &mut DemoWorld, inv: &Invocation| walk(world, inv, words));
    registry.register(actions::INVENTORY, |world: &mut DemoWorld, _: &Invocation| {
        let carried = world.contents(Place::Carried);
        if carried.is_empty() {
            return ActionOutcome::handled("You are empty-handed.");
        }
        let mut lines = vec!["You are carrying:".to_string()];
        lines.extend(carried.iter().map(|&o| format!("  {}", article(&world.describe(o)))));
        ActionOutcome::handled(lines.join("\n"))
    });
    registry.register(actions::WAIT, |_: &mut DemoWorld, _: &Invocation| ActionOutcome::handled("Time passes..."));
    registry.register(actions::QUIT, |_: &mut DemoWorld, _: &Invocation| ActionOutcome::quit("Goodbye."));

    registry.register_object(TROLL, words.take, |_: &mut DemoWorld, _: &Invocation| {
        ActionOutcome::handled("The troll spits in your face, grunting \"Better luck next time\" in a rather barbarous accent.")
    });
    registry.register_object(SWORD, words.examine, |world: &mut DemoWorld, _: &Invocation| {
        if world.troll_alive() && (world.here() == CELLAR || world.exit("down") == Some(CELLAR)) {
            ActionOutcome::pass_with("Your sword is glowing with a faint blue glow.")
        } else {
            ActionOutcome::pass()
        }
    });

    registry.add_pre_action(move |world: &DemoWorld, inv: &Invocation| {
        let blocked = inv.verb == words.walk && world.here() == CELLAR && world.troll_alive();
        blocked.then(|| ActionOutcome::handled("The troll fends you off with a menacing gesture."))
    });

    registry.add_post_action(words.take, |world: &mut DemoWorld, inv: &Invocation| {
        if let Some(object) = inv.direct.filter(|&o| world.place(o) == Place::Carried) {
            world.set_flag(object, ObjectFlags::TOUCHED, true);
        }
        ActionOutcome::pass()
    });

    registry
}

/// The current room's name, description, and visible contents.
#[must_use]
pub fn describe_room(world: &DemoWorld) -> String {
    let Some(room) = world.thing(world.here()) else {
        return "You are nowhere.".to_string();
    };
    let mut lines = vec![room.name.clone(), room.description.clone()];
    for object in world.contents(Place::In(world.here())) {
        let name = world.describe(object);
        if object == TROLL {
            lines.push(format!("A nasty-looking {name} blocks the stairs."));
        } else {
            lines.push(format!("There is {} here.", article(&name)));
        }
        if world.has(object, ObjectFlags::OPEN) || world.has(object, ObjectFlags::TRANSPARENT) {
            if let Some(listing) = list_contents(world, object) {
                lines.push(listing);
            }
        }
    }
    lines.join("\n")
}

fn article(name: &str) -> String {
    match name.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => format!("an {name}"),
        _ => format!("a {name}"),
    }
}

fn list_contents(world: &DemoWorld, container: ObjectId) -> Option<String> {
    let inside = world.contents(Place::In(container));
    if inside.is_empty() {
        return None;
    }
    let names: Vec<String> = inside.iter().map(|&o| article(&world.describe(o))).collect();
    Some(format!("The {} contains {}.", world.describe(container), names.join(", ")))
}

fn examine(world: &mut DemoWorld, inv: &Invocation) -> ActionOutcome {
    let Some(object) = inv.direct else {
        return ActionOutcome::pass();
    };
    let Some(thing) = world.thing(object) else {
        return ActionOutcome::pass();
    };
    let mut text = if thing.description.is_empty() {
        format!("There's nothing special about the {}.", thing.name)
    } else {
        thing.description.clone()
    };
    if world.has(object, ObjectFlags::CONTAINER) {
        if world.has(object, ObjectFlags::OPEN) || world.has(object, ObjectFlags::TRANSPARENT) {
            if let Some(listing) = list_contents(world, object) {
                text = format!("{text}\n{listing}");
            }
        } else {
            text = format!("{text}\nThe {} is closed.", world.describe(object));
        }
    }
    if world.has(object, ObjectFlags::LIGHT) {
        let state = if world.has(object, ObjectFlags::ON) { "on" } else { "off" };
        text = format!("{text}\nIt is turned {state}.");
    }
    ActionOutcome::handled(text)
}

fn take(world: &mut DemoWorld, inv: &Invocation) -> ActionOutcome {
    let Some(object) = inv.direct else {
        return ActionOutcome::pass();
    };
    if world.place(object) == Place::Carried {
        return ActionOutcome::handled("You already have that!");
    }
    if !world.has(object, ObjectFlags::TAKEABLE) {
        return ActionOutcome::handled("You can't take that.");
    }
    world.move_to(object, Place::Carried);
    ActionOutcome::handled("Taken.")
}

fn put(world: &mut DemoWorld, inv: &Invocation) -> ActionOutcome {
    let (Some(object), Some(container)) = (inv.direct, inv.indirect) else {
        return ActionOutcome::pass();
    };
    if object == container || world.is_inside(container, object) {
        return ActionOutcome::handled("You can't put something inside itself.");
    }
    if world.has(container, ObjectFlags::OPENABLE) && !world.has(container, ObjectFlags::OPEN) {
        return ActionOutcome::handled(format!("The {} isn't open.", world.describe(container)));
    }
    world.move_to(object, Place::In(container));
    ActionOutcome::handled("Done.")
}

fn open(world: &mut DemoWorld, inv: &Invocation) -> ActionOutcome {
    let Some(object) = inv.direct else {
        return ActionOutcome::pass();
    };
    if world.has(object, ObjectFlags::OPEN) {
        return ActionOutcome::handled("It is already open.");
    }
    world.set_flag(object, ObjectFlags::OPEN, true);
    let inside = world.contents(Place::In(object));
    if inside.is_empty() {
        return ActionOutcome::handled("Opened.");
    }
    let names: Vec<String> = inside.iter().map(|&o| article(&world.describe(o))).collect();
    ActionOutcome::handled(format!(
        "Opening the {} reveals {}.",
        world.describe(object),
        names.join(", ")
    ))
}

fn switch(world: &mut DemoWorld, inv: &Invocation, on: bool) -> ActionOutcome {
    let Some(object) = inv.direct else {
        return ActionOutcome::pass();
    };
    let name = world.describe(object);
    if world.has(object, ObjectFlags::ON) == on {
        let state = if on { "on" } else { "off" };
        return ActionOutcome::handled(format!("The {name} is already {state}."));
    }
    if on && world.battery() == 0 {
        return ActionOutcome::handled(format!("The {name} has run out of power."));
    }
    world.set_flag(object, ObjectFlags::ON, on);
    let state = if on { "on" } else { "off" };
    ActionOutcome::handled(format!("The {name} is now {state}."))
}

fn attack(world: &mut DemoWorld, inv: &Invocation) -> ActionOutcome {
    let Some(target) = inv.direct else {
        return ActionOutcome::pass();
    };
    let name = world.describe(target);
    if target != TROLL || !world.troll_alive() {
        return ActionOutcome::handled(format!("The {name} doesn't deserve that."));
    }
    let Some(weapon) = inv.indirect else {
        return ActionOutcome::handled(format!("Attacking the {name} with your bare hands is suicidal."));
    };
    if !world.has(weapon, ObjectFlags::WEAPON) {
        return ActionOutcome::handled(format!(
            "Trying to attack the {name} with the {} is suicidal.",
            world.describe(weapon)
        ));
    }

    if world.roll(6) < 3 {
        return ActionOutcome::handled(format!("You swing and miss the {name}."));
    }
    if world.wound_troll(1) == 0 {
        ActionOutcome::handled(format!(
            "The {name} takes a fatal blow and slumps to the floor, dead. His body vanishes in a sinister black fog."
        ))
    } else {
        ActionOutcome::handled(format!("The {name} is staggered and drops to his knees."))
    }
}

fn walk(world: &mut DemoWorld, inv: &Invocation, words: Words) -> ActionOutcome {
    let Some(direction) = inv.direction.and_then(|d| words.exit_name(d)) else {
        return ActionOutcome::handled("Which way?");
    };
    match world.exit(direction) {
        Some(room) => {
            world.set_here(room);
            ActionOutcome::handled(describe_room(world))
        }
        None => ActionOutcome::handled("You can't go that way."),
    }
}
