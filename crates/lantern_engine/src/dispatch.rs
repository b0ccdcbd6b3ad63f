//! Command dispatch.
//!
//! A resolved command runs through a fixed pipeline:
//!
//! 1. Pre-actions (global checks). A pre-action that speaks stops stages 2-3.
//! 2. The direct object's own handler for the verb, if it has one.
//! 3. The rule's default handler, unless stage 2 handled the command.
//! 4. Post-actions for the verb, unless a stage reported a fatal outcome.
//!
//! A command with several direct objects runs the pipeline once per object
//! and prefixes each object's output with its name.

use lantern_foundation::{Error, ObjectFlags, ObjectId, Result};
use lantern_parser::{DirectObject, PronounState, ResolvedCommand, WorldModel};
use log::debug;

use crate::action::{ActionOutcome, ActionRegistry, Flow, Invocation};

/// What dispatch produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Messages in order.
    pub messages: Vec<String>,
    /// Whether any stage claimed the command.
    pub handled: bool,
    /// Combined session control.
    pub flow: Flow,
}

impl DispatchReport {
    fn record(&mut self, outcome: ActionOutcome) {
        if let Some(message) = outcome.message.filter(|m| !m.is_empty()) {
            self.messages.push(message);
        }
        self.handled |= outcome.handled;
        self.flow = std::mem::take(&mut self.flow).then(outcome.flow);
    }
}

/// Runs resolved commands.
pub struct Dispatcher;

impl Dispatcher {
    /// Executes a command and then updates pronoun state from it.
    ///
    /// # Errors
    ///
    /// Returns an unknown action error if the command reaches the default
    /// stage and no handler is registered for its action.
    pub fn execute<W: WorldModel>(
        registry: &ActionRegistry<W>,
        world: &mut W,
        pronouns: &mut PronounState,
        command: &ResolvedCommand,
    ) -> Result<DispatchReport> {
        let report = match command.direct() {
            DirectObject::None => Self::run(registry, world, &Invocation::new(command, None))?,
            DirectObject::One(object) => Self::run(registry, world, &Invocation::new(command, Some(*object)))?,
            DirectObject::Many(objects) => Self::run_each(registry, world, command, objects)?,
        };
        Self::update_pronouns(world, pronouns, command);
        Ok(report)
    }

    fn run_each<W: WorldModel>(
        registry: &ActionRegistry<W>,
        world: &mut W,
        command: &ResolvedCommand,
        objects: &[ObjectId],
    ) -> Result<DispatchReport> {
        let mut report = DispatchReport::default();
        for &object in objects {
            let name = world.describe(object);
            let single = Self::run(registry, world, &Invocation::new(command, Some(object)))?;
            if !single.messages.is_empty() {
                report.messages.push(format!("{name}: {}", single.messages.join(" ")));
            }
            report.handled |= single.handled;
            report.flow = std::mem::take(&mut report.flow).then(single.flow);
            if report.flow.ends_session() {
                debug!("stopping multi-object dispatch at {object:?}");
                break;
            }
        }
        Ok(report)
    }

    fn run<W>(registry: &ActionRegistry<W>, world: &mut W, invocation: &Invocation) -> Result<DispatchReport> {
        let mut report = DispatchReport::default();

        let vetoed = registry.pre_actions().find_map(|check| check(&*world, invocation));
        let claimed = match vetoed {
            Some(outcome) => {
                debug!("pre-action stopped {:?}", invocation.verb);
                report.record(outcome);
                true
            }
            None => false,
        };

        if !claimed {
            let object_handler = invocation
                .direct
                .and_then(|object| registry.object_handler(object, invocation.verb));
            if let Some(handler) = object_handler {
                debug!("object action for {:?}", invocation.direct);
                report.record(handler(world, invocation));
            }

            if !report.handled && !report.flow.is_fatal() {
                let handler = registry
                    .default_handler(invocation.action)
                    .ok_or_else(|| Error::unknown_action(invocation.action))?;
                debug!("default action {:?}", invocation.action);
                report.record(handler(world, invocation));
            }
        }

        if !report.flow.is_fatal() {
            for post in registry.post_actions(invocation.verb) {
                report.record(post(world, invocation));
            }
        }

        Ok(report)
    }

    /// `it` follows the latest single direct object and `them` the latest
    /// plural one. `him` and `her` follow any male or female actor named.
    fn update_pronouns<W: WorldModel>(world: &W, pronouns: &mut PronounState, command: &ResolvedCommand) {
        match command.direct() {
            DirectObject::None => {}
            DirectObject::One(object) => pronouns.set_it(*object),
            DirectObject::Many(objects) => pronouns.set_them(objects.clone()),
        }

        let named = command.direct().objects().iter().copied().chain(command.indirect());
        for object in named {
            let flags = world.object_flags(object);
            if !flags.contains(ObjectFlags::ACTOR) {
                continue;
            }
            if flags.contains(ObjectFlags::MALE) {
                pronouns.set_him(object);
            } else if flags.contains(ObjectFlags::FEMALE) {
                pronouns.set_her(object);
            }
        }
    }
}
