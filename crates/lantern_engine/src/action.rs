//! Action registry and handler outcomes.
//!
//! Handlers are supplied by the game. Syntax rules name a default handler by
//! [`ActionId`]; objects may additionally claim a verb for themselves.

use std::collections::HashMap;
use std::fmt;

use lantern_foundation::{ActionId, Error, ObjectId, Result, WordId};
use lantern_parser::{GrammarTable, ResolvedCommand};

// =============================================================================
// Outcomes
// =============================================================================

/// What the session should do after a handler or event runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Flow {
    /// Keep playing.
    #[default]
    Continue,
    /// The player asked to stop.
    Quit,
    /// The session ends, e.g. the player died.
    Fatal {
        /// Shown as the final message.
        reason: String,
    },
}

impl Flow {
    /// Combines two flows; `Fatal` wins over `Quit`, which wins over `Continue`.
    #[must_use]
    pub fn then(self, other: Flow) -> Flow {
        match (self, other) {
            (fatal @ Flow::Fatal { .. }, _) | (_, fatal @ Flow::Fatal { .. }) => fatal,
            (Flow::Quit, _) | (_, Flow::Quit) => Flow::Quit,
            _ => Flow::Continue,
        }
    }

    /// Returns true for `Fatal`.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Flow::Fatal { .. })
    }

    /// Returns true for anything but `Continue`.
    #[must_use]
    pub fn ends_session(&self) -> bool {
        !matches!(self, Flow::Continue)
    }
}

/// Result of running a handler.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Whether the handler claimed the command.
    pub handled: bool,
    /// Text for the player.
    pub message: Option<String>,
    /// Session control.
    pub flow: Flow,
}

impl ActionOutcome {
    /// The command was handled, with a message.
    #[must_use]
    pub fn handled(message: impl Into<String>) -> Self {
        Self {
            handled: true,
            message: Some(message.into()),
            flow: Flow::Continue,
        }
    }

    /// The command was handled without comment.
    #[must_use]
    pub fn silent() -> Self {
        Self {
            handled: true,
            ..Self::default()
        }
    }

    /// The handler declined; later stages still run.
    #[must_use]
    pub fn pass() -> Self {
        Self::default()
    }

    /// The handler declined but has something to say.
    #[must_use]
    pub fn pass_with(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Ends the session normally.
    #[must_use]
    pub fn quit(message: impl Into<String>) -> Self {
        Self {
            handled: true,
            message: Some(message.into()),
            flow: Flow::Quit,
        }
    }

    /// Ends the session with a fatal condition.
    #[must_use]
    pub fn fatal(message: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            handled: true,
            message: Some(message.into()),
            flow: Flow::Fatal { reason: reason.into() },
        }
    }
}

// =============================================================================
// Invocation
// =============================================================================

/// The arguments a handler sees: one command applied to at most one direct
/// object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Invocation {
    /// Canonical verb.
    pub verb: WordId,
    /// The rule's default handler.
    pub action: ActionId,
    /// Direct object, if any.
    pub direct: Option<ObjectId>,
    /// Indirect object, if any.
    pub indirect: Option<ObjectId>,
    /// Canonical direction, if any.
    pub direction: Option<WordId>,
}

impl Invocation {
    /// Builds the invocation for a command whose direct object has already
    /// been narrowed to `direct`.
    #[must_use]
    pub fn new(command: &ResolvedCommand, direct: Option<ObjectId>) -> Self {
        Self {
            verb: command.verb(),
            action: command.action(),
            direct,
            indirect: command.indirect(),
            direction: command.direction(),
        }
    }
}

// =============================================================================
// Registry
// =============================================================================

/// A default, object, or post-action handler.
pub type Handler<W> = Box<dyn Fn(&mut W, &Invocation) -> ActionOutcome>;

/// A global check run before anything else. Returning `Some` stops the
/// object and default stages.
pub type PreAction<W> = Box<dyn Fn(&W, &Invocation) -> Option<ActionOutcome>>;

/// All handlers known to a game.
pub struct ActionRegistry<W> {
    defaults: HashMap<ActionId, Handler<W>>,
    object_actions: HashMap<(ObjectId, WordId), Handler<W>>,
    pre_actions: Vec<PreAction<W>>,
    post_actions: HashMap<WordId, Vec<Handler<W>>>,
}

impl<W> Default for ActionRegistry<W> {
    fn default() -> Self {
        Self {
            defaults: HashMap::new(),
            object_actions: HashMap::new(),
            pre_actions: Vec::new(),
            post_actions: HashMap::new(),
        }
    }
}

impl<W> fmt::Debug for ActionRegistry<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("defaults", &self.defaults.len())
            .field("object_actions", &self.object_actions.len())
            .field("pre_actions", &self.pre_actions.len())
            .field("post_actions", &self.post_actions.len())
            .finish()
    }
}

impl<W> ActionRegistry<W> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the default handler for an action. Replaces any previous one.
    pub fn register<F>(&mut self, action: ActionId, handler: F)
    where
        F: Fn(&mut W, &Invocation) -> ActionOutcome + 'static,
    {
        self.defaults.insert(action, Box::new(handler));
    }

    /// Registers an object-specific handler for a verb.
    pub fn register_object<F>(&mut self, object: ObjectId, verb: WordId, handler: F)
    where
        F: Fn(&mut W, &Invocation) -> ActionOutcome + 'static,
    {
        self.object_actions.insert((object, verb), Box::new(handler));
    }

    /// Adds a global pre-action. Pre-actions run in registration order.
    pub fn add_pre_action<F>(&mut self, check: F)
    where
        F: Fn(&W, &Invocation) -> Option<ActionOutcome> + 'static,
    {
        self.pre_actions.push(Box::new(check));
    }

    /// Adds a post-action for a verb.
    pub fn add_post_action<F>(&mut self, verb: WordId, handler: F)
    where
        F: Fn(&mut W, &Invocation) -> ActionOutcome + 'static,
    {
        self.post_actions.entry(verb).or_default().push(Box::new(handler));
    }

    /// Gets the default handler for an action.
    #[must_use]
    pub fn default_handler(&self, action: ActionId) -> Option<&Handler<W>> {
        self.defaults.get(&action)
    }

    /// Gets the object's own handler for a verb. Absence is normal.
    #[must_use]
    pub fn object_handler(&self, object: ObjectId, verb: WordId) -> Option<&Handler<W>> {
        self.object_actions.get(&(object, verb))
    }

    /// Iterates the pre-actions in order.
    pub fn pre_actions(&self) -> impl Iterator<Item = &PreAction<W>> {
        self.pre_actions.iter()
    }

    /// Iterates the post-actions for a verb in order.
    pub fn post_actions(&self, verb: WordId) -> impl Iterator<Item = &Handler<W>> {
        self.post_actions.get(&verb).into_iter().flatten()
    }

    /// Checks that every rule in the grammar has a default handler.
    ///
    /// # Errors
    ///
    /// Returns an unknown action error naming the first rule's action that
    /// has no handler.
    pub fn validate(&self, grammar: &GrammarTable) -> Result<()> {
        match grammar.rules().find(|rule| !self.defaults.contains_key(&rule.action)) {
            Some(rule) => Err(Error::unknown_action(rule.action)),
            None => Ok(()),
        }
    }
}
