//! Session state for a game.
//!
//! A [`Session`] is the explicit context value for one game: the world, the
//! parser, the registered handlers, the clock, pronoun memory, and any
//! pending clarification question. Each call to [`Session::turn`] runs one
//! input line to completion.

use std::path::Path;

use lantern_engine::{ActionRegistry, Clock, Dispatcher, Flow, Scheduler};
use lantern_foundation::Result;
use lantern_parser::{ParseResult, Parser, PronounState, SuspendedParse, WorldModel};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::serialize;

// =============================================================================
// Turn Outcome
// =============================================================================

/// Whether the session goes on after a turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnStatus {
    /// Read the next line.
    Continue,
    /// The player quit or the turn limit was reached.
    Quit,
    /// The game ended, e.g. the player died.
    Fatal {
        /// Why it ended.
        reason: String,
    },
}

impl TurnStatus {
    /// Returns true if no further input will be accepted.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        !matches!(self, Self::Continue)
    }
}

impl From<Flow> for TurnStatus {
    fn from(flow: Flow) -> Self {
        match flow {
            Flow::Continue => Self::Continue,
            Flow::Quit => Self::Quit,
            Flow::Fatal { reason } => Self::Fatal { reason },
        }
    }
}

/// Output of one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Lines to show the player, in order.
    pub lines: Vec<String>,
    /// What happens next.
    pub status: TurnStatus,
}

impl TurnOutcome {
    fn continuing(lines: Vec<String>) -> Self {
        Self {
            lines,
            status: TurnStatus::Continue,
        }
    }

    /// Returns all lines joined with newlines.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

// =============================================================================
// Saved State
// =============================================================================

/// The core's own persistent state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreState {
    /// Background events and the turn counter.
    pub scheduler: Scheduler,
    /// Pronoun referents.
    pub pronouns: PronounState,
    /// A clarification question awaiting an answer.
    pub pending: Option<SuspendedParse>,
}

/// A complete save: core state plus the world.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveGame<W> {
    /// Core state.
    pub core: CoreState,
    /// The world.
    pub world: W,
}

// =============================================================================
// Session
// =============================================================================

/// One game in progress.
pub struct Session<W> {
    parser: Parser,
    actions: ActionRegistry<W>,
    clock: Clock<W>,
    world: W,
    pronouns: PronounState,
    pending: Option<SuspendedParse>,
    config: SessionConfig,
    finished: Option<TurnStatus>,
}

impl<W: WorldModel> Session<W> {
    /// Creates a session.
    ///
    /// The parser's suggestion settings are taken from `config`.
    ///
    /// # Errors
    ///
    /// Returns an unknown action error if a grammar rule names an action
    /// with no registered handler.
    pub fn new(
        parser: Parser,
        actions: ActionRegistry<W>,
        clock: Clock<W>,
        world: W,
        config: SessionConfig,
    ) -> Result<Self> {
        actions.validate(parser.grammar())?;
        let parser_config = parser
            .config()
            .clone()
            .with_suggestions(config.suggest_words)
            .with_max_suggestion_distance(config.max_suggestion_distance);

        info!(
            "session started: {} words, {} rules, {} events",
            parser.vocabulary().len(),
            parser.grammar().len(),
            clock.scheduler().len()
        );

        Ok(Self {
            parser: parser.with_config(parser_config),
            actions,
            clock,
            world,
            pronouns: PronounState::new(),
            pending: None,
            config,
            finished: None,
        })
    }

    /// Runs one line of input.
    ///
    /// Parse failures and clarification questions do not use up a turn.
    /// A dispatched command is followed by exactly one clock tick.
    pub fn turn(&mut self, line: &str) -> TurnOutcome {
        if let Some(status) = &self.finished {
            return TurnOutcome {
                lines: Vec::new(),
                status: status.clone(),
            };
        }

        let result = match self.pending.take() {
            Some(suspended) => self.parser.resume(suspended, line, &self.world, &self.pronouns),
            None => self.parser.parse(line, &self.world, &self.pronouns),
        };

        let command = match result {
            ParseResult::Command(command) => command,
            ParseResult::Clarify(suspended) => {
                let question = suspended.question().to_string();
                self.pending = Some(suspended);
                return TurnOutcome::continuing(vec![question]);
            }
            ParseResult::Failed(failure) => {
                debug!("parse failed: {failure:?}");
                return TurnOutcome::continuing(vec![failure.to_string()]);
            }
        };

        let mut lines = Vec::new();
        let mut flow = match Dispatcher::execute(&self.actions, &mut self.world, &mut self.pronouns, &command) {
            Ok(report) => {
                lines.extend(report.messages);
                report.flow
            }
            Err(err) => {
                warn!("dispatch failed: {err}");
                lines.push("You can't do that.".to_string());
                Flow::Continue
            }
        };

        let tick = self.clock.tick(&mut self.world);
        lines.extend(tick.messages);
        flow = flow.then(tick.flow);

        if let Some(limit) = self.config.max_turns {
            if tick.turn >= limit && !flow.ends_session() {
                info!("turn limit {limit} reached");
                flow = Flow::Quit;
            }
        }

        let status = TurnStatus::from(flow);
        if status.is_finished() {
            self.finished = Some(status.clone());
        }
        TurnOutcome { lines, status }
    }

    /// The world.
    #[must_use]
    pub fn world(&self) -> &W {
        &self.world
    }

    /// The world, mutably.
    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    /// The parser.
    #[must_use]
    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    /// Pronoun referents.
    #[must_use]
    pub fn pronouns(&self) -> &PronounState {
        &self.pronouns
    }

    /// The scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        self.clock.scheduler()
    }

    /// The pending clarification question, if any.
    #[must_use]
    pub fn pending_question(&self) -> Option<&str> {
        self.pending.as_ref().map(SuspendedParse::question)
    }

    /// Completed turns.
    #[must_use]
    pub fn turn_count(&self) -> u64 {
        self.clock.scheduler().turn()
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// How the session ended, if it has.
    #[must_use]
    pub fn finished(&self) -> Option<&TurnStatus> {
        self.finished.as_ref()
    }

    /// A copy of the core's persistent state.
    #[must_use]
    pub fn core_state(&self) -> CoreState {
        CoreState {
            scheduler: self.clock.scheduler().clone(),
            pronouns: self.pronouns.clone(),
            pending: self.pending.clone(),
        }
    }
}

impl<W: WorldModel + Serialize + DeserializeOwned> Session<W> {
    /// Encodes the session's state.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if encoding fails.
    pub fn save(&self) -> Result<Vec<u8>> {
        serialize::to_bytes(&SaveGame {
            core: self.core_state(),
            world: &self.world,
        })
    }

    /// Replaces the session's state with a save. Handlers are kept.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the bytes are not a valid save. The
    /// session is unchanged in that case.
    pub fn restore(&mut self, bytes: &[u8]) -> Result<()> {
        let save: SaveGame<W> = serialize::from_bytes(bytes)?;
        self.apply(save);
        Ok(())
    }

    /// Saves to a file.
    ///
    /// # Errors
    ///
    /// Returns an I/O or serialization error.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        serialize::save_to_file(
            &SaveGame {
                core: self.core_state(),
                world: &self.world,
            },
            path.as_ref(),
        )?;
        info!("saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Restores from a file.
    ///
    /// # Errors
    ///
    /// Returns an I/O or serialization error. The session is unchanged in
    /// that case.
    pub fn restore_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let save: SaveGame<W> = serialize::load_from_file(path.as_ref())?;
        self.apply(save);
        info!("restored from {}", path.as_ref().display());
        Ok(())
    }

    fn apply(&mut self, save: SaveGame<W>) {
        self.world = save.world;
        self.clock.restore(save.core.scheduler);
        self.pronouns = save.core.pronouns;
        self.pending = save.core.pending;
        self.finished = None;
    }
}
