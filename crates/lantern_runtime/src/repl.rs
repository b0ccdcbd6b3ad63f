//! The interactive read-parse-dispatch loop.

use std::io::{self, Write};
use std::path::PathBuf;

use lantern_foundation::{Error, Result};
use lantern_parser::WorldModel;
use log::{info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::session::{Session, TurnStatus};

/// A command the REPL handles itself instead of passing to the game.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Meta {
    Save(Option<PathBuf>),
    Restore(Option<PathBuf>),
}

impl Meta {
    fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let command = parts.next()?.to_lowercase();
        let path = parts.next().map(PathBuf::from);
        if parts.next().is_some() {
            return None;
        }
        match command.as_str() {
            "save" => Some(Self::Save(path)),
            "restore" | "load" => Some(Self::Restore(path)),
            _ => None,
        }
    }
}

/// The interactive loop around a [`Session`].
pub struct Repl<W, E: LineEditor = RustylineEditor> {
    editor: E,
    session: Session<W>,
    opening: Option<String>,
}

impl<W, E> Repl<W, E>
where
    W: WorldModel + Serialize + DeserializeOwned,
    E: LineEditor,
{
    /// Creates a REPL reading from `editor`.
    pub fn new(session: Session<W>, editor: E) -> Self {
        Self {
            editor,
            session,
            opening: None,
        }
    }

    /// Sets the text shown before the first prompt when the banner is on.
    #[must_use]
    pub fn with_opening(mut self, text: impl Into<String>) -> Self {
        self.opening = Some(text.into());
        self
    }

    /// Returns the session.
    #[must_use]
    pub fn session(&self) -> &Session<W> {
        &self.session
    }

    /// Returns the line editor.
    #[must_use]
    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Runs until the game ends or input runs out, writing to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read or written.
    pub fn run(&mut self) -> Result<TurnStatus> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_to(&mut out)
    }

    /// Runs until the game ends or input runs out, writing to `out`.
    ///
    /// End of input counts as quitting.
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be read or output cannot be written.
    pub fn run_to<O: Write>(&mut self, out: &mut O) -> Result<TurnStatus> {
        if self.session.config().banner {
            if let Some(opening) = &self.opening {
                emit(out, opening)?;
                emit(out, "")?;
            }
        }
        self.editor
            .set_words(self.session.parser().vocabulary().words().map(str::to_string).collect());

        loop {
            let prompt = self.session.config().prompt.clone();
            let line = match self.editor.read_line(&prompt)? {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted => {
                    emit(out, "(Type \"quit\" to leave.)")?;
                    continue;
                }
                ReadResult::Eof => {
                    info!("end of input after {} turns", self.session.turn_count());
                    return Ok(TurnStatus::Quit);
                }
            };

            let line = line.trim();
            if self.session.config().echo_commands {
                emit(out, &format!("{prompt}{line}"))?;
            }
            if !line.is_empty() {
                self.editor.add_history(line);
            }

            if let Some(meta) = Meta::parse(line) {
                let reply = self.meta(meta);
                emit(out, &reply)?;
                continue;
            }

            let outcome = self.session.turn(line);
            for text in &outcome.lines {
                emit(out, text)?;
            }
            match outcome.status {
                TurnStatus::Continue => {}
                TurnStatus::Quit => return Ok(TurnStatus::Quit),
                TurnStatus::Fatal { reason } => {
                    emit(out, &format!("*** {reason} ***"))?;
                    return Ok(TurnStatus::Fatal { reason });
                }
            }
        }
    }

    fn meta(&mut self, meta: Meta) -> String {
        let default = self.session.config().save_path.clone();
        match meta {
            Meta::Save(path) => {
                let path = path.unwrap_or(default);
                match self.session.save_to_file(&path) {
                    Ok(()) => "Saved.".to_string(),
                    Err(err) => {
                        warn!("save failed: {err}");
                        format!("Save failed: {err}")
                    }
                }
            }
            Meta::Restore(path) => {
                let path = path.unwrap_or(default);
                match self.session.restore_from_file(&path) {
                    Ok(()) => "Restored.".to_string(),
                    Err(err) => {
                        warn!("restore failed: {err}");
                        format!("Restore failed: {err}")
                    }
                }
            }
        }
    }
}

fn emit<O: Write>(out: &mut O, text: &str) -> Result<()> {
    writeln!(out, "{text}").map_err(|e| Error::io(e.to_string()))
}
