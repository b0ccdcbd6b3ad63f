//! Error types for the Lantern system.
//!
//! These cover setup and persistence failures: bad grammar declarations,
//! vocabulary conflicts, scheduler misuse, and save-file problems. Per-turn
//! parse failures are player-facing values owned by the parser crate.

use std::fmt;

use thiserror::Error;

use crate::ids::{ActionId, EventId};

/// The main error type for Lantern operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an unknown word error.
    #[must_use]
    pub fn unknown_word(word: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownWord(word.into()))
    }

    /// Creates an invalid grammar error for the rule with the given verb.
    #[must_use]
    pub fn invalid_grammar(verb: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidGrammar {
            verb: verb.into(),
            message: message.into(),
        })
    }

    /// Creates a vocabulary conflict error.
    #[must_use]
    pub fn vocabulary_conflict(word: impl Into<String>, category: impl Into<String>) -> Self {
        Self::new(ErrorKind::VocabularyConflict {
            word: word.into(),
            category: category.into(),
        })
    }

    /// Creates a duplicate event error.
    #[must_use]
    pub fn duplicate_event(id: EventId) -> Self {
        Self::new(ErrorKind::DuplicateEvent(id))
    }

    /// Creates an unknown event error.
    #[must_use]
    pub fn unknown_event(id: EventId) -> Self {
        Self::new(ErrorKind::UnknownEvent(id))
    }

    /// Creates an unknown action error.
    #[must_use]
    pub fn unknown_action(id: ActionId) -> Self {
        Self::new(ErrorKind::UnknownAction(id))
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SerializationError(message.into()))
    }

    /// Creates an I/O error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IoError(message.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A word was referenced that the vocabulary does not define.
    #[error("unknown word: {0}")]
    UnknownWord(String),

    /// A syntax rule declaration is malformed.
    #[error("invalid grammar for verb '{verb}': {message}")]
    InvalidGrammar {
        /// The verb of the offending rule.
        verb: String,
        /// What is wrong with it.
        message: String,
    },

    /// A surface word was bound to two canonical words in the same category.
    #[error("vocabulary conflict: '{word}' already defined as a {category}")]
    VocabularyConflict {
        /// The surface word.
        word: String,
        /// The category in which it conflicts.
        category: String,
    },

    /// An event with this id is already scheduled.
    #[error("duplicate event: {0}")]
    DuplicateEvent(EventId),

    /// No event with this id is scheduled.
    #[error("unknown event: {0}")]
    UnknownEvent(EventId),

    /// No handler is registered for this action.
    #[error("unknown action: {0:?}")]
    UnknownAction(ActionId),

    /// Encoding or decoding a save failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Reading or writing a save file failed.
    #[error("io error: {0}")]
    IoError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file or declaration name.
    pub source: Option<String>,
    /// Line number in source, for batch scripts.
    pub line: Option<usize>,
    /// Trail of setup steps leading to the error.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Adds a frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let Some(line) = self.line {
                write!(f, ":{line}")?;
            }
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
