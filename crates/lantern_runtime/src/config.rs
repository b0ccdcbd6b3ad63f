//! Session configuration.

use std::path::PathBuf;

/// Configuration for a play session.
///
/// Controls the prompt, parser assistance, and batch limits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Prompt shown before each command.
    pub prompt: String,

    /// Whether the REPL prints a banner and the opening room.
    pub banner: bool,

    /// Offer a close vocabulary word when a word is unknown.
    pub suggest_words: bool,

    /// Largest edit distance a suggestion may have.
    pub max_suggestion_distance: usize,

    /// Print each command after the prompt (useful for scripted runs).
    pub echo_commands: bool,

    /// Stop after this many completed turns.
    pub max_turns: Option<u64>,

    /// Where `save` and `restore` go when no path is given.
    pub save_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            banner: true,
            suggest_words: false,
            max_suggestion_distance: 2,
            echo_commands: false,
            max_turns: None,
            save_path: PathBuf::from("lantern.sav"),
        }
    }
}

impl SessionConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for replaying a script: no banner, commands echoed.
    #[must_use]
    pub fn batch() -> Self {
        Self {
            banner: false,
            echo_commands: true,
            ..Self::default()
        }
    }

    /// Builder method to set the prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Builder method to show or hide the banner.
    #[must_use]
    pub fn with_banner(mut self, banner: bool) -> Self {
        self.banner = banner;
        self
    }

    /// Builder method to enable word suggestions.
    #[must_use]
    pub fn with_suggestions(mut self, enabled: bool) -> Self {
        self.suggest_words = enabled;
        self
    }

    /// Builder method to set the suggestion distance.
    #[must_use]
    pub fn with_max_suggestion_distance(mut self, distance: usize) -> Self {
        self.max_suggestion_distance = distance;
        self
    }

    /// Builder method to echo commands.
    #[must_use]
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo_commands = echo;
        self
    }

    /// Builder method to cap the number of turns.
    #[must_use]
    pub fn with_max_turns(mut self, turns: Option<u64>) -> Self {
        self.max_turns = turns;
        self
    }

    /// Builder method to set the default save file.
    #[must_use]
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = path.into();
        self
    }
}
