//! Parser options.

/// Configuration for the parse pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserConfig {
    /// Offer a "Did you mean" suggestion for unknown words.
    pub suggest_words: bool,
    /// Maximum edit distance for suggestions.
    pub max_suggestion_distance: usize,
    /// Accept "1", "2", ... as clarification answers.
    pub allow_numeric_choices: bool,
    /// Treat a bare direction as the grammar's implicit movement verb.
    pub implicit_directions: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            suggest_words: false,
            max_suggestion_distance: 2,
            allow_numeric_choices: true,
            implicit_directions: true,
        }
    }
}

impl ParserConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables word suggestions.
    #[must_use]
    pub fn with_suggestions(mut self, enabled: bool) -> Self {
        self.suggest_words = enabled;
        self
    }

    /// Sets the suggestion distance.
    #[must_use]
    pub fn with_max_suggestion_distance(mut self, distance: usize) -> Self {
        self.max_suggestion_distance = distance;
        self
    }

    /// Enables or disables numeric clarification answers.
    #[must_use]
    pub fn with_numeric_choices(mut self, enabled: bool) -> Self {
        self.allow_numeric_choices = enabled;
        self
    }

    /// Enables or disables bare-direction movement.
    #[must_use]
    pub fn with_implicit_directions(mut self, enabled: bool) -> Self {
        self.implicit_directions = enabled;
        self
    }
}
