use serde::{Deserialize, Serialize};

use crate::outcome::InputOutcome;
use crate::romaji::RomajiValidator;
use crate::settings::Settings;

/// Decides whether a keystroke matches the text being typed.
///
/// The session drives every keystroke through this trait and never needs to
/// know which implementation it holds.
pub trait InputValidator {
    /// Validate `input` against the next expected character.
    fn validate(&mut self, input: char, expected: char) -> InputOutcome;

    /// Keystrokes accepted but not yet converted.
    fn pending_input(&self) -> &str {
        ""
    }

    fn clear_buffer(&mut self) {}

    fn mode(&self) -> InputMode;
}

/// How keystrokes map onto the target text
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InputMode {
    /// One keystroke per character (latin text).
    #[default]
    Direct,
    /// Romaji keystrokes buffered into hiragana.
    Romaji,
}

impl InputMode {
    pub fn build(self, settings: &Settings) -> Box<dyn InputValidator> {
        match self {
            InputMode::Direct => Box::new(DirectValidator::new(settings.case_sensitive)),
            InputMode::Romaji => Box::new(RomajiValidator::new()),
        }
    }
}

/// One input character against one expected character.
#[derive(Debug, Clone, Copy)]
pub struct DirectValidator {
    case_sensitive: bool,
}

impl DirectValidator {
    pub fn new(case_sensitive: bool) -> Self {
        Self { case_sensitive }
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    fn matches(&self, input: char, expected: char) -> bool {
        if self.case_sensitive {
            input == expected
        } else {
            input.to_lowercase().eq(expected.to_lowercase())
        }
    }
}

impl Default for DirectValidator {
    fn default() -> Self {
        Self::new(true)
    }
}

impl InputValidator for DirectValidator {
    fn validate(&mut self, input: char, expected: char) -> InputOutcome {
        if self.matches(input, expected) {
            InputOutcome::correct_with(input, expected, 1)
        } else {
            InputOutcome::incorrect(input, expected)
        }
    }

    fn mode(&self) -> InputMode {
        InputMode::Direct
    }
}
