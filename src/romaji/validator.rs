use tracing::trace;

use super::table::{is_nasal_terminator, RomajiTable, HATSUON};
use crate::outcome::InputOutcome;
use crate::validator::{InputMode, InputValidator};

/// Buffers romaji keystrokes and checks each completed mora against the
/// expected hiragana.
///
/// Keystrokes that only extend a valid prefix come back `Ignored` and stay in
/// the buffer; a completed mora is judged on its first character and consumes
/// as many target characters as the mora has (`kyo` → `きょ` consumes 2).
pub struct RomajiValidator {
    buffer: String,
    table: &'static RomajiTable,
}

impl RomajiValidator {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            table: RomajiTable::global(),
        }
    }

    fn step(&mut self, input: char, expected: char) -> InputOutcome {
        self.buffer.extend(input.to_lowercase());

        if let Some(outcome) = self.settle_hatsuon(expected) {
            return outcome;
        }

        if let Some(mora) = self.table.try_convert(&self.buffer) {
            trace!(romaji = %self.buffer, %mora, %expected, "mora completed");
            self.buffer.clear();

            return match mora.chars().next() {
                Some(first) if first == expected => {
                    InputOutcome::correct_with(input, first, mora.chars().count())
                }
                _ => InputOutcome::incorrect(input, expected),
            };
        }

        if self.table.is_valid_prefix(&self.buffer) {
            return InputOutcome::ignored(input);
        }

        trace!(romaji = %self.buffer, "invalid romaji sequence");
        self.buffer.clear();
        InputOutcome::incorrect(input, expected)
    }

    /// "n" followed by a character that cannot extend it settles ん.
    ///
    /// Runs before table conversion: "n" alone is also a prefix of な/にゃ, so
    /// only the class of the following character can decide. The following
    /// character is kept as the start of the next mora.
    fn settle_hatsuon(&mut self, expected: char) -> Option<InputOutcome> {
        let mut chars = self.buffer.chars();
        let (Some('n'), Some(next), None) = (chars.next(), chars.next(), chars.next()) else {
            return None;
        };
        if !is_nasal_terminator(next) {
            return None;
        }

        self.buffer.clear();
        self.buffer.push(next);
        if !self.table.is_valid_prefix(&self.buffer) {
            // "n'" and friends: the terminator only marks the boundary
            self.buffer.clear();
        }

        trace!(%next, pending = %self.buffer, "hatsuon settled");
        Some(if expected == HATSUON {
            InputOutcome::correct_with(next, HATSUON, 1)
        } else {
            InputOutcome::incorrect(next, expected)
        })
    }
}

impl Default for RomajiValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl InputValidator for RomajiValidator {
    fn validate(&mut self, input: char, expected: char) -> InputOutcome {
        self.step(input, expected)
    }

    fn pending_input(&self) -> &str {
        &self.buffer
    }

    fn clear_buffer(&mut self) {
        self.buffer.clear();
    }

    fn mode(&self) -> InputMode {
        InputMode::Romaji
    }
}
