#[derive(Clone, Debug, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Outcome {
    Correct,
    Incorrect,
    /// Keystroke accepted without advancing (pending romaji, or the session
    /// was not accepting input).
    Ignored,
}

/// Result of validating a single keystroke
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputOutcome {
    pub outcome: Outcome,
    pub input_char: char,
    pub expected_char: Option<char>,
    /// Number of target characters this keystroke advances over.
    pub consumed_count: usize,
}

impl InputOutcome {
    pub fn correct(input_char: char) -> Self {
        Self::correct_with(input_char, input_char, 1)
    }

    pub fn correct_with(input_char: char, expected_char: char, consumed_count: usize) -> Self {
        Self {
            outcome: Outcome::Correct,
            input_char,
            expected_char: Some(expected_char),
            consumed_count,
        }
    }

    pub fn incorrect(input_char: char, expected_char: char) -> Self {
        Self {
            outcome: Outcome::Incorrect,
            input_char,
            expected_char: Some(expected_char),
            consumed_count: 1,
        }
    }

    pub fn ignored(input_char: char) -> Self {
        Self {
            outcome: Outcome::Ignored,
            input_char,
            expected_char: None,
            consumed_count: 0,
        }
    }

    pub fn is_correct(&self) -> bool {
        self.outcome == Outcome::Correct
    }

    pub fn is_incorrect(&self) -> bool {
        self.outcome == Outcome::Incorrect
    }

    pub fn is_ignored(&self) -> bool {
        self.outcome == Outcome::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_equality() {
        assert_eq!(Outcome::Correct, Outcome::Correct);
        assert_ne!(Outcome::Correct, Outcome::Incorrect);
        assert_ne!(Outcome::Incorrect, Outcome::Ignored);
    }

    #[test]
    fn test_correct_echoes_input() {
        let outcome = InputOutcome::correct('a');

        assert!(outcome.is_correct());
        assert!(!outcome.is_ignored());
        assert_eq!(outcome.input_char, 'a');
        assert_eq!(outcome.expected_char, Some('a'));
        assert_eq!(outcome.consumed_count, 1);
    }

    #[test]
    fn test_correct_with_consumed_count() {
        let outcome = InputOutcome::correct_with('o', 'き', 2);

        assert!(outcome.is_correct());
        assert_eq!(outcome.expected_char, Some('き'));
        assert_eq!(outcome.consumed_count, 2);
    }

    #[test]
    fn test_incorrect() {
        let outcome = InputOutcome::incorrect('x', 'h');

        assert!(outcome.is_incorrect());
        assert!(!outcome.is_correct());
        assert_eq!(outcome.expected_char, Some('h'));
        assert_eq!(outcome.consumed_count, 1);
    }

    #[test]
    fn test_ignored_consumes_nothing() {
        let outcome = InputOutcome::ignored('k');

        assert!(outcome.is_ignored());
        assert!(!outcome.is_correct());
        assert!(!outcome.is_incorrect());
        assert_eq!(outcome.expected_char, None);
        assert_eq!(outcome.consumed_count, 0);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Correct.to_string(), "Correct");
        assert_eq!(Outcome::Ignored.to_string(), "Ignored");
    }
}
