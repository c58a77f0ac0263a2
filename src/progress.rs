/// Snapshot of where a session stands, rebuilt after every state change
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    pub question_index: usize,
    pub total_questions: usize,
    pub position: usize,
    pub total_characters: usize,
    pub correct_count: usize,
    pub miss_count: usize,
    pub typed_text: String,
    pub remaining_text: String,
}

impl Progress {
    /// Split `input_text` at the char `position` into typed/remaining halves.
    pub fn new(
        question_index: usize,
        total_questions: usize,
        input_text: &str,
        position: usize,
        correct_count: usize,
        miss_count: usize,
    ) -> Self {
        let split = input_text
            .char_indices()
            .nth(position)
            .map_or(input_text.len(), |(idx, _)| idx);

        Self {
            question_index,
            total_questions,
            position,
            total_characters: input_text.chars().count(),
            correct_count,
            miss_count,
            typed_text: input_text[..split].to_string(),
            remaining_text: input_text[split..].to_string(),
        }
    }

    pub fn accuracy(&self) -> f64 {
        accuracy(self.correct_count, self.miss_count)
    }

    /// Overall completion across all questions, in `[0, 1]`.
    pub fn progress_rate(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        let questions = self.total_questions as f64;
        (self.question_index as f64 + self.current_question_progress_rate()) / questions
    }

    pub fn current_question_progress_rate(&self) -> f64 {
        if self.total_characters == 0 {
            return 0.0;
        }
        self.position as f64 / self.total_characters as f64
    }
}

/// Fraction of correct attempts, 1.0 when there were none.
pub fn accuracy(correct: usize, miss: usize) -> f64 {
    match correct + miss {
        0 => 1.0,
        total => correct as f64 / total as f64,
    }
}
