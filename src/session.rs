use tracing::debug;

use crate::error::SessionError;
use crate::events::{EventStream, InputEvent, QuestionCompletedEvent, SessionCompletedEvent};
use crate::outcome::{InputOutcome, Outcome};
use crate::progress::Progress;
use crate::question::Question;
use crate::settings::Settings;
use crate::typing_policy::advance_past_skippable;
use crate::validator::{InputMode, InputValidator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum SessionState {
    #[default]
    Idle,
    Running,
    Paused,
    Completed,
}

/// Drives a list of questions through an [`InputValidator`], one keystroke at
/// a time.
///
/// Every keystroke that reaches the validator is announced on
/// [`on_input`](Self::on_input); finishing a question and finishing the
/// session follow on their own streams, in that order, before the call
/// returns. A session can be started again once completed.
pub struct TypingSession {
    validator: Box<dyn InputValidator>,
    settings: Settings,
    state: SessionState,
    questions: Vec<Question>,
    question_index: usize,
    position: usize,
    question_correct: usize,
    question_miss: usize,
    total_correct: usize,
    total_miss: usize,
    completed_questions: usize,
    on_input: EventStream<InputEvent>,
    on_question_completed: EventStream<QuestionCompletedEvent>,
    on_session_completed: EventStream<SessionCompletedEvent>,
    disposed: bool,
}

impl TypingSession {
    pub fn new(mode: InputMode, settings: Settings) -> Self {
        Self::with_validator(mode.build(&settings), settings)
    }

    pub fn with_validator(validator: Box<dyn InputValidator>, settings: Settings) -> Self {
        Self {
            validator,
            settings,
            state: SessionState::Idle,
            questions: Vec::new(),
            question_index: 0,
            position: 0,
            question_correct: 0,
            question_miss: 0,
            total_correct: 0,
            total_miss: 0,
            completed_questions: 0,
            on_input: EventStream::new(),
            on_question_completed: EventStream::new(),
            on_session_completed: EventStream::new(),
            disposed: false,
        }
    }

    /// Replace the question list and start from the first question.
    pub fn start_session(&mut self, questions: Vec<Question>) -> Result<(), SessionError> {
        if questions.is_empty() {
            return Err(SessionError::NoQuestions);
        }

        debug!(questions = questions.len(), previous = %self.state, "session started");
        self.questions = questions;
        self.question_index = 0;
        self.total_correct = 0;
        self.total_miss = 0;
        self.completed_questions = 0;
        self.state = SessionState::Running;
        self.load_question();
        self.settle_completed_questions();
        Ok(())
    }

    pub fn process_input(&mut self, input: char) -> InputOutcome {
        if self.state != SessionState::Running {
            return InputOutcome::ignored(input);
        }
        let Some(question) = self.questions.get(self.question_index) else {
            return InputOutcome::ignored(input);
        };
        let Some(expected) = question.char_at(self.position) else {
            return InputOutcome::ignored(input);
        };

        let outcome = self.validator.validate(input, expected);
        let len = question.len();

        match outcome.outcome {
            Outcome::Correct => {
                self.position = (self.position + outcome.consumed_count).min(len);
                self.question_correct += 1;
                self.total_correct += 1;
                self.skip_filter();
            }
            Outcome::Incorrect => {
                self.question_miss += 1;
                self.total_miss += 1;
            }
            Outcome::Ignored => {}
        }

        self.on_input.emit(&InputEvent {
            outcome,
            progress: self.progress(),
        });

        if outcome.is_correct() {
            self.settle_completed_questions();
        }
        outcome
    }

    pub fn pause(&mut self) {
        if self.state == SessionState::Running {
            debug!("session paused");
            self.state = SessionState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == SessionState::Paused {
            debug!("session resumed");
            self.state = SessionState::Running;
        }
    }

    pub fn end_session(&mut self) {
        if self.is_active() {
            self.complete_session();
        }
    }

    /// Move on without announcing the current question as completed.
    pub fn skip_current_question(&mut self) {
        if !self.is_active() {
            return;
        }

        debug!(index = self.question_index, "question skipped");
        if self.question_index + 1 >= self.questions.len() {
            self.complete_session();
            return;
        }
        self.question_index += 1;
        self.load_question();
        self.settle_completed_questions();
    }

    pub fn next_question(&mut self) {
        self.skip_current_question();
    }

    /// Detach every subscriber. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.on_input.clear();
        self.on_question_completed.clear();
        self.on_session_completed.clear();
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            SessionState::Idle => None,
            _ => self.questions.get(self.question_index),
        }
    }

    pub fn current_position(&self) -> usize {
        self.position
    }

    /// The character the next keystroke is checked against.
    pub fn expected_char(&self) -> Option<char> {
        if !self.is_active() {
            return None;
        }
        self.current_question()?.char_at(self.position)
    }

    pub fn progress(&self) -> Progress {
        match self.current_question() {
            Some(question) => Progress::new(
                self.question_index,
                self.questions.len(),
                question.input_text(),
                self.position,
                self.total_correct,
                self.total_miss,
            ),
            None => Progress::default(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn pending_input(&self) -> &str {
        self.validator.pending_input()
    }

    pub fn input_mode(&self) -> InputMode {
        self.validator.mode()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn on_input(&self) -> &EventStream<InputEvent> {
        &self.on_input
    }

    pub fn on_question_completed(&self) -> &EventStream<QuestionCompletedEvent> {
        &self.on_question_completed
    }

    pub fn on_session_completed(&self) -> &EventStream<SessionCompletedEvent> {
        &self.on_session_completed
    }

    fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Running | SessionState::Paused)
    }

    fn current_len(&self) -> usize {
        self.questions
            .get(self.question_index)
            .map_or(0, Question::len)
    }

    fn load_question(&mut self) {
        self.position = 0;
        self.question_correct = 0;
        self.question_miss = 0;
        self.validator.clear_buffer();
        self.skip_filter();
        debug!(index = self.question_index, position = self.position, "question loaded");
    }

    fn skip_filter(&mut self) {
        if let Some(question) = self.questions.get(self.question_index) {
            self.position =
                advance_past_skippable(question.input_text(), self.position, &self.settings);
        }
    }

    /// Finish the current question while its end has been reached.
    ///
    /// Loops because a following question may have nothing left to type once
    /// skippable characters are passed over.
    fn settle_completed_questions(&mut self) {
        while self.state == SessionState::Running && self.position >= self.current_len() {
            let Some(question) = self.questions.get(self.question_index).cloned() else {
                break;
            };
            let is_last_question = self.question_index + 1 >= self.questions.len();
            self.completed_questions += 1;

            debug!(
                index = self.question_index,
                correct = self.question_correct,
                miss = self.question_miss,
                "question completed"
            );
            self.on_question_completed.emit(&QuestionCompletedEvent {
                question,
                correct_count: self.question_correct,
                miss_count: self.question_miss,
                next_question_index: self.question_index + 1,
                is_last_question,
            });

            if is_last_question {
                self.complete_session();
            } else {
                self.question_index += 1;
                self.load_question();
            }
        }
    }

    fn complete_session(&mut self) {
        self.state = SessionState::Completed;
        self.validator.clear_buffer();

        let event = SessionCompletedEvent {
            total_correct_count: self.total_correct,
            total_miss_count: self.total_miss,
            completed_questions: self.completed_questions,
            total_questions: self.questions.len(),
        };
        debug!(
            correct = event.total_correct_count,
            miss = event.total_miss_count,
            completed = event.completed_questions,
            "session completed"
        );
        self.on_session_completed.emit(&event);
    }
}

impl Drop for TypingSession {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for TypingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypingSession")
            .field("state", &self.state)
            .field("mode", &self.validator.mode())
            .field("question_index", &self.question_index)
            .field("position", &self.position)
            .field("total_correct", &self.total_correct)
            .field("total_miss", &self.total_miss)
            .finish()
    }
}
