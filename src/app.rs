use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::SessionError;
use crate::events::{QuestionCompletedEvent, SessionCompletedEvent, Subscription};
use crate::outcome::InputOutcome;
use crate::question::Question;
use crate::question_set::QuestionSet;
use crate::session::{SessionState, TypingSession};
use crate::settings::Settings;
use crate::validator::InputMode;

/// Ticks a miss stays highlighted
const MISS_FLASH_TICKS: u8 = 3;

/// What the event loop should do after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Restart,
    New,
    Quit,
}

/// Collected from the session's event streams for rendering
#[derive(Debug, Default)]
pub struct Feedback {
    pub last_outcome: Option<InputOutcome>,
    pub miss_flash: u8,
    pub last_completed: Option<QuestionCompletedEvent>,
    pub results: Option<SessionCompletedEvent>,
}

pub struct App {
    session: TypingSession,
    set: QuestionSet,
    order: Vec<Question>,
    shuffle: bool,
    feedback: Rc<RefCell<Feedback>>,
    subscriptions: Vec<Subscription>,
}

impl App {
    pub fn new(
        mode: InputMode,
        settings: Settings,
        set: QuestionSet,
        shuffle: bool,
    ) -> Result<Self, SessionError> {
        let mut session = TypingSession::new(mode, settings);
        let feedback = Rc::new(RefCell::new(Feedback::default()));
        let subscriptions = subscribe(&session, &feedback);

        let order = if shuffle {
            set.shuffled(&mut rand::thread_rng())
        } else {
            set.questions.clone()
        };
        session.start_session(order.clone())?;

        Ok(Self {
            session,
            set,
            order,
            shuffle,
            feedback,
            subscriptions,
        })
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => return Action::Quit,
            KeyCode::Char('c') if ctrl => return Action::Quit,
            _ => {}
        }

        if self.session.state() == SessionState::Completed {
            return match key.code {
                KeyCode::Char('r') => Action::Restart,
                KeyCode::Char('n') => Action::New,
                KeyCode::Char('q') => Action::Quit,
                _ => Action::Continue,
            };
        }

        match key.code {
            KeyCode::Char('p') if ctrl => match self.session.state() {
                SessionState::Paused => self.session.resume(),
                _ => self.session.pause(),
            },
            KeyCode::Char('e') if ctrl => self.session.end_session(),
            KeyCode::Tab => self.session.skip_current_question(),
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                if !c.is_control() {
                    self.session.process_input(c);
                }
            }
            _ => {}
        }
        Action::Continue
    }

    pub fn on_tick(&mut self) {
        let mut feedback = self.feedback.borrow_mut();
        feedback.miss_flash = feedback.miss_flash.saturating_sub(1);
    }

    /// Run the same questions again, in the same order.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        *self.feedback.borrow_mut() = Feedback::default();
        self.session.start_session(self.order.clone())
    }

    /// Start over with the questions reshuffled.
    pub fn new_round(&mut self) -> Result<(), SessionError> {
        self.order = self.set.shuffled(&mut rand::thread_rng());
        self.restart()
    }

    pub fn session(&self) -> &TypingSession {
        &self.session
    }

    pub fn feedback(&self) -> Ref<'_, Feedback> {
        self.feedback.borrow()
    }

    pub fn set_name(&self) -> &str {
        &self.set.name
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffle
    }

    pub fn is_finished(&self) -> bool {
        self.session.state() == SessionState::Completed
    }
}

impl Drop for App {
    fn drop(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
    }
}

fn subscribe(session: &TypingSession, feedback: &Rc<RefCell<Feedback>>) -> Vec<Subscription> {
    let on_input = Rc::clone(feedback);
    let on_question = Rc::clone(feedback);
    let on_session = Rc::clone(feedback);

    vec![
        session.on_input().subscribe(move |event| {
            let mut feedback = on_input.borrow_mut();
            feedback.last_outcome = Some(event.outcome);
            if event.outcome.is_incorrect() {
                feedback.miss_flash = MISS_FLASH_TICKS;
            }
        }),
        session.on_question_completed().subscribe(move |event| {
            on_question.borrow_mut().last_completed = Some(event.clone());
        }),
        session.on_session_completed().subscribe(move |event| {
            on_session.borrow_mut().results = Some(*event);
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app(texts: &[&str]) -> App {
        let set = QuestionSet {
            name: "test".into(),
            mode: None,
            questions: texts.iter().map(|t| Question::new(*t)).collect(),
        };
        App::new(InputMode::Direct, Settings::default(), set, false).unwrap()
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_completes_session() {
        let mut app = app(&["hi"]);
        type_str(&mut app, "hi");

        assert!(app.is_finished());
        let feedback = app.feedback();
        assert_eq!(feedback.results.map(|r| r.total_correct_count), Some(2));
        assert_eq!(
            feedback.last_completed.as_ref().map(|q| q.question.input_text()),
            Some("hi")
        );
    }

    #[test]
    fn test_miss_flashes_then_fades() {
        let mut app = app(&["a"]);
        type_str(&mut app, "x");

        assert_eq!(app.feedback().miss_flash, MISS_FLASH_TICKS);
        for _ in 0..MISS_FLASH_TICKS {
            app.on_tick();
        }
        assert_eq!(app.feedback().miss_flash, 0);
        app.on_tick();
        assert_eq!(app.feedback().miss_flash, 0);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app(&["a"]);

        assert_eq!(app.handle_key(key(KeyCode::Esc)), Action::Quit);
        assert_eq!(app.handle_key(ctrl('c')), Action::Quit);
    }

    #[test]
    fn test_control_chars_are_not_typed() {
        let mut app = app(&["a"]);
        app.handle_key(ctrl('a'));
        app.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::ALT));

        assert_eq!(app.session().current_position(), 0);
        assert!(app.feedback().last_outcome.is_none());
    }

    #[test]
    fn test_pause_toggle() {
        let mut app = app(&["ab"]);

        app.handle_key(ctrl('p'));
        assert_eq!(app.session().state(), SessionState::Paused);
        type_str(&mut app, "a");
        assert_eq!(app.session().current_position(), 0);

        app.handle_key(ctrl('p'));
        assert_eq!(app.session().state(), SessionState::Running);
    }

    #[test]
    fn test_tab_skips_question() {
        let mut app = app(&["ab", "cd"]);
        app.handle_key(key(KeyCode::Tab));

        assert_eq!(app.session().expected_char(), Some('c'));
    }

    #[test]
    fn test_ctrl_e_ends_session() {
        let mut app = app(&["abc"]);
        type_str(&mut app, "a");
        app.handle_key(ctrl('e'));

        assert!(app.is_finished());
        assert_eq!(app.feedback().results.map(|r| r.completed_questions), Some(0));
    }

    #[test]
    fn test_results_keys() {
        let mut app = app(&["a"]);
        type_str(&mut app, "a");

        assert_eq!(app.handle_key(key(KeyCode::Char('r'))), Action::Restart);
        assert_eq!(app.handle_key(key(KeyCode::Char('n'))), Action::New);
        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(app.handle_key(key(KeyCode::Char('z'))), Action::Continue);
    }

    #[test]
    fn test_restart_resets_feedback() {
        let mut app = app(&["a", "b"]);
        type_str(&mut app, "ab");
        assert!(app.is_finished());

        app.restart().unwrap();

        assert!(!app.is_finished());
        assert!(app.feedback().results.is_none());
        assert_eq!(app.session().expected_char(), Some('a'));
    }

    #[test]
    fn test_new_round_keeps_questions() {
        let mut app = app(&["a", "b", "c"]);
        app.new_round().unwrap();

        let mut texts: Vec<&str> = app
            .session()
            .questions()
            .iter()
            .map(Question::input_text)
            .collect();
        texts.sort_unstable();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }
}
