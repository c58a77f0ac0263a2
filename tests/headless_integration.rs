use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use romatype::app::{Action, App};
use romatype::question_set::QuestionSet;
use romatype::runtime::{AppEvent, FixedTicker, Runner, TestEventSource};
use romatype::{InputMode, Question, SessionState, Settings};

fn set(questions: Vec<Question>) -> QuestionSet {
    QuestionSet {
        name: "headless".into(),
        mode: None,
        questions,
    }
}

fn send_keys(tx: &mpsc::Sender<AppEvent>, keys: &str) {
    for c in keys.chars() {
        tx.send(AppEvent::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::NONE,
        )))
        .unwrap();
    }
}

/// Drive a small event loop until the app asks for something other than
/// `Continue`, or the step budget runs out.
fn drive(app: &mut App, runner: &Runner<TestEventSource, FixedTicker>, steps: u32) -> Action {
    for _ in 0..steps {
        let action = match runner.step() {
            AppEvent::Tick => {
                app.on_tick();
                Action::Continue
            }
            AppEvent::Resize => Action::Continue,
            AppEvent::Key(key) => app.handle_key(key),
        };
        if action != Action::Continue {
            return action;
        }
    }
    Action::Continue
}

fn runner(rx: mpsc::Receiver<AppEvent>) -> Runner<TestEventSource, FixedTicker> {
    Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    )
}

#[test]
fn headless_direct_flow_completes() {
    let mut app = App::new(
        InputMode::Direct,
        Settings::default(),
        set(vec![Question::new("hi")]),
        false,
    )
    .unwrap();
    let (tx, rx) = mpsc::channel();
    let runner = runner(rx);

    send_keys(&tx, "hi");
    drive(&mut app, &runner, 20);

    assert!(app.is_finished());
    let results = app.feedback().results.expect("session results");
    assert_eq!(results.total_correct_count, 2);
    assert_eq!(results.accuracy(), 1.0);
}

#[test]
fn headless_romaji_flow_with_restart() {
    let mut app = App::new(
        InputMode::Romaji,
        Settings::default(),
        set(vec![
            Question::with_display("学校", "がっこう"),
            Question::with_display("散歩", "さんぽ"),
        ]),
        false,
    )
    .unwrap();
    let (tx, rx) = mpsc::channel();
    let runner = runner(rx);

    send_keys(&tx, "gakkousanpo");
    drive(&mut app, &runner, 40);
    assert!(app.is_finished());
    assert_eq!(
        app.feedback().results.map(|r| r.completed_questions),
        Some(2)
    );

    send_keys(&tx, "r");
    assert_eq!(drive(&mut app, &runner, 10), Action::Restart);
    app.restart().unwrap();

    assert_eq!(app.session().state(), SessionState::Running);
    assert_eq!(app.session().expected_char(), Some('が'));
}

#[test]
fn headless_escape_quits_mid_question() {
    let mut app = App::new(
        InputMode::Direct,
        Settings::default(),
        set(vec![Question::new("hello")]),
        false,
    )
    .unwrap();
    let (tx, rx) = mpsc::channel();
    let runner = runner(rx);

    send_keys(&tx, "he");
    tx.send(AppEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
        .unwrap();

    assert_eq!(drive(&mut app, &runner, 20), Action::Quit);
    assert_eq!(app.session().current_position(), 2);
}

#[test]
fn headless_ticks_fade_miss_highlight() {
    let mut app = App::new(
        InputMode::Direct,
        Settings::default(),
        set(vec![Question::new("a")]),
        false,
    )
    .unwrap();
    let (tx, rx) = mpsc::channel();
    let runner = runner(rx);

    send_keys(&tx, "x");
    drive(&mut app, &runner, 1);
    assert!(app.feedback().miss_flash > 0);

    // nothing queued: every step is a tick
    drive(&mut app, &runner, 10);
    assert_eq!(app.feedback().miss_flash, 0);
}
