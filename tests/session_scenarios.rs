use std::cell::RefCell;
use std::rc::Rc;

use assert_matches::assert_matches;
use romatype::events::{InputEvent, QuestionCompletedEvent, SessionCompletedEvent};
use romatype::{InputMode, Outcome, Question, SessionError, SessionState, Settings, TypingSession};

#[derive(Debug, Clone, PartialEq)]
enum Seen {
    Input(Outcome, usize),
    Question(String),
    Session(usize, usize),
}

/// Records every notification in arrival order.
fn record(session: &TypingSession) -> Rc<RefCell<Vec<Seen>>> {
    let log = Rc::new(RefCell::new(Vec::new()));

    let l = Rc::clone(&log);
    let _ = session.on_input().subscribe(move |e: &InputEvent| {
        l.borrow_mut()
            .push(Seen::Input(e.outcome.outcome, e.progress.position))
    });
    let l = Rc::clone(&log);
    let _ = session
        .on_question_completed()
        .subscribe(move |e: &QuestionCompletedEvent| {
            l.borrow_mut()
                .push(Seen::Question(e.question.input_text().to_string()))
        });
    let l = Rc::clone(&log);
    let _ = session
        .on_session_completed()
        .subscribe(move |e: &SessionCompletedEvent| {
            l.borrow_mut()
                .push(Seen::Session(e.total_correct_count, e.total_miss_count))
        });

    log
}

#[test]
fn direct_two_chars_complete_the_session() {
    let mut session = TypingSession::new(InputMode::Direct, Settings::default());
    let log = record(&session);

    session.start_session(vec![Question::new("ab")]).unwrap();
    session.process_input('a');
    session.process_input('b');

    assert_eq!(session.state(), SessionState::Completed);
    assert_eq!(
        *log.borrow(),
        vec![
            Seen::Input(Outcome::Correct, 1),
            Seen::Input(Outcome::Correct, 2),
            Seen::Question("ab".into()),
            Seen::Session(2, 0),
        ]
    );
}

#[test]
fn skip_symbols_jumps_over_punctuation() {
    let mut session = TypingSession::new(InputMode::Direct, Settings::skip_all());
    session.start_session(vec![Question::new("a!b")]).unwrap();

    session.process_input('a');

    assert_eq!(session.expected_char(), Some('b'));
}

#[test]
fn romaji_youon_then_vowel_completes() {
    let mut session = TypingSession::new(InputMode::Romaji, Settings::default());
    let log = record(&session);
    session.start_session(vec![Question::new("きょう")]).unwrap();

    for c in "kyou".chars() {
        session.process_input(c);
    }

    assert_eq!(session.state(), SessionState::Completed);
    assert_eq!(
        *log.borrow(),
        vec![
            Seen::Input(Outcome::Ignored, 0),
            Seen::Input(Outcome::Ignored, 0),
            Seen::Input(Outcome::Correct, 2),
            Seen::Input(Outcome::Correct, 3),
            Seen::Question("きょう".into()),
            Seen::Session(2, 0),
        ]
    );
}

#[test]
fn romaji_sokuon_and_hatsuon() {
    let mut session = TypingSession::new(InputMode::Romaji, Settings::default());
    session
        .start_session(vec![Question::new("がっこう"), Question::new("さんぽ")])
        .unwrap();

    for c in "gakkou".chars() {
        assert!(!session.process_input(c).is_incorrect(), "{c}");
    }
    assert_eq!(session.progress().question_index, 1);

    for c in "sanpo".chars() {
        assert!(!session.process_input(c).is_incorrect(), "{c}");
    }
    assert_eq!(session.state(), SessionState::Completed);
    assert_eq!(session.progress().miss_count, 0);
}

#[test]
fn romaji_double_n_before_vowel() {
    let mut session = TypingSession::new(InputMode::Romaji, Settings::default());
    session.start_session(vec![Question::new("こんや")]).unwrap();

    for c in "konnya".chars() {
        session.process_input(c);
    }

    assert_eq!(session.state(), SessionState::Completed);
    assert_eq!(session.progress().miss_count, 0);
}

#[test]
fn romaji_wrong_mora_counts_one_miss() {
    let mut session = TypingSession::new(InputMode::Romaji, Settings::default());
    session.start_session(vec![Question::new("さくら")]).unwrap();

    session.process_input('s');
    let outcome = session.process_input('i');

    assert_matches!(outcome.outcome, Outcome::Incorrect);
    assert_eq!(outcome.expected_char, Some('さ'));
    assert_eq!(session.current_position(), 0);
    assert_eq!(session.progress().miss_count, 1);
    assert_eq!(session.pending_input(), "");
}

#[test]
fn disposed_session_delivers_nothing() {
    let mut session = TypingSession::new(InputMode::Direct, Settings::default());
    let log = record(&session);

    session.dispose();
    session.start_session(vec![Question::new("a")]).unwrap();
    session.process_input('a');

    assert!(log.borrow().is_empty());
    assert_eq!(session.state(), SessionState::Completed);
}

#[test]
fn empty_question_list_is_rejected() {
    let mut session = TypingSession::new(InputMode::Romaji, Settings::default());

    assert_matches!(session.start_session(Vec::new()), Err(SessionError::NoQuestions));
}

#[test]
fn accuracy_stays_in_range() {
    let mut session = TypingSession::new(InputMode::Direct, Settings::default());
    session.start_session(vec![Question::new("abc")]).unwrap();
    assert_eq!(session.progress().accuracy(), 1.0);

    for c in "axbyyc".chars() {
        session.process_input(c);
        let accuracy = session.progress().accuracy();
        assert!((0.0..=1.0).contains(&accuracy));
    }
    assert_eq!(session.progress().accuracy(), 0.5);
}

#[test]
fn builtin_words_are_typeable_in_romaji() {
    use romatype::question_set::QuestionSet;

    let set = QuestionSet::builtin("romaji_words").unwrap();
    let mut session = TypingSession::new(InputMode::Romaji, Settings::default());
    let tokyo = set
        .questions
        .iter()
        .find(|q| q.id() == "tokyo")
        .cloned()
        .unwrap();
    session.start_session(vec![tokyo]).unwrap();

    for c in "toukyou".chars() {
        session.process_input(c);
    }

    assert_eq!(session.state(), SessionState::Completed);
}
