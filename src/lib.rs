//! Typing practice engine: questions are typed one keystroke at a time,
//! either character for character or as romaji converted to hiragana.
//!
//! [`session::TypingSession`] is the entry point; the terminal front end in
//! `main.rs` is a thin layer over [`app::App`].
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod events;
pub mod outcome;
pub mod progress;
pub mod question;
pub mod question_set;
pub mod romaji;
pub mod runtime;
pub mod session;
pub mod settings;
pub mod trace_init;
pub mod typing_policy;
pub mod ui;
pub mod validator;

pub use error::{QuestionSetError, SessionError};
pub use outcome::{InputOutcome, Outcome};
pub use question::Question;
pub use session::{SessionState, TypingSession};
pub use settings::Settings;
pub use validator::{InputMode, InputValidator};
