use std::collections::HashMap;
use std::fs;
use std::path::Path;

use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::QuestionSetError;
use crate::question::Question;
use crate::validator::InputMode;

static PACK_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/resources/questions");

/// A named list of questions, loaded from JSON.
///
/// ```json
/// {
///   "name": "words",
///   "mode": "romaji",
///   "questions": ["さくら", { "display": "東京", "input": "とうきょう" }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSet {
    pub name: String,
    pub mode: Option<InputMode>,
    pub questions: Vec<Question>,
}

#[derive(Deserialize)]
struct RawSet {
    name: String,
    #[serde(default)]
    mode: Option<InputMode>,
    questions: Vec<RawQuestion>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawQuestion {
    Text(String),
    Full {
        id: Option<String>,
        display: Option<String>,
        input: String,
        #[serde(default)]
        metadata: HashMap<String, Value>,
    },
}

impl From<RawQuestion> for Question {
    fn from(raw: RawQuestion) -> Self {
        match raw {
            RawQuestion::Text(text) => Question::new(text),
            RawQuestion::Full {
                id,
                display,
                input,
                metadata,
            } => Question::with_id(
                id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                display.unwrap_or_else(|| input.clone()),
                input,
                metadata,
            ),
        }
    }
}

impl QuestionSet {
    pub fn from_json_str(json: &str) -> Result<Self, QuestionSetError> {
        let raw: RawSet = serde_json::from_str(json)?;
        if raw.questions.is_empty() {
            return Err(QuestionSetError::Empty(raw.name));
        }

        Ok(Self {
            name: raw.name,
            mode: raw.mode,
            questions: raw.questions.into_iter().map(Question::from).collect(),
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, QuestionSetError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| QuestionSetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// One of the packs compiled into the binary, by file stem.
    pub fn builtin(name: &str) -> Result<Self, QuestionSetError> {
        let json = PACK_DIR
            .get_file(format!("{name}.json"))
            .and_then(|file| file.contents_utf8())
            .ok_or_else(|| QuestionSetError::UnknownPack(name.to_string()))?;
        Self::from_json_str(json)
    }

    pub fn builtin_names() -> Vec<&'static str> {
        let mut names: Vec<&'static str> = PACK_DIR
            .files()
            .filter_map(|file| file.path().file_stem()?.to_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// A single ad-hoc question.
    pub fn single(text: impl Into<String>) -> Self {
        Self {
            name: "prompt".to_string(),
            mode: None,
            questions: vec![Question::new(text)],
        }
    }

    /// The declared mode, or romaji when any question is written in hiragana.
    pub fn preferred_mode(&self) -> InputMode {
        self.mode.unwrap_or_else(|| {
            let has_kana = self
                .questions
                .iter()
                .any(|q| q.input_text().chars().any(|c| matches!(c, '\u{3041}'..='\u{309F}')));
            if has_kana {
                InputMode::Romaji
            } else {
                InputMode::Direct
            }
        })
    }

    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Question> {
        let mut questions = self.questions.clone();
        questions.shuffle(rng);
        questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
