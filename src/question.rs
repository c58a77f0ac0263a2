use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// A single text to type.
///
/// `display_text` is what the user reads (e.g. kanji), `input_text` is what
/// keystrokes are validated against (e.g. its hiragana reading).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default = "new_id")]
    id: String,
    display_text: String,
    input_text: String,
    #[serde(default)]
    metadata: HashMap<String, Value>,
}

impl Question {
    /// Question whose display and input text are the same.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::with_display(text.clone(), text)
    }

    pub fn with_display(display_text: impl Into<String>, input_text: impl Into<String>) -> Self {
        Self::with_id(
            new_id(),
            display_text,
            input_text,
            HashMap::new(),
        )
    }

    pub fn with_id(
        id: impl Into<String>,
        display_text: impl Into<String>,
        input_text: impl Into<String>,
        metadata: HashMap<String, Value>,
    ) -> Self {
        Self {
            id: id.into(),
            display_text: display_text.into(),
            input_text: input_text.into(),
            metadata,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn metadata(&self) -> &HashMap<String, Value> {
        &self.metadata
    }

    /// Number of characters (not bytes) in the input text.
    pub fn len(&self) -> usize {
        self.input_text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.input_text.is_empty()
    }

    pub fn char_at(&self, pos: usize) -> Option<char> {
        self.input_text.chars().nth(pos)
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}
