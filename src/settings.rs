use serde::{Deserialize, Serialize};

/// Per-session typing rules. Fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub skip_whitespace: bool,
    pub skip_symbols: bool,
    pub case_sensitive: bool,
}

impl Default for Settings {
    /// No skipping, case sensitive.
    fn default() -> Self {
        Self::new(false, false, true)
    }
}

impl Settings {
    pub const fn new(skip_whitespace: bool, skip_symbols: bool, case_sensitive: bool) -> Self {
        Self {
            skip_whitespace,
            skip_symbols,
            case_sensitive,
        }
    }

    pub const fn skip_whitespace_only() -> Self {
        Self::new(true, false, true)
    }

    /// Skip whitespace and symbols.
    pub const fn skip_all() -> Self {
        Self::new(true, true, true)
    }
}
