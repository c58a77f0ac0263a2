//! Romaji-to-hiragana validation.
//!
//! A static lookup table converts buffered ASCII keystrokes into moras,
//! handling sokuon (っ) from doubled consonants, hatsuon (ん), and yōon (きゃ).

pub mod table;
mod validator;

pub use table::RomajiTable;
pub use validator::RomajiValidator;
