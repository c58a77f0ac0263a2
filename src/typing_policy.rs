use crate::settings::Settings;

/// Punctuation and symbol characters, in ASCII and the common CJK blocks.
///
/// The prolonged sound mark (ー) and iteration marks are letters in Japanese
/// text and are typed, so they are not symbols here.
pub fn is_symbol(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_punctuation();
    }
    match c {
        // iteration marks and the prolonged sound mark are typed
        '々' | '〆' | 'ー' | 'ｰ' | 'ゝ' | 'ゞ' | 'ヽ' | 'ヾ' => false,
        '\u{00A1}'..='\u{00BF}' | '\u{00D7}' | '\u{00F7}' => true,
        // general punctuation, currency, letterlike, arrows, math, technical,
        // box drawing, geometric shapes, misc symbols, dingbats
        '\u{2010}'..='\u{2027}' | '\u{2030}'..='\u{205E}' => true,
        '\u{20A0}'..='\u{20CF}' => true,
        '\u{2100}'..='\u{214F}' => true,
        '\u{2190}'..='\u{27BF}' => true,
        '\u{2980}'..='\u{2BFF}' => true,
        // CJK symbols and punctuation
        '\u{3001}'..='\u{3004}' | '\u{3008}'..='\u{3020}' | '\u{3030}' | '\u{303D}' => true,
        '\u{30FB}' => true,
        // fullwidth forms of ASCII punctuation
        '\u{FF01}'..='\u{FF0F}'
        | '\u{FF1A}'..='\u{FF20}'
        | '\u{FF3B}'..='\u{FF40}'
        | '\u{FF5B}'..='\u{FF65}'
        | '\u{FFE0}'..='\u{FFEE}' => true,
        _ => false,
    }
}

/// Whether `c` is passed over without a keystroke under `settings`.
pub fn is_skippable(c: char, settings: &Settings) -> bool {
    (settings.skip_whitespace && c.is_whitespace()) || (settings.skip_symbols && is_symbol(c))
}

/// First position at or after `pos` whose character must be typed.
///
/// Returns `text`'s char count when everything from `pos` on is skippable.
pub fn advance_past_skippable(text: &str, pos: usize, settings: &Settings) -> usize {
    pos + text
        .chars()
        .skip(pos)
        .take_while(|&c| is_skippable(c, settings))
        .count()
}
