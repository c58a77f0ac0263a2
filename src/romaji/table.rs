use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Small tsu, prepended to a mora for geminated consonants.
pub const SOKUON: char = 'っ';

/// The standalone nasal mora.
pub const HATSUON: char = 'ん';

/// Consonants that geminate when doubled ("kka" → "っか").
const GEMINATION_CONSONANTS: &[char] = &[
    'k', 'g', 's', 'z', 't', 'd', 'h', 'f', 'b', 'p', 'm', 'r', 'w', 'j', 'c', 'v', 'y',
];

#[rustfmt::skip]
pub(crate) const MAPPINGS: &[(&str, &str)] = &[
    // vowels
    ("a", "あ"), ("i", "い"), ("u", "う"), ("e", "え"), ("o", "お"),

    ("ka", "か"), ("ki", "き"), ("ku", "く"), ("ke", "け"), ("ko", "こ"),
    ("ca", "か"), ("cu", "く"), ("co", "こ"),

    ("sa", "さ"), ("si", "し"), ("su", "す"), ("se", "せ"), ("so", "そ"),
    ("shi", "し"),

    ("ta", "た"), ("ti", "ち"), ("tu", "つ"), ("te", "て"), ("to", "と"),
    ("chi", "ち"), ("tsu", "つ"),

    ("na", "な"), ("ni", "に"), ("nu", "ぬ"), ("ne", "ね"), ("no", "の"),

    ("ha", "は"), ("hi", "ひ"), ("hu", "ふ"), ("he", "へ"), ("ho", "ほ"),
    ("fu", "ふ"),

    ("ma", "ま"), ("mi", "み"), ("mu", "む"), ("me", "め"), ("mo", "も"),

    ("ya", "や"), ("yu", "ゆ"), ("yo", "よ"),

    ("ra", "ら"), ("ri", "り"), ("ru", "る"), ("re", "れ"), ("ro", "ろ"),

    ("wa", "わ"), ("wi", "うぃ"), ("we", "うぇ"), ("wo", "を"),

    ("nn", "ん"), ("n'", "ん"), ("xn", "ん"),

    // voiced rows
    ("ga", "が"), ("gi", "ぎ"), ("gu", "ぐ"), ("ge", "げ"), ("go", "ご"),
    ("za", "ざ"), ("zi", "じ"), ("zu", "ず"), ("ze", "ぜ"), ("zo", "ぞ"),
    ("ji", "じ"),
    ("da", "だ"), ("di", "ぢ"), ("du", "づ"), ("de", "で"), ("do", "ど"),
    ("ba", "ば"), ("bi", "び"), ("bu", "ぶ"), ("be", "べ"), ("bo", "ぼ"),
    ("pa", "ぱ"), ("pi", "ぴ"), ("pu", "ぷ"), ("pe", "ぺ"), ("po", "ぽ"),

    // yōon
    ("kya", "きゃ"), ("kyi", "きぃ"), ("kyu", "きゅ"), ("kye", "きぇ"), ("kyo", "きょ"),
    ("gya", "ぎゃ"), ("gyi", "ぎぃ"), ("gyu", "ぎゅ"), ("gye", "ぎぇ"), ("gyo", "ぎょ"),
    ("sya", "しゃ"), ("syi", "しぃ"), ("syu", "しゅ"), ("sye", "しぇ"), ("syo", "しょ"),
    ("sha", "しゃ"), ("shu", "しゅ"), ("she", "しぇ"), ("sho", "しょ"),
    ("zya", "じゃ"), ("zyi", "じぃ"), ("zyu", "じゅ"), ("zye", "じぇ"), ("zyo", "じょ"),
    ("ja", "じゃ"), ("ju", "じゅ"), ("je", "じぇ"), ("jo", "じょ"),
    ("jya", "じゃ"), ("jyi", "じぃ"), ("jyu", "じゅ"), ("jye", "じぇ"), ("jyo", "じょ"),
    ("tya", "ちゃ"), ("tyi", "ちぃ"), ("tyu", "ちゅ"), ("tye", "ちぇ"), ("tyo", "ちょ"),
    ("cha", "ちゃ"), ("chu", "ちゅ"), ("che", "ちぇ"), ("cho", "ちょ"),
    ("cya", "ちゃ"), ("cyi", "ちぃ"), ("cyu", "ちゅ"), ("cye", "ちぇ"), ("cyo", "ちょ"),
    ("dya", "ぢゃ"), ("dyi", "ぢぃ"), ("dyu", "ぢゅ"), ("dye", "ぢぇ"), ("dyo", "ぢょ"),
    ("nya", "にゃ"), ("nyi", "にぃ"), ("nyu", "にゅ"), ("nye", "にぇ"), ("nyo", "にょ"),
    ("hya", "ひゃ"), ("hyi", "ひぃ"), ("hyu", "ひゅ"), ("hye", "ひぇ"), ("hyo", "ひょ"),
    ("bya", "びゃ"), ("byi", "びぃ"), ("byu", "びゅ"), ("bye", "びぇ"), ("byo", "びょ"),
    ("pya", "ぴゃ"), ("pyi", "ぴぃ"), ("pyu", "ぴゅ"), ("pye", "ぴぇ"), ("pyo", "ぴょ"),
    ("mya", "みゃ"), ("myi", "みぃ"), ("myu", "みゅ"), ("mye", "みぇ"), ("myo", "みょ"),
    ("rya", "りゃ"), ("ryi", "りぃ"), ("ryu", "りゅ"), ("rye", "りぇ"), ("ryo", "りょ"),

    // extended sounds
    ("fa", "ふぁ"), ("fi", "ふぃ"), ("fe", "ふぇ"), ("fo", "ふぉ"),
    ("fya", "ふゃ"), ("fyu", "ふゅ"), ("fyo", "ふょ"),
    ("thi", "てぃ"), ("thu", "てゅ"),
    ("dhi", "でぃ"), ("dhu", "でゅ"),
    ("twu", "とぅ"), ("dwu", "どぅ"),
    ("whi", "うぃ"), ("whe", "うぇ"), ("who", "うぉ"),
    ("qa", "くぁ"), ("qi", "くぃ"), ("qe", "くぇ"), ("qo", "くぉ"),
    ("qwa", "くぁ"), ("qwi", "くぃ"), ("qwu", "くぅ"), ("qwe", "くぇ"), ("qwo", "くぉ"),
    ("kwa", "くぁ"), ("kwi", "くぃ"), ("kwu", "くぅ"), ("kwe", "くぇ"), ("kwo", "くぉ"),
    ("gwa", "ぐぁ"), ("gwi", "ぐぃ"), ("gwu", "ぐぅ"), ("gwe", "ぐぇ"), ("gwo", "ぐぉ"),
    ("tsa", "つぁ"), ("tsi", "つぃ"), ("tse", "つぇ"), ("tso", "つぉ"),

    // explicit small kana
    ("xa", "ぁ"), ("xi", "ぃ"), ("xu", "ぅ"), ("xe", "ぇ"), ("xo", "ぉ"),
    ("la", "ぁ"), ("li", "ぃ"), ("lu", "ぅ"), ("le", "ぇ"), ("lo", "ぉ"),
    ("xya", "ゃ"), ("xyu", "ゅ"), ("xyo", "ょ"),
    ("lya", "ゃ"), ("lyu", "ゅ"), ("lyo", "ょ"),
    ("xtu", "っ"), ("xtsu", "っ"), ("ltu", "っ"), ("ltsu", "っ"),
    ("xwa", "ゎ"), ("lwa", "ゎ"),
    ("xka", "ゕ"), ("xke", "ゖ"), ("lka", "ゕ"), ("lke", "ゖ"),

    // v row
    ("va", "ゔぁ"), ("vi", "ゔぃ"), ("vu", "ゔ"), ("ve", "ゔぇ"), ("vo", "ゔぉ"),
    ("vya", "ゔゃ"), ("vyu", "ゔゅ"), ("vyo", "ゔょ"),

    ("-", "ー"),
];

/// Romaji → hiragana lookup with a precomputed prefix set.
///
/// Built once per process by [`RomajiTable::global`] and never mutated.
pub struct RomajiTable {
    mappings: HashMap<&'static str, &'static str>,
    prefixes: HashSet<String>,
}

impl RomajiTable {
    /// Get or initialize the global singleton.
    pub fn global() -> &'static RomajiTable {
        static INSTANCE: OnceLock<RomajiTable> = OnceLock::new();
        INSTANCE.get_or_init(|| RomajiTable::build(MAPPINGS))
    }

    fn build(entries: &[(&'static str, &'static str)]) -> Self {
        let mappings: HashMap<_, _> = entries.iter().copied().collect();

        let mut prefixes = HashSet::new();
        for romaji in mappings.keys() {
            for (idx, c) in romaji.char_indices() {
                prefixes.insert(romaji[..idx + c.len_utf8()].to_string());
            }
        }
        // "n" resolves to ん or starts the な row
        prefixes.insert("n".to_string());

        tracing::debug!(
            entries = mappings.len(),
            prefixes = prefixes.len(),
            "romaji table built"
        );

        Self { mappings, prefixes }
    }

    /// Convert a complete romaji sequence to its mora string.
    ///
    /// Handles gemination ("tta" → "った", and the "tchi" spelling of "っち").
    /// Returns `None` while the sequence is incomplete or invalid.
    pub fn try_convert(&self, romaji: &str) -> Option<String> {
        if romaji.is_empty() {
            return None;
        }
        let romaji = romaji.to_lowercase();

        if let Some(kana) = self.mappings.get(romaji.as_str()) {
            return Some((*kana).to_string());
        }

        self.convert_geminated(&romaji)
    }

    fn convert_geminated(&self, romaji: &str) -> Option<String> {
        let mut chars = romaji.chars();
        let (first, second) = (chars.next()?, chars.next()?);

        if first == second && is_gemination_consonant(first) {
            let rest = &romaji[first.len_utf8()..];
            if let Some(kana) = self.mappings.get(rest) {
                return Some(format!("{SOKUON}{kana}"));
            }
        }

        if let Some(rest) = romaji.strip_prefix("tch") {
            if let Some(kana) = self.mappings.get(format!("ch{rest}").as_str()) {
                return Some(format!("{SOKUON}{kana}"));
            }
        }

        None
    }

    /// Whether `romaji` could still complete into a table entry.
    pub fn is_valid_prefix(&self, romaji: &str) -> bool {
        if romaji.is_empty() {
            return false;
        }
        let romaji = romaji.to_lowercase();

        if self.prefixes.contains(&romaji) {
            return true;
        }

        let mut chars = romaji.chars();
        let (Some(first), Some(second)) = (chars.next(), chars.next()) else {
            return false;
        };

        // gemination in progress: "kky" on the way to "kkya"
        if first == second
            && is_gemination_consonant(first)
            && self.prefixes.contains(&romaji[first.len_utf8()..])
        {
            return true;
        }

        // "tc" continues towards "tchi"/"tcha"
        match romaji.strip_prefix("tc") {
            Some(rest) => self.prefixes.contains(&format!("c{rest}")),
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// Every (romaji, kana) entry of the built-in table, in declaration order.
pub fn entries() -> impl Iterator<Item = (&'static str, &'static str)> {
    MAPPINGS.iter().copied()
}

pub fn is_gemination_consonant(c: char) -> bool {
    GEMINATION_CONSONANTS.contains(&c)
}

pub fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'i' | 'u' | 'e' | 'o')
}

/// Whether `next` after a pending "n" settles it as ん.
///
/// Vowels and "y" continue a な-row or にゃ-row mora; a second "n" is the
/// explicit "nn" spelling handled by the table.
pub fn is_nasal_terminator(next: char) -> bool {
    !is_vowel(next) && next != 'y' && next != 'n'
}
