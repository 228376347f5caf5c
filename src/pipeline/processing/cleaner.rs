use once_cell::sync::Lazy;
use regex::Regex;

/// Anything outside letters, digits, whitespace and basic punctuation
static DISALLOWED_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[^a-zA-Z0-9\s.,"'?!]"#).expect("valid disallowed-character pattern"));

/// A whitespace character directly in front of punctuation
static SPACE_BEFORE_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s([^\w\s])").expect("valid punctuation pattern"));

/// Text-normalization primitives shared by the attribute normalizers
pub trait Cleaner: Send + Sync {
    /// Strip disallowed characters, drop whitespace before punctuation,
    /// collapse whitespace runs and trim
    fn clean_text(&self, text: &str) -> String;

    /// `clean_text` followed by lowercasing
    fn clean_caption(&self, text: &str) -> String;

    /// `clean_text`, then split camel-cased words and lowercase
    fn clean_amenity(&self, text: &str) -> String;
}

/// Stateless cleaner used for every supplier
#[derive(Debug, Clone, Copy, Default)]
pub struct HotelCleaner;

impl HotelCleaner {
    pub fn new() -> Self {
        Self
    }
}

impl Cleaner for HotelCleaner {
    fn clean_text(&self, text: &str) -> String {
        let replaced = DISALLOWED_CHARS.replace_all(text, " ");
        let tightened = SPACE_BEFORE_PUNCTUATION.replace_all(&replaced, "$1");
        tightened.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn clean_caption(&self, text: &str) -> String {
        self.clean_text(text).to_lowercase()
    }

    fn clean_amenity(&self, text: &str) -> String {
        let cleaned = self.clean_text(text);
        let mut split = String::with_capacity(cleaned.len() + 4);
        for (index, ch) in cleaned.chars().enumerate() {
            if index > 0 && ch.is_ascii_uppercase() {
                split.push(' ');
            }
            split.push(ch);
        }
        split.to_lowercase()
    }
}
