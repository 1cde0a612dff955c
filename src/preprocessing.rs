//! Token representation and the string transformations applied to tokens
//! before they are turned into feature values.

use std::ops::Range;

use crate::resources::stemmer::Stemmer;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub value: String,
    pub char_range: Range<usize>,
}

impl Token {
    pub fn new(value: String, char_range: Range<usize>) -> Self {
        Self { value, char_range }
    }

    pub fn start(&self) -> usize {
        self.char_range.start
    }

    pub fn end(&self) -> usize {
        self.char_range.end
    }
}

pub fn normalize(value: &str) -> String {
    value.to_lowercase()
}

pub fn normalize_token(token: &Token) -> String {
    normalize(&token.value)
}

pub fn stem_token(token: &Token, stemmer: &dyn Stemmer) -> String {
    stemmer.stem(&normalize_token(token))
}

/// Coarse case shape of a string
///
/// - `xxx`: lowercased
/// - `Xxx`: capitalized
/// - `XXX`: uppercased
/// - `xX`: none of the above
pub fn get_shape(value: &str) -> &'static str {
    let cased_chars: Vec<char> = value
        .chars()
        .filter(|c| c.is_lowercase() || c.is_uppercase())
        .collect();
    if cased_chars.is_empty() {
        return "xX";
    }
    if cased_chars.iter().all(|c| c.is_lowercase()) {
        "xxx"
    } else if cased_chars.iter().all(|c| c.is_uppercase()) {
        "XXX"
    } else if is_capitalized(value) {
        "Xxx"
    } else {
        "xX"
    }
}

fn is_capitalized(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => chars.all(|c| !c.is_uppercase()),
        _ => false,
    }
}
