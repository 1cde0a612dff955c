use std::cmp::min;

use crate::preprocessing::Token;

/// Chunk of `chunk_size` characters of `word`, starting at `chunk_start`, or ending at
/// `chunk_start` when `reverse` is true
///
/// The whole word is returned when it is not longer than `chunk_size`.
pub fn get_word_chunk(word: &str, chunk_size: usize, chunk_start: usize, reverse: bool) -> String {
    let word_length = word.chars().count();
    if chunk_size >= word_length {
        return word.to_string();
    }
    let (start, end) = if reverse {
        let end = min(chunk_start, word_length);
        (end.saturating_sub(chunk_size), end)
    } else {
        let start = min(chunk_start, word_length);
        (start, min(start + chunk_size, word_length))
    };
    word.chars().skip(start).take(end - start).collect()
}

/// Rebuilds the text covered by the tokens, filling the gaps between tokens with spaces
pub fn initial_string_from_tokens(tokens: &[Token]) -> String {
    let mut current_index = 0;
    let mut text = String::new();
    for token in tokens {
        if token.start() > current_index {
            text.extend((current_index..token.start()).map(|_| ' '));
        }
        text.push_str(&token.value);
        current_index = token.end();
    }
    text
}

/// Token carrying a transformed value, whose range starts where the original token starts and
/// spans the length of the new value
pub fn respan_token(token: &Token, transformed_value: String) -> Token {
    let start = token.start();
    let end = start + transformed_value.chars().count();
    Token::new(transformed_value, start..end)
}
