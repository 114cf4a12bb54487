//! Text-to-Morse conversion.
//!
//! Walks the input once, left to right. Mapped characters are rendered with
//! the configured symbols; anything else (spaces, punctuation, unmapped
//! letters) passes through verbatim. A space in the input is the only word
//! boundary and drives where `word_before`, `word_after` and the separators
//! are placed.


use std::time::Instant;

use tracing::{debug, debug_span};

use crate::charset::{registry, CharacterTable};
use crate::settings::{FinalWord, Settings};

const WORD_BOUNDARY: char = ' ';

/// Convert `input` using the character set named by `settings.morse_type`.
pub fn convert(input: &str, settings: &Settings) -> String {
    convert_with_table(input, settings, registry().table(&settings.morse_type))
}

/// Convert `input` against an explicit table.
pub fn convert_with_table(input: &str, settings: &Settings, table: &CharacterTable) -> String {
    let chars: Vec<char> = input
        .chars()
        .map(|c| if c == '\n' { WORD_BOUNDARY } else { c })
        .collect();
    let _span = debug_span!(
        "convert",
        char_count = chars.len(),
        morse_type = settings.morse_type.as_str()
    )
    .entered();
    let started = Instant::now();

    let mut out = String::with_capacity(chars.len() * 6);
    let mut prev_token = String::new();
    let mut prev_char: Option<char> = None;

    for (i, &ch) in chars.iter().enumerate() {
        let token = encode_char(ch, table, settings);

        let starts_word = prev_char.map_or(true, |p| p == WORD_BOUNDARY);
        if starts_word {
            out.push_str(&settings.word_before);
        } else if !prev_token.is_empty() {
            out.push_str(&settings.char_separator);
        }

        out.push_str(&token);

        let next = chars.get(i + 1).copied();
        if next == Some(WORD_BOUNDARY) {
            out.push_str(&settings.word_after);
            out.push_str(&settings.word_separator);
        } else if closes_final_word(settings.final_word, i, ch, next, starts_word, table.len()) {
            out.push_str(&settings.word_after);
        }

        prev_token = token;
        prev_char = Some(ch);
    }

    debug!(
        output_len = out.len(),
        elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
        "converted"
    );
    out
}

/// Rendered pattern for a mapped character, the character itself otherwise.
fn encode_char(ch: char, table: &CharacterTable, settings: &Settings) -> String {
    let mut lower = ch.to_lowercase();
    let key = match (lower.next(), lower.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    };
    match key.and_then(|c| table.get(c)) {
        Some(pattern) => pattern.render(&settings.short_symbol, &settings.long_symbol),
        None => ch.to_string(),
    }
}

fn closes_final_word(
    policy: FinalWord,
    index: usize,
    ch: char,
    next: Option<char>,
    starts_word: bool,
    table_len: usize,
) -> bool {
    match policy {
        FinalWord::Close => next.is_none() && ch != WORD_BOUNDARY,
        // Compares against the table size rather than the input length, and
        // never for the first character of a word.
        FinalWord::Legacy => !starts_word && index == table_len,
    }
}
