//! Text normalization and phrase matching helpers.

use regex::Regex;
use std::borrow::Cow;

/// Replaces tabs with spaces.
///
/// Returns the input unchanged (borrowed) when it contains no tabs.
#[must_use]
pub fn normalize(text: &str) -> Cow<'_, str> {
    if text.contains('\t') {
        Cow::Owned(text.replace('\t', " "))
    } else {
        Cow::Borrowed(text)
    }
}

/// Splits text into trimmed sentences.
///
/// Scans character by character and closes a sentence at `.`, `!` or `?`.
/// Trailing text without a terminator forms a final sentence.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        if matches!(ch, '.' | '!' | '?') {
            let end = idx + ch.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = end;
        }
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }

    sentences
}

/// Builds a case-insensitive whole-word regex for a literal phrase.
///
/// Returns `None` for blank phrases or if the pattern exceeds regex limits.
#[must_use]
pub fn word_regex(phrase: &str) -> Option<Regex> {
    let phrase = phrase.trim();
    if phrase.is_empty() {
        return None;
    }
    match Regex::new(&format!(r"(?i)\b{}\b", regex::escape(phrase))) {
        Ok(regex) => Some(regex),
        Err(e) => {
            tracing::warn!(phrase, error = %e, "Skipping phrase that does not compile");
            None
        },
    }
}

/// Compiles a list of phrases into whole-word regexes.
#[must_use]
pub fn word_regexes(phrases: &[String]) -> Vec<Regex> {
    phrases.iter().filter_map(|p| word_regex(p)).collect()
}
