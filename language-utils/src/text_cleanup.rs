//! Text scanning and cleanup utilities
//!
//! This module provides the small, language-agnostic string helpers the
//! analysis pipeline relies on: splitting text into word runs, case fixes
//! and making free text safe for tabular output.

/// Whether `c` counts as part of a word (letters, digits and underscore)
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split text into maximal runs of word characters
///
/// Everything that is not a letter, digit or underscore separates runs.
pub fn word_runs(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !is_word_char(c))
        .filter(|run| !run.is_empty())
}

/// Extract lowercase ASCII words of at least `min_len` letters
///
/// The text is case-folded first. A word only qualifies if its whole run
/// is made of `a`..=`z`: runs touching digits, underscores or accented
/// letters are dropped rather than split.
pub fn ascii_words(text: &str, min_len: usize) -> Vec<String> {
    let folded = text.to_lowercase();
    word_runs(&folded)
        .filter(|run| run.len() >= min_len && run.chars().all(|c| c.is_ascii_lowercase()))
        .map(str::to_string)
        .collect()
}

/// Uppercase the first character, leaving the rest untouched
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Collapse all whitespace runs into single spaces and trim the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Make free text safe to place in a markdown table cell
pub fn escape_table_cell(text: &str) -> String {
    normalize_whitespace(text).replace('|', "\\|")
}
