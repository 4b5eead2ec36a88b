//! Identifier synthesis from step and scenario text.

use crate::lexical::LexicalClassifier;

/// Words removed before noun extraction.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "be", "is", "are", "am", "was", "were", "been", "to", "for", "of", "in",
    "on", "at", "with", "from", "by", "and", "or", "but", "i", "me", "we", "you", "he", "she",
    "it", "they", "should", "have", "has", "had", "do", "does", "will", "can", "must",
];

/// Maximum number of noun tokens in a synthesized short name.
pub const MAX_NAME_TOKENS: usize = 3;

/// Text between the first pair of double quotes, possibly empty.
#[must_use]
pub fn extract_quoted(text: &str) -> Option<&str> {
    let start = text.find('"')? + 1;
    let len = text[start..].find('"')?;
    Some(&text[start..start + len])
}

/// ASCII camelCase of arbitrary text.
///
/// Lowercases, treats every run of non-alphanumerics as one word break,
/// upper-cases the first character after each break and forces the first
/// character lower-case. `"Login Button"` becomes `loginButton`; text with no
/// ASCII alphanumerics becomes the empty string.
#[must_use]
pub fn to_camel_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_break = false;
    for c in text.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() {
            if at_break && !out.is_empty() {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
            at_break = false;
        } else {
            at_break = true;
        }
    }
    out
}

/// Short camelCase name for a step or scenario.
///
/// A non-empty quoted substring wins. Otherwise stop words are removed and
/// the first [`MAX_NAME_TOKENS`] nouns are used; with no nouns the whole
/// text is converted.
#[must_use]
pub fn short_name(text: &str, lexical: &dyn LexicalClassifier) -> String {
    if let Some(quoted) = extract_quoted(text).filter(|q| !q.is_empty()) {
        return to_camel_case(quoted);
    }
    let content: Vec<&str> = text
        .split_whitespace()
        .filter(|word| {
            let bare = word.trim_matches(|c: char| !c.is_alphanumeric());
            !STOP_WORDS.contains(&bare.to_lowercase().as_str())
        })
        .collect();
    let nouns = lexical.nouns(&content.join(" "));
    if nouns.is_empty() {
        to_camel_case(text)
    } else {
        let end = nouns.len().min(MAX_NAME_TOKENS);
        to_camel_case(&nouns[..end].join(" "))
    }
}

/// Lower-case with whitespace runs replaced by `-`.
#[must_use]
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// First character upper-cased.
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
