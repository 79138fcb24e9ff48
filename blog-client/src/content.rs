//! Turning untrusted post content into what a card displays.

use ammonia::Builder;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;

pub const MAX_SUMMARY_WORDS: usize = 30;
pub const INVALID_DATE: &str = "Invalid Date";

/// Whitespace as the editor's word counter sees it: ASCII blanks, the Unicode
/// space separators, line/paragraph separators and the BOM. U+0085 is not one.
fn is_word_separator(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Splits on runs of whitespace. Leading and trailing runs produce an empty
/// token at that end, so `" a b"` yields `["", "a", "b"]`.
fn split_whitespace_runs(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_run = false;

    for (idx, ch) in text.char_indices() {
        if is_word_separator(ch) {
            if !in_run {
                tokens.push(&text[start..idx]);
                in_run = true;
            }
            start = idx + ch.len_utf8();
        } else {
            in_run = false;
        }
    }
    tokens.push(&text[start..]);
    tokens
}

/// Keeps the first `max_words` tokens and appends `...` when anything was
/// cut. Text within the limit is returned untouched.
pub fn truncate_to_words(text: &str, max_words: usize) -> String {
    let words = split_whitespace_runs(text);
    if words.len() > max_words {
        format!("{}...", words[..max_words].join(" "))
    } else {
        text.to_string()
    }
}

// Редактор пишет выравнивание в `style`, ссылки оставляем как есть
static SANITIZER: Lazy<Builder<'static>> = Lazy::new(|| {
    let mut builder = Builder::default();
    builder
        .add_generic_attributes(&["class", "style"])
        .link_rel(None);
    builder
});

/// Strips script-bearing markup (script elements, event handler attributes,
/// `javascript:` links) and keeps benign formatting tags with their `class`
/// and `style` attributes.
pub fn sanitize_html(html: &str) -> String {
    SANITIZER.clean(html).to_string()
}

/// Card summary: truncate first, then sanitize the truncated string.
pub fn summary_html(content: &str) -> String {
    sanitize_html(&truncate_to_words(content, MAX_SUMMARY_WORDS))
}

/// Date part of a server timestamp as `M/D/YYYY`.
///
/// The date is taken in the timestamp's own offset. Unparsable input renders
/// as `Invalid Date`.
pub fn display_date(created_at: &str) -> String {
    let raw = created_at.trim();

    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));

    match date {
        Ok(date) => date.format("%-m/%-d/%Y").to_string(),
        Err(_) => INVALID_DATE.to_string(),
    }
}
