//! Post field resolution and derived text.
//!
//! ## Resolution priority
//!
//! Each field is resolved independently; the first non-empty source wins:
//!
//! - **Title**: `title` field → first level-1 heading → filename
//! - **Excerpt**: first paragraph → raw body
//!
//! ## Authors
//!
//! Author names are trimmed, empty entries dropped, and each word
//! name-cased (`ADA lovelace` → `Ada Lovelace`). The byline joins them:
//!
//! ```text
//! []                  → ""
//! [Ada]               → "Ada"
//! [Ada, Grace]        → "Ada & Grace"
//! [Ada, Grace, Alan]  → "Ada, Grace, & Alan"
//! ```
//!
//! ## Excerpts
//!
//! Whitespace runs collapse to single spaces. Text longer than the budget is
//! cut at the last space at or before the budget (or hard at the budget when
//! there is no space) and gets a trailing `…`. The budget counts characters,
//! not bytes.

use crate::naming::capitalize_first;

/// Default excerpt budget in characters.
pub const EXCERPT_LENGTH: usize = 220;

const ELLIPSIS: char = '\u{2026}';

/// Resolve a field from multiple sources.
///
/// Takes optional values in priority order and returns the first
/// non-None, non-empty value, trimmed.
///
/// ```text
/// title: resolve(&[metadata_title, heading_title])
/// ```
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

/// Clean a list of raw author names: trim, drop empties, name-case.
pub fn clean_authors(authors: &[String]) -> Vec<String> {
    authors
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .map(tidy_name)
        .collect()
}

/// Name-case every whitespace-separated word: first letter upper, rest lower.
pub fn tidy_name(name: &str) -> String {
    name.split_whitespace()
        .map(|word| capitalize_first(&word.to_lowercase()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Join already-cleaned author names into a byline.
pub fn format_byline(authors: &[String]) -> String {
    match authors {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} & {second}"),
        [init @ .., last] => format!("{}, & {last}", init.join(", ")),
    }
}

/// Build a plain-text excerpt of at most `limit` characters plus ellipsis.
pub fn make_excerpt(text: &str, limit: usize) -> String {
    let joined = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if joined.chars().count() <= limit {
        return joined;
    }

    // Byte offset of the character at index `limit`; it exists because the
    // text is longer than `limit` characters.
    let boundary = joined
        .char_indices()
        .nth(limit)
        .map(|(i, _)| i)
        .unwrap_or(joined.len());
    let cut = if joined[boundary..].starts_with(' ') {
        boundary
    } else {
        joined[..boundary].rfind(' ').unwrap_or(boundary)
    };

    let mut excerpt = joined[..cut].trim_end().to_string();
    excerpt.push(ELLIPSIS);
    excerpt
}
