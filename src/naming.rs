//! Filename-derived names for posts.
//!
//! A post's slug is its filename stem: `hello-world.md` → `hello-world`.
//! The slug names the output page (`hello-world.html`) and, when a post has
//! neither a `title` field nor a level-1 heading, supplies its display title.
//!
//! ## Display Titles
//!
//! The stem is split on `-`, `_`, spaces and `/`, and each word gets an
//! upper-case first letter (the rest of the word is left alone):
//! - `hello-world` → "Hello World"
//! - `rust_2024_notes` → "Rust 2024 Notes"
//! - `iOS-tips` → "IOS Tips"
//! - `---` → "---" (no words: the stem upper-cased)

use std::path::Path;

/// Slug for a source file: its filename stem, or empty if it has none.
pub fn slug_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Relative link to a post's page.
pub fn page_href(slug: &str) -> String {
    format!("{slug}.html")
}

/// Human title derived from a slug.
pub fn title_from_slug(slug: &str) -> String {
    let words: Vec<String> = slug
        .split(['-', '_', ' ', '/'])
        .filter(|w| !w.is_empty())
        .map(capitalize_first)
        .collect();
    if words.is_empty() {
        slug.to_uppercase()
    } else {
        words.join(" ")
    }
}

/// Upper-case the first character of `word`, leaving the rest untouched.
pub(crate) fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
