//! CLI output formatting for all pipeline stages.
//!
//! Output is **information-centric, not file-centric**. Every post is shown
//! by positional index and title, with its date; file paths, authors, and
//! tags follow as indented context lines.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Posts
//! 001 Notes on Parsing (2025-01-14)
//!     Source: notes-on-parsing.md
//!     Authors: Ada Lovelace & Charles Babbage
//!     Tags: rust, parsing
//! 002 Hello World (2024-06-01)
//!     Source: hello-world.md
//!
//! Config
//!     config.toml
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! 001 Notes on Parsing → notes-on-parsing.html
//! 002 Hello World → hello-world.html
//!
//! Generated 2 posts
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::document::DocumentRecord;
use crate::scan::Manifest;
use std::path::Path;

const EXCERPT_PREVIEW: usize = 60;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format a post header: positional index, title, and ISO date.
///
/// ```text
/// 001 Hello World (2025-01-14)
/// ```
fn entity_header(index: usize, post: &DocumentRecord) -> String {
    format!("{} {} ({})", format_index(index), post.title, post.date_iso)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Path of `path` relative to `root` when possible, for display.
fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan stage output listing every post in listing order.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Posts".to_string());
    if manifest.collection.is_empty() {
        lines.push(format!("{}(no posts found)", indent(1)));
    }
    for (i, post) in manifest.collection.posts.iter().enumerate() {
        lines.push(entity_header(i + 1, post));
        lines.push(format!(
            "{}Source: {}",
            indent(1),
            display_path(&post.source_path, source_root)
        ));
        if !post.author_line.is_empty() {
            lines.push(format!("{}Authors: {}", indent(1), post.author_line));
        }
        if !post.tags.is_empty() {
            lines.push(format!("{}Tags: {}", indent(1), post.tags.join(", ")));
        }
        if !post.excerpt.is_empty() {
            lines.push(format!(
                "{}Excerpt: {}",
                indent(1),
                truncate_desc(&post.excerpt, EXCERPT_PREVIEW)
            ));
        }
    }

    let config_path = source_root.join("config.toml");
    if config_path.exists() {
        lines.push(String::new());
        lines.push("Config".to_string());
        lines.push(format!("{}config.toml", indent(1)));
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format generate stage output mapping each post to its page.
pub fn format_generate_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("Home \u{2192} {}", manifest.config.index_file));
    for (i, post) in manifest.collection.posts.iter().enumerate() {
        lines.push(format!(
            "{} {} \u{2192} {}",
            format_index(i + 1),
            post.title,
            post.href
        ));
    }

    lines.push(String::new());
    let count = manifest.collection.len();
    lines.push(format!(
        "Generated {} {}",
        count,
        if count == 1 { "post" } else { "posts" }
    ));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(manifest: &Manifest) {
    for line in format_generate_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
