//! # Quillpress
//!
//! A minimal static blog generator. A directory of plain-text posts, each
//! with an optional metadata header, becomes one HTML page per post plus a
//! listing page ordered newest first.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      blog/*.md  →  manifest.json   (sources → ordered records)
//! 2. Generate  manifest   →  *.html          (post pages + listing page)
//! ```
//!
//! Scanning is where all the text processing happens. Each post flows
//! through:
//!
//! ```text
//! raw text ─ frontmatter::extract ─▶ (metadata, body)
//!          ─ block::render_block  ─▶ (html, first paragraph, implicit title)
//!          ─ document             ─▶ DocumentRecord
//! records  ─ collection::sort     ─▶ Collection
//! ```
//!
//! Every step is a pure function of its input: posts are independent, so the
//! scan stage builds them in parallel.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`frontmatter`] | Splits a post into its `---` metadata block and body |
//! | [`inline`] | Emphasis, strong, code, and links within one block; escaping |
//! | [`block`] | Paragraphs, headings, and lists; first paragraph and implicit title |
//! | [`naming`] | Slugs and filename-derived titles |
//! | [`metadata`] | Field resolution, author bylines, excerpts |
//! | [`document`] | Assembles a [`document::DocumentRecord`] per post |
//! | [`collection`] | Listing order: date descending, then slug descending |
//! | [`config`] | `config.toml` loading over stock defaults, validation |
//! | [`scan`] | Stage 1: finds sources, builds and orders records |
//! | [`generate`] | Stage 2: renders pages with Maud |
//! | [`output`] | CLI output formatting |
//!
//! # Markup
//!
//! The markup language is deliberately small: paragraphs, `#` headings,
//! `- ` bullet lists, `**strong**`, `*emphasis*` / `_emphasis_`, `` `code` ``
//! and `[links](url)`. Unterminated inline markup is closed automatically
//! rather than reported; only malformed metadata and invalid dates are
//! errors. One bad post fails the whole build.

pub mod block;
pub mod collection;
pub mod config;
pub mod document;
pub mod frontmatter;
pub mod generate;
pub mod inline;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
