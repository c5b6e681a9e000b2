//! Post record assembly.
//!
//! Turns one source file into a [`DocumentRecord`]: metadata is extracted,
//! the body rendered, and every derived field (title, date strings, byline,
//! excerpt, output location) computed once. Records are immutable after
//! building and carry already-escaped HTML, so page templates never
//! re-escape content.
//!
//! ## Dates
//!
//! First available wins:
//!
//! 1. `date` field, parsed as `YYYY-MM-DD` (midnight UTC). A value that does
//!    not parse is [`DocumentError::InvalidDate`].
//! 2. The source file's modification time.
//! 3. The current time at build.
//!
//! The builder performs no I/O; callers pass the file contents, its
//! modification time, and the current time.

use crate::block::render_block;
use crate::frontmatter::{MetadataError, extract};
use crate::metadata::{self, EXCERPT_LENGTH};
use crate::naming;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";
const HUMAN_DATE_FORMAT: &str = "%B %-d, %Y";

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    #[error("invalid date {value:?}, expected YYYY-MM-DD")]
    InvalidDate {
        value: String,
        source: Option<chrono::ParseError>,
    },
}

/// A fully built post, ready for page rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub title: String,
    /// Filename stem of the source file.
    pub slug: String,
    /// Cleaned, name-cased author names in source order.
    pub authors: Vec<String>,
    /// Authors joined for display (`"A, B, & C"`), empty when there are none.
    pub author_line: String,
    pub tags: Vec<String>,
    pub date: DateTime<Utc>,
    /// `YYYY-MM-DD`
    pub date_iso: String,
    /// e.g. `January 2, 2006`
    pub date_human: String,
    /// Rendered body HTML fragment.
    pub content: String,
    /// Plain-text teaser for listings.
    pub excerpt: String,
    pub source_path: PathBuf,
    pub output_path: PathBuf,
    /// Link to the page relative to the output directory.
    pub href: String,
}

/// Builds records whose pages are written to one output directory.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    output_dir: PathBuf,
    excerpt_length: usize,
}

impl DocumentBuilder {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            excerpt_length: EXCERPT_LENGTH,
        }
    }

    pub fn with_excerpt_length(mut self, excerpt_length: usize) -> Self {
        self.excerpt_length = excerpt_length;
        self
    }

    /// Build the record for the document at `path` with contents `raw`.
    pub fn build(
        &self,
        path: &Path,
        raw: &str,
        modified: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<DocumentRecord, DocumentError> {
        let (meta, body) = extract(raw)?;
        let rendered = render_block(&body);

        let slug = naming::slug_from_path(path);
        let title = metadata::resolve(&[
            meta.scalar("title"),
            rendered.implicit_title.as_deref(),
        ])
        .unwrap_or_else(|| naming::title_from_slug(&slug));

        let date = match meta.scalar("date") {
            Some(value) => parse_date(value)?,
            None => modified.unwrap_or_else(|| {
                log::warn!(
                    "no modification time for {}, using current time",
                    path.display()
                );
                now
            }),
        };

        let authors = metadata::clean_authors(meta.list("authors"));
        let author_line = metadata::format_byline(&authors);

        let mut excerpt = metadata::make_excerpt(&rendered.first_paragraph, self.excerpt_length);
        if excerpt.is_empty() {
            // Falls back to the raw body; markup characters are kept here.
            excerpt = metadata::make_excerpt(&body, self.excerpt_length);
        }

        let href = naming::page_href(&slug);
        log::debug!("built {} ({} bytes of html)", slug, rendered.html.len());

        Ok(DocumentRecord {
            title,
            authors,
            author_line,
            tags: meta.list("tags").to_vec(),
            date,
            date_iso: date.format(DATE_FORMAT).to_string(),
            date_human: date.format(HUMAN_DATE_FORMAT).to_string(),
            content: rendered.html,
            excerpt,
            source_path: path.to_path_buf(),
            output_path: self.output_dir.join(&href),
            href,
            slug,
        })
    }
}

/// Build a record whose page sits next to its source file.
pub fn build(
    path: &Path,
    raw: &str,
    modified: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<DocumentRecord, DocumentError> {
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    DocumentBuilder::new(dir).build(path, raw, modified, now)
}

fn parse_date(value: &str) -> Result<DateTime<Utc>, DocumentError> {
    let invalid = |source| DocumentError::InvalidDate {
        value: value.to_string(),
        source,
    };
    // chrono alone also takes `2025-1-5`, `+2025-01-05` and `99-01-05`.
    if !has_iso_date_shape(value) {
        return Err(invalid(None));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .map_err(|e| invalid(Some(e)))
}

/// Exactly `DDDD-DD-DD` with ASCII digits.
fn has_iso_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
