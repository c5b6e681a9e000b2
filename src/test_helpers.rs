//! Shared test utilities for the quillpress test suite.
//!
//! Provides blog directory fixtures, record constructors, and lookup helpers
//! that work with scan-phase data structures (`Manifest`, `Collection`,
//! `DocumentRecord`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_blog(&[("hello.md", "---\ndate: 2025-01-01\n---\nHi.")]);
//! let manifest = scan(tmp.path(), tmp.path()).unwrap();
//!
//! let post = find_post(&manifest.collection, "hello");
//! assert_eq!(post.title, "Hello");
//! ```

use chrono::{TimeZone, Utc};
use std::path::Path;
use tempfile::TempDir;

use crate::collection::Collection;
use crate::document::{DocumentRecord, build};

// =========================================================================
// Fixture setup
// =========================================================================

/// Write `files` (name, contents) into a fresh temp directory.
pub fn setup_blog(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (name, contents) in files {
        std::fs::write(tmp.path().join(name), contents).unwrap();
    }
    tmp
}

/// A record for `slug` with an explicit `YYYY-MM-DD` date.
pub fn record(slug: &str, date: &str) -> DocumentRecord {
    let raw = format!("---\ndate: {date}\n---\nBody of {slug}.");
    let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
    build(&Path::new("blog").join(format!("{slug}.md")), &raw, None, now).unwrap()
}

// =========================================================================
// Lookups (panic with a clear message on miss)
// =========================================================================

/// Find a post by slug. Panics if not found.
pub fn find_post<'a>(collection: &'a Collection, slug: &str) -> &'a DocumentRecord {
    collection
        .posts
        .iter()
        .find(|p| p.slug == slug)
        .unwrap_or_else(|| {
            let available = slugs(&collection.posts);
            panic!("post '{slug}' not found. Available: {available:?}")
        })
}

/// All slugs in order.
pub fn slugs(records: &[DocumentRecord]) -> Vec<&str> {
    records.iter().map(|r| r.slug.as_str()).collect()
}
