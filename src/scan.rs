//! Source discovery and manifest generation.
//!
//! Stage 1 of the build pipeline. Finds every post in the source directory,
//! builds a [`DocumentRecord`] for each, and returns them in listing order
//! together with the resolved configuration.
//!
//! ## Directory Structure
//!
//! ```text
//! blog/                        # Source directory
//! ├── config.toml              # Blog configuration (optional)
//! ├── hello-world.md           # Post → hello-world.html
//! ├── notes-on-parsing.md      # Post → notes-on-parsing.html
//! └── drafts/                  # Subdirectories are ignored
//! ```
//!
//! Only regular files directly inside the source directory whose extension
//! matches `extension` (case-insensitively) are posts. Hidden files are
//! skipped. Files are processed in lexicographic path order.
//!
//! ## Failure policy
//!
//! Posts are built in parallel, but any failure fails the whole scan. The
//! error reported is the one for the first failing file in path order, so
//! the outcome does not depend on scheduling. A post whose page name equals
//! the listing page (`index.md` with the default `index_file`) is also an
//! error.

use crate::collection::Collection;
use crate::config::{self, BlogConfig};
use crate::document::{DocumentBuilder, DocumentError, DocumentRecord};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {source}", path.display())]
    Document {
        path: PathBuf,
        source: DocumentError,
    },
    #[error("{} would be overwritten by the listing page {index_file}", path.display())]
    IndexCollision { path: PathBuf, index_file: String },
}

/// Manifest output from the scan stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub collection: Collection,
    pub config: BlogConfig,
}

/// Scan `source` for posts whose pages will be written to `output`.
///
/// Reads `config.toml` from `source`; see [`scan_with_config`] when the
/// config is already loaded.
pub fn scan(source: &Path, output: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(source)?;
    scan_with_config(source, output, config)
}

/// Scan `source` with an already loaded config.
pub fn scan_with_config(
    source: &Path,
    output: &Path,
    config: BlogConfig,
) -> Result<Manifest, ScanError> {
    let paths = find_sources(source, &config.extension)?;

    let builder = DocumentBuilder::new(output).with_excerpt_length(config.excerpt_length);
    let now = Utc::now();

    let results: Vec<Result<DocumentRecord, ScanError>> = paths
        .par_iter()
        .map(|path| load_post(&builder, path, now))
        .collect();
    let records = results.into_iter().collect::<Result<Vec<_>, _>>()?;
    check_index_collision(&records, &config.index_file)?;

    log::info!(
        "scanned {} posts from {}",
        records.len(),
        source.display()
    );

    Ok(Manifest {
        collection: Collection::new(records),
        config,
    })
}

/// Source files in `dir` with the given extension, sorted by path.
pub fn find_sources(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, ScanError> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            let hidden = p
                .file_name()
                .map(|n| n.to_string_lossy().starts_with('.'))
                .unwrap_or(true);
            !hidden
                && p.is_file()
                && p.extension()
                    .map(|e| e.eq_ignore_ascii_case(extension))
                    .unwrap_or(false)
        })
        .collect();

    paths.sort();
    Ok(paths)
}

fn load_post(
    builder: &DocumentBuilder,
    path: &Path,
    now: DateTime<Utc>,
) -> Result<DocumentRecord, ScanError> {
    let raw = fs::read_to_string(path).map_err(|source| ScanError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    builder
        .build(path, &raw, modified_time(path), now)
        .map_err(|source| ScanError::Document {
            path: path.to_path_buf(),
            source,
        })
}

/// A post whose page name matches the listing page would be silently replaced.
fn check_index_collision(records: &[DocumentRecord], index_file: &str) -> Result<(), ScanError> {
    match records
        .iter()
        .find(|r| r.href.eq_ignore_ascii_case(index_file))
    {
        Some(record) => Err(ScanError::IndexCollision {
            path: record.source_path.clone(),
            index_file: index_file.to_string(),
        }),
        None => Ok(()),
    }
}

/// Modification time of `path`, if the platform reports one.
fn modified_time(path: &Path) -> Option<DateTime<Utc>> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .map(DateTime::<Utc>::from)
}
