//! Metadata block extraction.
//!
//! A post may open with a delimited header carrying scalar and list values:
//!
//! ```text
//! ---
//! title: Notes on Parsing
//! date: 2025-01-14
//! authors:
//! - ada lovelace
//! - charles babbage
//! ---
//! Body text starts here.
//! ```
//!
//! ## Rules
//!
//! - The opening delimiter must be the first line of the file (after any
//!   leading byte-order markers). Without it the whole file is body and the
//!   metadata block is empty.
//! - The closing delimiter is the first later line that trims to `---`.
//!   An opening delimiter with no closing one is [`MetadataError::MalformedMetadata`].
//! - `key: value` sets a scalar. `key:` with nothing after the colon makes
//!   `key` the active list key; following `- item` lines append to it.
//! - A `- item` line with no active list key is [`MetadataError::OrphanListItem`].
//! - Keys are stored lowercase; lookups are case-insensitive.
//!
//! Parser state (the active list key) lives in locals of a single pass, so
//! extraction is reentrant and has no side effects.

use std::collections::BTreeMap;
use thiserror::Error;

const DELIMITER: &str = "---";
const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    #[error("missing closing metadata delimiter `---`")]
    MalformedMetadata,
    #[error("list item on line {line} does not belong to a list key")]
    OrphanListItem { line: usize },
}

/// Key/value and key/list data from a post header.
///
/// A key is either scalar or list, never both: whichever form was declared
/// last wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataBlock {
    scalars: BTreeMap<String, String>,
    lists: BTreeMap<String, Vec<String>>,
}

impl MetadataBlock {
    /// Scalar value for `key`, if one was declared.
    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.scalars.get(&key.to_lowercase()).map(String::as_str)
    }

    /// List items for `key`, empty when the key is absent or scalar.
    pub fn list(&self, key: &str) -> &[String] {
        self.lists
            .get(&key.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty() && self.lists.is_empty()
    }

    fn set_scalar(&mut self, key: String, value: String) {
        self.lists.remove(&key);
        self.scalars.insert(key, value);
    }

    fn declare_list(&mut self, key: &str) {
        self.scalars.remove(key);
        self.lists.entry(key.to_string()).or_default();
    }

    fn push_item(&mut self, key: &str, item: String) {
        self.lists.entry(key.to_string()).or_default().push(item);
    }
}

/// Split a raw document into its metadata block and trimmed body.
pub fn extract(raw: &str) -> Result<(MetadataBlock, String), MetadataError> {
    let raw = raw.trim_start_matches(BYTE_ORDER_MARK);

    let mut lines = raw.split('\n');
    let opens_block = lines
        .next()
        .is_some_and(|first| first.trim_end() == DELIMITER);
    if !opens_block {
        return Ok((MetadataBlock::default(), raw.trim().to_string()));
    }

    let rest: Vec<&str> = lines.collect();
    let boundary = rest
        .iter()
        .position(|line| line.trim() == DELIMITER)
        .ok_or(MetadataError::MalformedMetadata)?;

    // Header lines start on line 2 of the file.
    let metadata = parse_block(&rest[..boundary], 2)?;
    let body = rest[boundary + 1..].join("\n");
    Ok((metadata, body.trim().to_string()))
}

/// Parse the lines between the delimiters.
///
/// `first_line` is the 1-based file line number of `lines[0]`, used only
/// for error reporting.
fn parse_block(lines: &[&str], first_line: usize) -> Result<MetadataBlock, MetadataError> {
    let mut block = MetadataBlock::default();
    let mut list_key: Option<String> = None;

    for (offset, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(item) = trimmed.strip_prefix("- ") {
            let Some(key) = list_key.as_deref() else {
                return Err(MetadataError::OrphanListItem {
                    line: first_line + offset,
                });
            };
            let item = item.trim();
            if !item.is_empty() {
                block.push_item(key, item.to_string());
            }
            continue;
        }

        list_key = None;
        let Some((key, value)) = trimmed.split_once(':') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        let value = value.trim();
        if value.is_empty() {
            block.declare_list(&key);
            list_key = Some(key);
        } else {
            block.set_scalar(key, value.to_string());
        }
    }

    Ok(block)
}
