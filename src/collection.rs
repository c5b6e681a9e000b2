//! Post ordering.
//!
//! The listing page shows posts newest first. Posts with exactly the same
//! date are ordered by slug, descending. The sort is stable.

use crate::document::DocumentRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Posts in listing order. This is what the listing page renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub posts: Vec<DocumentRecord>,
}

impl Collection {
    /// Wrap `records`, putting them in listing order.
    pub fn new(records: Vec<DocumentRecord>) -> Self {
        Self {
            posts: sort(records),
        }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// Order records by date descending, then slug descending.
pub fn sort(mut records: Vec<DocumentRecord>) -> Vec<DocumentRecord> {
    records.sort_by(listing_order);
    records
}

fn listing_order(a: &DocumentRecord, b: &DocumentRecord) -> Ordering {
    b.date.cmp(&a.date).then_with(|| b.slug.cmp(&a.slug))
}
