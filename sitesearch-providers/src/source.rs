//! Content source collaborator: published-record lookup by substring match.
//!
//! A record matches when the query occurs, ignoring case, in its title OR
//! its content OR its excerpt. Sources return matches newest first, with
//! ties broken by ascending record id so repeated queries are stable.

use std::cmp::Ordering;
use std::sync::RwLock;

use crate::error::{ProviderError, Result};
use crate::types::ContentRecord;

/// A content module's searchable store.
pub trait ContentSource: Send + Sync {
    /// Returns every published record matching `query`, newest first.
    ///
    /// The result is fully materialized; providers index into it while
    /// scoring and summarizing.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::SourceUnavailable`] if the underlying store
    /// cannot execute the query.
    fn published_matching(&self, query: &str) -> Result<Vec<ContentRecord>>;
}

/// Case-insensitive substring test.
///
/// An empty needle is contained in every haystack.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// The OR-match across title, content, and excerpt.
pub fn matches_query(record: &ContentRecord, query: &str) -> bool {
    contains_ignore_case(&record.title, query)
        || contains_ignore_case(&record.content, query)
        || contains_ignore_case(&record.excerpt, query)
}

/// Newest first; equal timestamps fall back to ascending id.
pub fn recency_order(a: &ContentRecord, b: &ContentRecord) -> Ordering {
    b.published_at
        .cmp(&a.published_at)
        .then_with(|| a.id.cmp(&b.id))
}

/// In-memory content source.
///
/// Holds published records and drafts side by side; only published
/// records are ever returned.
#[derive(Debug, Default)]
pub struct MemorySource {
    records: RwLock<Vec<(ContentRecord, bool)>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a source where every record is published.
    pub fn from_published(records: impl IntoIterator<Item = ContentRecord>) -> Self {
        let source = Self::new();
        for record in records {
            source.publish(record);
        }
        source
    }

    pub fn publish(&self, record: ContentRecord) {
        self.push(record, true);
    }

    /// Adds a record that must never appear in search results.
    pub fn add_draft(&self, record: ContentRecord) {
        self.push(record, false);
    }

    fn push(&self, record: ContentRecord, published: bool) {
        if let Ok(mut records) = self.records.write() {
            records.push((record, published));
        }
    }
}

impl ContentSource for MemorySource {
    fn published_matching(&self, query: &str) -> Result<Vec<ContentRecord>> {
        let records = self
            .records
            .read()
            .map_err(|e| ProviderError::SourceUnavailable(format!("lock poisoned: {e}")))?;

        let mut matched: Vec<ContentRecord> = records
            .iter()
            .filter(|(record, published)| *published && matches_query(record, query))
            .map(|(record, _)| record.clone())
            .collect();
        matched.sort_by(recency_order);
        Ok(matched)
    }
}
