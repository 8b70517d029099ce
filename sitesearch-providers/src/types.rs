//! Core types shared by providers, content sources, and the aggregator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A taxonomy term attached to a content record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// URL segment for this category.
    pub slug: String,
}

/// Read-only projection of one item owned by a content source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: i64,
    pub title: String,
    /// Body text, possibly marked up.
    pub content: String,
    /// Optional short summary; empty when the author did not write one.
    pub excerpt: String,
    /// URL segment for this record.
    pub slug: String,
    /// Ordering key for search results (newest first).
    pub published_at: DateTime<Utc>,
    pub categories: Vec<Category>,
}

/// A single normalized search result.
///
/// Entries are immutable once built: the aggregator reads them through
/// the accessors and may only move or clone them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    title: String,
    summary: String,
    url: String,
    relevance: u32,
}

impl ResultEntry {
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        url: impl Into<String>,
        relevance: u32,
    ) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            url: url.into(),
            relevance,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Site-relative path without a leading separator.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Ranking signal; higher is more relevant.
    pub fn relevance(&self) -> u32 {
        self.relevance
    }
}

/// Why a provider did not take part in a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// The content module is not installed in the host.
    ModuleMissing,
    /// The provider's enabled option is set to false.
    Disabled,
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModuleMissing => f.write_str("module not installed"),
            Self::Disabled => f.write_str("disabled in settings"),
        }
    }
}

/// Result of the capability gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    Unavailable(UnavailableReason),
}

impl Availability {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => f.write_str("available"),
            Self::Unavailable(reason) => reason.fmt(f),
        }
    }
}

/// Terminal state of one provider invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "reason")]
pub enum SearchOutcome {
    /// The capability gate short-circuited; no query was executed.
    Skipped(UnavailableReason),
    /// The source was queried; zero or more entries were produced.
    Completed,
}

/// Everything a provider hands back to the aggregator for one query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResults {
    /// Display name of the provider that produced these results.
    pub provider: String,
    pub outcome: SearchOutcome,
    /// One entry per matched record, in source order.
    pub entries: Vec<ResultEntry>,
}

impl ProviderResults {
    /// An empty result set for a provider whose gate was closed.
    pub fn skipped(provider: impl Into<String>, reason: UnavailableReason) -> Self {
        Self {
            provider: provider.into(),
            outcome: SearchOutcome::Skipped(reason),
            entries: Vec::new(),
        }
    }
}
