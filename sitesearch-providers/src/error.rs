//! Error types for the sitesearch-providers crate.
//!
//! A missing or disabled content module is not an error: providers report
//! it as [`crate::types::SearchOutcome::Skipped`]. Everything here is a
//! genuine failure that the aggregator has to see.

/// Errors that can occur while a provider searches its content source.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The content source could not execute the query (storage or
    /// connectivity fault).
    #[error("content source unavailable: {0}")]
    SourceUnavailable(String),

    /// A matched record lacks the fields needed to build its result URL.
    #[error("malformed record {record_id}: {reason}")]
    MalformedRecord {
        /// Identifier of the offending record.
        record_id: i64,
        /// What is missing or ambiguous.
        reason: String,
    },

    /// A provider option holds a value of the wrong type.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for provider results.
pub type Result<T> = std::result::Result<T, ProviderError>;
