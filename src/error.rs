//! Error types for the sitesearch host.

use sitesearch_providers::ProviderError;

use crate::store::StoreError;

/// Top-level error type for the search host.
#[derive(Debug, thiserror::Error)]
pub enum SiteSearchError {
    /// Configuration file could not be parsed or is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// Post store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A provider failed outside an aggregated search.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Every registered provider failed for the same query.
    #[error("all providers failed: {0}")]
    AllProvidersFailed(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, SiteSearchError>;
