//! Trait definition for pluggable search result providers.
//!
//! Each content-module integration implements [`ResultsProvider`] so the
//! aggregator can query it without knowing the module's storage schema.

use crate::error::ProviderError;
use crate::types::{Availability, ProviderResults};

/// A pluggable search result provider.
///
/// Implementors own the whole per-query pipeline for one content module:
///
/// - capability gate (module installed, provider enabled)
/// - one query against the module's content source
/// - relevance scoring and summary extraction per matched record
/// - URL construction and result assembly
///
/// A search is synchronous and sequential. All implementations must be
/// `Send + Sync` so the aggregator can run distinct providers
/// concurrently; a provider keeps no mutable state between invocations.
pub trait ResultsProvider: Send + Sync {
    /// Identifier of the content module this provider searches.
    fn identifier(&self) -> &str;

    /// Human-readable label for presentation.
    fn display_name(&self) -> String;

    /// Whether a search would currently run, without querying any content.
    ///
    /// Providers with no capability gate are always available.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Config`] if the gate's options are malformed.
    fn availability(&self) -> Result<Availability, ProviderError> {
        Ok(Availability::Available)
    }

    /// Run the search for `query`.
    ///
    /// Returns [`crate::SearchOutcome::Skipped`] with no entries when the
    /// module is missing or the provider is disabled. Repeated calls with
    /// unchanged data return the same entries in the same order.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::SourceUnavailable`] if the content source
    /// fails, or [`ProviderError::Config`] if a provider option has the
    /// wrong type.
    fn search(&self, query: &str) -> Result<ProviderResults, ProviderError>;
}
