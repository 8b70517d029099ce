//! # sitesearch-providers
//!
//! The provider layer of a site-wide search aggregator.
//!
//! Independently installed content modules contribute results to a single
//! query through the [`ResultsProvider`] contract. The aggregator never
//! sees a module's storage schema: it only receives normalized
//! [`ResultEntry`] values (title, summary, URL, relevance).
//!
//! ## Pipeline
//!
//! For each provider invocation:
//!
//! 1. [`gate::check`]: module installed and provider enabled, or skip
//! 2. [`ContentSource::published_matching`]: one query, newest first
//! 3. [`scoring::score`]: 2 for a title match, 1 otherwise
//! 4. [`summary::summarize`]: excerpt, else (formatted) content
//! 5. [`assembler::build_url`] + [`assembler::ResultSet::append`]
//!
//! Results are not re-sorted by relevance here; cross-provider ranking is
//! the aggregator's job.
//!
//! ## Collaborators
//!
//! Module registry, settings, content source, and content formatter are
//! traits injected into each provider, so every one of them can be
//! substituted in tests.

pub mod assembler;
pub mod config;
pub mod error;
pub mod format;
pub mod gate;
pub mod provider;
pub mod providers;
pub mod registry;
pub mod scoring;
pub mod source;
pub mod summary;
pub mod types;

pub use config::{MemorySettings, SettingValue, Settings};
pub use error::{ProviderError, Result};
pub use format::{ContentFormatter, ContentFormatting, MarkdownFormatter};
pub use provider::ResultsProvider;
pub use providers::ProBlogResultsProvider;
pub use registry::{ModuleRegistry, StaticModuleRegistry};
pub use source::{ContentSource, MemorySource};
pub use types::{
    Availability, Category, ContentRecord, ProviderResults, ResultEntry, SearchOutcome,
    UnavailableReason,
};
