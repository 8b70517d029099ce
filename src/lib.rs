//! sitesearch: site-wide search over pluggable content providers.
//!
//! This crate is the host side of the provider layer in
//! [`sitesearch_providers`]:
//!
//! - **Config**: provider options, installed modules, and aggregator
//!   limits from a TOML file
//! - **Store**: a SQLite blog post store that serves as the ProBlog
//!   provider's content source
//! - **Aggregator**: runs every registered provider concurrently, isolates
//!   failures, enforces a deadline, and merges by relevance

pub mod aggregator;
pub mod config;
pub mod error;
pub mod store;

use std::sync::Arc;

use sitesearch_providers::{ContentSource, ProBlogResultsProvider};

pub use aggregator::{AggregatedResults, Aggregator, ProviderReport, ProviderStatus, RankedEntry};
pub use config::SiteSearchConfig;
pub use error::{Result, SiteSearchError};
pub use store::SqlitePostStore;

/// Build an aggregator with every known provider registered.
///
/// `blog_posts` is the content source of the ProBlog provider. Settings
/// and the module registry come from `config`.
///
/// # Errors
///
/// Returns [`SiteSearchError::Config`] if `config` fails validation.
pub fn build_aggregator(
    config: &SiteSearchConfig,
    blog_posts: Arc<dyn ContentSource>,
) -> Result<Aggregator> {
    config.validate()?;

    let settings = Arc::new(config.settings_store());
    let registry = Arc::new(config.module_registry());

    let mut aggregator = Aggregator::new(&config.aggregator);
    aggregator.register(Arc::new(ProBlogResultsProvider::new(
        registry,
        settings,
        blog_posts,
    )));
    Ok(aggregator)
}
