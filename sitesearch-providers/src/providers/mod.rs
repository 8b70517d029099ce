//! Provider implementations.
//!
//! Each module provides a struct implementing [`crate::ResultsProvider`]
//! for one content-module integration. Providers are registered with the
//! aggregator explicitly.

pub mod problog;

pub use problog::ProBlogResultsProvider;
