//! SQLite-backed blog post store.
//!
//! Implements [`sitesearch_providers::ContentSource`] so the ProBlog
//! provider can search posts kept in a local database.

mod schema;
pub mod sqlite;

pub use sqlite::{NewPost, SqlitePostStore, StoreError};
