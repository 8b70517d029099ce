//! SQLite post repository.
//!
//! Thread-safe via an internal `Mutex<Connection>`. Posts are visible to
//! search only when published and not scheduled for the future.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::functions::FunctionFlags;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, params};
use sitesearch_providers::source::contains_ignore_case;
use sitesearch_providers::{Category, ContentRecord, ContentSource, ProviderError};

use super::schema::apply_schema;

/// Fields for a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub published: bool,
    pub published_at: DateTime<Utc>,
    pub category_ids: Vec<i64>,
}

/// SQLite-backed post repository.
pub struct SqlitePostStore {
    conn: Mutex<Connection>,
}

impl SqlitePostStore {
    /// Open (or create) the database at `path`, creating parent directories.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        apply_schema(&conn)?;
        register_functions(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))
    }

    /// Insert a category and return its id.
    pub fn insert_category(&self, name: &str, slug: &str) -> Result<i64, StoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO categories (name, slug) VALUES (?1, ?2)",
            params![name, slug],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Look up a category by slug.
    pub fn category_by_slug(&self, slug: &str) -> Result<Option<Category>, StoreError> {
        let conn = self.lock()?;
        let category = conn
            .query_row(
                "SELECT id, name, slug FROM categories WHERE slug = ?1",
                params![slug],
                row_to_category,
            )
            .optional()?;
        Ok(category)
    }

    /// Insert a post with its category links and return its id.
    pub fn insert_post(&self, post: &NewPost) -> Result<i64, StoreError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO posts (title, slug, excerpt, content, published, published_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                post.title,
                post.slug,
                post.excerpt,
                post.content,
                post.published,
                post.published_at.timestamp()
            ],
        )?;
        let post_id = tx.last_insert_rowid();
        for category_id in &post.category_ids {
            tx.execute(
                "INSERT INTO post_categories (post_id, category_id) VALUES (?1, ?2)",
                params![post_id, category_id],
            )?;
        }
        tx.commit()?;
        Ok(post_id)
    }

    /// Publish or unpublish a post.
    pub fn set_published(&self, post_id: i64, published: bool) -> Result<(), StoreError> {
        let conn = self.lock()?;
        let updated = conn.execute(
            "UPDATE posts SET published = ?1 WHERE id = ?2",
            params![published, post_id],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(format!("post {post_id}")));
        }
        Ok(())
    }

    /// Published posts matching `query` in title, content, or excerpt.
    ///
    /// Matching runs through the `contains_ci` SQL function, so case folding
    /// is the same Unicode-aware rule the scorer applies. The query is a
    /// plain substring: `%` and `_` have no special meaning.
    pub fn search_published(
        &self,
        query: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<ContentRecord>, StoreError> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            "SELECT id, title, content, excerpt, slug, published_at FROM posts \
             WHERE published = 1 AND published_at <= ?2 \
               AND (contains_ci(title, ?1) \
                    OR contains_ci(content, ?1) \
                    OR contains_ci(excerpt, ?1)) \
             ORDER BY published_at DESC, id ASC",
        )?;
        let rows = stmt.query_map(params![query, now.timestamp()], row_to_record)?;

        let mut records = Vec::new();
        for r in rows {
            records.push(r?);
        }

        let mut categories_stmt = conn.prepare(
            "SELECT c.id, c.name, c.slug FROM categories c \
             JOIN post_categories pc ON pc.category_id = c.id \
             WHERE pc.post_id = ?1 ORDER BY c.id",
        )?;
        for record in &mut records {
            let rows = categories_stmt.query_map(params![record.id], row_to_category)?;
            for r in rows {
                record.categories.push(r?);
            }
        }

        Ok(records)
    }
}

impl ContentSource for SqlitePostStore {
    fn published_matching(&self, query: &str) -> sitesearch_providers::Result<Vec<ContentRecord>> {
        self.search_published(query, Utc::now())
            .map_err(|e| ProviderError::SourceUnavailable(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors from the SQLite post store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("lock poisoned: {0}")]
    Lock(String),
}

// ---------------------------------------------------------------------------
// Row conversion helpers
// ---------------------------------------------------------------------------

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<ContentRecord> {
    let timestamp: i64 = row.get(5)?;
    let published_at = DateTime::from_timestamp(timestamp, 0).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            5,
            Type::Integer,
            format!("published_at {timestamp} is out of range").into(),
        )
    })?;
    Ok(ContentRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        excerpt: row.get(3)?,
        slug: row.get(4)?,
        published_at,
        categories: Vec::new(),
    })
}

fn row_to_category(row: &rusqlite::Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        slug: row.get(2)?,
    })
}

// ---------------------------------------------------------------------------
// SQL functions
// ---------------------------------------------------------------------------

/// Register `contains_ci(haystack, needle)`, the substring test used by search.
fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "contains_ci",
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let haystack: String = ctx.get(0)?;
            let needle: String = ctx.get(1)?;
            Ok(contains_ignore_case(&haystack, &needle))
        },
    )
}
