//! Result assembly: URL construction and the per-invocation result set.

use crate::error::{ProviderError, Result};
use crate::types::{ContentRecord, ResultEntry};

/// Path separator used for result URLs.
const SEPARATOR: char = '/';

/// Build the site-relative URL of a record.
///
/// ```text
/// url = trim(base_path, "/") / category.slug / record.slug
/// ```
///
/// The URL is derived from configuration and record identifiers only.
/// An empty (or all-separator) base path contributes no segment.
///
/// # Errors
///
/// Returns [`ProviderError::MalformedRecord`] unless the record has
/// exactly one category.
pub fn build_url(base_path: &str, record: &ContentRecord) -> Result<String> {
    let category = match record.categories.as_slice() {
        [category] => category,
        [] => {
            return Err(ProviderError::MalformedRecord {
                record_id: record.id,
                reason: "record has no category".into(),
            });
        }
        many => {
            return Err(ProviderError::MalformedRecord {
                record_id: record.id,
                reason: format!("record has {} categories, expected one", many.len()),
            });
        }
    };

    let base = base_path.trim_matches(SEPARATOR);
    let tail = format!("{}{SEPARATOR}{}", category.slug, record.slug);
    if base.is_empty() {
        Ok(tail)
    } else {
        Ok(format!("{base}{SEPARATOR}{tail}"))
    }
}

/// Append-only accumulator owned by a single provider invocation.
///
/// Entries keep insertion order. Nothing is deduplicated or re-scored.
#[derive(Debug, Default)]
pub struct ResultSet {
    entries: Vec<ResultEntry>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(
        &mut self,
        title: impl Into<String>,
        summary: impl Into<String>,
        url: impl Into<String>,
        relevance: u32,
    ) {
        self.entries
            .push(ResultEntry::new(title, summary, url, relevance));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ResultEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ResultEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::types::Category;
    use chrono::Utc;

    fn category(slug: &str) -> Category {
        Category {
            id: 1,
            name: slug.to_uppercase(),
            slug: slug.into(),
        }
    }

    fn make_record(categories: Vec<Category>) -> ContentRecord {
        ContentRecord {
            id: 7,
            title: "Hello World".into(),
            content: "full text".into(),
            excerpt: String::new(),
            slug: "hello-world".into(),
            published_at: Utc::now(),
            categories,
        }
    }

    #[test]
    fn joins_trimmed_base_category_and_slug() {
        let record = make_record(vec![category("news")]);
        assert_eq!(build_url("/blog", &record).unwrap(), "blog/news/hello-world");
    }

    #[test]
    fn trims_separators_on_both_sides() {
        let record = make_record(vec![category("news")]);
        assert_eq!(
            build_url("//blog/posts//", &record).unwrap(),
            "blog/posts/news/hello-world"
        );
    }

    #[test]
    fn base_without_separators_is_kept() {
        let record = make_record(vec![category("news")]);
        assert_eq!(build_url("blog", &record).unwrap(), "blog/news/hello-world");
    }

    #[test]
    fn empty_base_is_omitted() {
        let record = make_record(vec![category("news")]);
        assert_eq!(build_url("/", &record).unwrap(), "news/hello-world");
        assert_eq!(build_url("", &record).unwrap(), "news/hello-world");
    }

    #[test]
    fn missing_category_is_malformed() {
        let record = make_record(vec![]);
        let err = build_url("/blog", &record).unwrap_err();
        assert!(matches!(
            err,
            ProviderError::MalformedRecord { record_id: 7, .. }
        ));
        assert!(err.to_string().contains("no category"));
    }

    #[test]
    fn multiple_categories_are_malformed() {
        let record = make_record(vec![category("news"), category("tech")]);
        let err = build_url("/blog", &record).unwrap_err();
        assert!(err.to_string().contains("2 categories"));
    }

    #[test]
    fn result_set_keeps_insertion_order_without_dedup() {
        let mut set = ResultSet::new();
        assert!(set.is_empty());
        set.append("A", "a", "blog/x/a", 1);
        set.append("B", "b", "blog/x/b", 2);
        set.append("A", "a", "blog/x/a", 1);

        assert_eq!(set.len(), 3);
        let titles: Vec<&str> = set.entries().iter().map(|e| e.title()).collect();
        assert_eq!(titles, vec!["A", "B", "A"]);

        let entries = set.into_entries();
        assert_eq!(entries[1].relevance(), 2);
    }
}
