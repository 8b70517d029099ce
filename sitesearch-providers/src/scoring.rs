//! Title-boost relevance scoring.
//!
//! Every record handed to the scorer already matched the query somewhere
//! (title, content, or excerpt). The scorer only decides *where*:
//!
//! ```text
//! relevance = 2   if query ⊆ title (case-insensitive)
//! relevance = 1   otherwise
//! ```
//!
//! An empty query is a substring of every title, so it scores 2 everywhere.

use crate::source::contains_ignore_case;
use crate::types::ContentRecord;

/// Relevance of a record whose title contains the query.
pub const TITLE_MATCH_RELEVANCE: u32 = 2;

/// Relevance of a record that matched only in its content or excerpt.
pub const BODY_MATCH_RELEVANCE: u32 = 1;

/// Score a matched record against the query.
///
/// Does not re-check that the record matches at all; records from a
/// [`crate::ContentSource`] are matches by contract.
pub fn score(record: &ContentRecord, query: &str) -> u32 {
    if contains_ignore_case(&record.title, query) {
        TITLE_MATCH_RELEVANCE
    } else {
        BODY_MATCH_RELEVANCE
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use chrono::Utc;

    fn make_record(title: &str, content: &str) -> ContentRecord {
        ContentRecord {
            id: 1,
            title: title.into(),
            content: content.into(),
            excerpt: String::new(),
            slug: "post".into(),
            published_at: Utc::now(),
            categories: vec![],
        }
    }

    #[test]
    fn title_match_scores_two() {
        let record = make_record("Hello World", "full text");
        assert_eq!(score(&record, "World"), TITLE_MATCH_RELEVANCE);
    }

    #[test]
    fn title_match_ignores_case() {
        let record = make_record("Hello World", "full text");
        assert_eq!(score(&record, "hello WORLD"), 2);
    }

    #[test]
    fn body_only_match_scores_one() {
        let record = make_record("Hello World", "full text");
        assert_eq!(score(&record, "full"), BODY_MATCH_RELEVANCE);
    }

    #[test]
    fn scorer_does_not_revalidate_match() {
        let record = make_record("Hello World", "full text");
        assert_eq!(score(&record, "xyz"), 1);
    }

    #[test]
    fn empty_query_scores_two_everywhere() {
        assert_eq!(score(&make_record("Hello", "x"), ""), 2);
        assert_eq!(score(&make_record("", "x"), ""), 2);
    }

    #[test]
    fn title_boost_outranks_body_match() {
        assert!(TITLE_MATCH_RELEVANCE > BODY_MATCH_RELEVANCE);
    }
}
