//! Display summary for a matched record.
//!
//! Two tiers, no truncation:
//!
//! 1. The trimmed excerpt, when it is not empty.
//! 2. Otherwise the full content, formatted first when the module stores
//!    Markdown.

use crate::format::{ContentFormatter, ContentFormatting};
use crate::types::ContentRecord;

/// Resolve the summary for `record`.
pub fn summarize(
    record: &ContentRecord,
    formatting: ContentFormatting,
    formatter: &dyn ContentFormatter,
) -> String {
    let excerpt = record.excerpt.trim();
    if !excerpt.is_empty() {
        return excerpt.to_string();
    }

    match formatting {
        ContentFormatting::Plain => record.content.clone(),
        ContentFormatting::Markdown => formatter.format(&record.content),
    }
}
