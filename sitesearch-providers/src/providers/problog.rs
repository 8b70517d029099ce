//! ProBlog provider: searches posts of the `Radiantweb.Problog` blog module.
//!
//! Posts match on title, content, or excerpt. A title match is boosted to
//! relevance 2. Result URLs are `<posturl>/<category>/<post>`.

use std::sync::Arc;

use crate::assembler::{build_url, ResultSet};
use crate::config::Settings;
use crate::error::ProviderError;
use crate::format::{ContentFormatter, ContentFormatting, MarkdownFormatter};
use crate::gate;
use crate::provider::ResultsProvider;
use crate::registry::ModuleRegistry;
use crate::scoring::score;
use crate::source::ContentSource;
use crate::summary::summarize;
use crate::types::{Availability, ProviderResults, SearchOutcome};

/// Module identifier checked against the host registry.
pub const MODULE_ID: &str = "Radiantweb.Problog";

/// Option keys read from the settings store.
pub const ENABLED_OPTION: &str = "radiantweb_problog_enabled";
pub const POST_URL_OPTION: &str = "radiantweb_problog_posturl";
pub const LABEL_OPTION: &str = "radiantweb_problog_label";
pub const MARKDOWN_MODE_OPTION: &str = "radiantweb_problog_markdown_mode";

pub const DEFAULT_POST_URL: &str = "/blog";
pub const DEFAULT_LABEL: &str = "Blog";

/// Results provider for the ProBlog module.
///
/// All collaborators are injected; nothing is read from process globals.
pub struct ProBlogResultsProvider {
    registry: Arc<dyn ModuleRegistry>,
    settings: Arc<dyn Settings>,
    source: Arc<dyn ContentSource>,
    formatter: Arc<dyn ContentFormatter>,
}

impl ProBlogResultsProvider {
    /// Create a provider that formats Markdown bodies with
    /// [`MarkdownFormatter`].
    pub fn new(
        registry: Arc<dyn ModuleRegistry>,
        settings: Arc<dyn Settings>,
        source: Arc<dyn ContentSource>,
    ) -> Self {
        Self {
            registry,
            settings,
            source,
            formatter: Arc::new(MarkdownFormatter),
        }
    }

    /// Replace the content formatter used in markdown mode.
    pub fn with_formatter(mut self, formatter: Arc<dyn ContentFormatter>) -> Self {
        self.formatter = formatter;
        self
    }
}

impl ResultsProvider for ProBlogResultsProvider {
    fn identifier(&self) -> &str {
        MODULE_ID
    }

    fn display_name(&self) -> String {
        self.settings
            .get_string(LABEL_OPTION, DEFAULT_LABEL)
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "invalid label option, using default");
                DEFAULT_LABEL.to_string()
            })
    }

    fn availability(&self) -> Result<Availability, ProviderError> {
        gate::check(
            self.registry.as_ref(),
            self.settings.as_ref(),
            MODULE_ID,
            ENABLED_OPTION,
        )
    }

    fn search(&self, query: &str) -> Result<ProviderResults, ProviderError> {
        let label = self.display_name();

        if let Availability::Unavailable(reason) = self.availability()? {
            return Ok(ProviderResults::skipped(label, reason));
        }

        let base_path = self
            .settings
            .get_string(POST_URL_OPTION, DEFAULT_POST_URL)?;
        let formatting = ContentFormatting::from_markdown_flag(
            self.settings.get_bool(MARKDOWN_MODE_OPTION, false)?,
        );

        tracing::trace!(query, "ProBlog search");
        let posts = self.source.published_matching(query)?;

        let mut results = ResultSet::new();
        let mut malformed = 0usize;
        for post in &posts {
            let url = match build_url(&base_path, post) {
                Ok(url) => url,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping post without a single category");
                    malformed += 1;
                    continue;
                }
            };
            let relevance = score(post, query);
            let summary = summarize(post, formatting, self.formatter.as_ref());
            results.append(post.title.clone(), summary, url, relevance);
        }

        tracing::debug!(
            provider = %label,
            matched = posts.len(),
            produced = results.len(),
            malformed,
            "ProBlog search completed"
        );

        Ok(ProviderResults {
            provider: label,
            outcome: SearchOutcome::Completed,
            entries: results.into_entries(),
        })
    }
}
