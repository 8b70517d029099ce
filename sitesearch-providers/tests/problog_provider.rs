//! Integration tests for the ProBlog provider pipeline.
//!
//! All collaborators are in-process test doubles; call counters verify
//! which collaborators a search actually touched.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use sitesearch_providers::providers::problog::{
    ENABLED_OPTION, MARKDOWN_MODE_OPTION, MODULE_ID, POST_URL_OPTION,
};
use sitesearch_providers::{
    Category, ContentRecord, ContentSource, MemorySettings, MemorySource, ModuleRegistry,
    ProBlogResultsProvider, ProviderError, ResultsProvider, SearchOutcome, StaticModuleRegistry,
    UnavailableReason,
};

/// Wraps a source and counts queries.
struct CountingSource {
    inner: MemorySource,
    calls: AtomicUsize,
}

impl CountingSource {
    fn new(inner: MemorySource) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ContentSource for CountingSource {
    fn published_matching(&self, query: &str) -> sitesearch_providers::Result<Vec<ContentRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.published_matching(query)
    }
}

/// Registry that answers a fixed value and counts lookups.
struct CountingRegistry {
    installed: bool,
    calls: AtomicUsize,
}

impl ModuleRegistry for CountingRegistry {
    fn has_module(&self, identifier: &str) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.installed && identifier == MODULE_ID
    }
}

struct BrokenSource;

impl ContentSource for BrokenSource {
    fn published_matching(&self, _query: &str) -> sitesearch_providers::Result<Vec<ContentRecord>> {
        Err(ProviderError::SourceUnavailable("connection refused".into()))
    }
}

fn news() -> Category {
    Category {
        id: 1,
        name: "News".into(),
        slug: "news".into(),
    }
}

fn hello_world() -> ContentRecord {
    ContentRecord {
        id: 1,
        title: "Hello World".into(),
        content: "full text".into(),
        excerpt: String::new(),
        slug: "hello-world".into(),
        published_at: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
        categories: vec![news()],
    }
}

fn make_post(id: i64, title: &str, content: &str, day: u32) -> ContentRecord {
    ContentRecord {
        id,
        title: title.into(),
        content: content.into(),
        excerpt: String::new(),
        slug: format!("post-{id}"),
        published_at: Utc.with_ymd_and_hms(2024, 5, day, 8, 0, 0).unwrap(),
        categories: vec![news()],
    }
}

fn blog_settings() -> Arc<MemorySettings> {
    Arc::new(MemorySettings::new().with(POST_URL_OPTION, "/blog"))
}

fn installed() -> Arc<StaticModuleRegistry> {
    Arc::new(StaticModuleRegistry::new([MODULE_ID]))
}

#[test]
fn title_match_scenario() {
    let source = Arc::new(MemorySource::from_published([hello_world()]));
    let provider = ProBlogResultsProvider::new(installed(), blog_settings(), source);

    let results = provider.search("World").unwrap();

    assert_eq!(results.outcome, SearchOutcome::Completed);
    assert_eq!(results.provider, "Blog");
    assert_eq!(results.entries.len(), 1);
    let entry = &results.entries[0];
    assert_eq!(entry.title(), "Hello World");
    assert_eq!(entry.summary(), "full text");
    assert_eq!(entry.url(), "blog/news/hello-world");
    assert_eq!(entry.relevance(), 2);
}

#[test]
fn no_match_scenario_produces_nothing() {
    let source = Arc::new(MemorySource::from_published([hello_world()]));
    let provider = ProBlogResultsProvider::new(installed(), blog_settings(), source);

    let results = provider.search("xyz").unwrap();

    assert_eq!(results.outcome, SearchOutcome::Completed);
    assert!(results.entries.is_empty());
}

#[test]
fn body_only_match_has_relevance_one() {
    let source = Arc::new(MemorySource::from_published([hello_world()]));
    let provider = ProBlogResultsProvider::new(installed(), blog_settings(), source);

    let results = provider.search("FULL").unwrap();

    assert_eq!(results.entries.len(), 1);
    assert_eq!(results.entries[0].relevance(), 1);
}

#[test]
fn missing_module_never_queries_source() {
    let source = Arc::new(CountingSource::new(MemorySource::from_published([
        hello_world(),
    ])));
    let registry = Arc::new(CountingRegistry {
        installed: false,
        calls: AtomicUsize::new(0),
    });
    let provider = ProBlogResultsProvider::new(registry.clone(), blog_settings(), source.clone());

    let results = provider.search("World").unwrap();

    assert_eq!(
        results.outcome,
        SearchOutcome::Skipped(UnavailableReason::ModuleMissing)
    );
    assert!(results.entries.is_empty());
    assert_eq!(source.calls(), 0);
    assert_eq!(registry.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn disabled_provider_never_queries_source() {
    let source = Arc::new(CountingSource::new(MemorySource::from_published([
        hello_world(),
    ])));
    let settings = Arc::new(MemorySettings::new().with(ENABLED_OPTION, false));
    let provider = ProBlogResultsProvider::new(installed(), settings, source.clone());

    let results = provider.search("World").unwrap();

    assert!(results.entries.is_empty());
    assert_eq!(source.calls(), 0);
}

#[test]
fn registry_consulted_once_per_search() {
    let source = Arc::new(MemorySource::from_published([hello_world()]));
    let registry = Arc::new(CountingRegistry {
        installed: true,
        calls: AtomicUsize::new(0),
    });
    let provider = ProBlogResultsProvider::new(registry.clone(), blog_settings(), source);

    provider.search("World").unwrap();
    provider.search("World").unwrap();

    assert_eq!(registry.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn results_follow_source_order_not_relevance() {
    // Newest post matches only in its body; older post matches in its title.
    let source = Arc::new(MemorySource::from_published([
        make_post(1, "Rust release notes", "details", 1),
        make_post(2, "Weekly digest", "news about rust", 9),
        make_post(3, "Rust in production", "war stories", 5),
    ]));
    let provider = ProBlogResultsProvider::new(installed(), blog_settings(), source);

    let results = provider.search("rust").unwrap();

    let urls: Vec<&str> = results.entries.iter().map(|e| e.url()).collect();
    assert_eq!(
        urls,
        vec!["blog/news/post-2", "blog/news/post-3", "blog/news/post-1"]
    );
    let relevance: Vec<u32> = results.entries.iter().map(|e| e.relevance()).collect();
    assert_eq!(relevance, vec![1, 2, 2]);
}

#[test]
fn repeated_search_is_idempotent_but_requeries() {
    let source = Arc::new(CountingSource::new(MemorySource::from_published([
        make_post(1, "Alpha", "shared words", 1),
        make_post(2, "Beta", "shared words", 1),
    ])));
    let provider = ProBlogResultsProvider::new(installed(), blog_settings(), source.clone());

    let first = provider.search("shared").unwrap();
    let second = provider.search("shared").unwrap();

    assert_eq!(first.entries, second.entries);
    assert_eq!(source.calls(), 2);
}

#[test]
fn empty_query_matches_everything_with_title_boost() {
    let source = Arc::new(MemorySource::from_published([
        make_post(1, "Alpha", "a", 1),
        make_post(2, "Beta", "b", 2),
    ]));
    let provider = ProBlogResultsProvider::new(installed(), blog_settings(), source);

    let results = provider.search("").unwrap();

    assert_eq!(results.entries.len(), 2);
    assert!(results.entries.iter().all(|e| e.relevance() == 2));
}

#[test]
fn record_without_single_category_is_skipped() {
    let mut orphan = make_post(2, "Orphan rust post", "text", 2);
    orphan.categories.clear();
    let mut crowded = make_post(3, "Crowded rust post", "text", 3);
    crowded.categories.push(Category {
        id: 2,
        name: "Tech".into(),
        slug: "tech".into(),
    });
    let source = Arc::new(MemorySource::from_published([
        make_post(1, "Good rust post", "text", 1),
        orphan,
        crowded,
    ]));
    let provider = ProBlogResultsProvider::new(installed(), blog_settings(), source);

    let results = provider.search("rust").unwrap();

    assert_eq!(results.outcome, SearchOutcome::Completed);
    assert_eq!(results.entries.len(), 1);
    assert_eq!(results.entries[0].url(), "blog/news/post-1");
}

#[test]
fn source_failure_propagates() {
    let provider =
        ProBlogResultsProvider::new(installed(), blog_settings(), Arc::new(BrokenSource));

    let err = provider.search("World").unwrap_err();

    assert!(matches!(err, ProviderError::SourceUnavailable(_)));
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn settings_are_read_fresh_per_search() {
    let settings = Arc::new(MemorySettings::new());
    let source = Arc::new(MemorySource::from_published([ContentRecord {
        excerpt: String::new(),
        content: "Some *emphasis*".into(),
        ..hello_world()
    }]));
    let provider = ProBlogResultsProvider::new(installed(), settings.clone(), source);

    let plain = provider.search("hello").unwrap();
    assert_eq!(plain.entries[0].summary(), "Some *emphasis*");
    assert_eq!(plain.entries[0].url(), "blog/news/hello-world");

    settings.set(MARKDOWN_MODE_OPTION, true);
    settings.set(POST_URL_OPTION, "articles/");
    let formatted = provider.search("hello").unwrap();
    assert_eq!(formatted.entries[0].summary(), "<p>Some <em>emphasis</em></p>\n");
    assert_eq!(formatted.entries[0].url(), "articles/news/hello-world");

    settings.set(ENABLED_OPTION, false);
    assert!(provider.search("hello").unwrap().entries.is_empty());
}

#[test]
fn excerpt_preferred_over_content() {
    let source = Arc::new(MemorySource::from_published([ContentRecord {
        excerpt: "  A short teaser  ".into(),
        ..hello_world()
    }]));
    let provider = ProBlogResultsProvider::new(installed(), blog_settings(), source);

    let results = provider.search("teaser").unwrap();

    assert_eq!(results.entries[0].summary(), "A short teaser");
    assert_eq!(results.entries[0].relevance(), 1);
}
