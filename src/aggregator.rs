//! Aggregator: concurrent provider fan-out, isolation, merge, rank.
//!
//! Runs every registered provider on the blocking pool, each raced against
//! the configured deadline. A provider that fails or misses the deadline
//! contributes nothing and never aborts its siblings. Surviving entries are
//! merged, stably sorted by relevance (descending), and truncated.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use sitesearch_providers::{ResultEntry, ResultsProvider, SearchOutcome, UnavailableReason};

use crate::config::AggregatorConfig;
use crate::error::{Result, SiteSearchError};

/// A merged entry tagged with the provider that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct RankedEntry {
    /// Display name of the contributing provider.
    pub provider: String,
    #[serde(flatten)]
    pub entry: ResultEntry,
}

/// What happened to one provider during an aggregated search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum ProviderStatus {
    Completed { count: usize },
    Skipped { reason: UnavailableReason },
    Failed { reason: String },
    TimedOut,
}

/// Per-provider line of the aggregated report.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderReport {
    pub provider: String,
    #[serde(flatten)]
    pub status: ProviderStatus,
}

/// Output of [`Aggregator::search`].
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedResults {
    /// Merged entries, highest relevance first.
    pub entries: Vec<RankedEntry>,
    /// One report per registered provider, in registration order.
    pub providers: Vec<ProviderReport>,
}

/// Runs explicitly registered providers for a query.
pub struct Aggregator {
    providers: Vec<Arc<dyn ResultsProvider>>,
    timeout: Duration,
    max_results: usize,
}

impl Aggregator {
    pub fn new(config: &AggregatorConfig) -> Self {
        Self {
            providers: Vec::new(),
            timeout: Duration::from_millis(config.timeout_ms),
            max_results: config.max_results,
        }
    }

    /// Add a provider. Providers run in no particular order, but their
    /// reports and tie-broken entries follow registration order.
    pub fn register(&mut self, provider: Arc<dyn ResultsProvider>) -> &mut Self {
        tracing::debug!(module = provider.identifier(), "registering provider");
        self.providers.push(provider);
        self
    }

    pub fn providers(&self) -> &[Arc<dyn ResultsProvider>] {
        &self.providers
    }

    /// Query all registered providers concurrently and merge their results.
    ///
    /// # Pipeline
    ///
    /// 1. Spawn each provider's `search` on the blocking pool
    /// 2. Race each against the deadline; late results are discarded
    /// 3. Log failures at warn level; keep successful entries
    /// 4. Stable sort by relevance (descending)
    /// 5. Truncate to `max_results`
    ///
    /// # Errors
    ///
    /// Returns [`SiteSearchError::AllProvidersFailed`] only if **every**
    /// registered provider failed or timed out.
    pub async fn search(&self, query: &str) -> Result<AggregatedResults> {
        let futures: Vec<_> = self
            .providers
            .iter()
            .map(|provider| {
                let provider = Arc::clone(provider);
                let q = query.to_string();
                let timeout = self.timeout;
                async move {
                    let label = provider.display_name();
                    let task = tokio::task::spawn_blocking(move || provider.search(&q));
                    let status = match tokio::time::timeout(timeout, task).await {
                        Ok(Ok(Ok(results))) => Ok(results),
                        Ok(Ok(Err(err))) => Err(ProviderStatus::Failed {
                            reason: err.to_string(),
                        }),
                        Ok(Err(join_err)) => Err(ProviderStatus::Failed {
                            reason: format!("provider task aborted: {join_err}"),
                        }),
                        Err(_) => Err(ProviderStatus::TimedOut),
                    };
                    (label, status)
                }
            })
            .collect();

        let outcomes = futures::future::join_all(futures).await;

        let mut entries: Vec<RankedEntry> = Vec::new();
        let mut reports: Vec<ProviderReport> = Vec::with_capacity(outcomes.len());
        let mut errors: Vec<String> = Vec::new();

        for (label, outcome) in outcomes {
            let status = match outcome {
                Ok(results) => match results.outcome {
                    SearchOutcome::Skipped(reason) => {
                        tracing::debug!(provider = %label, %reason, "provider skipped");
                        ProviderStatus::Skipped { reason }
                    }
                    SearchOutcome::Completed => {
                        let count = results.entries.len();
                        tracing::debug!(provider = %label, count, "provider returned results");
                        entries.extend(results.entries.into_iter().map(|entry| RankedEntry {
                            provider: results.provider.clone(),
                            entry,
                        }));
                        ProviderStatus::Completed { count }
                    }
                },
                Err(status) => {
                    tracing::warn!(provider = %label, ?status, "provider failed");
                    errors.push(match &status {
                        ProviderStatus::Failed { reason } => format!("{label}: {reason}"),
                        _ => format!("{label}: timed out"),
                    });
                    status
                }
            };
            reports.push(ProviderReport {
                provider: label,
                status,
            });
        }

        if !reports.is_empty() && errors.len() == reports.len() {
            return Err(SiteSearchError::AllProvidersFailed(errors.join("; ")));
        }

        entries.sort_by(|a, b| b.entry.relevance().cmp(&a.entry.relevance()));
        entries.truncate(self.max_results);

        Ok(AggregatedResults {
            entries,
            providers: reports,
        })
    }
}
