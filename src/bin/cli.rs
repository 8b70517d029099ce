//! CLI binary for sitesearch.
//!
//! Tracing output goes to stderr so that `--json` output on stdout stays
//! machine-readable.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use sitesearch::store::NewPost;
use sitesearch::{AggregatedResults, ProviderStatus, SiteSearchConfig, SqlitePostStore};
use tracing_subscriber::EnvFilter;

/// Search site content across all installed content modules.
#[derive(Parser)]
#[command(name = "sitesearch", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, env = "SITESEARCH_CONFIG")]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Run a query against every registered provider.
    Search {
        query: String,
        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List registered providers.
    Providers,

    /// Add a post to the blog store.
    AddPost {
        #[arg(long)]
        title: String,
        #[arg(long)]
        slug: String,
        /// Category slug; created if missing.
        #[arg(long)]
        category: String,
        #[arg(long, default_value = "")]
        excerpt: String,
        #[arg(long, default_value = "")]
        content: String,
        /// Store the post unpublished.
        #[arg(long)]
        draft: bool,
    },

    /// Write a default configuration file.
    InitConfig {
        /// Destination (defaults to the standard config path).
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("sitesearch=info,sitesearch_providers=info")
        }))
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .unwrap_or_else(SiteSearchConfig::default_config_path);

    if let Command::InitConfig { path } = &cli.command {
        let path = path.clone().unwrap_or(config_path);
        SiteSearchConfig::default().save_to_file(&path)?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    let config = if config_path.exists() {
        SiteSearchConfig::from_file(&config_path)
            .with_context(|| format!("loading {}", config_path.display()))?
    } else {
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        SiteSearchConfig::default()
    };

    let store = Arc::new(
        SqlitePostStore::open(&config.store.database_path)
            .with_context(|| format!("opening {}", config.store.database_path.display()))?,
    );

    match cli.command {
        Command::Search { query, json } => {
            let aggregator = sitesearch::build_aggregator(&config, store)?;
            let results = aggregator.search(&query).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print_results(&results);
            }
        }
        Command::Providers => {
            let aggregator = sitesearch::build_aggregator(&config, store)?;
            for provider in aggregator.providers() {
                let availability = match provider.availability() {
                    Ok(availability) => availability.to_string(),
                    Err(err) => format!("error: {err}"),
                };
                println!(
                    "{:<24} {:<12} {}",
                    provider.identifier(),
                    provider.display_name(),
                    availability
                );
            }
        }
        Command::AddPost {
            title,
            slug,
            category,
            excerpt,
            content,
            draft,
        } => {
            let category_id = match store.category_by_slug(&category)? {
                Some(existing) => existing.id,
                None => store.insert_category(&category, &category)?,
            };
            let id = store.insert_post(&NewPost {
                title,
                slug,
                excerpt,
                content,
                published: !draft,
                published_at: Utc::now(),
                category_ids: vec![category_id],
            })?;
            println!("added post {id}");
        }
        Command::InitConfig { .. } => {}
    }

    Ok(())
}

fn print_results(results: &AggregatedResults) {
    for report in &results.providers {
        match &report.status {
            ProviderStatus::Completed { count } => {
                println!("[{}] {count} result(s)", report.provider);
            }
            ProviderStatus::Skipped { reason } => {
                println!("[{}] skipped: {reason}", report.provider);
            }
            ProviderStatus::Failed { reason } => {
                println!("[{}] failed: {reason}", report.provider);
            }
            ProviderStatus::TimedOut => println!("[{}] timed out", report.provider),
        }
    }
    if results.entries.is_empty() {
        println!("no results");
        return;
    }
    println!();
    for ranked in &results.entries {
        let entry = &ranked.entry;
        println!("{} ({}) /{}", entry.title(), entry.relevance(), entry.url());
        let summary = entry.summary().lines().next().unwrap_or_default();
        if !summary.is_empty() {
            println!("    {summary}");
        }
    }
}
