//! Job sources - one adapter per external site.
//!
//! Each adapter fetches raw listings from exactly one public source and maps
//! them into [`NewJob`] candidates, best-effort filtered to Python/entry-level
//! roles. Adapters share no state and own their own HTTP client, so the
//! coordinator can run them concurrently.

pub mod github_jobs;
pub mod remoteok;
pub mod rozee;
pub mod weworkremotely;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use thiserror::Error;

use crate::config::Config;
use crate::domains::jobs::models::NewJob;

pub use github_jobs::GithubJobsSource;
pub use remoteok::RemoteOkSource;
pub use rozee::RozeeSource;
pub use weworkremotely::WeWorkRemotelySource;

/// Keyword every source filters listings against
pub(crate) const DOMAIN_KEYWORD: &str = "python";

/// Errors an adapter can surface from a fetch.
///
/// Only the primary request's transport or parse failure is an error; zero
/// results and per-record validation failures are not.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("feed parse failed: {0}")]
    Feed(#[from] rss::Error),
}

/// One external job source.
///
/// `fetch` returns zero or more normalized candidates; callers must treat an
/// empty batch as success. Implementations never set `scraped_at` - the store
/// assigns it at insert time.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Stable identifier stored in the `source` column
    fn name(&self) -> &'static str;

    async fn fetch(&self) -> Result<Vec<NewJob>, SourceError>;
}

/// Build an HTTP client with a per-request timeout and no ambient credentials.
pub(crate) fn build_client(user_agent: &str, timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .context("Failed to create HTTP client")
}

/// The fixed, hand-written set of sources a refresh runs.
pub fn default_sources(config: &Config) -> Result<Vec<Arc<dyn JobSource>>> {
    Ok(vec![
        Arc::new(RozeeSource::new(
            config.rozee_max_pages,
            Duration::from_secs(1),
        )?),
        Arc::new(RemoteOkSource::new()?),
        Arc::new(GithubJobsSource::new()?),
        Arc::new(WeWorkRemotelySource::new()?),
    ])
}
