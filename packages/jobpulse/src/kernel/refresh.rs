//! Refresh coordination: run every source once, isolate failures, and
//! rate-limit the whole operation behind a global cooldown.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use serde::Serialize;
use sqlx::SqlitePool;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domains::jobs::models::Job;
use crate::kernel::sources::JobSource;

/// Error messages in per-source statuses are capped to keep reports small
const STATUS_MAX_LEN: usize = 100;

/// One source's contribution to a refresh
#[derive(Debug, Clone, Serialize)]
pub struct SourceOutcome {
    pub source: String,
    pub fetched: usize,
    pub inserted: u64,
    /// "ok" or a truncated error message
    pub status: String,
}

/// Result of one refresh invocation. A refresh never fails as a whole; a
/// rate-limited report is a distinct state, not an error.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshReport {
    pub rate_limited: bool,
    pub total_fetched: usize,
    pub total_inserted: u64,
    pub sources: Vec<SourceOutcome>,
}

impl RefreshReport {
    fn rate_limited() -> Self {
        Self {
            rate_limited: true,
            total_fetched: 0,
            total_inserted: 0,
            sources: Vec::new(),
        }
    }

    /// Comma-joined "<source> <status>" summary for display
    pub fn status_line(&self) -> String {
        if self.rate_limited {
            return "rate limited".to_string();
        }
        self.sources
            .iter()
            .map(|outcome| format!("{} {}", outcome.source, outcome.status))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Runs all configured sources and pipes their output into the store.
///
/// The cooldown cell is the only shared mutable state in the pipeline. The
/// lock is held for the whole run, so concurrent triggers serialize: the
/// second caller waits for the first to settle, then observes the fresh
/// timestamp and reports rate-limited instead of double-fetching.
pub struct RefreshCoordinator {
    sources: Vec<Arc<dyn JobSource>>,
    cooldown: Duration,
    last_refresh: Mutex<Option<Instant>>,
}

impl RefreshCoordinator {
    pub fn new(sources: Vec<Arc<dyn JobSource>>, cooldown: Duration) -> Self {
        Self {
            sources,
            cooldown,
            last_refresh: Mutex::new(None),
        }
    }

    /// Run one refresh: every source exactly once, failures isolated per
    /// source, inserted counts from the store's dedup upsert.
    pub async fn refresh(&self, pool: &SqlitePool) -> RefreshReport {
        let mut last_refresh = self.last_refresh.lock().await;

        if let Some(last) = *last_refresh {
            if last.elapsed() < self.cooldown {
                info!(cooldown_secs = self.cooldown.as_secs(), "Refresh rate-limited");
                return RefreshReport::rate_limited();
            }
        }

        let fetches = self
            .sources
            .iter()
            .map(|source| {
                let source = source.clone();
                async move { (source.name(), source.fetch().await) }
            })
            .collect::<Vec<_>>();
        let results = join_all(fetches).await;

        let mut outcomes = Vec::with_capacity(results.len());
        for (name, result) in results {
            let outcome = match result {
                Ok(jobs) => {
                    let fetched = jobs.len();
                    match Job::insert_batch(&jobs, pool).await {
                        Ok(inserted) => SourceOutcome {
                            source: name.to_string(),
                            fetched,
                            inserted,
                            status: "ok".to_string(),
                        },
                        Err(err) => {
                            warn!(source = name, error = %err, "Insert failed");
                            SourceOutcome {
                                source: name.to_string(),
                                fetched,
                                inserted: 0,
                                status: truncate_status(&err.to_string()),
                            }
                        }
                    }
                }
                Err(err) => {
                    warn!(source = name, error = %err, "Source fetch failed");
                    SourceOutcome {
                        source: name.to_string(),
                        fetched: 0,
                        inserted: 0,
                        status: truncate_status(&err.to_string()),
                    }
                }
            };
            outcomes.push(outcome);
        }

        // The gate covers the whole run, including partial failures
        *last_refresh = Some(Instant::now());

        let report = RefreshReport {
            rate_limited: false,
            total_fetched: outcomes.iter().map(|o| o.fetched).sum(),
            total_inserted: outcomes.iter().map(|o| o.inserted).sum(),
            sources: outcomes,
        };
        info!(
            total_fetched = report.total_fetched,
            total_inserted = report.total_inserted,
            status = %report.status_line(),
            "Refresh complete"
        );
        report
    }
}

fn truncate_status(message: &str) -> String {
    message.chars().take(STATUS_MAX_LEN).collect()
}
