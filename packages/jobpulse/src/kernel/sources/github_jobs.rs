//! GitHub Jobs adapter.
//!
//! The official API (jobs.github.com/positions.json) was deprecated and shut
//! down; the endpoint is kept for compatibility with mirrors serving the same
//! shape. This source is best-effort: any transport or parse failure degrades
//! to an empty batch instead of failing the refresh.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::common::text::clean_text;
use crate::domains::jobs::models::{NewJob, RoleType};
use crate::kernel::sources::{build_client, JobSource, SourceError, DOMAIN_KEYWORD};

const API_URL: &str = "https://jobs.github.com/positions.json";
const USER_AGENT: &str = "Mozilla/5.0 (compatible; JobPulse/1.0)";
const LIMIT: usize = 30;

pub struct GithubJobsSource {
    client: reqwest::Client,
}

impl GithubJobsSource {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: build_client(USER_AGENT, Duration::from_secs(15))?,
        })
    }

    async fn fetch_listings(&self) -> Result<Vec<NewJob>, SourceError> {
        let response = self
            .client
            .get(API_URL)
            .query(&[("description", DOMAIN_KEYWORD), ("location", "")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status,
                url: API_URL.to_string(),
            });
        }

        let payload: Value = response.json().await?;
        Ok(parse_listings(&payload))
    }
}

#[async_trait]
impl JobSource for GithubJobsSource {
    fn name(&self) -> &'static str {
        "github_jobs"
    }

    async fn fetch(&self) -> Result<Vec<NewJob>, SourceError> {
        match self.fetch_listings().await {
            Ok(jobs) => Ok(jobs),
            Err(err) => {
                debug!(error = %err, "GitHub Jobs endpoint unavailable, returning no results");
                Ok(Vec::new())
            }
        }
    }
}

/// Parse a GitHub Jobs-style JSON array. Mirrors of the dead API disagree on
/// field names, so title/company/url each accept two spellings.
fn parse_listings(payload: &Value) -> Vec<NewJob> {
    let Some(items) = payload.as_array() else {
        return Vec::new();
    };

    let mut out = Vec::new();

    for item in items {
        let Some(job) = item.as_object() else {
            continue;
        };

        let title = clean_text(&str_field(job, &["title", "position"]));
        let apply_url = str_field(job, &["url", "link"]).trim().to_string();
        if title.is_empty() || apply_url.is_empty() {
            continue;
        }

        let company = clean_text(&str_field(job, &["company", "company_name"]));
        let location = clean_text(&str_field(job, &["location"]));
        let posted_date_text = str_field(job, &["date", "created_at"]);

        out.push(NewJob {
            role_type: RoleType::infer(&title, RoleType::Entry),
            title,
            company: if company.is_empty() {
                "Unknown".to_string()
            } else {
                company
            },
            location: if location.is_empty() {
                "Remote".to_string()
            } else {
                location
            },
            source: "github_jobs".to_string(),
            posted_date_text: if posted_date_text.is_empty() {
                "unknown".to_string()
            } else {
                posted_date_text
            },
            apply_url,
        });

        if out.len() >= LIMIT {
            break;
        }
    }

    out
}

fn str_field(job: &serde_json::Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| job.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or("")
        .to_string()
}
