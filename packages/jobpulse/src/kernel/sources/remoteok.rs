//! RemoteOK adapter - public JSON API, no HTML parsing.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::common::text::clean_text;
use crate::domains::jobs::models::{NewJob, RoleType};
use crate::kernel::sources::{build_client, JobSource, SourceError, DOMAIN_KEYWORD};

const API_URL: &str = "https://remoteok.com/api";
const USER_AGENT: &str = "Mozilla/5.0 (compatible; JobPulse/1.0)";
const LIMIT: usize = 30;

pub struct RemoteOkSource {
    client: reqwest::Client,
}

impl RemoteOkSource {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: build_client(USER_AGENT, Duration::from_secs(20))?,
        })
    }
}

#[async_trait]
impl JobSource for RemoteOkSource {
    fn name(&self) -> &'static str {
        "remoteok"
    }

    async fn fetch(&self) -> Result<Vec<NewJob>, SourceError> {
        let response = self.client.get(API_URL).send().await?;
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

/// Map the API payload to candidates. The first array element is API
/// metadata, not a job.
fn parse_listings(payload: &Value) -> Vec<NewJob> {
    let Some(items) = payload.as_array() else {
        return Vec::new();
    };

    let mut out = Vec::new();

    for item in items.iter().skip(1) {
        let Some(job) = item.as_object() else {
            continue;
        };

        let title = clean_text(job.get("position").and_then(Value::as_str).unwrap_or(""));
        let apply_url = job
            .get("url")
            .and_then(Value::as_str)
            .unwrap_or("")
            .trim()
            .to_string();
        if title.is_empty() || apply_url.is_empty() {
            continue;
        }

        let tags: Vec<String> = job
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_lowercase)
                    .collect()
            })
            .unwrap_or_default();

        if !title.to_lowercase().contains(DOMAIN_KEYWORD)
            && !tags.iter().any(|tag| tag == DOMAIN_KEYWORD)
        {
            continue;
        }

        let company = clean_text(job.get("company").and_then(Value::as_str).unwrap_or(""));

        out.push(NewJob {
            role_type: RoleType::infer(&title, RoleType::Entry),
            title,
            company: if company.is_empty() {
                "Unknown".to_string()
            } else {
                company
            },
            location: "Remote".to_string(),
            source: "remoteok".to_string(),
            posted_date_text: date_text(job.get("date")),
            apply_url,
        });

        if out.len() >= LIMIT {
            break;
        }
    }

    out
}

/// The API serves `date` as either a string or an epoch number.
fn date_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn skips_metadata_and_filters_to_python() {
        let payload = json!([
            { "legal": "API terms" },
            {
                "position": "Junior Python Engineer",
                "company": "Remote Co",
                "url": "https://remoteok.com/jobs/1",
                "tags": ["python", "django"],
                "date": "2025-01-10T00:00:00+00:00"
            },
            {
                "position": "Senior Rust Engineer",
                "company": "Other Co",
                "url": "https://remoteok.com/jobs/2",
                "tags": ["rust"]
            },
            {
                "position": "Backend Developer",
                "company": "Tagged Co",
                "url": "https://remoteok.com/jobs/3",
                "tags": ["Python"]
            }
        ]);

        let jobs = parse_listings(&payload);
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].title, "Junior Python Engineer");
        assert_eq!(jobs[0].role_type, RoleType::Junior);
        assert_eq!(jobs[0].location, "Remote");
        // Tag match counts even when the title does not mention python
        assert_eq!(jobs[1].title, "Backend Developer");
        assert_eq!(jobs[1].role_type, RoleType::Entry);
    }

    #[test]
    fn drops_entries_without_title_or_url() {
        let payload = json!([
            {},
            { "position": "", "url": "https://remoteok.com/jobs/1", "tags": ["python"] },
            { "position": "Python Dev", "url": "", "tags": ["python"] }
        ]);
        assert!(parse_listings(&payload).is_empty());
    }

    #[test]
    fn numeric_dates_are_kept_as_text() {
        assert_eq!(date_text(Some(&json!(1736467200))), "1736467200");
        assert_eq!(date_text(None), "unknown");
    }

    #[test]
    fn non_array_payload_yields_nothing() {
        assert!(parse_listings(&json!({"error": "rate limited"})).is_empty());
    }
}
