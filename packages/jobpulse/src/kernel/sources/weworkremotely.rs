//! We Work Remotely adapter - public RSS feed of remote programming jobs.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use rss::Channel;

use crate::common::text::{clean_text, split_title_company};
use crate::domains::jobs::models::{NewJob, RoleType};
use crate::kernel::sources::{build_client, JobSource, SourceError, DOMAIN_KEYWORD};

const FEED_URL: &str = "https://weworkremotely.com/categories/remote-programming-jobs.rss";
const USER_AGENT: &str = "Mozilla/5.0 (compatible; JobPulse/1.0)";
const LIMIT: usize = 50;

pub struct WeWorkRemotelySource {
    client: reqwest::Client,
}

impl WeWorkRemotelySource {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: build_client(USER_AGENT, Duration::from_secs(20))?,
        })
    }
}

#[async_trait]
impl JobSource for WeWorkRemotelySource {
    fn name(&self) -> &'static str {
        "weworkremotely"
    }

    async fn fetch(&self) -> Result<Vec<NewJob>, SourceError> {
        let response = self.client.get(FEED_URL).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status,
                url: FEED_URL.to_string(),
            });
        }

        let body = response.bytes().await?;
        let channel = Channel::read_from(&body[..])?;
        Ok(parse_channel(&channel))
    }
}

/// Map feed items to candidates. Items combine title and company in one
/// field ("Title at Company" or "Company - Title"); the split recovers both.
fn parse_channel(channel: &Channel) -> Vec<NewJob> {
    let mut out = Vec::new();

    for item in channel.items() {
        let raw_title = item.title().unwrap_or("");
        let apply_url = item.link().unwrap_or("").trim().to_string();
        if raw_title.trim().is_empty() || apply_url.is_empty() {
            continue;
        }

        let (title, company) = split_title_company(raw_title);
        let description = item.description().unwrap_or("");

        if !title.to_lowercase().contains(DOMAIN_KEYWORD)
            && !description.to_lowercase().contains(DOMAIN_KEYWORD)
        {
            continue;
        }

        let posted_date_text = clean_text(item.pub_date().unwrap_or(""));

        out.push(NewJob {
            role_type: RoleType::infer(&title, RoleType::Entry),
            title,
            company,
            location: "Remote".to_string(),
            source: "weworkremotely".to_string(),
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
