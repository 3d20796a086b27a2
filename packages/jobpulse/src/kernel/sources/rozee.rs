//! Rozee.pk scraper for Python / Lahore listings.
//!
//! The only HTML-scraping source. Rozee's markup drifts, so cards are located
//! with a list of fallback selectors; finding zero cards is a valid outcome
//! (logged, not raised). Rozee may also sit behind Cloudflare and answer
//! plain requests with an error page, in which case the non-2xx status fails
//! the whole fetch.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;
use url::Url;

use crate::common::text::clean_text;
use crate::domains::jobs::models::{NewJob, RoleType};
use crate::kernel::sources::{build_client, JobSource, SourceError};

const BASE_URL: &str = "https://www.rozee.pk/job/jsearch/q/python%20lahore";
const BASE_ORIGIN: &str = "https://www.rozee.pk";

// Browser-like User-Agent; Rozee blocks obvious bots
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

// Primary and fallback card selectors; adjust when the site updates
const CARD_SELECTORS: &str = "li.job, div.job, .job, .job-listing, .job-list";

pub struct RozeeSource {
    client: reqwest::Client,
    max_pages: u32,
    /// Pause between result pages to reduce blocking risk
    page_delay: Duration,
}

impl RozeeSource {
    pub fn new(max_pages: u32, page_delay: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(USER_AGENT, Duration::from_secs(20))?,
            max_pages: max_pages.max(1),
            page_delay,
        })
    }
}

#[async_trait]
impl JobSource for RozeeSource {
    fn name(&self) -> &'static str {
        "rozee"
    }

    async fn fetch(&self) -> Result<Vec<NewJob>, SourceError> {
        let mut out = Vec::new();

        for page in 1..=self.max_pages {
            let url = if page == 1 {
                BASE_URL.to_string()
            } else {
                format!("{}/fp/{}", BASE_URL, page)
            };

            let response = self.client.get(&url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(SourceError::Status { status, url });
            }

            let html = response.text().await?;
            let jobs = parse_listing_page(&html);
            if jobs.is_empty() {
                warn!(page, "No job cards found - Rozee markup likely changed");
            }
            out.extend(jobs);

            if page < self.max_pages {
                tokio::time::sleep(self.page_delay).await;
            }
        }

        Ok(out)
    }
}

/// Parse one search-results page into job candidates.
///
/// Cards without a linked title are skipped; relative apply links are
/// resolved against the Rozee origin.
fn parse_listing_page(html: &str) -> Vec<NewJob> {
    let card_selector = match Selector::parse(CARD_SELECTORS) {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let document = Html::parse_document(html);
    let mut out = Vec::new();

    for card in document.select(&card_selector) {
        let Some(title_el) = select_first(&card, "a") else {
            continue;
        };

        let title = clean_text(&title_el.text().collect::<String>());
        let href = title_el.value().attr("href").unwrap_or("");
        if title.is_empty() || href.is_empty() {
            continue;
        }

        let apply_url = resolve_link(href);
        if apply_url.is_empty() {
            continue;
        }

        let company = first_text(&card, ".comp-name, .company")
            .unwrap_or_else(|| "Unknown".to_string());
        let location = first_text(&card, ".location, .loc")
            .unwrap_or_else(|| "Lahore".to_string());
        let posted_date_text = first_text(&card, ".date, .posted, .job-date")
            .unwrap_or_else(|| "unknown".to_string());

        out.push(NewJob {
            // Rozee lists almost no true entry-level roles, so unmatched
            // titles fall back to junior rather than entry
            role_type: RoleType::infer(&title, RoleType::Junior),
            title,
            company,
            location,
            source: "rozee".to_string(),
            posted_date_text,
            apply_url,
        });
    }

    out
}

fn select_first<'a>(card: &ElementRef<'a>, selectors: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selectors).ok()?;
    card.select(&selector).next()
}

fn first_text(card: &ElementRef<'_>, selectors: &str) -> Option<String> {
    let text = clean_text(&select_first(card, selectors)?.text().collect::<String>());
    (!text.is_empty()).then_some(text)
}

/// Resolve a card link against the Rozee origin.
fn resolve_link(href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    Url::parse(BASE_ORIGIN)
        .ok()
        .and_then(|base| base.join(href).ok())
        .map(|url| url.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body><ul>
          <li class="job">
            <a href="/job/python-intern-123">Python  Intern</a>
            <span class="comp-name">Acme Systems</span>
            <span class="location">Lahore, Pakistan</span>
            <span class="date">2 days ago</span>
          </li>
          <li class="job">
            <a href="https://www.rozee.pk/job/junior-dev-456">Junior Python Developer</a>
          </li>
          <li class="job">
            <span class="comp-name">No Link Co</span>
          </li>
        </ul></body></html>
    "#;

    #[test]
    fn parses_cards_and_resolves_relative_links() {
        let jobs = parse_listing_page(PAGE);
        assert_eq!(jobs.len(), 2);

        assert_eq!(jobs[0].title, "Python Intern");
        assert_eq!(jobs[0].company, "Acme Systems");
        assert_eq!(jobs[0].location, "Lahore, Pakistan");
        assert_eq!(jobs[0].posted_date_text, "2 days ago");
        assert_eq!(jobs[0].role_type, RoleType::Intern);
        assert_eq!(jobs[0].apply_url, "https://www.rozee.pk/job/python-intern-123");
        assert_eq!(jobs[0].source, "rozee");
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let jobs = parse_listing_page(PAGE);
        assert_eq!(jobs[1].company, "Unknown");
        assert_eq!(jobs[1].location, "Lahore");
        assert_eq!(jobs[1].posted_date_text, "unknown");
        assert_eq!(jobs[1].role_type, RoleType::Junior);
    }

    #[test]
    fn unmatched_titles_default_to_junior() {
        let html = r#"<div class="job"><a href="/j/1">Python Developer</a></div>"#;
        let jobs = parse_listing_page(html);
        assert_eq!(jobs[0].role_type, RoleType::Junior);
    }

    #[test]
    fn empty_page_is_not_an_error() {
        assert!(parse_listing_page("<html><body></body></html>").is_empty());
    }
}
