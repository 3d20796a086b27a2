use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domains::jobs::models::Job;

/// CSV column order for the export endpoint
pub const CSV_HEADER: [&str; 7] = [
    "title",
    "company",
    "location",
    "source",
    "role_type",
    "posted_date_text",
    "apply_url",
];

/// API representation of a job posting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobData {
    pub title: String,
    pub company: String,
    pub location: String,
    pub source: String,
    pub role_type: String,
    pub posted_date: String,
    pub apply_url: String,
    pub scraped_at: String,
    /// Scraped within the configured recency window
    pub is_new: bool,
}

impl JobData {
    /// Convert a stored row, deriving `is_new` against the given cutoff.
    pub fn from_job(job: Job, new_cutoff: DateTime<Utc>) -> Self {
        Self {
            title: job.title,
            company: job.company,
            location: job.location,
            source: job.source,
            role_type: job.role_type,
            posted_date: job.posted_date_text,
            apply_url: job.apply_url,
            scraped_at: job.scraped_at.to_rfc3339(),
            is_new: job.scraped_at >= new_cutoff,
        }
    }

    /// Row values in [`CSV_HEADER`] order.
    pub fn csv_record(job: &Job) -> [&str; 7] {
        [
            &job.title,
            &job.company,
            &job.location,
            &job.source,
            &job.role_type,
            &job.posted_date_text,
            &job.apply_url,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn job_scraped_at(scraped_at: DateTime<Utc>) -> Job {
        Job {
            id: 1,
            title: "Python Intern".to_string(),
            company: "Acme".to_string(),
            location: "Lahore".to_string(),
            source: "rozee".to_string(),
            role_type: "intern".to_string(),
            posted_date_text: "Today".to_string(),
            posted_at: None,
            apply_url: "https://example.com/1".to_string(),
            scraped_at,
        }
    }

    #[test]
    fn is_new_respects_cutoff() {
        let now = Utc::now();
        let cutoff = now - Duration::hours(24);

        let fresh = JobData::from_job(job_scraped_at(now - Duration::hours(1)), cutoff);
        assert!(fresh.is_new);

        let stale = JobData::from_job(job_scraped_at(now - Duration::hours(48)), cutoff);
        assert!(!stale.is_new);
    }
}
