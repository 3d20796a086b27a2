use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Minimum seconds between two refresh runs (global cooldown gate)
    pub refresh_cooldown_secs: u64,
    /// A job counts as "new" if scraped within this many hours
    pub new_job_window_hours: i64,
    /// Result pages to fetch from Rozee per refresh
    pub rozee_max_pages: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:data/jobs.db?mode=rwc".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            refresh_cooldown_secs: env::var("REFRESH_COOLDOWN_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("REFRESH_COOLDOWN_SECS must be a valid number")?,
            new_job_window_hours: env::var("NEW_JOB_WINDOW_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .context("NEW_JOB_WINDOW_HOURS must be a valid number")?,
            rozee_max_pages: env::var("ROZEE_MAX_PAGES")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .context("ROZEE_MAX_PAGES must be a valid number")?,
        })
    }
}
