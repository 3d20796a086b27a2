//! Shared helpers for integration tests.

#![allow(dead_code)]

use jobpulse_core::domains::jobs::models::{Job, NewJob, RoleType};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// In-memory SQLite pool with the schema applied.
///
/// max_connections(1): each in-memory connection is its own database.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory pool");
    Job::init_schema(&pool).await.expect("Failed to init schema");
    pool
}

pub fn candidate(url: &str) -> NewJob {
    NewJob {
        title: "Python Intern".to_string(),
        company: "Acme".to_string(),
        location: "Lahore".to_string(),
        source: "rozee".to_string(),
        role_type: RoleType::Intern,
        posted_date_text: "Today".to_string(),
        apply_url: url.to_string(),
    }
}

pub fn candidate_full(
    url: &str,
    title: &str,
    company: &str,
    source: &str,
    location: &str,
    role_type: RoleType,
) -> NewJob {
    NewJob {
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        source: source.to_string(),
        role_type,
        posted_date_text: "unknown".to_string(),
        apply_url: url.to_string(),
    }
}
