//! Job search, CSV export, and refresh endpoints.

use axum::{
    extract::{Extension, Query},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domains::jobs::data::{JobData, CSV_HEADER};
use crate::domains::jobs::models::{Job, JobFilter, JobStats};
use crate::kernel::RefreshReport;
use crate::server::app::AppState;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

/// 500 wrapper for handler failures
pub struct ApiError(anyhow::Error);

impl<E: Into<anyhow::Error>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "internal server error" })),
        )
            .into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct JobsQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub role_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

impl JobsQuery {
    fn filter(&self) -> JobFilter {
        JobFilter {
            q: self.q.clone(),
            source: self.source.clone(),
            role_type: self.role_type.clone(),
            location: self.location.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct JobsResponse {
    pub jobs: Vec<JobData>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub stats: JobStats,
}

/// GET /api/jobs - filtered, paginated listing plus dashboard stats
pub async fn list_jobs_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<JobsQuery>,
) -> Result<Json<JobsResponse>, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);
    let filter = params.filter();
    let new_cutoff = Utc::now() - Duration::hours(state.new_job_window_hours);

    let jobs = Job::search(&filter, limit, offset, &state.db_pool).await?;
    let total = Job::count(&filter, &state.db_pool).await?;
    let stats = Job::stats(&filter, new_cutoff, &state.db_pool).await?;

    Ok(Json(JobsResponse {
        jobs: jobs
            .into_iter()
            .map(|job| JobData::from_job(job, new_cutoff))
            .collect(),
        total,
        limit,
        offset,
        stats,
    }))
}

/// GET /api/jobs.csv - full export with the same filter semantics, no
/// pagination cap
pub async fn export_jobs_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<JobsQuery>,
) -> Result<Response, ApiError> {
    let jobs = Job::export(&params.filter(), &state.db_pool).await?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for job in &jobs {
        writer.write_record(JobData::csv_record(job))?;
    }
    let body = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("CSV buffer flush failed: {}", e))?;
    let body = String::from_utf8(body)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"jobs.csv\"",
            ),
        ],
        body,
    )
        .into_response())
}

/// POST /api/refresh - run every source once, behind the global cooldown.
///
/// Always 200: partial failures and the rate-limited state are encoded in
/// the report, never surfaced as HTTP errors.
pub async fn refresh_handler(Extension(state): Extension<AppState>) -> Json<RefreshReport> {
    Json(state.coordinator.refresh(&state.db_pool).await)
}
