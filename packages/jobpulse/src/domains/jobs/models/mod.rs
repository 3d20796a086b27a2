use anyhow::Result;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// A stored job posting
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Job {
    pub id: i64,

    // Content
    pub title: String,
    pub company: String,
    pub location: String,

    // Provenance
    pub source: String,
    pub role_type: String,

    // Dates: posted_date_text is the source's free-text date ("2 days ago");
    // posted_at is reserved for normalized dates and is never written today.
    pub posted_date_text: String,
    pub posted_at: Option<NaiveDate>,

    // Dedup identity
    pub apply_url: String,

    // Assigned by the store at insert time
    pub scraped_at: DateTime<Utc>,
}

/// A job candidate produced by a source, before storage.
///
/// `scraped_at` is deliberately absent: the store stamps it at insert time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub location: String,
    pub source: String,
    pub role_type: RoleType,
    pub posted_date_text: String,
    pub apply_url: String,
}

/// Coarse seniority bucket inferred from a job title
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoleType {
    Intern,
    Trainee,
    Junior,
    Entry,
}

impl RoleType {
    /// Infer a role type from a free-text title.
    ///
    /// Fixed priority: a title containing both "intern" and "trainee" is
    /// classified intern. `default` is the per-source fallback when no
    /// keyword matches (most sources use Entry, Rozee uses Junior).
    pub fn infer(title: &str, default: RoleType) -> RoleType {
        let t = title.to_lowercase();
        if t.contains("intern") {
            RoleType::Intern
        } else if t.contains("trainee") {
            RoleType::Trainee
        } else if t.contains("junior") {
            RoleType::Junior
        } else {
            default
        }
    }
}

impl std::fmt::Display for RoleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoleType::Intern => write!(f, "intern"),
            RoleType::Trainee => write!(f, "trainee"),
            RoleType::Junior => write!(f, "junior"),
            RoleType::Entry => write!(f, "entry"),
        }
    }
}

impl std::str::FromStr for RoleType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "intern" => Ok(RoleType::Intern),
            "trainee" => Ok(RoleType::Trainee),
            "junior" => Ok(RoleType::Junior),
            "entry" => Ok(RoleType::Entry),
            _ => Err(anyhow::anyhow!("Invalid role type: {}", s)),
        }
    }
}

/// Search filters; all optional and ANDed together
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    /// Case-insensitive substring match on title or company
    pub q: Option<String>,
    /// Exact source name
    pub source: Option<String>,
    /// Exact role type
    pub role_type: Option<String>,
    /// Coarse bucket: "lahore" and "remote" are recognized, anything else
    /// is ignored rather than treated as a literal match
    pub location: Option<String>,
}

impl JobFilter {
    /// Build the WHERE clause and its string binds for this filter.
    fn where_clause(&self) -> (String, Vec<String>) {
        let mut conditions: Vec<&str> = Vec::new();
        let mut binds: Vec<String> = Vec::new();

        if let Some(q) = self.q.as_deref().filter(|q| !q.is_empty()) {
            conditions.push("(LOWER(title) LIKE ? OR LOWER(company) LIKE ?)");
            let pattern = format!("%{}%", q.to_lowercase());
            binds.push(pattern.clone());
            binds.push(pattern);
        }

        if let Some(source) = self.source.as_deref().filter(|s| !s.is_empty()) {
            conditions.push("source = ?");
            binds.push(source.to_string());
        }

        if let Some(role_type) = self.role_type.as_deref().filter(|r| !r.is_empty()) {
            conditions.push("role_type = ?");
            binds.push(role_type.to_string());
        }

        if let Some(location) = self.location.as_deref() {
            match location.to_lowercase().as_str() {
                "lahore" => {
                    conditions.push("LOWER(location) LIKE ?");
                    binds.push("%lahore%".to_string());
                }
                "remote" => {
                    conditions.push("LOWER(location) LIKE ?");
                    binds.push("%remote%".to_string());
                }
                // Unrecognized buckets add no constraint
                _ => {}
            }
        }

        if conditions.is_empty() {
            (String::new(), binds)
        } else {
            (format!(" WHERE {}", conditions.join(" AND ")), binds)
        }
    }
}

/// Aggregate numbers for the dashboard header
#[derive(Debug, Clone, Serialize)]
pub struct JobStats {
    pub total_jobs: i64,
    pub new_jobs: i64,
    pub sources: i64,
    pub last_scraped_at: Option<DateTime<Utc>>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Job {
    /// Create the jobs table and its indexes if they do not exist.
    ///
    /// Safe to call on every process start.
    pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS jobs (
                id               INTEGER PRIMARY KEY AUTOINCREMENT,
                title            TEXT NOT NULL,
                company          TEXT NOT NULL,
                location         TEXT NOT NULL,
                source           TEXT NOT NULL,
                role_type        TEXT NOT NULL,
                posted_date_text TEXT NOT NULL,
                posted_at        TEXT NULL,
                apply_url        TEXT NOT NULL UNIQUE,
                scraped_at       TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_jobs_source     ON jobs(source);
            CREATE INDEX IF NOT EXISTS idx_jobs_role_type  ON jobs(role_type);
            CREATE INDEX IF NOT EXISTS idx_jobs_scraped_at ON jobs(scraped_at);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Insert a batch of candidates, skipping duplicates.
    ///
    /// Every row in the batch gets the same `scraped_at` instant. A conflict
    /// on `apply_url` is a silent no-op (UNIQUE + INSERT OR IGNORE), so
    /// re-inserting an already-seen batch returns 0. Candidates without a
    /// title or URL are dropped.
    ///
    /// Returns the number of rows actually persisted.
    pub async fn insert_batch(jobs: &[NewJob], pool: &SqlitePool) -> Result<u64> {
        let scraped_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let mut inserted = 0u64;

        for job in jobs {
            if job.title.is_empty() || job.apply_url.is_empty() {
                tracing::debug!(source = %job.source, "Dropping candidate without title or URL");
                continue;
            }

            let result = sqlx::query(
                "INSERT OR IGNORE INTO jobs
                    (title, company, location, source, role_type,
                     posted_date_text, posted_at, apply_url, scraped_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&job.title)
            .bind(&job.company)
            .bind(&job.location)
            .bind(&job.source)
            .bind(job.role_type.to_string())
            .bind(&job.posted_date_text)
            .bind(None::<NaiveDate>)
            .bind(&job.apply_url)
            .bind(&scraped_at)
            .execute(pool)
            .await?;

            inserted += result.rows_affected();
        }

        Ok(inserted)
    }

    /// Filtered, paginated listing; newest scrape first, ties broken by
    /// insertion order (id) descending.
    pub async fn search(
        filter: &JobFilter,
        limit: i64,
        offset: i64,
        pool: &SqlitePool,
    ) -> Result<Vec<Self>> {
        let (where_clause, binds) = filter.where_clause();
        let sql = format!(
            "SELECT * FROM jobs{} ORDER BY scraped_at DESC, id DESC LIMIT ? OFFSET ?",
            where_clause
        );

        let mut query = sqlx::query_as::<_, Job>(&sql);
        for bind in &binds {
            query = query.bind(bind);
        }
        let jobs = query.bind(limit).bind(offset).fetch_all(pool).await?;
        Ok(jobs)
    }

    /// Total rows matching the same filters as [`Job::search`], ignoring
    /// pagination. Used for page-count computation.
    pub async fn count(filter: &JobFilter, pool: &SqlitePool) -> Result<i64> {
        let (where_clause, binds) = filter.where_clause();
        let sql = format!("SELECT COUNT(*) FROM jobs{}", where_clause);

        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for bind in &binds {
            query = query.bind(bind);
        }
        let total = query.fetch_one(pool).await?;
        Ok(total)
    }

    /// All rows matching the filters, unpaginated. Feeds the CSV export.
    pub async fn export(filter: &JobFilter, pool: &SqlitePool) -> Result<Vec<Self>> {
        let (where_clause, binds) = filter.where_clause();
        let sql = format!(
            "SELECT * FROM jobs{} ORDER BY scraped_at DESC, id DESC",
            where_clause
        );

        let mut query = sqlx::query_as::<_, Job>(&sql);
        for bind in &binds {
            query = query.bind(bind);
        }
        let jobs = query.fetch_all(pool).await?;
        Ok(jobs)
    }

    /// Aggregate stats over the filtered set. `new_cutoff` defines the
    /// recency window for "new" jobs.
    pub async fn stats(
        filter: &JobFilter,
        new_cutoff: DateTime<Utc>,
        pool: &SqlitePool,
    ) -> Result<JobStats> {
        let (where_clause, binds) = filter.where_clause();

        let sql = format!(
            "SELECT COUNT(*), COUNT(DISTINCT source), MAX(scraped_at) FROM jobs{}",
            where_clause
        );
        let mut query =
            sqlx::query_as::<_, (i64, i64, Option<DateTime<Utc>>)>(&sql);
        for bind in &binds {
            query = query.bind(bind);
        }
        let (total_jobs, sources, last_scraped_at) = query.fetch_one(pool).await?;

        let new_sql = if where_clause.is_empty() {
            "SELECT COUNT(*) FROM jobs WHERE scraped_at >= ?".to_string()
        } else {
            format!("SELECT COUNT(*) FROM jobs{} AND scraped_at >= ?", where_clause)
        };
        let mut new_query = sqlx::query_scalar::<_, i64>(&new_sql);
        for bind in &binds {
            new_query = new_query.bind(bind);
        }
        let new_jobs = new_query
            .bind(new_cutoff.to_rfc3339_opts(SecondsFormat::Secs, true))
            .fetch_one(pool)
            .await?;

        Ok(JobStats {
            total_jobs,
            new_jobs,
            sources,
            last_scraped_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_prefers_intern_over_trainee() {
        assert_eq!(
            RoleType::infer("Python Intern Trainee", RoleType::Entry),
            RoleType::Intern
        );
    }

    #[test]
    fn infer_matches_junior() {
        assert_eq!(
            RoleType::infer("Junior Developer", RoleType::Entry),
            RoleType::Junior
        );
    }

    #[test]
    fn infer_is_case_insensitive() {
        assert_eq!(
            RoleType::infer("SOFTWARE TRAINEE", RoleType::Entry),
            RoleType::Trainee
        );
    }

    #[test]
    fn infer_falls_back_to_source_default() {
        assert_eq!(
            RoleType::infer("Senior Engineer", RoleType::Entry),
            RoleType::Entry
        );
        assert_eq!(
            RoleType::infer("Senior Engineer", RoleType::Junior),
            RoleType::Junior
        );
    }

    #[test]
    fn role_type_round_trips_through_strings() {
        for role in [RoleType::Intern, RoleType::Trainee, RoleType::Junior, RoleType::Entry] {
            assert_eq!(role.to_string().parse::<RoleType>().unwrap(), role);
        }
        assert!("senior".parse::<RoleType>().is_err());
    }

    #[test]
    fn unrecognized_location_bucket_adds_no_constraint() {
        let filter = JobFilter {
            location: Some("karachi".to_string()),
            ..Default::default()
        };
        let (clause, binds) = filter.where_clause();
        assert!(clause.is_empty());
        assert!(binds.is_empty());
    }

    #[test]
    fn filter_conditions_are_anded() {
        let filter = JobFilter {
            q: Some("python".to_string()),
            source: Some("rozee".to_string()),
            role_type: Some("intern".to_string()),
            location: Some("remote".to_string()),
        };
        let (clause, binds) = filter.where_clause();
        assert_eq!(clause.matches(" AND ").count(), 3);
        assert_eq!(binds.len(), 5);
    }
}
