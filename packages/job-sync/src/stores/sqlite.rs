//! SQLite storage implementation.
//!
//! The durable backend. `primary_details` is kept as a JSON text column; the
//! transient attributes never reach this table.

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;

use crate::error::{Result, SyncError};
use crate::traits::store::LocalStore;
use crate::types::record::{JobId, JobRecord, PrimaryDetails};

const SELECT_COLUMNS: &str = "SELECT id, title, company, primary_details, content, description, phone, category, role, bookmarked, openings_count, num_applications FROM jobs";

/// SQLite-based job store.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Create a new SQLite store with the given connection URL.
    ///
    /// # Example URLs
    /// - `sqlite://lokaljob.db?mode=rwc` - File-based, create if missing
    /// - `sqlite::memory:` - Ephemeral (prefer [`SqliteStore::in_memory`])
    pub async fn new(database_url: &str) -> Result<Self> {
        Self::connect(SqlitePoolOptions::new().max_connections(5), database_url).await
    }

    /// Create an in-memory SQLite store (for testing).
    ///
    /// Uses a single connection that is never reaped: every SQLite `:memory:`
    /// connection is its own database, so closing it would lose the data.
    pub async fn in_memory() -> Result<Self> {
        let options = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
        Self::connect(options, "sqlite::memory:").await
    }

    async fn connect(options: SqlitePoolOptions, database_url: &str) -> Result<Self> {
        let pool = options.connect(database_url).await.map_err(storage)?;

        let store = Self { pool };
        store.run_migrations().await?;
        tracing::debug!(database_url, "SQLite job store ready");
        Ok(store)
    }

    /// Run database migrations.
    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS jobs (
                id INTEGER PRIMARY KEY,
                seq INTEGER NOT NULL,
                title TEXT NOT NULL,
                company TEXT NOT NULL,
                primary_details TEXT NOT NULL DEFAULT '{}',
                content TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL DEFAULT '',
                phone TEXT NOT NULL DEFAULT '',
                category TEXT NOT NULL DEFAULT '',
                role TEXT NOT NULL DEFAULT '',
                bookmarked INTEGER NOT NULL DEFAULT 0,
                openings_count INTEGER,
                num_applications INTEGER
            );

            CREATE INDEX IF NOT EXISTS idx_jobs_seq ON jobs(seq);
            CREATE INDEX IF NOT EXISTS idx_jobs_bookmarked ON jobs(bookmarked);
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(storage)?;

        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn storage(e: sqlx::Error) -> SyncError {
    SyncError::Storage(Box::new(e))
}

#[derive(Debug, FromRow)]
struct JobRow {
    id: i64,
    title: String,
    company: String,
    primary_details: String,
    content: String,
    description: String,
    phone: String,
    category: String,
    role: String,
    bookmarked: bool,
    openings_count: Option<i64>,
    num_applications: Option<i64>,
}

impl JobRow {
    fn into_record(self) -> Result<JobRecord> {
        let primary_details: PrimaryDetails = serde_json::from_str(&self.primary_details)
            .map_err(|e| {
                SyncError::Storage(format!("Invalid primary_details JSON: {}", e).into())
            })?;

        Ok(JobRecord {
            id: JobId::new(self.id),
            title: self.title,
            company: self.company,
            primary_details,
            content: self.content,
            description: self.description,
            phone: self.phone,
            category: self.category,
            role: self.role,
            bookmarked: self.bookmarked,
            openings_count: self.openings_count,
            num_applications: self.num_applications,
        })
    }
}

fn into_records(rows: Vec<JobRow>) -> Result<Vec<JobRecord>> {
    rows.into_iter().map(JobRow::into_record).collect()
}

#[async_trait]
impl LocalStore for SqliteStore {
    async fn upsert_all(&self, records: &[JobRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(storage)?;
        for record in records {
            let primary_details = serde_json::to_string(&record.primary_details)?;

            // bookmarked and seq are only written on first insert
            sqlx::query(
                r#"
                INSERT INTO jobs (id, seq, title, company, primary_details, content, description,
                                  phone, category, role, bookmarked, openings_count, num_applications)
                VALUES (?, (SELECT COALESCE(MAX(seq), 0) + 1 FROM jobs), ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(id) DO UPDATE SET
                    title = excluded.title,
                    company = excluded.company,
                    primary_details = excluded.primary_details,
                    content = excluded.content,
                    description = excluded.description,
                    phone = excluded.phone,
                    category = excluded.category,
                    role = excluded.role,
                    openings_count = excluded.openings_count,
                    num_applications = excluded.num_applications
                "#,
            )
            .bind(record.id.into_inner())
            .bind(&record.title)
            .bind(&record.company)
            .bind(&primary_details)
            .bind(&record.content)
            .bind(&record.description)
            .bind(&record.phone)
            .bind(&record.category)
            .bind(&record.role)
            .bind(record.bookmarked)
            .bind(record.openings_count)
            .bind(record.num_applications)
            .execute(&mut *tx)
            .await
            .map_err(storage)?;
        }
        tx.commit().await.map_err(storage)?;

        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<JobRecord>> {
        let rows = sqlx::query_as::<_, JobRow>(&format!("{SELECT_COLUMNS} ORDER BY seq"))
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;
        into_records(rows)
    }

    async fn get_bookmarked(&self) -> Result<Vec<JobRecord>> {
        let rows = sqlx::query_as::<_, JobRow>(&format!(
            "{SELECT_COLUMNS} WHERE bookmarked = 1 ORDER BY seq"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;
        into_records(rows)
    }

    async fn get_by_id(&self, id: JobId) -> Result<Option<JobRecord>> {
        let row = sqlx::query_as::<_, JobRow>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;

        match row {
            Some(r) => Ok(Some(r.into_record()?)),
            None => Ok(None),
        }
    }

    async fn update_one(&self, record: &JobRecord) -> Result<()> {
        let primary_details = serde_json::to_string(&record.primary_details)?;

        let result = sqlx::query(
            r#"
            UPDATE jobs SET
                title = ?, company = ?, primary_details = ?, content = ?, description = ?,
                phone = ?, category = ?, role = ?, bookmarked = ?, openings_count = ?,
                num_applications = ?
            WHERE id = ?
            "#,
        )
        .bind(&record.title)
        .bind(&record.company)
        .bind(&primary_details)
        .bind(&record.content)
        .bind(&record.description)
        .bind(&record.phone)
        .bind(&record.category)
        .bind(&record.role)
        .bind(record.bookmarked)
        .bind(record.openings_count)
        .bind(record.num_applications)
        .bind(record.id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(storage)?;

        if result.rows_affected() == 0 {
            return Err(SyncError::JobNotFound { id: record.id });
        }
        Ok(())
    }
}
