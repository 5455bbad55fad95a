//! SQLite database layer (embedded, no external dependencies)

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use opine_core::{Review, Sentiment};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Database {
    pool: Arc<SqlitePool>,
}

impl Database {
    pub async fn new(database_path: &str) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        // Create parent directory if needed
        if let Some(parent) = std::path::Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        tracing::info!("SQLite connection established, running migrations...");

        // Safe to re-run against an existing database
        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database initialization complete");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS reviews (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL,
                sentiment TEXT NOT NULL,
                created_at DATETIME NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Insert a review row and return the id SQLite assigned to it
    pub async fn insert_review(
        &self,
        text: &str,
        sentiment: Sentiment,
        created_at: DateTime<Utc>,
    ) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO reviews (text, sentiment, created_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(text)
        .bind(sentiment.to_string())
        .bind(created_at)
        .execute(&*self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// List reviews in insertion order, optionally restricted to one label
    pub async fn list_reviews(&self, sentiment: Option<Sentiment>) -> Result<Vec<Review>> {
        let rows: Vec<ReviewRow> = match sentiment {
            Some(sentiment) => {
                sqlx::query_as(
                    r#"
                    SELECT id, text, sentiment, created_at
                    FROM reviews WHERE sentiment = ?1
                    ORDER BY id ASC
                    "#,
                )
                .bind(sentiment.to_string())
                .fetch_all(&*self.pool)
                .await?
            }
            None => {
                sqlx::query_as(
                    r#"
                    SELECT id, text, sentiment, created_at
                    FROM reviews
                    ORDER BY id ASC
                    "#,
                )
                .fetch_all(&*self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}

// Helper struct for sqlx query_as
#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: i64,
    text: String,
    sentiment: String,
    created_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(r: ReviewRow) -> Self {
        Review {
            id: r.id,
            text: r.text,
            sentiment: parse_stored_sentiment(&r.sentiment),
            created_at: r.created_at,
        }
    }
}

fn parse_stored_sentiment(s: &str) -> Sentiment {
    // Rows only ever hold labels the classifier produced; stay lenient on
    // decode anyway rather than failing the whole listing
    s.parse().unwrap_or(Sentiment::Neutral)
}
