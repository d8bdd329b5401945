use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use webquiz_core::AppError;

use crate::config::DatabaseConfig;
use crate::content_repository::ContentRepository;
use crate::highscore_repository::HighscoreRepository;
use crate::submission_repository::SubmissionRepository;
use crate::user_repository::UserRepository;

/// Central database facade — owns the connection pool, runs migrations,
/// and vends repository instances.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL with the given configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect: {e}")))?;

        Ok(Self { pool })
    }

    /// Create a `Database` from an existing pool (useful for testing).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run all pending migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;
        Ok(())
    }

    /// Get a [`UserRepository`] backed by this pool.
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    /// Get a [`ContentRepository`] backed by this pool.
    pub fn content(&self) -> ContentRepository {
        ContentRepository::new(self.pool.clone())
    }

    /// Get a [`HighscoreRepository`] backed by this pool.
    pub fn highscores(&self) -> HighscoreRepository {
        HighscoreRepository::new(self.pool.clone())
    }

    /// Get a [`SubmissionRepository`] backed by this pool.
    pub fn submissions(&self) -> SubmissionRepository {
        SubmissionRepository::new(self.pool.clone())
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
