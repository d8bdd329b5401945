use chrono::{DateTime, Utc};
use sqlx::{PgPool, Pool, Postgres};

use webquiz_core::error::AppError;
use webquiz_core::models::{HighscoreEntry, NewHighscore};

/// How many rows the leaderboard view returns.
const LEADERBOARD_SIZE: i64 = 10;

/// Repository for highscore records. Append-only: rows are never updated
/// or deleted.
#[derive(Clone)]
pub struct HighscoreRepository {
    pool: Pool<Postgres>,
}

impl HighscoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a new highscore record.
    pub async fn insert(&self, highscore: &NewHighscore) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO highscores (user_id, guest_name, score, mode)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(highscore.user_id)
        .bind(&highscore.guest_name)
        .bind(highscore.score)
        .bind(&highscore.mode)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    /// Top 10 records ordered by score descending, ties broken by earliest
    /// creation time. Display names resolve to the owning user's email when
    /// `user_id` is set, else the guest name.
    pub async fn leaderboard(&self) -> Result<Vec<HighscoreEntry>, AppError> {
        let rows = sqlx::query_as::<_, HighscoreRow>(
            r#"
            SELECT
                COALESCE(u.email, h.guest_name) AS name,
                h.score,
                h.mode,
                h.created_at
            FROM highscores h
            LEFT JOIN users u ON h.user_id = u.id
            ORDER BY h.score DESC, h.created_at ASC
            LIMIT $1
            "#,
        )
        .bind(LEADERBOARD_SIZE)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct HighscoreRow {
    name: Option<String>,
    score: i32,
    mode: String,
    created_at: DateTime<Utc>,
}

impl From<HighscoreRow> for HighscoreEntry {
    fn from(row: HighscoreRow) -> Self {
        HighscoreEntry {
            name: row.name,
            score: row.score,
            mode: row.mode,
            created_at: row.created_at,
        }
    }
}
