use chrono::{DateTime, Utc};
use sqlx::{PgPool, Pool, Postgres};

use webquiz_core::error::AppError;
use webquiz_core::models::{NewSubmission, SubmittedQuestion};

/// Repository for the question moderation queue.
///
/// Lifecycle per row: Pending (`reviewed = FALSE`) → Approved
/// (`reviewed = TRUE`, plus a new `questions` row) or Deleted (row removed).
#[derive(Clone)]
pub struct SubmissionRepository {
    pool: Pool<Postgres>,
}

impl SubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new Pending submission.
    pub async fn insert(&self, submission: &NewSubmission) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO submitted_questions
                (user_email, category_id, question, option_a, option_b, option_c, option_d,
                 correct_option, explanation)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&submission.user_email)
        .bind(submission.category_id)
        .bind(&submission.question)
        .bind(&submission.option_a)
        .bind(&submission.option_b)
        .bind(&submission.option_c)
        .bind(&submission.option_d)
        .bind(&submission.correct_option)
        .bind(&submission.explanation)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    /// List all Pending submissions, most recently submitted first.
    pub async fn list_pending(&self) -> Result<Vec<SubmittedQuestion>, AppError> {
        let rows = sqlx::query_as::<_, SubmittedQuestionRow>(
            r#"
            SELECT id, user_email, category_id, question, option_a, option_b, option_c,
                   option_d, correct_option, explanation, reviewed, submitted_at
            FROM submitted_questions
            WHERE reviewed = FALSE
            ORDER BY submitted_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Approve a Pending submission: copy its fields into a new `questions`
    /// row and mark it reviewed, as one transaction.
    ///
    /// The pending row is locked `FOR UPDATE` so a concurrent or retried
    /// approval of the same id cannot create a duplicate question. Returns
    /// false if no Pending submission with that id exists.
    pub async fn approve(&self, id: i32) -> Result<bool, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let row = sqlx::query_as::<_, SubmittedQuestionRow>(
            r#"
            SELECT id, user_email, category_id, question, option_a, option_b, option_c,
                   option_d, correct_option, explanation, reviewed, submitted_at
            FROM submitted_questions
            WHERE id = $1 AND reviewed = FALSE
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        let Some(submission) = row else {
            return Ok(false);
        };

        sqlx::query(
            r#"
            INSERT INTO questions
                (category_id, question, option_a, option_b, option_c, option_d,
                 correct_option, explanation)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(submission.category_id)
        .bind(&submission.question)
        .bind(&submission.option_a)
        .bind(&submission.option_b)
        .bind(&submission.option_c)
        .bind(&submission.option_d)
        .bind(&submission.correct_option)
        .bind(&submission.explanation)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        sqlx::query(
            r#"
            UPDATE submitted_questions
            SET reviewed = TRUE
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::debug!(submission_id = id, "submission approved");
        Ok(true)
    }

    /// Remove a submission. Idempotent: deleting a nonexistent id succeeds.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        sqlx::query(
            r#"
            DELETE FROM submitted_questions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct SubmittedQuestionRow {
    id: i32,
    user_email: Option<String>,
    category_id: i32,
    question: String,
    option_a: String,
    option_b: String,
    option_c: String,
    option_d: String,
    correct_option: String,
    explanation: Option<String>,
    reviewed: bool,
    submitted_at: DateTime<Utc>,
}

impl From<SubmittedQuestionRow> for SubmittedQuestion {
    fn from(row: SubmittedQuestionRow) -> Self {
        SubmittedQuestion {
            id: row.id,
            user_email: row.user_email,
            category_id: row.category_id,
            question: row.question,
            option_a: row.option_a,
            option_b: row.option_b,
            option_c: row.option_c,
            option_d: row.option_d,
            correct_option: row.correct_option,
            explanation: row.explanation,
            reviewed: row.reviewed,
            submitted_at: row.submitted_at,
        }
    }
}
