use sqlx::{PgPool, Pool, Postgres};

use webquiz_core::error::AppError;
use webquiz_core::models::{Category, Question};

/// How many questions a single quiz round is dealt.
const QUESTIONS_PER_ROUND: i64 = 10;

/// Read-only repository for published quiz content.
#[derive(Clone)]
pub struct ContentRepository {
    pool: Pool<Postgres>,
}

impl ContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Sample up to 10 questions from a category, uniformly at random.
    ///
    /// Each call draws a fresh sample; there is no repeatability guarantee.
    pub async fn random_questions(&self, category_id: i32) -> Result<Vec<Question>, AppError> {
        let rows = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT id, category_id, question, option_a, option_b, option_c, option_d,
                   correct_option, explanation
            FROM questions
            WHERE category_id = $1
            ORDER BY RANDOM()
            LIMIT $2
            "#,
        )
        .bind(category_id)
        .bind(QUESTIONS_PER_ROUND)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List all categories, ordered by ascending id.
    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name
            FROM categories
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Fetch the explanation text for a question.
    ///
    /// Outer `None` means the question does not exist; the inner option is
    /// the explanation column itself, which is nullable.
    pub async fn explanation(&self, question_id: i32) -> Result<Option<Option<String>>, AppError> {
        let row: Option<(Option<String>,)> = sqlx::query_as(
            r#"
            SELECT explanation
            FROM questions
            WHERE id = $1
            "#,
        )
        .bind(question_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.map(|(explanation,)| explanation))
    }
}

// -- Internal row types for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct QuestionRow {
    id: i32,
    category_id: i32,
    question: String,
    option_a: String,
    option_b: String,
    option_c: String,
    option_d: String,
    correct_option: String,
    explanation: Option<String>,
}

impl From<QuestionRow> for Question {
    fn from(row: QuestionRow) -> Self {
        Question {
            id: row.id,
            category_id: row.category_id,
            question: row.question,
            option_a: row.option_a,
            option_b: row.option_b,
            option_c: row.option_c,
            option_d: row.option_d,
            correct_option: row.correct_option,
            explanation: row.explanation,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i32,
    name: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
        }
    }
}
