use sqlx::{PgPool, Pool, Postgres};

use webquiz_core::error::AppError;
use webquiz_core::models::User;

/// Repository for user accounts in PostgreSQL.
#[derive(Clone)]
pub struct UserRepository {
    pool: Pool<Postgres>,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user. Returns the created row.
    ///
    /// A unique-constraint violation on the email column surfaces as
    /// [`AppError::Conflict`]; any other failure as [`AppError::Database`].
    pub async fn create(&self, email: &str, password_hash: &str) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("email already registered".into())
            }
            _ => AppError::Database(e.to_string()),
        })?;

        Ok(row.into())
    }

    /// Look up a user by email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.map(Into::into))
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i32,
    email: String,
    password_hash: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
        }
    }
}
