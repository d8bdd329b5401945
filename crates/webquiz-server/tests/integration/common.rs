use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use http_body_util::BodyExt;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};

use webquiz_db::Database;
use webquiz_server::auth::TokenIssuer;
use webquiz_server::routes;
use webquiz_server::state::AppState;

pub const TEST_JWT_SECRET: &str = "test-signing-secret";

/// SQL migration statements, executed one at a time.
const MIGRATIONS: &[&str] = &[
    // 0001_init.sql
    r#"CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        email VARCHAR NOT NULL UNIQUE,
        password_hash VARCHAR NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS categories (
        id SERIAL PRIMARY KEY,
        name VARCHAR NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS questions (
        id SERIAL PRIMARY KEY,
        category_id INTEGER NOT NULL REFERENCES categories(id),
        question TEXT NOT NULL,
        option_a TEXT NOT NULL,
        option_b TEXT NOT NULL,
        option_c TEXT NOT NULL,
        option_d TEXT NOT NULL,
        correct_option VARCHAR(1) NOT NULL,
        explanation TEXT,
        CONSTRAINT chk_questions_correct_option CHECK (
            correct_option IN ('A', 'B', 'C', 'D')
        )
    )"#,
    r#"CREATE INDEX IF NOT EXISTS idx_questions_category ON questions(category_id)"#,
    r#"CREATE TABLE IF NOT EXISTS submitted_questions (
        id SERIAL PRIMARY KEY,
        user_email VARCHAR,
        category_id INTEGER NOT NULL REFERENCES categories(id),
        question TEXT NOT NULL,
        option_a TEXT NOT NULL,
        option_b TEXT NOT NULL,
        option_c TEXT NOT NULL,
        option_d TEXT NOT NULL,
        correct_option VARCHAR(1) NOT NULL,
        explanation TEXT,
        reviewed BOOLEAN NOT NULL DEFAULT FALSE,
        submitted_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT chk_submitted_questions_correct_option CHECK (
            correct_option IN ('A', 'B', 'C', 'D')
        )
    )"#,
    r#"CREATE INDEX IF NOT EXISTS idx_submitted_questions_pending
        ON submitted_questions(submitted_at DESC) WHERE reviewed = FALSE"#,
    r#"CREATE TABLE IF NOT EXISTS highscores (
        id SERIAL PRIMARY KEY,
        user_id INTEGER REFERENCES users(id),
        guest_name VARCHAR,
        score INTEGER NOT NULL,
        mode VARCHAR NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE INDEX IF NOT EXISTS idx_highscores_leaderboard
        ON highscores(score DESC, created_at ASC)"#,
];

pub struct TestApp {
    pub router: Router,
    pub pool: PgPool,
    _container: ContainerAsync<GenericImage>,
}

/// Spin up a PostgreSQL container and return the test app router, a pool
/// for direct seeding/inspection, and the container handle.
pub async fn setup_test_app() -> TestApp {
    let container = GenericImage::new("postgres", "16")
        .with_exposed_port(ContainerPort::Tcp(5432))
        .with_wait_for(WaitFor::message_on_stderr(
            "database system is ready to accept connections",
        ))
        .with_env_var("POSTGRES_PASSWORD", "postgres")
        .with_env_var("POSTGRES_DB", "webquiz_test")
        .start()
        .await
        .expect("Failed to start PostgreSQL container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get port");

    let url = format!("postgresql://postgres:postgres@{host}:{port}/webquiz_test");

    let pool = retry_connect(&url).await;

    for migration in MIGRATIONS {
        sqlx::query(migration)
            .execute(&pool)
            .await
            .expect("Failed to run migration");
    }

    let db = Database::from_pool(pool.clone());
    let state = Arc::new(AppState {
        db,
        tokens: TokenIssuer::new(TEST_JWT_SECRET.as_bytes()),
    });

    TestApp {
        router: routes::router(state),
        pool,
        _container: container,
    }
}

async fn retry_connect(url: &str) -> PgPool {
    for _ in 0..30 {
        if let Ok(pool) = PgPoolOptions::new().max_connections(5).connect(url).await {
            return pool;
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }
    panic!("Failed to connect to test database");
}

/// Build a POST request with a JSON body.
pub fn post_json(path: &str, body: &serde_json::Value) -> Request<Body> {
    Request::post(path)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Insert a category and return its id.
pub async fn seed_category(pool: &PgPool, name: &str) -> i32 {
    let row: (i32,) = sqlx::query_as("INSERT INTO categories (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("Failed to seed category");
    row.0
}

/// Insert a question and return its id.
pub async fn seed_question(
    pool: &PgPool,
    category_id: i32,
    question: &str,
    explanation: Option<&str>,
) -> i32 {
    let row: (i32,) = sqlx::query_as(
        r#"
        INSERT INTO questions
            (category_id, question, option_a, option_b, option_c, option_d,
             correct_option, explanation)
        VALUES ($1, $2, 'a', 'b', 'c', 'd', 'A', $3)
        RETURNING id
        "#,
    )
    .bind(category_id)
    .bind(question)
    .bind(explanation)
    .fetch_one(pool)
    .await
    .expect("Failed to seed question");
    row.0
}
