use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use webquiz_core::error::AppError;
use webquiz_core::models::{NewHighscore, NewSubmission, is_valid_answer_option};

use crate::auth::BCRYPT_COST;
use crate::dto::{
    CategoryResponse, ErrorResponse, ExplanationResponse, HealthResponse, HighscoreResponse,
    LoginRequest, LoginResponse, MessageResponse, QuestionResponse, QuestionsQuery,
    RegisterRequest, RegisterResponse, SubmitHighscoreRequest, SubmitQuestionRequest,
    SubmittedQuestionResponse,
};
use crate::error::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Build the full router with all routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/questions", get(list_questions))
        .route("/categories", get(list_categories))
        .route("/explanation/{question_id}", get(get_explanation))
        .route("/highscores", post(submit_highscore))
        .route("/highscores", get(list_highscores))
        .route("/submit-question", post(submit_question))
        .route("/submitted-questions", get(list_submissions))
        .route("/approve-question/{id}", post(approve_question))
        .route("/delete-submitted/{id}", delete(delete_submission))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}

/// Unwrap an optional body field, rejecting the request when it is absent.
fn require<T>(field: Option<T>, name: &str) -> Result<T, ApiError> {
    field.ok_or_else(|| AppError::Validation(format!("missing required field: {name}")).into())
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = RegisterResponse),
        (status = 400, description = "Missing field or duplicate email", body = ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = require(body.email, "email")?;
    let password = require(body.password, "password")?;

    // Only the salted hash is ever persisted or logged.
    let password_hash =
        bcrypt::hash(&password, BCRYPT_COST).map_err(|e| AppError::Hash(e.to_string()))?;

    let user = state.db.users().create(&email, &password_hash).await?;
    tracing::info!(user_id = user.id, "registered new user");

    let response = RegisterResponse { user: user.into() };
    Ok((StatusCode::CREATED, axum::Json(response)))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed bearer token", body = LoginResponse),
        (status = 400, description = "Missing field or unknown email", body = ErrorResponse),
        (status = 401, description = "Wrong password", body = ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = require(body.email, "email")?;
    let password = require(body.password, "password")?;

    let Some(user) = state.db.users().find_by_email(&email).await? else {
        // Unknown email renders as 400 on this route, not 404.
        let body = ErrorResponse {
            error: "not_found".to_string(),
            message: "No account with this email".to_string(),
        };
        return Ok((StatusCode::BAD_REQUEST, axum::Json(body)).into_response());
    };

    let valid =
        bcrypt::verify(&password, &user.password_hash).map_err(|e| AppError::Hash(e.to_string()))?;
    if !valid {
        return Err(AppError::Unauthorized("wrong password".into()).into());
    }

    let token = state.tokens.issue(user.id, &user.email)?;
    Ok(axum::Json(LoginResponse { token }).into_response())
}

// ---------------------------------------------------------------------------
// Quiz content
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/questions",
    params(QuestionsQuery),
    responses(
        (status = 200, description = "Up to 10 random questions from the category", body = [QuestionResponse]),
        (status = 400, description = "Missing category id", body = ErrorResponse),
    ),
    tag = "quiz"
)]
pub async fn list_questions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<QuestionsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(category_id) = query.category else {
        return Err(AppError::Validation("missing category id, use ?category=ID".into()).into());
    };

    let questions = state.db.content().random_questions(category_id).await?;
    let response: Vec<QuestionResponse> = questions.into_iter().map(Into::into).collect();

    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "All categories, ascending by id", body = [CategoryResponse]),
    ),
    tag = "quiz"
)]
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let categories = state.db.content().list_categories().await?;
    let response: Vec<CategoryResponse> = categories.into_iter().map(Into::into).collect();

    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/explanation/{question_id}",
    params(
        ("question_id" = i32, Path, description = "Question ID")
    ),
    responses(
        (status = 200, description = "Explanation text (may be null)", body = ExplanationResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
    ),
    tag = "quiz"
)]
pub async fn get_explanation(
    State(state): State<Arc<AppState>>,
    Path(question_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    match state.db.content().explanation(question_id).await? {
        Some(explanation) => Ok(axum::Json(ExplanationResponse {
            question_id,
            explanation,
        })
        .into_response()),
        None => {
            let body = ErrorResponse {
                error: "not_found".to_string(),
                message: format!("Question not found: {question_id}"),
            };
            Ok((StatusCode::NOT_FOUND, axum::Json(body)).into_response())
        }
    }
}

// ---------------------------------------------------------------------------
// Highscores
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/highscores",
    request_body = SubmitHighscoreRequest,
    responses(
        (status = 201, description = "Highscore saved", body = MessageResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse),
    ),
    tag = "highscores"
)]
pub async fn submit_highscore(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<SubmitHighscoreRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let score = require(body.score, "score")?;
    let mode = require(body.mode, "mode")?;

    if body.user_id.is_none() && body.guest_name.is_none() {
        return Err(
            AppError::Validation("either user_id or guest_name must be present".into()).into(),
        );
    }

    let highscore = NewHighscore {
        user_id: body.user_id,
        guest_name: body.guest_name,
        score,
        mode,
    };
    state.db.highscores().insert(&highscore).await?;

    let response = MessageResponse {
        message: "Highscore saved".to_string(),
    };
    Ok((StatusCode::CREATED, axum::Json(response)))
}

#[utoipa::path(
    get,
    path = "/highscores",
    responses(
        (status = 200, description = "Top 10 highscores", body = [HighscoreResponse]),
    ),
    tag = "highscores"
)]
pub async fn list_highscores(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = state.db.highscores().leaderboard().await?;
    let response: Vec<HighscoreResponse> = entries.into_iter().map(Into::into).collect();

    Ok(axum::Json(response))
}

// ---------------------------------------------------------------------------
// Moderation workflow
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/submit-question",
    request_body = SubmitQuestionRequest,
    responses(
        (status = 201, description = "Submission queued for review", body = MessageResponse),
        (status = 400, description = "Missing required field", body = ErrorResponse),
    ),
    tag = "moderation"
)]
pub async fn submit_question(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<SubmitQuestionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let submission = NewSubmission {
        user_email: body.user_email,
        category_id: require(body.category_id, "category_id")?,
        question: require(body.question, "question")?,
        option_a: require(body.option_a, "option_a")?,
        option_b: require(body.option_b, "option_b")?,
        option_c: require(body.option_c, "option_c")?,
        option_d: require(body.option_d, "option_d")?,
        correct_option: require(body.correct_option, "correct_option")?,
        explanation: body.explanation,
    };

    if !is_valid_answer_option(&submission.correct_option) {
        return Err(
            AppError::Validation("correct_option must be one of A, B, C, D".into()).into(),
        );
    }

    state.db.submissions().insert(&submission).await?;

    let response = MessageResponse {
        message: "Question submitted and awaiting review".to_string(),
    };
    Ok((StatusCode::CREATED, axum::Json(response)))
}

#[utoipa::path(
    get,
    path = "/submitted-questions",
    responses(
        (status = 200, description = "Pending submissions, newest first", body = [SubmittedQuestionResponse]),
    ),
    tag = "moderation"
)]
pub async fn list_submissions(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let submissions = state.db.submissions().list_pending().await?;
    let response: Vec<SubmittedQuestionResponse> =
        submissions.into_iter().map(Into::into).collect();

    Ok(axum::Json(response))
}

#[utoipa::path(
    post,
    path = "/approve-question/{id}",
    params(
        ("id" = i32, Path, description = "Submission ID")
    ),
    responses(
        (status = 200, description = "Submission approved and published", body = MessageResponse),
        (status = 404, description = "No pending submission with that id", body = ErrorResponse),
    ),
    tag = "moderation"
)]
pub async fn approve_question(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let approved = state.db.submissions().approve(id).await?;

    if !approved {
        let body = ErrorResponse {
            error: "not_found".to_string(),
            message: format!("No pending submission with id {id}"),
        };
        return Ok((StatusCode::NOT_FOUND, axum::Json(body)).into_response());
    }

    tracing::info!(submission_id = id, "submission approved and published");
    let response = MessageResponse {
        message: "Question approved and published".to_string(),
    };
    Ok(axum::Json(response).into_response())
}

#[utoipa::path(
    delete,
    path = "/delete-submitted/{id}",
    params(
        ("id" = i32, Path, description = "Submission ID")
    ),
    responses(
        (status = 200, description = "Submission deleted (idempotent)", body = MessageResponse),
    ),
    tag = "moderation"
)]
pub async fn delete_submission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.submissions().delete(id).await?;

    let response = MessageResponse {
        message: "Submission deleted".to_string(),
    };
    Ok(axum::Json(response))
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Liveness string", body = String, content_type = "text/plain"),
    ),
    tag = "system"
)]
pub async fn index() -> &'static str {
    "Webquiz backend is online"
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let db_status = match state.db.health_check().await {
        Ok(()) => "ok",
        Err(_) => "error",
    };

    let status = if db_status == "ok" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = HealthResponse {
        status: if db_status == "ok" {
            "healthy"
        } else {
            "unhealthy"
        },
        database: db_status,
    };

    (status, axum::Json(response))
}
