use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use webquiz_core::models::{Category, HighscoreEntry, Question, SubmittedQuestion, User};

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RegisterResponse {
    pub user: UserResponse,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

// ---------------------------------------------------------------------------
// Quiz content
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct QuestionsQuery {
    /// Category to sample questions from.
    pub category: Option<i32>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct QuestionResponse {
    pub id: i32,
    pub category_id: i32,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_option: String,
    pub explanation: Option<String>,
}

impl From<Question> for QuestionResponse {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            category_id: q.category_id,
            question: q.question,
            option_a: q.option_a,
            option_b: q.option_b,
            option_c: q.option_c,
            option_d: q.option_d,
            correct_option: q.correct_option,
            explanation: q.explanation,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ExplanationResponse {
    pub question_id: i32,
    pub explanation: Option<String>,
}

// ---------------------------------------------------------------------------
// Highscores
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SubmitHighscoreRequest {
    pub user_id: Option<i32>,
    pub guest_name: Option<String>,
    pub score: Option<i32>,
    pub mode: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HighscoreResponse {
    pub name: Option<String>,
    pub score: i32,
    pub mode: String,
    pub created_at: DateTime<Utc>,
}

impl From<HighscoreEntry> for HighscoreResponse {
    fn from(entry: HighscoreEntry) -> Self {
        Self {
            name: entry.name,
            score: entry.score,
            mode: entry.mode,
            created_at: entry.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Moderation
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SubmitQuestionRequest {
    pub user_email: Option<String>,
    pub category_id: Option<i32>,
    pub question: Option<String>,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    pub option_c: Option<String>,
    pub option_d: Option<String>,
    pub correct_option: Option<String>,
    pub explanation: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SubmittedQuestionResponse {
    pub id: i32,
    pub user_email: Option<String>,
    pub category_id: i32,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_option: String,
    pub explanation: Option<String>,
    pub reviewed: bool,
    pub submitted_at: DateTime<Utc>,
}

impl From<SubmittedQuestion> for SubmittedQuestionResponse {
    fn from(s: SubmittedQuestion) -> Self {
        Self {
            id: s.id,
            user_email: s.user_email,
            category_id: s.category_id,
            question: s.question,
            option_a: s.option_a,
            option_b: s.option_b,
            option_c: s.option_c,
            option_d: s.option_d,
            correct_option: s.correct_option,
            explanation: s.explanation,
            reviewed: s.reviewed,
            submitted_at: s.submitted_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}
