use chrono::{DateTime, Utc};

/// The letters a quiz answer may point at.
pub const ANSWER_OPTIONS: [&str; 4] = ["A", "B", "C", "D"];

/// Returns true if `value` names one of the four answer options.
pub fn is_valid_answer_option(value: &str) -> bool {
    ANSWER_OPTIONS.contains(&value)
}

/// A registered user. The password is only ever stored as a bcrypt hash.
#[derive(Debug, Clone, serde::Serialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// A quiz category. Seeded externally; read-only from this service.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

/// A published quiz question.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Question {
    pub id: i32,
    pub category_id: i32,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    /// One of "A", "B", "C", "D".
    pub correct_option: String,
    pub explanation: Option<String>,
}

/// A user-proposed question awaiting moderation.
///
/// `reviewed` starts false and flips to true exactly once, when an admin
/// approves the submission and a matching [`Question`] row is created.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SubmittedQuestion {
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

/// DTO for inserting a new question submission.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub user_email: Option<String>,
    pub category_id: i32,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_option: String,
    pub explanation: Option<String>,
}

/// DTO for inserting a new highscore record.
///
/// At least one of `user_id` / `guest_name` must be present; the handler
/// checks this, the schema does not enforce it.
#[derive(Debug, Clone)]
pub struct NewHighscore {
    pub user_id: Option<i32>,
    pub guest_name: Option<String>,
    pub score: i32,
    pub mode: String,
}

/// A leaderboard row. `name` resolves to the owning user's email when
/// `user_id` was set on the record, otherwise to the guest name.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HighscoreEntry {
    pub name: Option<String>,
    pub score: i32,
    pub mode: String,
    pub created_at: DateTime<Utc>,
}
