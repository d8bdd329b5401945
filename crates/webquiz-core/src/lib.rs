pub mod error;
pub mod models;

pub use error::AppError;
pub use models::{
    Category, HighscoreEntry, NewHighscore, NewSubmission, Question, SubmittedQuestion, User,
    is_valid_answer_option,
};
