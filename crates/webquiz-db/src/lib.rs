pub mod config;
pub mod content_repository;
pub mod database;
pub mod highscore_repository;
pub mod submission_repository;
pub mod user_repository;

pub use config::DatabaseConfig;
pub use content_repository::ContentRepository;
pub use database::Database;
pub use highscore_repository::HighscoreRepository;
pub use submission_repository::SubmissionRepository;
pub use user_repository::UserRepository;
