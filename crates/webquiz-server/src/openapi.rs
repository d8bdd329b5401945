use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Webquiz API",
        version = "0.1.0",
        description = "Backend for a quiz web application: accounts, quiz content, highscores, and question moderation."
    ),
    paths(
        crate::routes::register,
        crate::routes::login,
        crate::routes::list_questions,
        crate::routes::list_categories,
        crate::routes::get_explanation,
        crate::routes::submit_highscore,
        crate::routes::list_highscores,
        crate::routes::submit_question,
        crate::routes::list_submissions,
        crate::routes::approve_question,
        crate::routes::delete_submission,
        crate::routes::index,
        crate::routes::health,
    ),
    components(schemas(
        crate::dto::RegisterRequest,
        crate::dto::RegisterResponse,
        crate::dto::UserResponse,
        crate::dto::LoginRequest,
        crate::dto::LoginResponse,
        crate::dto::QuestionResponse,
        crate::dto::CategoryResponse,
        crate::dto::ExplanationResponse,
        crate::dto::SubmitHighscoreRequest,
        crate::dto::HighscoreResponse,
        crate::dto::SubmitQuestionRequest,
        crate::dto::SubmittedQuestionResponse,
        crate::dto::MessageResponse,
        crate::dto::ErrorResponse,
        crate::dto::HealthResponse,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "quiz", description = "Quiz questions and categories"),
        (name = "highscores", description = "Score submission and leaderboard"),
        (name = "moderation", description = "User-submitted question review queue"),
        (name = "system", description = "Liveness and health"),
    )
)]
pub struct ApiDoc;
