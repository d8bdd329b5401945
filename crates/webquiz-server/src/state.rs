use webquiz_db::Database;

use crate::auth::TokenIssuer;

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub db: Database,
    pub tokens: TokenIssuer,
}
