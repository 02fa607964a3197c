use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// `None` when no OPENAI_API_KEY is configured. Extraction then runs
    /// rule-based only.
    pub llm: Option<LlmClient>,
    pub config: Config,
}
