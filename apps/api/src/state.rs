use std::sync::Arc;

use crate::auth::service::AuthService;
use crate::config::Config;
use crate::interviews::store::InterviewStore;
use crate::llm_client::TextGenerator;
use crate::presentation::icons::TechIconResolver;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Text-generation model. Default: `LlmClient` (Gemini).
    pub llm: Arc<dyn TextGenerator>,
    /// The `interviews` collection. Default: `PgInterviewStore`.
    pub interviews: Arc<dyn InterviewStore>,
    pub auth: AuthService,
    pub icons: TechIconResolver,
    pub config: Config,
}
