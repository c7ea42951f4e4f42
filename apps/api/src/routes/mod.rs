pub mod health;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::auth::extractor::require_session;
use crate::auth::handlers as auth;
use crate::interviews::handlers as interviews;
use crate::pages;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Dashboard (session required)
    let protected = Router::new()
        .route("/api/interviews", get(pages::handle_my_interviews))
        .route("/api/interviews/latest", get(pages::handle_latest_interviews))
        .route("/api/dashboard", get(pages::handle_dashboard))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .route("/health", get(health::health_handler))
        // Generation API (voice-agent tool endpoint)
        .route(
            "/api/vapi/generate",
            get(interviews::handle_generate_info).post(interviews::handle_generate),
        )
        // Auth API
        .route("/api/auth/sign-up", post(auth::handle_sign_up))
        .route("/api/auth/sign-in", post(auth::handle_sign_in))
        .route("/api/auth/sign-out", post(auth::handle_sign_out))
        .route("/api/auth/session", get(auth::handle_session))
        .merge(protected)
        .with_state(state)
}
