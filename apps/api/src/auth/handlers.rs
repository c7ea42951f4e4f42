//! Axum route handlers for the auth API.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::auth::service::{SignInOutcome, SignInParams, SignUpOutcome, SignUpParams};
use crate::auth::session::{clear_session_cookie, session_cookie, session_token};
use crate::models::user::UserProfile;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

impl ActionResponse {
    fn new(success: bool, message: &str) -> Json<Self> {
        Json(Self {
            success,
            message: message.to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub user: Option<UserProfile>,
}

/// POST /api/auth/sign-up
pub async fn handle_sign_up(
    State(state): State<AppState>,
    Json(params): Json<SignUpParams>,
) -> Response {
    match state.auth.sign_up(params).await {
        Ok(SignUpOutcome::Created) => (
            StatusCode::CREATED,
            ActionResponse::new(true, "Account created successfully. Please sign in."),
        )
            .into_response(),
        Ok(SignUpOutcome::AlreadyExists) => (
            StatusCode::CONFLICT,
            ActionResponse::new(false, "User already exists. Please sign in instead."),
        )
            .into_response(),
        Err(e) => {
            error!("Error creating a user: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ActionResponse::new(false, "Failed to create an account."),
            )
                .into_response()
        }
    }
}

/// POST /api/auth/sign-in
pub async fn handle_sign_in(
    State(state): State<AppState>,
    Json(params): Json<SignInParams>,
) -> Response {
    match state.auth.sign_in(params).await {
        Ok(SignInOutcome::SignedIn { token }) => (
            StatusCode::OK,
            [(
                header::SET_COOKIE,
                session_cookie(&token, state.config.is_production()),
            )],
            ActionResponse::new(true, "Successfully signed in."),
        )
            .into_response(),
        Ok(SignInOutcome::UserNotFound) => (
            StatusCode::NOT_FOUND,
            ActionResponse::new(false, "User does not exist. Create an account."),
        )
            .into_response(),
        Err(e) => {
            error!("Error signing in: {e}");
            (
                StatusCode::UNAUTHORIZED,
                ActionResponse::new(false, "Failed to log into account. Please try again."),
            )
                .into_response()
        }
    }
}

/// POST /api/auth/sign-out
pub async fn handle_sign_out(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let secure = state.config.is_production();
    if let Err(e) = state.auth.sign_out(session_token(&headers)).await {
        error!("Error revoking session: {e}");
    }

    (
        StatusCode::OK,
        [(header::SET_COOKIE, clear_session_cookie(secure))],
        ActionResponse::new(true, "Signed out."),
    )
        .into_response()
}

/// GET /api/auth/session
pub async fn handle_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<SessionResponse> {
    let user = state.auth.current_user(session_token(&headers)).await;
    Json(SessionResponse {
        authenticated: user.is_some(),
        user,
    })
}
