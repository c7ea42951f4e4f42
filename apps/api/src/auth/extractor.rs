use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::session::session_token;
use crate::errors::AppError;
use crate::models::user::UserProfile;
use crate::state::AppState;

/// Route layer for protected pages: no valid session, no page.
///
/// The session is resolved once here and the profile is handed to handlers
/// through request extensions.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match state.auth.current_user(session_token(request.headers())).await {
        Some(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        None => AppError::Unauthorized.into_response(),
    }
}

/// The signed-in user resolved by `require_session`. Rejects with 401 on
/// routes the layer does not cover.
pub struct CurrentUser(pub UserProfile);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserProfile>()
            .cloned()
            .map(CurrentUser)
            .ok_or(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_current_user_reads_resolved_profile() {
        let (mut parts, _) = axum::http::Request::new(()).into_parts();
        parts.extensions.insert(UserProfile {
            id: "uid-ada".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        });

        let CurrentUser(user) = CurrentUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(user.id, "uid-ada");
    }

    #[tokio::test]
    async fn test_current_user_outside_layer_is_unauthorized() {
        let (mut parts, _) = axum::http::Request::new(()).into_parts();
        let rejection = match CurrentUser::from_request_parts(&mut parts, &()).await {
            Ok(_) => panic!("expected rejection"),
            Err(e) => e,
        };
        assert_eq!(rejection.into_response().status(), StatusCode::UNAUTHORIZED);
    }
}
