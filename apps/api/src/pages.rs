//! Dashboard endpoints: the signed-in user's interviews and everyone else's,
//! rendered as cards.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::extractor::CurrentUser;
use crate::errors::AppError;
use crate::interviews::queries::{
    get_interviews_by_user_id, get_latest_interviews, LatestInterviewsParams,
};
use crate::presentation::card::{build_cards, InterviewCard};
use crate::state::AppState;

const MAX_LATEST_LIMIT: u32 = 100;

/// Raw query string values; `limit` is parsed by hand so bad input gets the
/// JSON error envelope instead of the extractor's plain-text rejection.
#[derive(Debug, Deserialize)]
pub struct LatestQuery {
    pub limit: Option<String>,
}

impl LatestQuery {
    /// An empty `limit=` counts as absent.
    fn limit(&self) -> Result<Option<u32>, AppError> {
        let Some(raw) = self.limit.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(None);
        };
        match raw.parse::<u32>() {
            Ok(limit) if (1..=MAX_LATEST_LIMIT).contains(&limit) => Ok(Some(limit)),
            _ => Err(AppError::Validation(format!(
                "limit must be an integer between 1 and {MAX_LATEST_LIMIT}"
            ))),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub user_interviews: Vec<InterviewCard>,
    pub latest_interviews: Vec<InterviewCard>,
}

/// GET /api/interviews
pub async fn handle_my_interviews(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Json<Vec<InterviewCard>> {
    let interviews = get_interviews_by_user_id(state.interviews.as_ref(), &user.id).await;
    Json(build_cards(interviews, &state.icons).await)
}

/// GET /api/interviews/latest?limit=N
pub async fn handle_latest_interviews(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<LatestQuery>,
) -> Result<Json<Vec<InterviewCard>>, AppError> {
    let params = LatestInterviewsParams {
        user_id: user.id,
        limit: query.limit()?,
    };
    let interviews = get_latest_interviews(state.interviews.as_ref(), &params).await;
    Ok(Json(build_cards(interviews, &state.icons).await))
}

/// GET /api/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Json<DashboardResponse> {
    let params = LatestInterviewsParams {
        user_id: user.id.clone(),
        limit: None,
    };
    let (mine, latest) = tokio::join!(
        get_interviews_by_user_id(state.interviews.as_ref(), &user.id),
        get_latest_interviews(state.interviews.as_ref(), &params),
    );
    let (user_interviews, latest_interviews) = tokio::join!(
        build_cards(mine, &state.icons),
        build_cards(latest, &state.icons),
    );

    Json(DashboardResponse {
        user_interviews,
        latest_interviews,
    })
}
