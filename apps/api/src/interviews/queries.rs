//! Read accessors used by the dashboard. Both swallow store failures into an
//! empty list: a broken read degrades to "no interviews", never to an error page.

use tracing::error;

use crate::interviews::store::InterviewStore;
use crate::models::interview::Interview;

pub const DEFAULT_LATEST_LIMIT: u32 = 10;

#[derive(Debug, Clone)]
pub struct LatestInterviewsParams {
    pub user_id: String,
    pub limit: Option<u32>,
}

/// Interviews created by `user_id`, newest first.
pub async fn get_interviews_by_user_id(store: &dyn InterviewStore, user_id: &str) -> Vec<Interview> {
    if user_id.is_empty() {
        return Vec::new();
    }

    match store.find_by_user(user_id).await {
        Ok(interviews) => interviews,
        Err(e) => {
            error!("Error fetching interviews by user ID {user_id}: {e}");
            Vec::new()
        }
    }
}

/// Latest interviews created by anyone other than `params.user_id`.
pub async fn get_latest_interviews(
    store: &dyn InterviewStore,
    params: &LatestInterviewsParams,
) -> Vec<Interview> {
    if params.user_id.is_empty() {
        return Vec::new();
    }
    let limit = params.limit.unwrap_or(DEFAULT_LATEST_LIMIT);

    match store.find_latest_excluding(&params.user_id, limit).await {
        Ok(interviews) => interviews,
        Err(e) => {
            error!("Error fetching latest interviews: {e}");
            Vec::new()
        }
    }
}
