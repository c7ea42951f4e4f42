//! Interview store — the `interviews` collection behind a pluggable trait.
//!
//! `AppState` holds an `Arc<dyn InterviewStore>`; production uses Postgres.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::interview::{Interview, NewInterview};

#[async_trait]
pub trait InterviewStore: Send + Sync {
    /// Writes a new record and returns it with its store-assigned id.
    async fn insert(&self, interview: NewInterview) -> Result<Interview, StoreError>;

    /// Every record owned by `user_id`, newest first.
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Interview>, StoreError>;

    /// Up to `limit` records NOT owned by `user_id`, ordered by owner then newest first.
    async fn find_latest_excluding(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<Interview>, StoreError>;
}

pub struct PgInterviewStore {
    pool: PgPool,
}

impl PgInterviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InterviewStore for PgInterviewStore {
    async fn insert(&self, interview: NewInterview) -> Result<Interview, StoreError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO interviews
                (id, role, type, level, techstack, questions, user_id, finalized, cover_image, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(id)
        .bind(&interview.role)
        .bind(&interview.interview_type)
        .bind(&interview.level)
        .bind(&interview.techstack)
        .bind(&interview.questions)
        .bind(&interview.user_id)
        .bind(interview.finalized)
        .bind(&interview.cover_image)
        .bind(&interview.created_at)
        .execute(&self.pool)
        .await?;

        info!("Inserted interview {id} for user {}", interview.user_id);
        Ok(interview.into_stored(id))
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Interview>, StoreError> {
        Ok(sqlx::query_as::<_, Interview>(
            "SELECT * FROM interviews WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find_latest_excluding(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<Interview>, StoreError> {
        Ok(sqlx::query_as::<_, Interview>(
            r#"
            SELECT * FROM interviews
            WHERE user_id <> $1
            ORDER BY user_id ASC, created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?)
    }
}
