//! User profiles — the `users` collection.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::StoreError;
use crate::models::user::UserProfile;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, uid: &str) -> Result<Option<UserProfile>, StoreError>;

    /// Returns `false` without writing when a profile already exists for the uid.
    async fn create(&self, profile: &UserProfile) -> Result<bool, StoreError>;
}

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn get(&self, uid: &str) -> Result<Option<UserProfile>, StoreError> {
        Ok(
            sqlx::query_as::<_, UserProfile>("SELECT id, name, email FROM users WHERE id = $1")
                .bind(uid)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn create(&self, profile: &UserProfile) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "INSERT INTO users (id, name, email) VALUES ($1, $2, $3) ON CONFLICT (id) DO NOTHING",
        )
        .bind(&profile.id)
        .bind(&profile.name)
        .bind(&profile.email)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
