use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Minimal profile document written at sign-up, keyed by the identity provider's uid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
}
