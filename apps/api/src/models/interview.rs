use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Owner recorded when a generation request carries no `userid`.
pub const ANONYMOUS_USER: &str = "anonymous";

/// A stored mock-interview question set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    pub id: Uuid,
    pub role: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub interview_type: String,
    pub level: String,
    pub techstack: Vec<String>,
    pub questions: Vec<String>,
    pub user_id: String,
    pub finalized: bool,
    pub cover_image: String,
    pub created_at: String,
}

/// An interview record before the store has assigned it an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInterview {
    pub role: String,
    #[serde(rename = "type")]
    pub interview_type: String,
    pub level: String,
    pub techstack: Vec<String>,
    pub questions: Vec<String>,
    pub user_id: String,
    pub finalized: bool,
    pub cover_image: String,
    pub created_at: String,
}

impl NewInterview {
    pub fn into_stored(self, id: Uuid) -> Interview {
        Interview {
            id,
            role: self.role,
            interview_type: self.interview_type,
            level: self.level,
            techstack: self.techstack,
            questions: self.questions,
            user_id: self.user_id,
            finalized: self.finalized,
            cover_image: self.cover_image,
            created_at: self.created_at,
        }
    }
}

/// `createdAt` format: RFC 3339, millisecond precision, `Z` suffix.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
