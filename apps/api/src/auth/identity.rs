//! Identity provider — verifies client-issued ID tokens.
//!
//! Production talks to Google Identity Toolkit (`accounts:lookup`), which is the
//! REST face of Firebase Authentication.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

const IDENTITY_TOOLKIT_LOOKUP_URL: &str =
    "https://identitytoolkit.googleapis.com/v1/accounts:lookup";

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Identity provider rejected the request (status {status}): {message}")]
    Rejected { status: u16, message: String },
}

/// The identity behind a verified ID token.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityRecord {
    pub uid: String,
    pub email: Option<String>,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// `Ok(None)` when the token is well-formed but maps to no account.
    async fn lookup(&self, id_token: &str) -> Result<Option<IdentityRecord>, IdentityError>;
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ToolkitError {
    error: ToolkitErrorBody,
}

#[derive(Debug, Deserialize)]
struct ToolkitErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct FirebaseIdentity {
    client: Client,
    api_key: String,
}

impl FirebaseIdentity {
    pub fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentity {
    async fn lookup(&self, id_token: &str) -> Result<Option<IdentityRecord>, IdentityError> {
        let response = self
            .client
            .post(IDENTITY_TOOLKIT_LOOKUP_URL)
            .query(&[("key", &self.api_key)])
            .json(&json!({ "idToken": id_token }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ToolkitError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(IdentityError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let lookup: LookupResponse = response.json().await?;
        Ok(lookup.users.into_iter().next().map(|u| IdentityRecord {
            uid: u.local_id,
            email: u.email,
        }))
    }
}
