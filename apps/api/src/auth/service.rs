//! Sign-up, sign-in, sign-out and session checks.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::auth::identity::IdentityProvider;
use crate::auth::revocation::SessionRevocations;
use crate::auth::session::{SessionClaims, SessionSigner};
use crate::auth::users::UserStore;
use crate::auth::AuthError;
use crate::models::user::UserProfile;

#[derive(Debug, Clone, Deserialize)]
pub struct SignUpParams {
    pub uid: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInParams {
    pub email: String,
    pub id_token: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SignUpOutcome {
    Created,
    AlreadyExists,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SignInOutcome {
    SignedIn { token: String },
    UserNotFound,
}

#[derive(Clone)]
pub struct AuthService {
    signer: SessionSigner,
    users: Arc<dyn UserStore>,
    identity: Arc<dyn IdentityProvider>,
    revocations: Arc<dyn SessionRevocations>,
}

impl AuthService {
    pub fn new(
        signer: SessionSigner,
        users: Arc<dyn UserStore>,
        identity: Arc<dyn IdentityProvider>,
        revocations: Arc<dyn SessionRevocations>,
    ) -> Self {
        Self {
            signer,
            users,
            identity,
            revocations,
        }
    }

    /// Signature, expiry and revocation.
    pub async fn validate_session(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let claims = self.signer.verify(token)?;
        if self.revocations.is_revoked(&claims.jti).await? {
            return Err(AuthError::Revoked);
        }
        Ok(claims)
    }

    /// The profile behind a valid session. Every failure reads as "no user".
    pub async fn current_user(&self, token: Option<&str>) -> Option<UserProfile> {
        let token = token?;
        let claims = match self.validate_session(token).await {
            Ok(claims) => claims,
            Err(e) => {
                debug!("Rejected session: {e}");
                return None;
            }
        };

        match self.users.get(&claims.sub).await {
            Ok(user) => user,
            Err(e) => {
                warn!("Failed to load user {} for session: {e}", claims.sub);
                None
            }
        }
    }

    pub async fn sign_up(&self, params: SignUpParams) -> Result<SignUpOutcome, AuthError> {
        let profile = UserProfile {
            id: params.uid,
            name: params.name,
            email: params.email,
        };

        if self.users.create(&profile).await? {
            info!("Created user profile {}", profile.id);
            Ok(SignUpOutcome::Created)
        } else {
            info!("Sign-up for existing user {}", profile.id);
            Ok(SignUpOutcome::AlreadyExists)
        }
    }

    pub async fn sign_in(&self, params: SignInParams) -> Result<SignInOutcome, AuthError> {
        let Some(identity) = self.identity.lookup(&params.id_token).await? else {
            return Ok(SignInOutcome::UserNotFound);
        };

        let email_matches = identity
            .email
            .as_deref()
            .is_some_and(|e| e.eq_ignore_ascii_case(&params.email));
        if !email_matches {
            return Ok(SignInOutcome::UserNotFound);
        }

        let token = self.signer.issue(&identity.uid, &params.email)?;
        info!("Issued session for user {}", identity.uid);
        Ok(SignInOutcome::SignedIn { token })
    }

    /// Revokes the presented session for the rest of its lifetime. Missing or
    /// already-invalid tokens are a no-op.
    pub async fn sign_out(&self, token: Option<&str>) -> Result<(), AuthError> {
        let Some(token) = token else {
            return Ok(());
        };
        let Ok(claims) = self.signer.verify(token) else {
            return Ok(());
        };

        let ttl = claims.remaining_secs(Utc::now().timestamp());
        self.revocations.revoke(&claims.jti, ttl).await?;
        info!("Revoked session for user {}", claims.sub);
        Ok(())
    }
}
