// Session/auth bridge: identity-provider verification, signed session cookies,
// and the guard extractor used by protected endpoints.

pub mod extractor;
pub mod handlers;
pub mod identity;
pub mod revocation;
pub mod service;
pub mod session;
pub mod users;

use thiserror::Error;

use crate::auth::identity::IdentityError;
use crate::errors::StoreError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid session token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Session has been revoked")]
    Revoked,

    #[error("Identity provider error: {0}")]
    Identity(#[from] IdentityError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Revocation list error: {0}")]
    Revocation(#[from] redis::RedisError),
}
