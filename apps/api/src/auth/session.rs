//! Session tokens and the `session` cookie that carries them.

use axum::http::{header, HeaderMap};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthError;

pub const SESSION_COOKIE: &str = "session";
/// Fixed validity window, shared by the token `exp` and the cookie `Max-Age`.
pub const SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Identity provider uid.
    pub sub: String,
    pub email: String,
    /// Token id, used as the revocation key.
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    /// Seconds until expiry, never negative.
    pub fn remaining_secs(&self, now: i64) -> u64 {
        u64::try_from(self.exp - now).unwrap_or(0)
    }
}

/// Signs and verifies HS256 session tokens.
#[derive(Clone)]
pub struct SessionSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl SessionSigner {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn issue(&self, uid: &str, email: &str) -> Result<String, AuthError> {
        self.issue_at(uid, email, Utc::now().timestamp())
    }

    pub fn issue_at(&self, uid: &str, email: &str, issued_at: i64) -> Result<String, AuthError> {
        let claims = SessionClaims {
            sub: uid.to_string(),
            email: email.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: issued_at,
            exp: issued_at + SESSION_TTL_SECS,
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Checks signature and expiry. Revocation is checked by the caller.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        Ok(decode::<SessionClaims>(token, &self.decoding, &self.validation)?.claims)
    }
}

/// `Set-Cookie` value for a freshly issued session.
pub fn session_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; Max-Age={SESSION_TTL_SECS}; Path=/; HttpOnly; SameSite=Lax"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes the session from the browser.
pub fn clear_session_cookie(secure: bool) -> String {
    let mut cookie = format!("{SESSION_COOKIE}=; Max-Age=0; Path=/; HttpOnly; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Finds the session token among the request's `Cookie` headers.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_issue_then_verify_carries_identity() {
        let signer = SessionSigner::new("secret");
        let token = signer.issue("uid-1", "a@example.com").unwrap();
        let claims = signer.verify(&token).unwrap();

        assert_eq!(claims.sub, "uid-1");
        assert_eq!(claims.email, "a@example.com");
        assert_eq!(claims.exp - claims.iat, SESSION_TTL_SECS);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let signer = SessionSigner::new("secret");
        let eight_days_ago = Utc::now().timestamp() - 8 * 24 * 60 * 60;
        let token = signer.issue_at("uid-1", "a@example.com", eight_days_ago).unwrap();
        assert!(signer.verify(&token).is_err());
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let token = SessionSigner::new("other").issue("uid-1", "a@example.com").unwrap();
        assert!(SessionSigner::new("secret").verify(&token).is_err());
        assert!(SessionSigner::new("secret").verify("garbage").is_err());
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok", false);
        assert_eq!(
            cookie,
            "session=tok; Max-Age=604800; Path=/; HttpOnly; SameSite=Lax"
        );
        assert!(session_cookie("tok", true).ends_with("; Secure"));
        assert!(clear_session_cookie(false).starts_with("session=; Max-Age=0"));
    }

    #[test]
    fn test_session_token_is_found_among_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; session=abc.def"));
        assert_eq!(session_token(&headers), Some("abc.def"));

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("session="));
        assert_eq!(session_token(&headers), None);

        assert_eq!(session_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_remaining_secs_never_negative() {
        let claims = SessionClaims {
            sub: "u".to_string(),
            email: "e".to_string(),
            jti: "j".to_string(),
            iat: 0,
            exp: 100,
        };
        assert_eq!(claims.remaining_secs(40), 60);
        assert_eq!(claims.remaining_secs(400), 0);
    }
}
