use anyhow::{Context, Result};

const DEFAULT_ICON_CDN_BASE_URL: &str = "https://cdn.jsdelivr.net/gh/devicons/devicon/icons";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub gemini_api_key: String,
    pub firebase_api_key: String,
    pub session_secret: String,
    pub icon_cdn_base_url: String,
    pub app_env: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            gemini_api_key: require_env("GOOGLE_GENERATIVE_AI_API_KEY")?,
            firebase_api_key: require_env("FIREBASE_API_KEY")?,
            session_secret: require_env("SESSION_SECRET")?,
            icon_cdn_base_url: std::env::var("ICON_CDN_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_ICON_CDN_BASE_URL.to_string()),
            app_env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Session cookies are only marked `Secure` in production.
    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            database_url: "postgres://localhost/prepwizard_test".to_string(),
            redis_url: "redis://127.0.0.1/".to_string(),
            gemini_api_key: "test-gemini-key".to_string(),
            firebase_api_key: "test-firebase-key".to_string(),
            session_secret: "test-session-secret".to_string(),
            icon_cdn_base_url: "http://127.0.0.1:9".to_string(),
            app_env: "test".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
