mod auth;
mod config;
mod db;
mod errors;
mod interviews;
mod llm_client;
mod models;
mod pages;
mod presentation;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::identity::FirebaseIdentity;
use crate::auth::revocation::RedisRevocations;
use crate::auth::service::AuthService;
use crate::auth::session::SessionSigner;
use crate::auth::users::PgUserStore;
use crate::config::Config;
use crate::db::create_pool;
use crate::interviews::store::PgInterviewStore;
use crate::llm_client::LlmClient;
use crate::presentation::icons::TechIconResolver;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting PrepWizard API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize Redis (session revocation list)
    let redis = redis::Client::open(config.redis_url.clone())?;
    let redis = redis::aio::ConnectionManager::new(redis).await?;
    info!("Redis connection established");

    // One HTTP client for the model, the identity provider and icon probes
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()?;

    let llm = LlmClient::new(http.clone(), config.gemini_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let auth = AuthService::new(
        SessionSigner::new(&config.session_secret),
        Arc::new(PgUserStore::new(db.clone())),
        Arc::new(FirebaseIdentity::new(
            http.clone(),
            config.firebase_api_key.clone(),
        )),
        Arc::new(RedisRevocations::new(redis)),
    );

    let icons = TechIconResolver::new(http, config.icon_cdn_base_url.clone());

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        interviews: Arc::new(PgInterviewStore::new(db)),
        auth,
        icons,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the web app origin in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
