mod auth;
mod config;
mod db;
mod errors;
mod feedback;
mod llm_client;
mod models;
mod negotiation;
mod routes;
mod state;
mod store;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::auth::CredentialIssuer;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{MemoryStore, PgStore, Store};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let credentials = CredentialIssuer::new(&config.jwt_secret);

    // `negotiate-api issue-token [user-id]` prints a bearer credential and exits.
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.first().map(String::as_str) == Some("issue-token") {
        let user_id = match args.get(1) {
            Some(raw) => Uuid::parse_str(raw).context("user id must be a UUID")?,
            None => Uuid::new_v4(),
        };
        let token = credentials.issue(user_id)?;
        println!("user: {user_id}\ntoken: {token}");
        return Ok(());
    }

    info!("Starting Negotiate API v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            info!("PostgreSQL store initialized");
            Arc::new(PgStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set; using in-memory store, data will not survive restarts");
            Arc::new(MemoryStore::new())
        }
    };

    let llm = LlmClient::new(config.openai_api_key.clone(), config.llm_timeout_secs)?;
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        llm_client::MODEL,
        config.llm_timeout_secs
    );

    let state = AppState {
        llm: Arc::new(llm),
        store,
        credentials,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
