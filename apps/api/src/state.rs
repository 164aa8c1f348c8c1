use std::sync::Arc;

use crate::auth::CredentialIssuer;
use crate::llm_client::CompletionGateway;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
/// Requests share no mutable state beyond what the store owns.
#[derive(Clone)]
pub struct AppState {
    /// The only path to the LLM provider. `LlmClient` in production.
    pub llm: Arc<dyn CompletionGateway>,
    /// `PgStore` when DATABASE_URL is set, otherwise `MemoryStore`.
    pub store: Arc<dyn Store>,
    pub credentials: CredentialIssuer,
}

#[cfg(test)]
impl AppState {
    pub fn for_tests(llm: Arc<dyn CompletionGateway>) -> Self {
        let config = crate::config::Config::for_tests();
        AppState {
            llm,
            store: Arc::new(crate::store::MemoryStore::new()),
            credentials: CredentialIssuer::new(&config.jwt_secret),
        }
    }
}
