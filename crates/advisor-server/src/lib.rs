//! HTTP server exposing the resolver as JSON endpoints

pub mod error;
pub mod handlers;
pub mod router;


pub use error::ApiError;
pub use router::create_router;

use advisor_resolver::Resolver;
use anyhow::Context;
use std::sync::Arc;

/// Shared state handed to every handler.
#[derive(Debug)]
pub struct AppState {
    pub resolver: Resolver,
}

impl AppState {
    pub fn new(resolver: Resolver) -> Self {
        AppState { resolver }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 7878,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub struct AdvisorServer {
    state: Arc<AppState>,
    config: ServerConfig,
}

impl AdvisorServer {
    pub fn new(resolver: Resolver, config: ServerConfig) -> Self {
        AdvisorServer {
            state: Arc::new(AppState::new(resolver)),
            config,
        }
    }

    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    /// Bind and serve until the process is stopped.
    pub async fn start(self) -> anyhow::Result<()> {
        let address = self.config.address();
        let listener = tokio::net::TcpListener::bind(&address)
            .await
            .with_context(|| format!("Failed to bind {}", address))?;
        tracing::info!("Advisor API listening on http://{}", address);

        let router = create_router(self.state);
        axum::serve(listener, router).await.context("Server error")?;
        Ok(())
    }
}
