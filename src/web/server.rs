//! Web server for Talkboard.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::auth::TokenService;
use crate::config::{JwtConfig, ServerConfig};
use crate::{Database, Result, TalkboardError};

use super::handlers::AppState;
use super::router::{create_health_router, create_router};

/// HTTP server for the REST API.
pub struct WebServer {
    addr: SocketAddr,
    app_state: Arc<AppState>,
    tokens: Arc<TokenService>,
    cors_origins: Vec<String>,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &ServerConfig, jwt: &JwtConfig, db: Database) -> Result<Self> {
        let addr = format!("{}:{}", config.host, config.port)
            .parse()
            .map_err(|e| TalkboardError::Config(format!("invalid server address: {e}")))?;

        let tokens = Arc::new(TokenService::new(jwt)?);
        let app_state = Arc::new(AppState::new(db, tokens.clone()));

        Ok(Self {
            addr,
            app_state,
            tokens,
            cors_origins: config.cors_origins.clone(),
        })
    }

    /// The configured bind address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn build_router(&self) -> axum::Router {
        create_router(
            self.app_state.clone(),
            self.tokens.clone(),
            &self.cors_origins,
        )
        .merge(create_health_router())
    }

    /// Run the web server until shutdown.
    pub async fn run(self) -> Result<()> {
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("web server listening on http://{}", local_addr);

        axum::serve(listener, router).await?;
        Ok(())
    }

    /// Run the server in the background, returning the actual bound address.
    ///
    /// Useful for tests binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr> {
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
