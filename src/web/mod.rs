mod routes;
pub mod pages;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{AllowedMediaHost, Config};
use crate::constants::USER_AGENT;
use crate::filters::FilterOptionCache;
use crate::store::{HighlightStore, SupabaseStore};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn HighlightStore>,
    pub filter_options: Arc<FilterOptionCache>,
    /// Client used by the media proxy.
    pub media_http: reqwest::Client,
    pub media_allow_list: Arc<Vec<AllowedMediaHost>>,
}

impl AppState {
    /// Build state backed by the configured Supabase store.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let store = SupabaseStore::new(&config).context("Failed to initialize store client")?;
        info!(endpoint = %store.endpoint(), "Store client ready");
        Self::with_store(config, Arc::new(store))
    }

    /// Build state around an existing store.
    ///
    /// # Errors
    ///
    /// Returns an error if the media proxy client cannot be built.
    pub fn with_store(config: Config, store: Arc<dyn HighlightStore>) -> Result<Self> {
        let media_http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build media proxy client")?;
        let media_allow_list = Arc::new(config.media_allow_list());

        Ok(Self {
            config: Arc::new(config),
            store,
            filter_options: Arc::new(FilterOptionCache::new()),
            media_http,
            media_allow_list,
        })
    }
}

/// Start the web server.
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn serve(config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.web_host, config.web_port)
        .parse()
        .context("Invalid web server address")?;

    let state = AppState::new(config)?;
    let app = create_app(state);

    info!(addr = %addr, "Starting HTTP web server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind web server")?;

    axum::serve(listener, app)
        .await
        .context("Web server error")?;

    Ok(())
}

/// Create the main application router.
pub fn create_app(state: AppState) -> Router {
    let static_dir = find_static_dir();
    info!(static_dir = ?static_dir, "Serving static files");

    Router::new()
        .merge(routes::router())
        .nest_service("/static", ServeDir::new(&static_dir))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Find the static files directory.
///
/// Checks in order:
/// 1. ./static (development)
/// 2. /usr/share/highlight-gallery/static (installed)
/// 3. Falls back to ./static
fn find_static_dir() -> PathBuf {
    let candidates = [
        PathBuf::from("./static"),
        PathBuf::from("/usr/share/highlight-gallery/static"),
    ];

    for path in &candidates {
        if path.exists() && path.is_dir() {
            return path.clone();
        }
    }

    PathBuf::from("./static")
}
