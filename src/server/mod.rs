// NESQL HTTP Server module
// Read-only JSON browsing API over the exported dataset

pub mod handlers;
pub mod middleware;
pub mod observability;

use crate::config::Config;
use crate::search::SearchService;
use crate::store::Store;
use anyhow::{Context, Result};
use axum::Router as AxumRouter;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;

use observability::Metrics;

/// NESQL HTTP Server state
#[derive(Clone)]
pub struct ServerState {
    /// One SQLite connection shared by all handlers; queries run while holding the lock
    pub store: Arc<Mutex<Store>>,
    pub service: SearchService,
    pub metrics: Arc<Metrics>,
}

impl ServerState {
    pub fn new(store: Store, service: SearchService) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            service,
            metrics: Arc::new(Metrics::new()),
        }
    }
}

/// Initialize logging for the server
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "nesql_rust=debug,tower=warn,axum=warn".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the HTTP server
pub fn run_server(config: &Config) -> Result<()> {
    // Initialize runtime
    let rt = tokio::runtime::Runtime::new()?;

    rt.block_on(async {
        let store = Store::open(&config.database)?;
        let state = ServerState::new(store, SearchService::from_config(&config.search));

        let app = build_router(state);

        let addr: SocketAddr = config
            .bind_address()
            .parse()
            .with_context(|| format!("Invalid listen address: {}", config.bind_address()))?;

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("NESQL server listening on http://{}", addr);
        tracing::info!("Database: {}", config.database.display());
        tracing::info!(
            "Page size {}, navigation radius {}",
            config.search.page_size,
            config.search.nav_radius
        );
        tracing::info!("API endpoints available:");
        tracing::info!("  GET  /                   - Plugins and tables");
        tracing::info!("  GET  /health             - Health check");
        tracing::info!("  GET  /metrics            - Prometheus metrics");
        tracing::info!("  GET  /{{table}}/all        - List a table");
        tracing::info!("  GET  /{{table}}/search     - Filtered search");
        tracing::info!("  GET  /{{table}}/view/{{id}}  - Entity detail");

        axum::serve(listener, app).await?;
        Ok::<(), anyhow::Error>(())
    })
}

/// Build the router with all endpoints
pub fn build_router(state: ServerState) -> AxumRouter {
    use axum::routing::get;
    use tower_http::cors::{Any, CorsLayer};

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    AxumRouter::new()
        // Health and info
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        // Tables
        .route("/{path}/all", get(handlers::all))
        .route("/{path}/search", get(handlers::search))
        .route("/{path}/view/{id}", get(handlers::view))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::trace_request_mw,
        ))
        .layer(cors)
        .with_state(state)
}
