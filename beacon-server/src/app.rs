use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::room::{RegistryStats, RoomRegistry, RoomRouter};
use crate::signaling::{SignalingService, ws_handler};
use axum::extract::State;
use axum::http::Method;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

pub const INDEX_BANNER: &str = "Beacon signaling relay is active and running!";

pub struct AppState {
    pub signaling: SignalingService,
    pub router: RoomRouter,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        let signaling = SignalingService::new(config.ice_servers.clone());
        let router = RoomRouter::new(Arc::new(RoomRegistry::new()), Arc::new(signaling.clone()));

        Self { signaling, router }
    }
}

#[derive(Debug, Serialize)]
struct HealthReport {
    status: &'static str,
    #[serde(flatten)]
    stats: RegistryStats,
}

pub fn build_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/ws", get(ws_handler))
        .layer(cors)
        .with_state(state)
}

async fn index() -> &'static str {
    INDEX_BANNER
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        stats: state.router.stats(),
    })
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    info!("Signaling relay listening on http://{}", listener.local_addr()?);

    let state = Arc::new(AppState::new(&config));
    serve_listener(listener, state, shutdown_signal()).await
}

pub async fn serve_listener<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Signaling relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
