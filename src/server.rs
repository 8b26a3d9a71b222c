//! Portal HTTP Server
//!
//! Wires the ledger, identification and chat services behind one axum router.

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::chat::{CachedResponder, ChatResponder, GeminiResponder, KeywordResponder, ReplyCache};
use crate::config::{ChatBackend, PortalConfig};
use crate::identify::{PlantNetClient, SpeciesIdentifier};
use crate::ledger::Ledger;
use crate::quota::UpstreamQuota;
use crate::services;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<PortalConfig>,
    pub ledger: Arc<Ledger>,
    pub identifier: Arc<dyn SpeciesIdentifier>,
    pub chat: Arc<dyn ChatResponder>,
    pub quota: Arc<UpstreamQuota>,
}

impl AppState {
    pub fn new(
        config: PortalConfig,
        ledger: Ledger,
        identifier: Arc<dyn SpeciesIdentifier>,
        chat: Arc<dyn ChatResponder>,
        quota: UpstreamQuota,
    ) -> Self {
        Self {
            config: Arc::new(config),
            ledger: Arc::new(ledger),
            identifier,
            chat,
            quota: Arc::new(quota),
        }
    }

    /// Build the live clients described by `config`
    pub async fn from_config(config: PortalConfig) -> Result<Self> {
        let ledger = match &config.ledger_path {
            Some(path) => Ledger::load(path).await?,
            None => Ledger::seeded(),
        };

        let identifier: Arc<dyn SpeciesIdentifier> = Arc::new(PlantNetClient::new(
            config.plantnet_url.clone(),
            config.plantnet_api_key.clone(),
            config.upstream_timeout,
        ));
        if config.plantnet_api_key.is_none() {
            warn!("PLANTNET_API_KEY is not set; /api/identify will answer 500");
        }

        let chat: Arc<dyn ChatResponder> = match config.chat_backend {
            ChatBackend::Gemini => {
                let key = config
                    .gemini_api_key
                    .clone()
                    .context("GEMINI_API_KEY is required for the gemini chat backend")?;
                Arc::new(GeminiResponder::new(
                    config.gemini_url.clone(),
                    key,
                    config.upstream_timeout,
                ))
            }
            ChatBackend::Keyword => Arc::new(KeywordResponder::new()),
        };
        let chat: Arc<dyn ChatResponder> = if config.chat_cache {
            Arc::new(CachedResponder::new(chat, Arc::new(ReplyCache::default())))
        } else {
            chat
        };
        info!("Chat backend: {}", chat.name());

        let quota = UpstreamQuota::new(config.identify_per_minute, config.chat_per_minute);
        Ok(Self::new(config, ledger, identifier, chat, quota))
    }
}

/// Full portal router
pub fn build_router(state: AppState) -> Router {
    let cors = state.config.cors_origin.as_deref().and_then(cors_layer);

    let mut app = Router::new()
        .route("/", get(landing_page))
        .route("/health", get(|| async { "OK" }))
        .merge(services::ledger::routes())
        .merge(services::identify::routes(state.config.max_upload_bytes))
        .merge(services::chat::routes())
        .layer(TraceLayer::new_for_http());
    if let Some(cors) = cors {
        app = app.layer(cors);
    }

    app.with_state(state)
}

pub(crate) fn cors_layer(origin: &str) -> Option<CorsLayer> {
    match HeaderValue::from_str(origin) {
        Ok(origin) => Some(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        ),
        Err(e) => {
            warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
            None
        }
    }
}

pub async fn run_server(config: PortalConfig) -> Result<()> {
    info!("🌿 Initializing herb traceability portal...");

    let addr = config.portal_addr.clone();
    let state = AppState::from_config(config).await?;
    info!(
        "Ledger ready: {} batches, {} actors",
        state.ledger.batches.len(),
        state.ledger.actor_count()
    );

    serve(build_router(state), &addr).await
}

pub(crate) async fn serve(app: Router, addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("🚀 Listening at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Ctrl-C handler unavailable: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

const LANDING_PAGE: &str = include_str!("landing.html");

async fn landing_page() -> impl IntoResponse {
    Html(LANDING_PAGE)
}
