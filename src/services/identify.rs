//! Identification Proxy Service
//!
//! `POST /api/identify` accepts a multipart form with an `image` file and an
//! optional `organ`, relays it upstream and returns the upstream JSON as-is.

use anyhow::Result;
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        DefaultBodyLimit, Multipart, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::config::PortalConfig;
use crate::error::PortalError;
use crate::identify::{Organ, UploadedImage};
use crate::server::{cors_layer, serve, AppState};

const IMAGE_FIELD: &str = "image";
const ORGAN_FIELD: &str = "organ";
const FALLBACK_FILE_NAME: &str = "upload.jpg";

pub fn routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/api/identify", post(identify_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

/// Router for the standalone proxy: identification and health only
pub fn build_identify_router(state: AppState) -> Router {
    let cors = state.config.cors_origin.as_deref().and_then(cors_layer);

    let mut app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .merge(routes(state.config.max_upload_bytes))
        .layer(TraceLayer::new_for_http());
    if let Some(cors) = cors {
        app = app.layer(cors);
    }

    app.with_state(state)
}

pub async fn run_identify_server(config: PortalConfig) -> Result<()> {
    info!("🌿 Starting identification proxy...");

    let addr = config.identify_addr.clone();
    let state = AppState::from_config(config).await?;
    serve(build_identify_router(state), &addr).await
}

#[derive(Debug, Default)]
struct IdentifyForm {
    image: Option<UploadedImage>,
    organ: Option<String>,
}

async fn identify_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, PortalError> {
    // Anything that isn't a multipart body can't carry a file.
    let mut multipart = multipart.map_err(|_| PortalError::NoImage)?;
    let limit = state.config.max_upload_bytes;
    let form = read_form(&mut multipart, limit).await?;

    let image = form
        .image
        .filter(|image| !image.bytes.is_empty())
        .ok_or(PortalError::NoImage)?;
    let organ = resolve_organ(form.organ.as_deref(), state.config.default_organ)?;

    if !state.quota.allow_identify() {
        return Err(PortalError::RateLimited);
    }

    debug!(
        "Identifying {} ({} bytes) as {}",
        image.file_name,
        image.bytes.len(),
        organ
    );

    let result = state.identifier.identify(image, organ).await?;
    Ok(Json(result))
}

async fn read_form(multipart: &mut Multipart, limit: usize) -> Result<IdentifyForm, PortalError> {
    let mut form = IdentifyForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error(e, limit))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            // A plain text part named `image` is not an upload.
            Some(IMAGE_FIELD) if form.image.is_none() && field.file_name().is_some() => {
                let file_name = field
                    .file_name()
                    .filter(|n| !n.is_empty())
                    .unwrap_or(FALLBACK_FILE_NAME)
                    .to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(|e| upload_error(e, limit))?;

                form.image = Some(UploadedImage {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            Some(ORGAN_FIELD) => {
                form.organ = Some(field.text().await.map_err(|e| upload_error(e, limit))?);
            }
            _ => {
                // Drain unknown fields so the stream advances.
                field.bytes().await.map_err(|e| upload_error(e, limit))?;
            }
        }
    }

    Ok(form)
}

fn upload_error(err: MultipartError, limit: usize) -> PortalError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        PortalError::PayloadTooLarge { limit }
    } else {
        PortalError::InvalidUpload(err.body_text())
    }
}

fn resolve_organ(raw: Option<&str>, default: Organ) -> Result<Organ, PortalError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => value
            .parse()
            .map_err(|_| PortalError::BadRequest("Unsupported organ")),
        None => Ok(default),
    }
}
