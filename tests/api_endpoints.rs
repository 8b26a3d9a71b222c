//! Portal HTTP Surface
//!
//! Serves the full router on an ephemeral port with stub identification and
//! chat backends, then drives every route over real HTTP.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use herb_trace::chat::{ChatError, ChatResponder, CONNECTION_FALLBACK};
use herb_trace::config::PortalConfig;
use herb_trace::identify::{IdentifyError, Organ, SpeciesIdentifier, UploadedImage};
use herb_trace::quota::UpstreamQuota;
use herb_trace::services::identify::build_identify_router;
use herb_trace::{build_router, AppState, Ledger};

#[derive(Default)]
struct StubIdentifier {
    calls: Mutex<Vec<(String, Option<String>, Organ, usize)>>,
    fail: bool,
}

#[async_trait]
impl SpeciesIdentifier for StubIdentifier {
    async fn identify(&self, image: UploadedImage, organ: Organ) -> Result<Value, IdentifyError> {
        self.calls.lock().unwrap().push((
            image.file_name.clone(),
            image.content_type.clone(),
            organ,
            image.bytes.len(),
        ));
        if self.fail {
            return Err(IdentifyError::Status { status: 401, body: "bad key".into() });
        }
        Ok(json!({
            "query": { "organs": [organ.as_str()] },
            "results": [{
                "score": 0.91,
                "species": { "scientificNameWithoutAuthor": "Withania somnifera" }
            }],
            "remainingIdentificationRequests": 499
        }))
    }
}

struct EchoChat;

#[async_trait]
impl ChatResponder for EchoChat {
    fn name(&self) -> &'static str {
        "echo"
    }

    async fn reply(&self, herb: Option<&str>, question: &str) -> Result<String, ChatError> {
        Ok(format!("[{}] {}", herb.unwrap_or("-"), question))
    }
}

struct Harness {
    base: String,
    client: reqwest::Client,
    identifier: Arc<StubIdentifier>,
}

async fn spawn_with(config: PortalConfig, identifier: StubIdentifier) -> Harness {
    spawn_routed(config, identifier, build_router).await
}

async fn spawn_routed(
    config: PortalConfig,
    identifier: StubIdentifier,
    build: fn(AppState) -> axum::Router,
) -> Harness {
    let identifier = Arc::new(identifier);
    let quota = UpstreamQuota::new(config.identify_per_minute, config.chat_per_minute);
    let state = AppState::new(
        config,
        Ledger::seeded(),
        identifier.clone(),
        Arc::new(EchoChat),
        quota,
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build(state)).await.unwrap();
    });

    Harness {
        base: format!("http://{}", addr),
        client: reqwest::Client::new(),
        identifier,
    }
}

async fn spawn() -> Harness {
    spawn_with(PortalConfig::default(), StubIdentifier::default()).await
}

impl Harness {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let res = self.client.get(self.url(path)).send().await.unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }

    async fn post_json(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let res = self.client.post(self.url(path)).json(&body).send().await.unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }

    async fn identify(&self, form: Form) -> (StatusCode, Value) {
        let res = self
            .client
            .post(self.url("/api/identify"))
            .multipart(form)
            .send()
            .await
            .unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }
}

fn leaf_photo(len: usize) -> Part {
    Part::bytes(vec![0xAB; len])
        .file_name("leaf.jpg")
        .mime_str("image/jpeg")
        .unwrap()
}

// ── Pages & dashboards ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_health_and_landing_page() {
    let h = spawn().await;

    let health = h.client.get(h.url("/health")).send().await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(health.text().await.unwrap(), "OK");

    let page = h.client.get(h.url("/")).send().await.unwrap();
    assert_eq!(page.status(), StatusCode::OK);
    let html = page.text().await.unwrap();
    assert!(html.contains("Herb Traceability Portal"));
    assert!(html.contains("/api/chat/greeting"));
}

#[tokio::test]
async fn test_batches_listing() {
    let h = spawn().await;
    let (status, body) = h.get("/api/batches").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["batchId"], "ASH-2024-001");
    assert_eq!(body[0]["herbName"], "Ashwagandha");
    assert_eq!(body[0]["stages"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_lookup_trims_and_encodes() {
    let h = spawn().await;

    let (status, body) = h.post_json("/api/lookup", json!({ "batchId": "  ASH-2024-001 " })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["batchId"], "ASH-2024-001");
    assert_eq!(body["location"], "/transactions?batchId=ASH-2024-001");
    assert_eq!(body["known"], true);

    let (status, body) = h.post_json("/api/lookup", json!({ "batchId": "QR lot#9" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"], "/transactions?batchId=QR%20lot%239");
    assert_eq!(body["known"], false);
}

#[tokio::test]
async fn test_lookup_rejects_blank_id() {
    let h = spawn().await;

    let (status, body) = h.post_json("/api/lookup", json!({ "batchId": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Batch ID is required");

    let (status, _) = h.post_json("/api/lookup", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_transactions_timeline() {
    let h = spawn().await;

    let (status, body) = h.get("/api/transactions?batchId=ASH-2024-001").await;
    assert_eq!(status, StatusCode::OK);
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0]["name"], "Rajesh Kumar");
    assert_eq!(entries[0]["route"], "/farmer/farmer-001");
    assert_eq!(entries[3]["route"], "/manufacturer/manufacturer-001");
    assert_eq!(entries[1]["displayTime"], "20 January 2024, 02:15 PM UTC");
    assert!(body["summary"].as_str().unwrap().contains("4 blockchain transactions"));
}

#[tokio::test]
async fn test_transactions_default_and_unknown_batch() {
    let h = spawn().await;

    let (status, body) = h.get("/api/transactions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["batchId"], "ASH-2024-001");

    let (status, body) = h.get("/api/transactions?batchId=NOPE-1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Batch not found" }));
}

#[tokio::test]
async fn test_farmer_dashboard_with_map() {
    let h = spawn().await;

    let (status, body) = h.get("/api/farmer/farmer-001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile"]["name"], "Rajesh Kumar");
    assert_eq!(body["crop"]["variant"], "Withania Somnifera");
    assert!(body["map"]["embedUrl"].as_str().unwrap().contains("marker=10.8505,76.2711"));
    assert!(body["map"].get("staticImageUrl").is_none());

    let (status, body) = h.get("/api/farmer/farmer-404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Farmer not found");
}

#[tokio::test]
async fn test_farmer_map_uses_mapbox_token() {
    let config = PortalConfig {
        mapbox_token: Some("pk.demo".into()),
        ..PortalConfig::default()
    };
    let h = spawn_with(config, StubIdentifier::default()).await;

    let (_, body) = h.get("/api/farmer/farmer-001").await;
    assert!(body["map"]["staticImageUrl"].as_str().unwrap().ends_with("access_token=pk.demo"));
}

#[tokio::test]
async fn test_farmer_predict() {
    let h = spawn().await;

    let (status, body) = h.post_json("/api/farmer/farmer-001/predict", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prediction"], "Ashwagandha Detected ✅");

    let (status, _) = h.post_json("/api/farmer/nobody/predict", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_role_dashboards() {
    let h = spawn().await;

    let (status, body) = h.get("/api/collector/collector-001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["logistics"]["trackingId"], "TRK-ASH-20240120-001");

    let (status, body) = h.get("/api/distributor/distributor-001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile"]["gstNumber"], "27ABCDE1234F1Z5");
    assert_eq!(body["logistics"]["lastMilePartners"][0], "BlueDart");

    let (status, body) = h.get("/api/manufacturer/manufacturer-001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile"]["gmpCertified"], true);
    assert_eq!(body["qualityControl"]["testResults"]["potency"], "5.2% Withanolides");

    for (path, kind) in [
        ("/api/collector/x", "Collector"),
        ("/api/distributor/x", "Distributor"),
        ("/api/manufacturer/x", "Manufacturer"),
    ] {
        let (status, body) = h.get(path).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], format!("{} not found", kind));
    }
}

// ── Identification ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_identify_relays_upload() {
    let h = spawn().await;

    let form = Form::new().part("image", leaf_photo(2048)).text("organ", "Flower");
    let (status, body) = h.identify(form).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"][0]["species"]["scientificNameWithoutAuthor"], "Withania somnifera");
    assert_eq!(body["query"]["organs"][0], "flower");

    let calls = h.identifier.calls.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![("leaf.jpg".to_string(), Some("image/jpeg".to_string()), Organ::Flower, 2048)]
    );
}

#[tokio::test]
async fn test_identify_defaults_organ() {
    let config = PortalConfig {
        default_organ: Organ::Bark,
        ..PortalConfig::default()
    };
    let h = spawn_with(config, StubIdentifier::default()).await;

    let (status, _) = h.identify(Form::new().part("image", leaf_photo(16))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(h.identifier.calls.lock().unwrap()[0].2, Organ::Bark);
}

#[tokio::test]
async fn test_identify_without_file() {
    let h = spawn().await;
    let no_image = json!({ "error": "No image uploaded" });

    let (status, body) = h.identify(Form::new().text("organ", "leaf")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, no_image);

    let (status, body) = h.identify(Form::new().part("image", leaf_photo(0))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, no_image);

    let (status, body) = h.post_json("/api/identify", json!({ "image": "base64..." })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, no_image);

    let (status, body) = h.identify(Form::new().text("image", "not a file")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, no_image);

    assert!(h.identifier.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_identify_proxy_routes() {
    let h = spawn_routed(
        PortalConfig::default(),
        StubIdentifier::default(),
        build_identify_router,
    )
    .await;

    let health = h.client.get(h.url("/health")).send().await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(health.text().await.unwrap(), "OK");

    let (status, body) = h.identify(Form::new().part("image", leaf_photo(64))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"]["organs"][0], "leaf");
    assert_eq!(h.identifier.calls.lock().unwrap().len(), 1);

    for path in ["/", "/api/batches", "/api/transactions"] {
        let res = h.client.get(h.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{}", path);
    }
    let chat = h
        .client
        .post(h.url("/api/chat"))
        .json(&json!({ "message": "hello" }))
        .send()
        .await
        .unwrap();
    assert_eq!(chat.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_identify_rejects_unknown_organ() {
    let h = spawn().await;

    let form = Form::new().part("image", leaf_photo(16)).text("organ", "root");
    let (status, body) = h.identify(form).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unsupported organ");
}

#[tokio::test]
async fn test_identify_enforces_upload_limit() {
    let config = PortalConfig {
        max_upload_bytes: 1024,
        ..PortalConfig::default()
    };
    let h = spawn_with(config, StubIdentifier::default()).await;

    let (status, body) = h.identify(Form::new().part("image", leaf_photo(4096))).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].as_str().unwrap().contains("1024"));
}

#[tokio::test]
async fn test_identify_upstream_failure_is_server_error() {
    let identifier = StubIdentifier {
        fail: true,
        ..StubIdentifier::default()
    };
    let h = spawn_with(PortalConfig::default(), identifier).await;

    let (status, body) = h.identify(Form::new().part("image", leaf_photo(16))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Server error" }));
}

#[tokio::test]
async fn test_identify_quota() {
    let config = PortalConfig {
        identify_per_minute: Some(1),
        ..PortalConfig::default()
    };
    let h = spawn_with(config, StubIdentifier::default()).await;

    let (first, _) = h.identify(Form::new().part("image", leaf_photo(16))).await;
    let (second, body) = h.identify(Form::new().part("image", leaf_photo(16))).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "Too many requests");
    assert_eq!(h.identifier.calls.lock().unwrap().len(), 1);
}

// ── Chat ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_chat_greeting() {
    let h = spawn().await;

    let (status, body) = h.get("/api/chat/greeting").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sender"], "bot");
    assert!(body["text"].as_str().unwrap().starts_with("Hello! I'm your Ayurvedic herb assistant"));

    let labels: Vec<_> = body["suggestions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["label"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(labels, vec!["Ashwagandha", "Quality", "Storage"]);
}

#[tokio::test]
async fn test_chat_reply() {
    let h = spawn().await;

    let (status, body) = h
        .post_json("/api/chat", json!({ "message": " Dosage? ", "herbName": "Brahmi" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sender"], "bot");
    assert_eq!(body["text"], "[Brahmi] Dosage?");
    assert!(uuid::Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());
    assert!(body["timestamp"].as_str().is_some());

    let (_, body) = h.post_json("/api/chat", json!({ "message": "hi", "herbName": "" })).await;
    assert_eq!(body["text"], "[-] hi");
}

#[tokio::test]
async fn test_chat_rejects_blank_message() {
    let h = spawn().await;

    let (status, body) = h.post_json("/api/chat", json!({ "message": "  " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Message is required");

    let (status, _) = h.post_json("/api/chat", json!({ "text": "wrong field" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_chat_quota_falls_back() {
    let config = PortalConfig {
        chat_per_minute: Some(1),
        ..PortalConfig::default()
    };
    let h = spawn_with(config, StubIdentifier::default()).await;

    let (_, first) = h.post_json("/api/chat", json!({ "message": "one" })).await;
    let (status, second) = h.post_json("/api/chat", json!({ "message": "two" })).await;

    assert_eq!(first["text"], "[-] one");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["text"], CONNECTION_FALLBACK);
}

// ── CORS ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let h = spawn().await;

    let res = h
        .client
        .get(h.url("/api/batches"))
        .header("Origin", "http://localhost:3000")
        .send()
        .await
        .unwrap();
    assert_eq!(
        res.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:3000"
    );
}

#[tokio::test]
async fn test_cors_disabled() {
    let config = PortalConfig {
        cors_origin: None,
        ..PortalConfig::default()
    };
    let h = spawn_with(config, StubIdentifier::default()).await;

    let res = h
        .client
        .get(h.url("/api/batches"))
        .header("Origin", "http://localhost:3000")
        .send()
        .await
        .unwrap();
    assert!(res.headers().get("access-control-allow-origin").is_none());
}
