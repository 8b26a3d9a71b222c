//! Portal Configuration
//!
//! Reads `.env` plus process variables into a single `PortalConfig`.
//! `from_lookup` takes any key lookup so tests never touch the real environment.

use anyhow::{bail, Context, Result};
use axum::http::HeaderValue;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::identify::Organ;

pub const DEFAULT_PLANTNET_URL: &str = "https://my-api.plantnet.org/v2/identify/all";
pub const DEFAULT_GEMINI_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Which responder backs `/api/chat`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatBackend {
    Gemini,
    Keyword,
}

impl FromStr for ChatBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(ChatBackend::Gemini),
            "keyword" | "dummy" => Ok(ChatBackend::Keyword),
            other => bail!("Unknown chat backend '{}': expected 'gemini' or 'keyword'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Bind address of the full portal
    pub portal_addr: String,
    /// Bind address of the standalone identify proxy
    pub identify_addr: String,
    /// Browser origin allowed through CORS. `None` disables the layer.
    pub cors_origin: Option<String>,
    pub plantnet_url: String,
    pub plantnet_api_key: Option<String>,
    pub default_organ: Organ,
    pub gemini_url: String,
    pub gemini_api_key: Option<String>,
    pub chat_backend: ChatBackend,
    pub chat_cache: bool,
    pub mapbox_token: Option<String>,
    pub max_upload_bytes: usize,
    pub upstream_timeout: Duration,
    pub identify_per_minute: Option<u32>,
    pub chat_per_minute: Option<u32>,
    pub ledger_path: Option<PathBuf>,
    pub otlp_enabled: bool,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            portal_addr: "0.0.0.0:3000".to_string(),
            identify_addr: "0.0.0.0:5000".to_string(),
            cors_origin: Some("http://localhost:3000".to_string()),
            plantnet_url: DEFAULT_PLANTNET_URL.to_string(),
            plantnet_api_key: None,
            default_organ: Organ::Leaf,
            gemini_url: DEFAULT_GEMINI_URL.to_string(),
            gemini_api_key: None,
            chat_backend: ChatBackend::Keyword,
            chat_cache: false,
            mapbox_token: None,
            max_upload_bytes: 10 * 1024 * 1024,
            upstream_timeout: Duration::from_secs(30),
            identify_per_minute: None,
            chat_per_minute: None,
            ledger_path: None,
            otlp_enabled: false,
        }
    }
}

impl PortalConfig {
    /// Load `.env` (if present) and read the process environment
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        // Blank values count as unset.
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let cors_origin = match lookup("HERB_CORS_ORIGIN") {
            Some(origin) if origin.trim().is_empty() => None,
            Some(origin) => Some(origin.trim().to_string()),
            None => defaults.cors_origin,
        };
        if let Some(ref origin) = cors_origin {
            HeaderValue::from_str(origin).with_context(|| {
                format!("HERB_CORS_ORIGIN '{}' is not a valid header value", origin)
            })?;
        }

        let default_organ = match get("PLANTNET_DEFAULT_ORGAN") {
            Some(raw) => raw.parse::<Organ>().map_err(|_| {
                anyhow::anyhow!("PLANTNET_DEFAULT_ORGAN '{}' is not a supported organ", raw)
            })?,
            None => defaults.default_organ,
        };

        let gemini_api_key = get("GEMINI_API_KEY");
        let chat_backend = match get("HERB_CHAT_BACKEND") {
            Some(raw) => raw.parse::<ChatBackend>()?,
            None if gemini_api_key.is_some() => ChatBackend::Gemini,
            None => ChatBackend::Keyword,
        };
        if chat_backend == ChatBackend::Gemini && gemini_api_key.is_none() {
            bail!("HERB_CHAT_BACKEND=gemini requires GEMINI_API_KEY");
        }

        Ok(Self {
            portal_addr: get("HERB_PORTAL_ADDR").unwrap_or(defaults.portal_addr),
            identify_addr: get("HERB_IDENTIFY_ADDR").unwrap_or(defaults.identify_addr),
            cors_origin,
            plantnet_url: get("PLANTNET_API_URL").unwrap_or(defaults.plantnet_url),
            plantnet_api_key: get("PLANTNET_API_KEY"),
            default_organ,
            gemini_url: get("GEMINI_API_URL").unwrap_or(defaults.gemini_url),
            gemini_api_key,
            chat_backend,
            chat_cache: parse_or(&get, "HERB_CHAT_CACHE", defaults.chat_cache)?,
            mapbox_token: get("MAPBOX_ACCESS_TOKEN"),
            max_upload_bytes: parse_or(&get, "HERB_MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            upstream_timeout: Duration::from_secs(parse_or(
                &get,
                "HERB_UPSTREAM_TIMEOUT_SECS",
                defaults.upstream_timeout.as_secs(),
            )?),
            identify_per_minute: parse_opt(&get, "HERB_IDENTIFY_PER_MINUTE")?,
            chat_per_minute: parse_opt(&get, "HERB_CHAT_PER_MINUTE")?,
            ledger_path: get("HERB_LEDGER_PATH").map(PathBuf::from),
            otlp_enabled: get("OTEL_EXPORTER_OTLP_ENDPOINT").is_some(),
        })
    }
}

fn parse_opt<T, G>(get: &G, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    get(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| anyhow::anyhow!("{} has invalid value '{}': {}", key, raw, e))
        })
        .transpose()
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    Ok(parse_opt(get, key)?.unwrap_or(default))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = PortalConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.identify_addr, "0.0.0.0:5000");
        assert_eq!(config.cors_origin.as_deref(), Some("http://localhost:3000"));
        assert_eq!(config.chat_backend, ChatBackend::Keyword);
        assert_eq!(config.default_organ, Organ::Leaf);
        assert_eq!(config.plantnet_url, DEFAULT_PLANTNET_URL);
        assert!(config.plantnet_api_key.is_none());
        assert!(config.identify_per_minute.is_none());
        assert!(!config.otlp_enabled);
    }

    #[test]
    fn test_gemini_selected_when_key_present() {
        let config = PortalConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "k")])).unwrap();
        assert_eq!(config.chat_backend, ChatBackend::Gemini);

        let forced = PortalConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("HERB_CHAT_BACKEND", "keyword"),
        ]))
        .unwrap();
        assert_eq!(forced.chat_backend, ChatBackend::Keyword);
    }

    #[test]
    fn test_gemini_without_key_is_rejected() {
        let err =
            PortalConfig::from_lookup(lookup(&[("HERB_CHAT_BACKEND", "gemini")])).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_numeric_and_organ_overrides() {
        let config = PortalConfig::from_lookup(lookup(&[
            ("HERB_MAX_UPLOAD_BYTES", "2048"),
            ("HERB_UPSTREAM_TIMEOUT_SECS", "5"),
            ("HERB_IDENTIFY_PER_MINUTE", "12"),
            ("PLANTNET_DEFAULT_ORGAN", "Flower"),
            ("HERB_CHAT_CACHE", "true"),
        ]))
        .unwrap();
        assert_eq!(config.max_upload_bytes, 2048);
        assert_eq!(config.upstream_timeout, Duration::from_secs(5));
        assert_eq!(config.identify_per_minute, Some(12));
        assert_eq!(config.default_organ, Organ::Flower);
        assert!(config.chat_cache);
    }

    #[test]
    fn test_invalid_values_fail_startup() {
        assert!(PortalConfig::from_lookup(lookup(&[("HERB_MAX_UPLOAD_BYTES", "lots")])).is_err());
        assert!(PortalConfig::from_lookup(lookup(&[("PLANTNET_DEFAULT_ORGAN", "root")])).is_err());
        assert!(PortalConfig::from_lookup(lookup(&[("HERB_CHAT_BACKEND", "oracle")])).is_err());
    }

    #[test]
    fn test_blank_cors_origin_disables_cors() {
        let config = PortalConfig::from_lookup(lookup(&[("HERB_CORS_ORIGIN", "")])).unwrap();
        assert!(config.cors_origin.is_none());
    }
}
