//! Plant Identification
//!
//! Relays an uploaded herb photo to a species-identification service and
//! hands the service's JSON back untouched.

mod plantnet;

pub use plantnet::PlantNetClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Plant organ visible in the photo, as understood by the identification API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Organ {
    #[default]
    Leaf,
    Flower,
    Fruit,
    Bark,
    Habit,
    Other,
    Auto,
}

impl Organ {
    pub fn as_str(&self) -> &'static str {
        match self {
            Organ::Leaf => "leaf",
            Organ::Flower => "flower",
            Organ::Fruit => "fruit",
            Organ::Bark => "bark",
            Organ::Habit => "habit",
            Organ::Other => "other",
            Organ::Auto => "auto",
        }
    }
}

impl fmt::Display for Organ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported organ '{0}'")]
pub struct UnknownOrgan(pub String);

impl FromStr for Organ {
    type Err = UnknownOrgan;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "leaf" => Ok(Organ::Leaf),
            "flower" => Ok(Organ::Flower),
            "fruit" => Ok(Organ::Fruit),
            "bark" => Ok(Organ::Bark),
            "habit" => Ok(Organ::Habit),
            "other" => Ok(Organ::Other),
            "auto" => Ok(Organ::Auto),
            other => Err(UnknownOrgan(other.to_string())),
        }
    }
}

/// An image received from the browser, held in memory for a single relay
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum IdentifyError {
    #[error("identification API key is not configured")]
    NotConfigured,

    #[error("identification service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("identification request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Anything that can name a species from a photo
#[async_trait]
pub trait SpeciesIdentifier: Send + Sync {
    /// Identify the plant in `image`. The returned JSON is the service's own body.
    async fn identify(&self, image: UploadedImage, organ: Organ) -> Result<Value, IdentifyError>;
}
