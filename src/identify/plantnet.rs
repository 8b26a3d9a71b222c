//! PlantNet Client
//!
//! Posts the photo as multipart `images` + `organs` to the PlantNet
//! `identify` endpoint with the key in the `api-key` query parameter.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::{IdentifyError, Organ, SpeciesIdentifier, UploadedImage};
use crate::utils::truncate;

pub struct PlantNetClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl PlantNetClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("herb_trace/", env!("CARGO_PKG_VERSION")))
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            api_key,
        }
    }

    fn image_part(image: UploadedImage) -> Result<Part, IdentifyError> {
        let part = Part::bytes(image.bytes).file_name(image.file_name);
        match image.content_type {
            Some(mime) => Ok(part.mime_str(&mime)?),
            None => Ok(part),
        }
    }
}

#[async_trait]
impl SpeciesIdentifier for PlantNetClient {
    async fn identify(&self, image: UploadedImage, organ: Organ) -> Result<Value, IdentifyError> {
        let api_key = self.api_key.as_deref().ok_or(IdentifyError::NotConfigured)?;

        debug!(
            "Relaying '{}' ({} bytes, organ={}) to PlantNet",
            image.file_name,
            image.bytes.len(),
            organ
        );

        let form = Form::new()
            .part("images", Self::image_part(image)?)
            .text("organs", organ.as_str());

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("api-key", api_key)])
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IdentifyError::Status {
                status: status.as_u16(),
                body: truncate(&body, 200),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}
