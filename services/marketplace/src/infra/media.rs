use std::sync::Arc;

use anyhow::Context as _;
use serde::Deserialize;
use serde_json::json;
use sha2::{Digest, Sha256};

use crate::domain::repository::MediaStore;
use crate::domain::types::PropertyImage;
use crate::error::MarketplaceError;

/// Credentials and endpoint of the Cloudinary-compatible image store.
pub struct MediaConfig {
    pub base_url: String,
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

/// Signed REST client for the image store.
#[derive(Clone)]
pub struct HttpMediaStore {
    pub client: reqwest::Client,
    pub config: Arc<MediaConfig>,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

/// `hex(sha256("k1=v1&k2=v2" + secret))` over params sorted by key.
pub fn sign(params: &[(&str, &str)], secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by_key(|(k, _)| *k);
    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

impl HttpMediaStore {
    pub fn new(client: reqwest::Client, config: MediaConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/{}/image/{action}",
            self.config.base_url.trim_end_matches('/'),
            self.config.cloud_name
        )
    }

    async fn post(
        &self,
        action: &str,
        body: serde_json::Value,
    ) -> anyhow::Result<reqwest::Response> {
        let resp = self
            .client
            .post(self.endpoint(action))
            .json(&body)
            .send()
            .await
            .with_context(|| format!("image store {action} request"))?
            .error_for_status()
            .with_context(|| format!("image store {action} status"))?;
        Ok(resp)
    }
}

impl MediaStore for HttpMediaStore {
    async fn upload(
        &self,
        data_uri: &str,
        folder: &str,
    ) -> Result<PropertyImage, MarketplaceError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign(
            &[("folder", folder), ("timestamp", &timestamp)],
            &self.config.api_secret,
        );
        let body = json!({
            "file": data_uri,
            "folder": folder,
            "timestamp": timestamp,
            "api_key": self.config.api_key,
            "signature": signature,
            "signature_algorithm": "sha256",
        });

        let uploaded: UploadResponse = async {
            self.post("upload", body)
                .await?
                .json()
                .await
                .context("decode image store upload response")
        }
        .await
        .map_err(MarketplaceError::Media)?;

        tracing::debug!(public_id = %uploaded.public_id, folder, "image uploaded");
        Ok(PropertyImage {
            url: uploaded.secure_url,
            public_id: Some(uploaded.public_id),
        })
    }

    async fn destroy(&self, public_id: &str) -> Result<(), MarketplaceError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign(
            &[("public_id", public_id), ("timestamp", &timestamp)],
            &self.config.api_secret,
        );
        let body = json!({
            "public_id": public_id,
            "timestamp": timestamp,
            "api_key": self.config.api_key,
            "signature": signature,
            "signature_algorithm": "sha256",
        });
        self.post("destroy", body)
            .await
            .map_err(MarketplaceError::Media)?;
        tracing::debug!(public_id, "image destroyed");
        Ok(())
    }
}
