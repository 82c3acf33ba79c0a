//! [`DesignSource`] over the design service's JSON API.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{DesignSource, GenerateRequest, SaveReceipt, TemplateInfo, decode_design_envelope, envelope_field};
use crate::design::DesignDescription;
use crate::error::SignboardError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Talks to `/api/templates`, `/api/business-types`,
/// `/api/generate-design` and `/api/save-design` under a base URL.
#[derive(Debug, Clone)]
pub struct HttpDesignSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDesignSource {
    pub fn new(base_url: &str) -> Result<Self, SignboardError> {
        let client = reqwest::Client::builder()
            .user_agent("signboard/0.1")
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SignboardError::Collaborator(format!("HTTP client error: {}", e)))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    /// Read a JSON envelope. Error statuses still carry an envelope, so
    /// the body is parsed before the HTTP status is considered.
    async fn read(&self, path: &str, response: reqwest::Response) -> Result<Value, SignboardError> {
        let status = response.status();
        let body: Value = response.json().await.map_err(|e| {
            SignboardError::Collaborator(format!("{}: unreadable response (HTTP {}): {}", path, status, e))
        })?;
        if !status.is_success() && body.get("status").is_none() {
            return Err(SignboardError::Collaborator(format!("{}: HTTP {}", path, status)));
        }
        Ok(body)
    }

    async fn get(&self, path: &str) -> Result<Value, SignboardError> {
        tracing::debug!(path, "GET");
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| SignboardError::Collaborator(format!("{}: {}", path, e)))?;
        self.read(path, response).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, SignboardError> {
        tracing::debug!(path, "POST");
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| SignboardError::Collaborator(format!("{}: {}", path, e)))?;
        self.read(path, response).await
    }
}

#[async_trait]
impl DesignSource for HttpDesignSource {
    async fn templates(&self) -> Result<BTreeMap<String, TemplateInfo>, SignboardError> {
        envelope_field(self.get("templates").await?, "templates")
    }

    async fn business_types(&self) -> Result<Vec<String>, SignboardError> {
        envelope_field(self.get("business-types").await?, "types")
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<DesignDescription, SignboardError> {
        let body = serde_json::to_value(request)?;
        let design = decode_design_envelope(self.post("generate-design", &body).await?)?;
        tracing::info!(shop = %design.shop_name, template = ?design.template_id, "design generated");
        Ok(design)
    }

    async fn save(&self, design: &DesignDescription) -> Result<SaveReceipt, SignboardError> {
        let body = self.post("save-design", &json!({ "design": design })).await?;
        super::check_status(&body)?;
        let receipt: SaveReceipt = serde_json::from_value(body)
            .map_err(|e| SignboardError::Collaborator(format!("malformed save response: {}", e)))?;
        tracing::info!(design_id = ?receipt.design_id, "design saved");
        Ok(receipt)
    }
}
