use crate::config::AirtableConfig;
use crate::domain::model::RecordPatch;
use crate::domain::ports::RecordWriter;
use crate::utils::error::{RelayError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// Airtable "update record" client for a single base/table.
#[derive(Debug, Clone)]
pub struct AirtableClient {
    client: Client,
    table_url: String,
    access_token: String,
}

impl AirtableClient {
    pub fn new(config: &AirtableConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &AirtableConfig) -> Self {
        Self {
            client,
            table_url: config.table_url(),
            access_token: config.access_token.clone(),
        }
    }

    pub fn record_url(&self, row_id: &str) -> String {
        format!("{}/{}", self.table_url, urlencoding::encode(row_id))
    }
}

#[async_trait]
impl RecordWriter for AirtableClient {
    async fn patch_record(&self, row_id: &str, patch: &RecordPatch) -> Result<Value> {
        let url = self.record_url(row_id);
        tracing::debug!("PATCH {}", url);

        let response = self
            .client
            .patch(&url)
            .bearer_auth(&self.access_token)
            .json(patch)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("Airtable response status: {}", status);

        if !status.is_success() {
            return Err(RelayError::RemoteRejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}
