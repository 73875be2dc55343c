use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use super::payload::SyncPayload;

/// Операции с контактами CRM, нужные для синхронизации
#[async_trait]
pub trait CrmContactsApi: Send + Sync {
    /// Remote id of the contact whose `external_id` equals the given value.
    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<String>>;

    async fn create_contact(&self, payload: &SyncPayload) -> Result<()>;

    async fn update_contact(&self, contact_id: &str, payload: &SyncPayload) -> Result<()>;
}

/// HTTP-клиент для работы с CRM contacts API
pub struct CrmApiClient {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl CrmApiClient {
    pub fn new(base_url: &str, access_token: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(&self.access_token)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn send_contact(&self, method: Method, url: &str, payload: &SyncPayload) -> Result<()> {
        tracing::debug!("{} {} (external_id={})", method, url, payload.external_id);

        let response = self
            .request(method.clone(), url)
            .json(payload)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("CRM request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("CRM {} {} failed with status {}: {}", method, url, status, body);
            anyhow::bail!("{}", remote_error_message(status, &body));
        }

        Ok(())
    }
}

#[async_trait]
impl CrmContactsApi for CrmApiClient {
    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<String>> {
        let url = format!("{}/contacts/search", self.base_url);
        let body = json!({
            "query": {
                "field": "external_id",
                "operator": "=",
                "value": external_id
            }
        });

        let response = self
            .request(Method::POST, &url)
            .json(&body)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Error searching for ID: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("CRM contact search failed with status {}: {}", status, body);
            anyhow::bail!(
                "Error searching for external_id {}: {}",
                external_id,
                remote_error_message(status, &body)
            );
        }

        let parsed: ContactSearchResponse = response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to parse CRM search response: {}", e))?;

        Ok(parsed.data.into_iter().next().and_then(ContactRef::into_id))
    }

    async fn create_contact(&self, payload: &SyncPayload) -> Result<()> {
        let url = format!("{}/contacts", self.base_url);
        self.send_contact(Method::POST, &url, payload).await
    }

    async fn update_contact(&self, contact_id: &str, payload: &SyncPayload) -> Result<()> {
        let url = format!(
            "{}/contacts/{}",
            self.base_url,
            urlencoding::encode(contact_id)
        );
        self.send_contact(Method::PUT, &url, payload).await
    }
}

// ============================================================================
// Response structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct ContactSearchResponse {
    #[serde(default)]
    data: Vec<ContactRef>,
}

#[derive(Debug, Deserialize)]
struct ContactRef {
    #[serde(default)]
    id: Value,
}

impl ContactRef {
    fn into_id(self) -> Option<String> {
        match self.id {
            Value::String(id) if !id.is_empty() => Some(id),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }
}

/// Текст ошибки из ответа CRM
///
/// Takes `message`, then `errors[0].message`, then the status reason phrase.
fn remote_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value.get("message").and_then(Value::as_str) {
            return message.to_string();
        }
        if let Some(message) = value
            .get("errors")
            .and_then(Value::as_array)
            .and_then(|errors| errors.first())
            .and_then(|error| error.get("message"))
            .and_then(Value::as_str)
        {
            return message.to_string();
        }
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.to_string())
}
