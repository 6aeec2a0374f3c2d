//! reqwest-backed implementation of the bundle client capability.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{header, Client, Response};
use serde_json::json;

use super::{BundleClient, ClientError};
use crate::bundle::{Bundle, BundleDetail, BundleList, BundleState};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error bodies are truncated to this many characters before being attached
/// to a [`ClientError::Status`].
const MAX_ERROR_BODY: usize = 200;

// ---------------------------------------------------------------------------
// HttpBundleClient
// ---------------------------------------------------------------------------

pub struct HttpBundleClient {
    http: Client,
    base_url: String,
}

impl HttpBundleClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    /// Map a non-success response to [`ClientError::Status`], carrying a
    /// truncated response body as the message.
    async fn error_for_status(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message: String = response
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(MAX_ERROR_BODY)
            .collect();
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl BundleClient for HttpBundleClient {
    async fn list_scheduled(
        &self,
        auth_token: &str,
        not_after: DateTime<Utc>,
    ) -> Result<BundleList, ClientError> {
        let response = self
            .http
            .get(format!("{}/bundles", self.base_url))
            .query(&[(
                "publish_date",
                not_after.to_rfc3339_opts(SecondsFormat::Secs, true),
            )])
            .bearer_auth(auth_token)
            .send()
            .await?;
        let response = Self::error_for_status(response).await?;
        Ok(response.json().await?)
    }

    async fn fetch_bundle(&self, auth_token: &str, id: &str) -> Result<BundleDetail, ClientError> {
        let response = self
            .http
            .get(format!("{}/bundles/{id}", self.base_url))
            .bearer_auth(auth_token)
            .send()
            .await?;
        let response = Self::error_for_status(response).await?;

        let etag = response
            .headers()
            .get(header::ETAG)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.bytes().await?.to_vec();

        Ok(BundleDetail { body, etag })
    }

    async fn update_state(
        &self,
        auth_token: &str,
        id: &str,
        if_match: &str,
        state: BundleState,
    ) -> Result<Bundle, ClientError> {
        let response = self
            .http
            .put(format!("{}/bundles/{id}/state", self.base_url))
            .bearer_auth(auth_token)
            .header(header::IF_MATCH, if_match)
            .json(&json!({ "state": state }))
            .send()
            .await?;
        let response = Self::error_for_status(response).await?;
        Ok(response.json().await?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
