//! HTTP transport to the downstream Oracle execution API

use crate::error::TransportError;
use crate::models::DownstreamResponse;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

/// Seam between the executor and the downstream service.
///
/// `Ok` means an HTTP response arrived, whatever its status. `Err` is reserved
/// for failures that produced no response at all.
#[async_trait]
pub trait OracleTransport: Send + Sync {
    async fn post(&self, url: &str, body: Bytes) -> Result<DownstreamResponse, TransportError>;
}

/// reqwest-backed transport sending JSON bodies with a bearer token
pub struct ReqwestTransport {
    client: Client,
    bearer_token: String,
}

impl ReqwestTransport {
    /// Build a transport whose every request is bounded by `timeout`.
    pub fn new(bearer_token: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::from)?;
        Ok(Self {
            client,
            bearer_token: bearer_token.into(),
        })
    }
}

#[async_trait]
impl OracleTransport for ReqwestTransport {
    async fn post(&self, url: &str, body: Bytes) -> Result<DownstreamResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(&self.bearer_token)
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        let body = response.text().await?;

        Ok(DownstreamResponse {
            status,
            body,
            content_type,
        })
    }
}
