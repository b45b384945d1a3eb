//! Reqwest-based transport for the prediction endpoint.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::SubmitError;

/// Sends one serialized payload and returns the parsed JSON body.
///
/// Implementations must report a non-2xx status as `SubmitError::Http`
/// without reading the body, connection problems as `Transport`, and a 2xx
/// body that is not JSON as `Decode`.
#[async_trait]
pub trait PredictionTransport: Send + Sync {
    async fn post_json(&self, body: String) -> Result<Value, SubmitError>;
}

#[derive(Debug, Clone)]
pub struct PredictClient {
    http: reqwest::Client,
    url: String,
}

impl PredictClient {
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let url = cfg.endpoint_url()?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = cfg.request_timeout()? {
            builder = builder.timeout(timeout);
        }
        Ok(Self { http: builder.build()?, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PredictionTransport for PredictClient {
    async fn post_json(&self, body: String) -> Result<Value, SubmitError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        debug!(url = %self.url, body = %body, "posting prediction request");
        let resp = self
            .http
            .post(&self.url)
            .headers(headers)
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SubmitError::Http { status });
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice::<Value>(&bytes).map_err(|e| SubmitError::Decode { message: e.to_string() })
    }
}
