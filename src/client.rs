//! Blocking HTTP client that submits a [`FolderRecord`] to the analysis endpoint.

use crate::error::ReportError;
use crate::options::ReportConfig;
use crate::types::FolderRecord;
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
#[cfg(feature = "logging")]
use tracing;

/// Holds a reqwest blocking client plus the endpoint and bearer credential.
#[derive(Debug, Clone)]
pub struct ReportClient {
    client: Client,
    config: ReportConfig,
}

impl ReportClient {
    pub fn new(config: ReportConfig) -> Result<Self, ReportError> {
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }

    /// Uses a preconfigured client, e.g. one with custom proxy or TLS settings.
    pub fn with_client(config: ReportConfig, client: Client) -> Self {
        Self { client, config }
    }

    pub fn endpoint(&self) -> &str {
        self.config.endpoint()
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.config.authorization().clone());
        headers
    }

    /// Performs a single POST of `record` and parses the reply as JSON.
    ///
    /// Transport failures are returned as [`ReportError::Transport`]. Any reply is
    /// accepted regardless of status; a body that is not valid JSON yields `Ok(None)`.
    pub fn send(&self, record: &FolderRecord) -> Result<Option<Value>, ReportError> {
        let body = serde_json::to_vec(record)?;
        #[cfg(feature = "logging")]
        tracing::debug!(
            "POST {} ({} files, {} bytes)",
            self.endpoint(),
            record.total_files,
            body.len()
        );
        let res = self
            .client
            .post(self.endpoint())
            .headers(self.headers())
            .body(body)
            .send()?;
        #[cfg(feature = "logging")]
        tracing::debug!("Response status: {}", res.status());
        let text = res.text()?;
        Ok(parse_response(&text))
    }
}

pub(crate) fn parse_response(body: &str) -> Option<Value> {
    match serde_json::from_str(body) {
        Ok(value) => Some(value),
        Err(_e) => {
            #[cfg(feature = "logging")]
            tracing::debug!("Response body is not valid JSON: {}", _e);
            None
        }
    }
}
