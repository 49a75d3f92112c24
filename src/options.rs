use crate::error::ReportError;
use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_MAX_FILE_SIZE_MB: f64 = 10.0;
pub const DEFAULT_CONTENT_LIMIT: usize = 5000;
pub const DEFAULT_ENDPOINT: &str = "https://api.deepseek.com/v1/analyse";
pub const API_KEY_ENV: &str = "DEEPSEEK_API_KEY";
pub const ENDPOINT_ENV: &str = "DEEPSEEK_API_URL";

/// Accepts a finite, non-negative ceiling in megabytes.
pub fn validate_size_ceiling(mb: f64) -> Result<f64, ReportError> {
    if mb.is_finite() && mb >= 0.0 {
        Ok(mb)
    } else {
        Err(ReportError::InvalidSizeCeiling(mb))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOptions {
    pub root: PathBuf,
    /// Files larger than this many megabytes are skipped entirely.
    pub max_file_size_mb: f64,
    /// Maximum number of bytes sampled from a text file.
    pub content_limit: usize,
    pub max_depth: Option<usize>,
    pub follow_links: bool,
    pub ignore_patterns: Vec<String>,
    pub sort_by_name: bool,
}
impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
            content_limit: DEFAULT_CONTENT_LIMIT,
            max_depth: None,
            follow_links: false,
            ignore_patterns: Vec::new(),
            sort_by_name: false,
        }
    }
}
#[derive(Debug, Default)]
pub struct ReportBuilder {
    options: ReportOptions,
}
impl ReportBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: ReportOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn max_file_size_mb(mut self, mb: f64) -> Self {
        self.options.max_file_size_mb = mb;
        self
    }
    pub fn content_limit(mut self, bytes: usize) -> Self {
        self.options.content_limit = bytes;
        self
    }
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.options.max_depth = Some(depth);
        self
    }
    pub fn no_limit_depth(mut self) -> Self {
        self.options.max_depth = None;
        self
    }
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.options.follow_links = yes;
        self
    }
    pub fn ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.options.ignore_patterns = patterns;
        self
    }
    pub fn sort_by_name(mut self, yes: bool) -> Self {
        self.options.sort_by_name = yes;
        self
    }
    pub fn build(self) -> ReportOptions {
        self.options
    }
}

/// Remote analysis service settings, validated once at startup.
#[derive(Clone)]
pub struct ReportConfig {
    endpoint: String,
    authorization: HeaderValue,
}
impl ReportConfig {
    /// Fails with [`ReportError::MissingApiKey`] on a blank key,
    /// [`ReportError::InvalidApiKey`] on a key that cannot form an
    /// `Authorization` header and [`ReportError::InvalidEndpoint`] on a URL
    /// that does not parse.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Result<Self, ReportError> {
        let endpoint = endpoint.into();
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ReportError::MissingApiKey);
        }
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| ReportError::InvalidApiKey)?;
        authorization.set_sensitive(true);
        reqwest::Url::parse(&endpoint)
            .map_err(|e| ReportError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;
        Ok(Self {
            endpoint,
            authorization,
        })
    }
    /// Reads `DEEPSEEK_API_KEY` and `DEEPSEEK_API_URL`, falling back to
    /// [`DEFAULT_ENDPOINT`] for the latter.
    pub fn from_env() -> Result<Self, ReportError> {
        let endpoint = std::env::var(ENDPOINT_ENV).unwrap_or_else(|_| DEFAULT_ENDPOINT.into());
        let api_key = std::env::var(API_KEY_ENV).unwrap_or_default();
        Self::new(endpoint, api_key)
    }
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
    pub(crate) fn authorization(&self) -> &HeaderValue {
        &self.authorization
    }
}
impl std::fmt::Debug for ReportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportConfig")
            .field("endpoint", &self.endpoint)
            .field("authorization", &"<redacted>")
            .finish()
    }
}
