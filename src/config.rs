//! Configuration for the document submission workflow.
//!
//! All behaviour is controlled through [`WorkflowConfig`], built via its
//! [`WorkflowConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share a config across invocations and to see in one place what
//! a caller has overridden.
//!
//! # The API key is injected, never compiled in
//!
//! The credential authenticating against the inference endpoint comes from
//! [`WorkflowConfigBuilder::api_key`] or, failing that, the `GEMINI_API_KEY`
//! environment variable at submission time. There is no default and the key
//! is redacted from `Debug` output.

use crate::error::WorkflowError;
use crate::observer::Observer;
use std::fmt;
use std::time::Duration;

/// Default inference endpoint base (Google Generative Language API).
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model the payload is submitted to.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Environment variable consulted when no explicit API key is configured.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Configuration for one or more workflow invocations.
///
/// Built via [`WorkflowConfig::builder()`] or [`WorkflowConfig::default()`].
///
/// # Example
/// ```rust
/// use doclens::WorkflowConfig;
///
/// let config = WorkflowConfig::builder()
///     .api_key("test-key")
///     .model("gemini-1.5-flash")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct WorkflowConfig {
    /// Endpoint base URL, without a trailing slash. Default:
    /// [`DEFAULT_ENDPOINT`]. Overridable for tests and self-hosted proxies.
    pub endpoint: String,

    /// Model identifier appended to the endpoint path. Default:
    /// [`DEFAULT_MODEL`].
    pub model: String,

    /// Static API credential, appended as a query parameter. If `None`, the
    /// `GEMINI_API_KEY` environment variable is read at submission time.
    pub api_key: Option<String>,

    /// Optional instruction text sent as a leading part before the document.
    /// Default: `None` — the request carries only the `inlineData` part.
    pub prompt: Option<String>,

    /// Optional per-request timeout. Default: `None` — an unanswered request
    /// stays outstanding until the transport gives up on its own.
    pub request_timeout: Option<Duration>,

    /// Observer receiving busy/phase/file-info events. Default: none.
    pub observer: Option<Observer>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            prompt: None,
            request_timeout: None,
            observer: None,
        }
    }
}

impl fmt::Debug for WorkflowConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkflowConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("prompt", &self.prompt)
            .field("request_timeout", &self.request_timeout)
            .field("observer", &self.observer.as_ref().map(|_| "<dyn WorkflowObserver>"))
            .finish()
    }
}

impl WorkflowConfig {
    /// Create a new builder for `WorkflowConfig`.
    pub fn builder() -> WorkflowConfigBuilder {
        WorkflowConfigBuilder {
            config: Self::default(),
        }
    }

    /// Resolve the API key: explicit config first, environment second.
    pub(crate) fn resolve_api_key(&self) -> Result<String, WorkflowError> {
        if let Some(ref key) = self.api_key {
            return Ok(key.clone());
        }
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.is_empty() => Ok(key),
            _ => Err(WorkflowError::ApiKeyMissing),
        }
    }
}

/// Builder for [`WorkflowConfig`].
#[derive(Debug)]
pub struct WorkflowConfigBuilder {
    config: WorkflowConfig,
}

impl WorkflowConfigBuilder {
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.prompt = Some(prompt.into());
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = Some(timeout);
        self
    }

    pub fn observer(mut self, observer: Observer) -> Self {
        self.config.observer = Some(observer);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<WorkflowConfig, WorkflowError> {
        let c = &self.config;
        if !c.endpoint.starts_with("http://") && !c.endpoint.starts_with("https://") {
            return Err(WorkflowError::InvalidConfig(format!(
                "Endpoint must be an HTTP(S) URL, got '{}'",
                c.endpoint
            )));
        }
        if c.model.is_empty() {
            return Err(WorkflowError::InvalidConfig("Model must not be empty".into()));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = WorkflowConfig::default();
        assert_eq!(c.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(c.model, DEFAULT_MODEL);
        assert!(c.api_key.is_none());
        assert!(c.prompt.is_none());
        assert!(c.request_timeout.is_none());
    }

    #[test]
    fn builder_trims_trailing_slash() {
        let c = WorkflowConfig::builder()
            .endpoint("http://127.0.0.1:8080/v1beta/")
            .build()
            .unwrap();
        assert_eq!(c.endpoint, "http://127.0.0.1:8080/v1beta");
    }

    #[test]
    fn builder_rejects_non_http_endpoint() {
        let err = WorkflowConfig::builder()
            .endpoint("ftp://example.com")
            .build()
            .unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidConfig(_)));
    }

    #[test]
    fn builder_rejects_empty_model() {
        let err = WorkflowConfig::builder().model("").build().unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidConfig(_)));
    }

    #[test]
    fn explicit_api_key_wins() {
        let c = WorkflowConfig::builder().api_key("abc").build().unwrap();
        assert_eq!(c.resolve_api_key().unwrap(), "abc");
    }

    #[test]
    fn debug_redacts_api_key() {
        let c = WorkflowConfig::builder().api_key("super-secret").build().unwrap();
        let dbg = format!("{c:?}");
        assert!(!dbg.contains("super-secret"), "got: {dbg}");
        assert!(dbg.contains("<redacted>"));
    }
}
