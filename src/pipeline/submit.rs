//! Submission: one POST to the generative inference endpoint.
//!
//! The wire format is fixed: `models/<model>:generateContent` with the
//! encoded document as an `inlineData` part and the credential appended as a
//! `key` query parameter. The response body is returned verbatim — no schema
//! validation, no retry, no streaming.
//!
//! The key travels only in the query string of the outgoing request; it is
//! never interpolated into the logged URL.

use crate::config::WorkflowConfig;
use crate::error::WorkflowError;
use crate::outcome::InferenceResult;
use crate::pipeline::encode::EncodedPayload;
use serde_json::json;
use std::time::Instant;
use tracing::{debug, info};

/// Client for the fixed generative-content endpoint.
///
/// Cheap to build per invocation; holds no state beyond the connection pool.
pub struct InferenceClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    prompt: Option<String>,
}

impl InferenceClient {
    /// Build a client from the workflow config, resolving the API key
    /// (explicit config first, `GEMINI_API_KEY` second).
    pub fn from_config(config: &WorkflowConfig) -> Result<Self, WorkflowError> {
        let api_key = config.resolve_api_key()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| WorkflowError::RequestFailed {
            detail: format!("failed to build HTTP client: {e}"),
        })?;

        Ok(Self {
            http,
            url: format!("{}/models/{}:generateContent", config.endpoint, config.model),
            api_key,
            prompt: config.prompt.clone(),
        })
    }

    /// The request URL, without the credential.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Submit the encoded payload and return the decoded response verbatim.
    ///
    /// Transport errors and non-success statuses map to the network failure
    /// kind; neither is retried.
    pub async fn submit(&self, payload: &EncodedPayload) -> Result<InferenceResult, WorkflowError> {
        let start = Instant::now();
        debug!(
            "Submitting {} ({} base64 chars) to {}",
            payload.media_type,
            payload.data.len(),
            self.url
        );

        let body = build_request_body(payload, self.prompt.as_deref());
        let response = self
            .http
            .post(&self.url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| WorkflowError::RequestFailed {
                detail: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WorkflowError::EndpointStatus {
                status: status.as_u16(),
                body,
            });
        }

        let raw: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| WorkflowError::RequestFailed {
                    detail: format!("failed to decode response body: {e}"),
                })?;

        info!(
            "Inference response received in {}ms",
            start.elapsed().as_millis()
        );
        Ok(InferenceResult::new(raw))
    }
}

/// Build the `generateContent` request body.
///
/// Shape: `{contents:[{parts:[{inlineData:{data, mimeType}}]}]}`, with an
/// optional leading text part when a prompt is configured.
fn build_request_body(payload: &EncodedPayload, prompt: Option<&str>) -> serde_json::Value {
    let mut parts = Vec::new();
    if let Some(text) = prompt {
        parts.push(json!({ "text": text }));
    }
    parts.push(json!({
        "inlineData": { "data": payload.data, "mimeType": payload.media_type }
    }));

    json!({ "contents": [{ "parts": parts }] })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> EncodedPayload {
        EncodedPayload {
            data: "aGVsbG8=".into(),
            media_type: "image/png".into(),
        }
    }

    #[test]
    fn request_body_shape_without_prompt() {
        let body = build_request_body(&payload(), None);
        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0]["inlineData"]["data"], "aGVsbG8=");
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
    }

    #[test]
    fn request_body_prompt_part_leads() {
        let body = build_request_body(&payload(), Some("Summarise this document"));
        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["text"], "Summarise this document");
        assert!(parts[1]["inlineData"].is_object());
    }

    #[test]
    fn client_url_excludes_key() {
        let config = WorkflowConfig::builder()
            .endpoint("http://127.0.0.1:9999")
            .model("gemini-1.5-flash")
            .api_key("secret-key")
            .build()
            .unwrap();
        let client = InferenceClient::from_config(&config).unwrap();
        assert_eq!(
            client.url(),
            "http://127.0.0.1:9999/models/gemini-1.5-flash:generateContent"
        );
        assert!(!client.url().contains("secret-key"));
    }
}
