//! Error types for the doclens library.
//!
//! A single enum, [`WorkflowError`], covers everything that can go wrong
//! inside one workflow invocation. User cancellation is deliberately *not*
//! here — a cancelled chooser is a normal empty outcome
//! ([`crate::outcome::WorkflowOutcome::Cancelled`]), not a failure.
//!
//! Callers that only care about the broad category (was it the chooser, the
//! filesystem, the network, or our own configuration?) can classify with
//! [`WorkflowError::kind`] instead of matching every variant.

use std::path::PathBuf;
use thiserror::Error;

/// All failures produced by the document submission workflow.
#[derive(Debug, Error)]
pub enum WorkflowError {
    // ── Acquisition errors ────────────────────────────────────────────────
    /// The chooser returned an unusable reference or failed outright.
    #[error("Document acquisition failed: {detail}")]
    AcquisitionFailed { detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Reading the acquired file's bytes failed (permission denied, file
    /// vanished between acquisition and encoding, unreadable handle).
    #[error("Failed to read '{path}': {source}")]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Network errors ────────────────────────────────────────────────────
    /// The request never produced an HTTP response (DNS, TLS, connect,
    /// timeout when one is configured).
    #[error("Request to inference endpoint failed: {detail}")]
    RequestFailed { detail: String },

    /// The endpoint answered with a non-success HTTP status.
    #[error("Inference endpoint returned HTTP {status}: {body}")]
    EndpointStatus { status: u16, body: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// No API key was configured and none was found in the environment.
    #[error(
        "No API key configured.\nSet GEMINI_API_KEY or provide one via WorkflowConfig::builder().api_key(..)."
    )]
    ApiKeyMissing,

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Broad failure category, mirroring the workflow's error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The chooser produced an unusable reference.
    Acquisition,
    /// The file's bytes could not be read.
    Io,
    /// Transport error or failed request to the remote endpoint.
    Network,
    /// The workflow itself was misconfigured.
    Config,
}

impl WorkflowError {
    /// Classify this error into its broad [`FailureKind`].
    pub fn kind(&self) -> FailureKind {
        match self {
            WorkflowError::AcquisitionFailed { .. } => FailureKind::Acquisition,
            WorkflowError::UnreadableFile { .. } => FailureKind::Io,
            WorkflowError::RequestFailed { .. } | WorkflowError::EndpointStatus { .. } => {
                FailureKind::Network
            }
            WorkflowError::ApiKeyMissing | WorkflowError::InvalidConfig(_) => FailureKind::Config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreadable_file_display_includes_path() {
        let e = WorkflowError::UnreadableFile {
            path: PathBuf::from("/tmp/scan.png"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = e.to_string();
        assert!(msg.contains("/tmp/scan.png"), "got: {msg}");
        assert_eq!(e.kind(), FailureKind::Io);
    }

    #[test]
    fn endpoint_status_is_network() {
        let e = WorkflowError::EndpointStatus {
            status: 503,
            body: "overloaded".into(),
        };
        assert!(e.to_string().contains("503"));
        assert_eq!(e.kind(), FailureKind::Network);
    }

    #[test]
    fn request_failed_is_network() {
        let e = WorkflowError::RequestFailed {
            detail: "connection refused".into(),
        };
        assert_eq!(e.kind(), FailureKind::Network);
    }

    #[test]
    fn api_key_missing_mentions_env_var() {
        let e = WorkflowError::ApiKeyMissing;
        assert!(e.to_string().contains("GEMINI_API_KEY"));
        assert_eq!(e.kind(), FailureKind::Config);
    }

    #[test]
    fn acquisition_kind() {
        let e = WorkflowError::AcquisitionFailed {
            detail: "picker returned no uri".into(),
        };
        assert_eq!(e.kind(), FailureKind::Acquisition);
    }
}
