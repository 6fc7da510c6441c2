//! Encoding: file bytes → base64 payload for the JSON request body.
//!
//! The inference API accepts document bytes as base64 inside the request
//! JSON, so the whole file is read into memory and encoded in one go. No
//! size limit is enforced here — the remote endpoint rejects oversized
//! payloads with its own status, which the submit step surfaces as a
//! network failure.

use crate::error::WorkflowError;
use crate::pipeline::acquire::AcquiredFile;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

/// The transport-safe representation of an acquired file.
///
/// Owned solely by the invocation that produced it; never persisted.
#[derive(Debug, Clone)]
pub struct EncodedPayload {
    /// Base64 (standard alphabet, padded) of the full file content.
    pub data: String,
    /// Declared media type carried through from acquisition.
    pub media_type: String,
}

/// Read the full content addressed by `file` and encode it.
///
/// Read errors (permission denied, file vanished, unreadable handle) map to
/// [`WorkflowError::UnreadableFile`]; the acquired reference is consumed
/// either way.
pub async fn encode_file(file: &AcquiredFile) -> Result<EncodedPayload, WorkflowError> {
    let bytes = tokio::fs::read(&file.path)
        .await
        .map_err(|source| WorkflowError::UnreadableFile {
            path: file.path.clone(),
            source,
        })?;

    Ok(encode_bytes(&bytes, &file.media_type))
}

/// Encode in-memory bytes directly, skipping the filesystem.
pub fn encode_bytes(bytes: &[u8], media_type: &str) -> EncodedPayload {
    let data = STANDARD.encode(bytes);
    debug!("Encoded {} bytes → {} bytes base64", bytes.len(), data.len());

    EncodedPayload {
        data,
        media_type: media_type.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use std::io::Write;

    #[test]
    fn encode_bytes_round_trips() {
        let original: Vec<u8> = (0u8..=255).collect();
        let payload = encode_bytes(&original, "application/octet-stream");
        let decoded = STANDARD.decode(&payload.data).expect("valid base64");
        assert_eq!(decoded, original);
        assert_eq!(payload.media_type, "application/octet-stream");
    }

    #[test]
    fn encode_bytes_empty_input() {
        let payload = encode_bytes(&[], "text/plain");
        assert!(payload.data.is_empty());
    }

    #[tokio::test]
    async fn encode_file_round_trips() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"doclens test bytes").unwrap();

        let file = AcquiredFile {
            path: tmp.path().to_path_buf(),
            media_type: "text/plain".into(),
            name: None,
        };

        let payload = encode_file(&file).await.expect("encode should succeed");
        let decoded = STANDARD.decode(&payload.data).unwrap();
        assert_eq!(decoded, b"doclens test bytes");
        assert_eq!(payload.media_type, "text/plain");
    }

    #[tokio::test]
    async fn encode_file_missing_path_is_io_failure() {
        let file = AcquiredFile {
            path: "/definitely/not/a/real/file.png".into(),
            media_type: "image/png".into(),
            name: None,
        };

        let err = encode_file(&file).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Io);
        assert!(err.to_string().contains("/definitely/not/a/real/file.png"));
    }
}
