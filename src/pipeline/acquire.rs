//! Acquisition: obtain a file reference from a user-initiated source.
//!
//! The workflow never opens a picker or a camera itself — platforms differ
//! too much for that to live in a library. Instead callers implement
//! [`DocumentChooser`] over whatever capability their platform provides and
//! the workflow drives it through one narrow contract: zero or one usable
//! file reference per invocation, with cancellation as a normal `None`.

use crate::error::WorkflowError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Which acquisition capability to invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// A file picker over existing documents.
    Upload,
    /// A camera capture producing a fresh photo.
    Camera,
}

/// Fallback display name when neither the chooser nor the path yields one.
const UNNAMED_FILE: &str = "Unnamed File";

/// A file reference produced by a chooser.
///
/// Immutable; created at acquisition time and consumed by the encoding step.
/// At most one is in flight per invocation.
#[derive(Debug, Clone)]
pub struct AcquiredFile {
    /// Opaque handle to the source bytes. Only the encoding step reads it.
    pub path: PathBuf,
    /// Declared media type, e.g. `image/png`. Taken at face value — the
    /// workflow does not sniff content.
    pub media_type: String,
    /// Chooser-supplied display name, if any.
    pub name: Option<String>,
}

impl AcquiredFile {
    /// The name shown to the user: chooser-supplied name, else the path's
    /// file name, else a placeholder.
    pub fn display_name(&self) -> String {
        if let Some(ref name) = self.name {
            return name.clone();
        }
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNNAMED_FILE.to_string())
    }
}

/// Async trait implemented by each acquisition backend.
///
/// # Contract
///
/// * `Ok(Some(file))` — the user picked or captured exactly one file.
/// * `Ok(None)` — the user cancelled, or the capability returned no usable
///   reference. This is a normal empty outcome, not an error.
/// * `Err(_)` — the capability itself failed.
#[async_trait]
pub trait DocumentChooser: Send + Sync {
    async fn choose(&self, source: Source) -> Result<Option<AcquiredFile>, WorkflowError>;
}

/// A chooser that always yields one fixed path.
///
/// This is how non-interactive callers (the CLI, scripts, tests) feed a known
/// file into the workflow: the "choice" was already made out of band, so the
/// requested [`Source`] is ignored. No filesystem access happens here — an
/// unreadable path surfaces from the encoding step, exactly as it would for a
/// picker-supplied reference.
pub struct PathChooser {
    path: PathBuf,
    media_type: String,
}

impl PathChooser {
    /// Create a chooser for `path`. When `media_type` is `None` it is derived
    /// from the path's extension.
    pub fn new(path: impl Into<PathBuf>, media_type: Option<&str>) -> Self {
        let path = path.into();
        let media_type = media_type
            .map(str::to_string)
            .unwrap_or_else(|| media_type_for_path(&path).to_string());
        Self { path, media_type }
    }
}

#[async_trait]
impl DocumentChooser for PathChooser {
    async fn choose(&self, _source: Source) -> Result<Option<AcquiredFile>, WorkflowError> {
        Ok(Some(AcquiredFile {
            path: self.path.clone(),
            media_type: self.media_type.clone(),
            name: None,
        }))
    }
}

/// Map a path's extension to a declared media type.
///
/// A plain string-suffix convention: no content sniffing, no registry. The
/// remote endpoint is the authority on what it accepts.
pub fn media_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_chooser_name() {
        let f = AcquiredFile {
            path: PathBuf::from("/tmp/abc123.bin"),
            media_type: "image/png".into(),
            name: Some("holiday scan.png".into()),
        };
        assert_eq!(f.display_name(), "holiday scan.png");
    }

    #[test]
    fn display_name_falls_back_to_file_name() {
        let f = AcquiredFile {
            path: PathBuf::from("/tmp/report.pdf"),
            media_type: "application/pdf".into(),
            name: None,
        };
        assert_eq!(f.display_name(), "report.pdf");
    }

    #[test]
    fn display_name_placeholder_when_no_file_name() {
        let f = AcquiredFile {
            path: PathBuf::from("/"),
            media_type: "application/octet-stream".into(),
            name: None,
        };
        assert_eq!(f.display_name(), "Unnamed File");
    }

    #[test]
    fn media_type_from_extension() {
        assert_eq!(media_type_for_path(Path::new("a.png")), "image/png");
        assert_eq!(media_type_for_path(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(media_type_for_path(Path::new("doc.pdf")), "application/pdf");
        assert_eq!(
            media_type_for_path(Path::new("mystery")),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn path_chooser_ignores_source() {
        let chooser = PathChooser::new("/tmp/scan.jpg", None);
        let upload = chooser.choose(Source::Upload).await.unwrap().unwrap();
        let camera = chooser.choose(Source::Camera).await.unwrap().unwrap();
        assert_eq!(upload.path, camera.path);
        assert_eq!(upload.media_type, "image/jpeg");
    }

    #[tokio::test]
    async fn path_chooser_respects_explicit_media_type() {
        let chooser = PathChooser::new("/tmp/scan.dat", Some("image/png"));
        let file = chooser.choose(Source::Upload).await.unwrap().unwrap();
        assert_eq!(file.media_type, "image/png");
    }
}
