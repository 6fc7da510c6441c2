//! Result types handed back to the presentation layer.
//!
//! The workflow deliberately returns *data*, not UI state: one
//! [`WorkflowOutcome`] per invocation, plus the [`FileInfo`] delivered early
//! through the observer. How a caller renders these (markdown view, terminal,
//! log line) is entirely its own business.

use crate::error::WorkflowError;
use serde::{Deserialize, Serialize};

/// Display metadata for an acquired file, computed once immediately after
/// acquisition.
///
/// Handed to the caller via
/// [`WorkflowObserver::on_file_acquired`](crate::observer::WorkflowObserver::on_file_acquired)
/// *before* encoding starts, so "what was selected" can be shown even when a
/// later step fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Display name of the file (picker-supplied name, else the path's file
    /// name, else a placeholder).
    pub name: String,
    /// Upper-cased media-type suffix, e.g. `"PNG"` for `image/png`.
    pub type_label: String,
}

impl FileInfo {
    /// Derive display metadata from a name and declared media type.
    ///
    /// The label is the substring after the last `/` of the media type,
    /// upper-cased — a string-suffix convention, not a registry lookup.
    pub fn derive(name: impl Into<String>, media_type: &str) -> Self {
        let suffix = media_type.rsplit('/').next().unwrap_or(media_type);
        Self {
            name: name.into(),
            type_label: suffix.to_ascii_uppercase(),
        }
    }
}

/// The verbatim JSON response from the inference endpoint.
///
/// The workflow performs no schema validation: the response may be absent
/// text, empty candidates, or any other shape the endpoint chooses to return.
/// Accessors do existence checks only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InferenceResult {
    raw: serde_json::Value,
}

impl InferenceResult {
    /// Wrap a decoded response body.
    pub fn new(raw: serde_json::Value) -> Self {
        Self { raw }
    }

    /// The untouched response body.
    pub fn raw(&self) -> &serde_json::Value {
        &self.raw
    }

    /// Number of candidate outputs, `0` when the field is absent.
    pub fn candidate_count(&self) -> usize {
        self.raw["candidates"].as_array().map_or(0, Vec::len)
    }

    /// The first candidate's first text part, if the response carries one.
    ///
    /// Path: `candidates[0].content.parts[0].text`. Any missing link in that
    /// chain yields `None` — never an error.
    pub fn primary_text(&self) -> Option<&str> {
        self.raw["candidates"][0]["content"]["parts"][0]["text"].as_str()
    }
}

/// Terminal result of one workflow invocation.
///
/// Constructed exactly once per call to [`crate::run`], handed to the caller,
/// never retained by the workflow.
#[derive(Debug)]
pub enum WorkflowOutcome {
    /// The endpoint answered; the raw response is enclosed.
    Completed(InferenceResult),
    /// The user cancelled the chooser or it returned no usable reference.
    /// Not an error.
    Cancelled,
    /// A step failed; no subsequent step was attempted.
    Failed(WorkflowError),
}

impl WorkflowOutcome {
    /// `true` for [`WorkflowOutcome::Completed`].
    pub fn is_completed(&self) -> bool {
        matches!(self, WorkflowOutcome::Completed(_))
    }

    /// The enclosed result, if the invocation completed.
    pub fn result(&self) -> Option<&InferenceResult> {
        match self {
            WorkflowOutcome::Completed(r) => Some(r),
            _ => None,
        }
    }

    /// The enclosed error, if the invocation failed.
    pub fn error(&self) -> Option<&WorkflowError> {
        match self {
            WorkflowOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn file_info_label_is_uppercased_suffix() {
        let info = FileInfo::derive("report.png", "image/png");
        assert_eq!(info.type_label, "PNG");
        assert_eq!(info.name, "report.png");
    }

    #[test]
    fn file_info_label_without_slash_uses_whole_type() {
        let info = FileInfo::derive("blob", "octet-stream");
        assert_eq!(info.type_label, "OCTET-STREAM");
    }

    #[test]
    fn primary_text_happy_path() {
        let r = InferenceResult::new(json!({
            "candidates": [{"content": {"parts": [{"text": "hello"}]}}]
        }));
        assert_eq!(r.primary_text(), Some("hello"));
        assert_eq!(r.candidate_count(), 1);
    }

    #[test]
    fn primary_text_absent_on_empty_candidates() {
        let r = InferenceResult::new(json!({"candidates": []}));
        assert_eq!(r.primary_text(), None);
        assert_eq!(r.candidate_count(), 0);
    }

    #[test]
    fn primary_text_absent_on_foreign_shape() {
        let r = InferenceResult::new(json!({"error": {"message": "quota"}}));
        assert_eq!(r.primary_text(), None);
        assert_eq!(r.candidate_count(), 0);
    }

    #[test]
    fn primary_text_absent_on_non_string_text() {
        let r = InferenceResult::new(json!({
            "candidates": [{"content": {"parts": [{"text": 42}]}}]
        }));
        assert_eq!(r.primary_text(), None);
    }

    #[test]
    fn outcome_accessors() {
        let done = WorkflowOutcome::Completed(InferenceResult::new(json!({})));
        assert!(done.is_completed());
        assert!(done.result().is_some());
        assert!(done.error().is_none());

        let cancelled = WorkflowOutcome::Cancelled;
        assert!(!cancelled.is_completed());
        assert!(cancelled.result().is_none());
    }
}
