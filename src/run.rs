//! Workflow orchestration: acquire → encode → submit.
//!
//! One invocation per user action. Each step is an awaited suspension point
//! and the first non-success short-circuits the rest: a cancelled chooser
//! yields [`WorkflowOutcome::Cancelled`] without touching the filesystem, a
//! failed read yields [`WorkflowOutcome::Failed`] without a network request.
//! Failures are caught at the step boundary, logged, and converted — nothing
//! panics across the library boundary and nothing is retried.
//!
//! ## Busy signalling
//!
//! The configured observer's `on_started`/`on_finished` pair brackets the
//! invocation. `on_finished` is fired through a drop guard, so it runs on
//! every exit path — including a panic unwinding out of a step — and exactly
//! once. Display metadata is delivered via `on_file_acquired` right after
//! acquisition, before anything that can still fail.

use crate::config::WorkflowConfig;
use crate::error::WorkflowError;
use crate::observer::{Phase, Termination, WorkflowObserver};
use crate::outcome::{FileInfo, WorkflowOutcome};
use crate::pipeline::acquire::{DocumentChooser, PathChooser, Source};
use crate::pipeline::encode;
use crate::pipeline::submit::InferenceClient;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Fires `on_finished` exactly once, on every exit path.
///
/// `finish` consumes the guard for the ordinary returns; `Drop` covers
/// anything that leaves the function without reaching one (an unwinding
/// panic), reporting it as a failure so the caller's busy flag clears.
struct FinishGuard<'a> {
    observer: Option<&'a dyn WorkflowObserver>,
    fired: bool,
}

impl<'a> FinishGuard<'a> {
    fn new(observer: Option<&'a dyn WorkflowObserver>) -> Self {
        Self {
            observer,
            fired: false,
        }
    }

    fn finish(mut self, termination: Termination) {
        self.fired = true;
        if let Some(obs) = self.observer {
            obs.on_finished(termination);
        }
    }
}

impl Drop for FinishGuard<'_> {
    fn drop(&mut self) {
        if !self.fired {
            if let Some(obs) = self.observer {
                obs.on_finished(Termination::Failed);
            }
        }
    }
}

/// Run one document submission from `source` through the given chooser.
///
/// This is the primary entry point for the library.
///
/// # Returns
/// A [`WorkflowOutcome`] — never an `Err`. Cancellation is the `Cancelled`
/// variant; every step failure is converted into `Failed` after being logged.
pub async fn run(
    source: Source,
    chooser: &dyn DocumentChooser,
    config: &WorkflowConfig,
) -> WorkflowOutcome {
    let total_start = Instant::now();
    let observer = config.observer.as_deref();

    info!("Starting document submission from {:?}", source);
    if let Some(obs) = observer {
        obs.on_started();
    }
    let guard = FinishGuard::new(observer);

    // ── Step 1: Acquire ──────────────────────────────────────────────────
    if let Some(obs) = observer {
        obs.on_phase(Phase::Acquiring);
    }
    let file = match chooser.choose(source).await {
        Ok(Some(file)) => file,
        Ok(None) => {
            info!("Chooser returned no file; empty outcome");
            guard.finish(Termination::Cancelled);
            return WorkflowOutcome::Cancelled;
        }
        Err(e) => {
            warn!("Acquisition failed: {e}");
            guard.finish(Termination::Failed);
            return WorkflowOutcome::Failed(e);
        }
    };

    let file_info = FileInfo::derive(file.display_name(), &file.media_type);
    debug!("Acquired '{}' ({})", file_info.name, file.media_type);
    if let Some(obs) = observer {
        obs.on_file_acquired(&file_info);
    }

    // ── Step 2: Encode ───────────────────────────────────────────────────
    if let Some(obs) = observer {
        obs.on_phase(Phase::Encoding);
    }
    let payload = match encode::encode_file(&file).await {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Encoding failed: {e}");
            guard.finish(Termination::Failed);
            return WorkflowOutcome::Failed(e);
        }
    };
    drop(file); // the acquired reference is spent once encoding completes

    // ── Step 3: Submit ───────────────────────────────────────────────────
    if let Some(obs) = observer {
        obs.on_phase(Phase::Submitting);
    }
    let client = match InferenceClient::from_config(config) {
        Ok(client) => client,
        Err(e) => {
            warn!("Submission not attempted: {e}");
            guard.finish(Termination::Failed);
            return WorkflowOutcome::Failed(e);
        }
    };
    let result = match client.submit(&payload).await {
        Ok(result) => result,
        Err(e) => {
            warn!("Submission failed: {e}");
            guard.finish(Termination::Failed);
            return WorkflowOutcome::Failed(e);
        }
    };

    info!(
        "Submission complete in {}ms ({} candidates)",
        total_start.elapsed().as_millis(),
        result.candidate_count()
    );
    guard.finish(Termination::Done);
    WorkflowOutcome::Completed(result)
}

/// Submit a known file path, skipping any interactive chooser.
///
/// Wraps the path in a [`PathChooser`] and runs the Upload source. When
/// `media_type` is `None` it is derived from the path's extension.
pub async fn run_file(
    path: impl Into<PathBuf>,
    media_type: Option<&str>,
    config: &WorkflowConfig,
) -> WorkflowOutcome {
    let chooser = PathChooser::new(path, media_type);
    run(Source::Upload, &chooser, config).await
}

/// Submit in-memory bytes, skipping acquisition and the filesystem.
///
/// Observer events still fire (`on_started`, `on_file_acquired`, the
/// encoding and submitting phases, `on_finished`) so a caller's busy
/// indicator behaves identically to the file-based entry points.
pub async fn run_bytes(
    bytes: &[u8],
    media_type: &str,
    name: &str,
    config: &WorkflowConfig,
) -> WorkflowOutcome {
    let total_start = Instant::now();
    let observer = config.observer.as_deref();

    info!("Starting document submission from memory ({name})");
    if let Some(obs) = observer {
        obs.on_started();
    }
    let guard = FinishGuard::new(observer);

    let file_info = FileInfo::derive(name, media_type);
    if let Some(obs) = observer {
        obs.on_file_acquired(&file_info);
    }

    if let Some(obs) = observer {
        obs.on_phase(Phase::Encoding);
    }
    let payload = encode::encode_bytes(bytes, media_type);

    if let Some(obs) = observer {
        obs.on_phase(Phase::Submitting);
    }
    let client = match InferenceClient::from_config(config) {
        Ok(client) => client,
        Err(e) => {
            warn!("Submission not attempted: {e}");
            guard.finish(Termination::Failed);
            return WorkflowOutcome::Failed(e);
        }
    };
    let result = match client.submit(&payload).await {
        Ok(result) => result,
        Err(e) => {
            warn!("Submission failed: {e}");
            guard.finish(Termination::Failed);
            return WorkflowOutcome::Failed(e);
        }
    };

    info!(
        "Submission complete in {}ms",
        total_start.elapsed().as_millis()
    );
    guard.finish(Termination::Done);
    WorkflowOutcome::Completed(result)
}

/// Synchronous wrapper around [`run`].
///
/// Creates a temporary tokio runtime internally.
pub fn run_sync(
    source: Source,
    chooser: &dyn DocumentChooser,
    config: &WorkflowConfig,
) -> WorkflowOutcome {
    match tokio::runtime::Runtime::new() {
        Ok(rt) => rt.block_on(run(source, chooser, config)),
        Err(e) => WorkflowOutcome::Failed(WorkflowError::InvalidConfig(format!(
            "failed to create async runtime: {e}"
        ))),
    }
}
