//! Observer trait for per-invocation workflow events.
//!
//! Inject an [`Arc<dyn WorkflowObserver>`] via
//! [`crate::config::WorkflowConfigBuilder::observer`] to receive events as
//! the workflow moves through its states.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers can
//! forward events to a UI state store, a terminal spinner, or a log sink
//! without the library knowing anything about how the host application
//! communicates. The trait is `Send + Sync` so an observer can be shared with
//! whatever task the caller runs the workflow on.
//!
//! # The busy flag
//!
//! `on_started` and `on_finished` bracket the invocation: a caller-owned busy
//! flag set on the former and cleared on the latter is true strictly between
//! invocation start and the first terminal state. `on_finished` fires on
//! *every* exit path — completion, cancellation, and each failure — exactly
//! once.
//!
//! # Example
//!
//! ```rust
//! use doclens::{WorkflowObserver, Termination};
//! use std::sync::atomic::{AtomicBool, Ordering};
//!
//! struct BusyFlag(AtomicBool);
//!
//! impl WorkflowObserver for BusyFlag {
//!     fn on_started(&self) {
//!         self.0.store(true, Ordering::SeqCst);
//!     }
//!     fn on_finished(&self, _termination: Termination) {
//!         self.0.store(false, Ordering::SeqCst);
//!     }
//! }
//! ```

use crate::outcome::FileInfo;
use std::sync::Arc;

/// Non-terminal states of one workflow invocation, in order.
///
/// `Idle` (before `on_started`) and the terminal states (carried by
/// [`Termination`]) are not phases — a phase is only reported while the
/// invocation is busy. No transition skips a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The platform chooser is open.
    Acquiring,
    /// File bytes are being read and base64-encoded.
    Encoding,
    /// The request to the inference endpoint is outstanding.
    Submitting,
}

/// How an invocation terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The endpoint answered and the outcome is `Completed`.
    Done,
    /// A step failed; the outcome is `Failed`.
    Failed,
    /// The chooser was cancelled; the outcome is `Cancelled`.
    Cancelled,
}

/// Called by the workflow as one invocation progresses.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait WorkflowObserver: Send + Sync {
    /// Called once when the invocation begins, before the chooser opens.
    fn on_started(&self) {}

    /// Called on each state transition while the invocation is busy.
    fn on_phase(&self, phase: Phase) {
        let _ = phase;
    }

    /// Called immediately after acquisition with the derived display
    /// metadata, before encoding starts.
    ///
    /// This fires even when a later step goes on to fail, so the caller can
    /// keep showing what was selected.
    fn on_file_acquired(&self, info: &FileInfo) {
        let _ = info;
    }

    /// Called exactly once when the invocation reaches a terminal state,
    /// on every exit path.
    fn on_finished(&self, termination: Termination) {
        let _ = termination;
    }
}

/// A no-op implementation for callers that don't need events.
///
/// This is the default when no observer is configured.
pub struct NoopObserver;

impl WorkflowObserver for NoopObserver {}

/// Convenience alias matching the type stored in
/// [`crate::config::WorkflowConfig`].
pub type Observer = Arc<dyn WorkflowObserver>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct TrackingObserver {
        busy: AtomicBool,
        phases: AtomicUsize,
        acquired: AtomicUsize,
        terminations: AtomicUsize,
    }

    impl WorkflowObserver for TrackingObserver {
        fn on_started(&self) {
            self.busy.store(true, Ordering::SeqCst);
        }
        fn on_phase(&self, _phase: Phase) {
            self.phases.fetch_add(1, Ordering::SeqCst);
        }
        fn on_file_acquired(&self, _info: &FileInfo) {
            self.acquired.fetch_add(1, Ordering::SeqCst);
        }
        fn on_finished(&self, _termination: Termination) {
            self.busy.store(false, Ordering::SeqCst);
            self.terminations.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_observer_does_not_panic() {
        let obs = NoopObserver;
        obs.on_started();
        obs.on_phase(Phase::Acquiring);
        obs.on_file_acquired(&FileInfo::derive("a.png", "image/png"));
        obs.on_finished(Termination::Done);
    }

    #[test]
    fn tracking_observer_receives_events_in_order() {
        let obs = TrackingObserver {
            busy: AtomicBool::new(false),
            phases: AtomicUsize::new(0),
            acquired: AtomicUsize::new(0),
            terminations: AtomicUsize::new(0),
        };

        obs.on_started();
        assert!(obs.busy.load(Ordering::SeqCst));

        obs.on_phase(Phase::Acquiring);
        obs.on_file_acquired(&FileInfo::derive("scan.jpg", "image/jpeg"));
        obs.on_phase(Phase::Encoding);
        obs.on_phase(Phase::Submitting);
        obs.on_finished(Termination::Failed);

        assert!(!obs.busy.load(Ordering::SeqCst));
        assert_eq!(obs.phases.load(Ordering::SeqCst), 3);
        assert_eq!(obs.acquired.load(Ordering::SeqCst), 1);
        assert_eq!(obs.terminations.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn arc_dyn_observer_works() {
        let obs: Arc<dyn WorkflowObserver> = Arc::new(NoopObserver);
        obs.on_started();
        obs.on_finished(Termination::Cancelled);
    }
}
