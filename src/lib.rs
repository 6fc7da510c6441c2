//! # doclens
//!
//! Submit documents and photos to a generative vision endpoint for analysis.
//!
//! ## Why this crate?
//!
//! The pattern keeps getting rebuilt inline: pick a file or capture a photo,
//! base64 the bytes, POST them to a generative-content endpoint, show the
//! text that comes back. This crate is that pipeline done once, as a
//! library — with the chooser, the busy indicator, and the rendering all
//! pushed behind narrow seams so any front-end (CLI, desktop, service) can
//! drive it without inheriting someone else's UI state.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Source (Upload | Camera)
//!  │
//!  ├─ 1. Acquire  caller-provided chooser yields a file reference
//!  │              (cancellation → empty outcome, not an error)
//!  ├─ 2. Encode   full read + base64 for the JSON request body
//!  ├─ 3. Submit   one POST to models/<model>:generateContent
//!  └─ 4. Outcome  Completed(raw response) | Cancelled | Failed(error)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use doclens::{run_file, WorkflowConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     // Credential read from GEMINI_API_KEY
//!     let config = WorkflowConfig::default();
//!     let outcome = run_file("scan.png", None, &config).await;
//!     if let Some(result) = outcome.result() {
//!         println!("{}", result.primary_text().unwrap_or("(no text in response)"));
//!     }
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `doclens` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! doclens = { version = "0.2", default-features = false }
//! ```
//!
//! ## What this crate does not do
//!
//! No retries, no offline queue, no response streaming, no history. One user
//! action is one invocation; if it fails, the user triggers it again.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod observer;
pub mod outcome;
pub mod pipeline;
pub mod run;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{WorkflowConfig, WorkflowConfigBuilder, API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_MODEL};
pub use error::{FailureKind, WorkflowError};
pub use observer::{NoopObserver, Observer, Phase, Termination, WorkflowObserver};
pub use outcome::{FileInfo, InferenceResult, WorkflowOutcome};
pub use pipeline::acquire::{AcquiredFile, DocumentChooser, PathChooser, Source};
pub use pipeline::encode::EncodedPayload;
pub use run::{run, run_bytes, run_file, run_sync};
