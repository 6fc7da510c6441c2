//! Pipeline stages for the document submission workflow.
//!
//! Each submodule implements exactly one transformation step. Keeping stages
//! separate makes each independently testable and lets us swap
//! implementations (e.g. a different chooser backend) without touching other
//! stages.
//!
//! ## Data Flow
//!
//! ```text
//! acquire ──▶ encode ──▶ submit
//! (chooser)   (base64)   (HTTPS POST)
//! ```
//!
//! 1. [`acquire`] — obtain a file reference from the caller-provided chooser;
//!    cancellation short-circuits to an empty outcome here
//! 2. [`encode`]  — read the file's bytes and base64-wrap them for the JSON
//!    request body
//! 3. [`submit`]  — the single POST to the inference endpoint; the only stage
//!    with network I/O

pub mod acquire;
pub mod encode;
pub mod submit;
