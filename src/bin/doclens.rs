//! CLI binary for doclens.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `WorkflowConfig`, drives one submission, and prints the result.

use anyhow::{Context, Result};
use clap::Parser;
use doclens::{
    run_file, FileInfo, Phase, Termination, WorkflowConfig, WorkflowObserver, WorkflowOutcome,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── Terminal observer ────────────────────────────────────────────────────────

/// Terminal observer: a spinner is the busy indicator, spinning strictly
/// between `on_started` and `on_finished`; acquisition metadata is printed
/// above it as soon as it is known.
struct CliObserver {
    bar: Option<ProgressBar>,
    file_info: Mutex<Option<FileInfo>>,
    quiet: bool,
}

impl CliObserver {
    fn new(show_progress: bool, quiet: bool) -> Arc<Self> {
        let bar = show_progress.then(|| {
            let bar = ProgressBar::new_spinner();
            let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
            bar.set_style(style);
            bar
        });
        Arc::new(Self {
            bar,
            file_info: Mutex::new(None),
            quiet,
        })
    }

    fn file_info(&self) -> Option<FileInfo> {
        self.file_info.lock().unwrap().clone()
    }

    fn println(&self, line: String) {
        if self.quiet {
            return;
        }
        match self.bar {
            Some(ref bar) => bar.println(line),
            None => eprintln!("{line}"),
        }
    }
}

impl WorkflowObserver for CliObserver {
    fn on_started(&self) {
        if let Some(ref bar) = self.bar {
            bar.set_prefix("Submitting");
            bar.enable_steady_tick(Duration::from_millis(80));
        }
    }

    fn on_phase(&self, phase: Phase) {
        if let Some(ref bar) = self.bar {
            bar.set_message(match phase {
                Phase::Acquiring => "acquiring document…",
                Phase::Encoding => "encoding…",
                Phase::Submitting => "waiting for inference endpoint…",
            });
        }
    }

    fn on_file_acquired(&self, info: &FileInfo) {
        *self.file_info.lock().unwrap() = Some(info.clone());
        self.println(format!(
            "{} {}  {}",
            cyan("◆"),
            bold(&info.name),
            dim(&info.type_label)
        ));
    }

    fn on_finished(&self, termination: Termination) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
        match termination {
            Termination::Done => {}
            Termination::Cancelled => self.println(format!("{} nothing selected", dim("·"))),
            Termination::Failed => self.println(red("✗ submission failed")),
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Analyse a document (result to stdout)
  doclens scan.png

  # Ask a question about it
  doclens --prompt "What is the invoice total?" invoice.pdf

  # Declared media type override (otherwise derived from the extension)
  doclens --media-type image/png exported.dat

  # Raw JSON response for scripting
  doclens --json receipt.jpg | jq '.candidates[0]'

  # Different model
  doclens --model gemini-2.0-flash contract.pdf

ENVIRONMENT VARIABLES:
  GEMINI_API_KEY     API key for the inference endpoint (required)
  DOCLENS_MODEL      Override the model id
  DOCLENS_ENDPOINT   Override the endpoint base URL

SETUP:
  1. Set API key:    export GEMINI_API_KEY=...
  2. Submit:         doclens document.png
"#;

/// Submit a document to a generative vision endpoint and print the analysis.
#[derive(Parser, Debug)]
#[command(
    name = "doclens",
    version,
    about = "Submit documents and photos to a generative vision endpoint for analysis",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Document to submit (image, PDF, …).
    input: PathBuf,

    /// Declared media type; derived from the file extension if not set.
    #[arg(long)]
    media_type: Option<String>,

    /// Model identifier.
    #[arg(long, env = "DOCLENS_MODEL", default_value = doclens::DEFAULT_MODEL)]
    model: String,

    /// Endpoint base URL.
    #[arg(long, env = "DOCLENS_ENDPOINT", default_value = doclens::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// API key; falls back to GEMINI_API_KEY.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Instruction text sent ahead of the document.
    #[arg(long)]
    prompt: Option<String>,

    /// Per-request timeout in seconds (no timeout if unset).
    #[arg(long, env = "DOCLENS_TIMEOUT")]
    timeout: Option<u64>,

    /// Print the raw JSON response instead of the extracted text.
    #[arg(long)]
    json: bool,

    /// Disable the spinner.
    #[arg(long, env = "DOCLENS_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "DOCLENS_VERBOSE")]
    verbose: bool,

    /// Suppress all output except the result and errors.
    #[arg(short, long, env = "DOCLENS_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Library logs are suppressed while the spinner is active; it already
    // tells the user everything that matters.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let observer = CliObserver::new(show_progress, cli.quiet);

    let mut builder = WorkflowConfig::builder()
        .endpoint(&cli.endpoint)
        .model(&cli.model)
        .observer(observer.clone());
    if let Some(ref key) = cli.api_key {
        builder = builder.api_key(key);
    }
    if let Some(ref prompt) = cli.prompt {
        builder = builder.prompt(prompt);
    }
    if let Some(secs) = cli.timeout {
        builder = builder.request_timeout(Duration::from_secs(secs));
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Run the workflow ─────────────────────────────────────────────────
    let outcome = run_file(&cli.input, cli.media_type.as_deref(), &config).await;

    match outcome {
        WorkflowOutcome::Completed(result) => {
            if cli.json {
                let json = serde_json::to_string_pretty(result.raw())
                    .context("Failed to serialise response")?;
                println!("{json}");
                return Ok(());
            }

            match result.primary_text() {
                Some(text) => {
                    let stdout = io::stdout();
                    let mut handle = stdout.lock();
                    handle
                        .write_all(text.as_bytes())
                        .context("Failed to write to stdout")?;
                    if !text.ends_with('\n') {
                        handle.write_all(b"\n").ok();
                    }
                    if !cli.quiet {
                        eprintln!(
                            "{} {}",
                            green("✔"),
                            dim(&format!("{} candidate(s)", result.candidate_count()))
                        );
                    }
                }
                None => {
                    // Endpoint answered but carried no text; say so rather
                    // than printing nothing.
                    eprintln!("{} response contained no text", cyan("⚠"));
                }
            }
            Ok(())
        }
        WorkflowOutcome::Cancelled => Ok(()),
        WorkflowOutcome::Failed(e) => {
            // Keep showing what was selected, even though the rest failed.
            if let Some(info) = observer.file_info() {
                if !cli.quiet {
                    eprintln!("{}", dim(&format!("(was submitting {})", info.name)));
                }
            }
            Err(e.into())
        }
    }
}
