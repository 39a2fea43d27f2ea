/*============================================================
  Synavera Project: Syn-Assign
  Module: synassign_core::main
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Entry point for Syn-Assign Core. Loads a submission
    document, evaluates each plugin through its handler, and
    emits a structured capability report.

  Security / Safety Notes:
    Operates within user privileges. Reads local files and
    writes the report and log only; no network access.

  Dependencies:
    clap for CLI parsing, chrono for session stamps.

  Operational Scope:
    Invoked by operators or tooling that needs to inspect how
    a submission's plugins would behave before syncing.

  Revision History:
    2026-09-24 COD  Authored Syn-Assign Core runtime.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Result-first error handling with deterministic exits
    - Structured logging following Synavera cadence
    - Configurable execution via CLI and config file
============================================================*/

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use chrono::Utc;
use clap::{ArgAction, Parser};

use synassign_core::config::SynassignConfig;
use synassign_core::error::Result;
use synassign_core::lang::{LangStrings, Translator};
use synassign_core::logger::Logger;
use synassign_core::report::{build_report, write_report, ReportDocument, SubmissionDocument};

/// Command-line arguments for Syn-Assign-Core.
#[derive(Debug, Parser)]
#[command(
    name = "Syn-Assign-Core",
    version,
    author = "Synavera Systems",
    about = "Submission plugin capability report for Syn-Assign"
)]
struct Cli {
    /// Submission document (JSON with assignment, submission, input, offline).
    #[arg(long, value_name = "PATH")]
    submission: PathBuf,
    /// Override configuration file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Language pack (TOML or JSON) used for plugin names.
    #[arg(long, value_name = "PATH")]
    lang: Option<PathBuf>,
    /// Override report output path.
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
    /// Explicit log file path.
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,
    /// Do not write the report; emit summary only.
    #[arg(long, action = ArgAction::SetTrue)]
    dry_run: bool,
    /// Enable verbose logging to stderr.
    #[arg(long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("[Syn-Assign-Core] {}", err);
            err.exit_code()
        }
    }
}

async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = SynassignConfig::load_from_optional_path(cli.config.as_deref())?;
    let report_path = cli.report.clone().unwrap_or_else(|| config.report_path());

    let session_stamp = Utc::now().format("%Y-%m-%d_%H-%M-%S").to_string();
    let log_path = cli
        .log
        .clone()
        .unwrap_or_else(|| config.log_dir().join(format!("core_{session_stamp}.log")));
    let logger = Logger::new(Some(log_path), cli.verbose)?;
    logger.info("INIT", "Syn-Assign Core awakening.");

    match chart(&cli, &config, &report_path, &logger).await {
        Ok(()) => {
            logger.info("COMPLETE", "Submission capabilities charted.");
            logger.finalize()?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            logger.error("FATAL", err.to_string());
            if let Err(hash_err) = logger.finalize() {
                eprintln!("[Syn-Assign-Core] {hash_err}");
            }
            Err(err)
        }
    }
}

async fn chart(
    cli: &Cli,
    config: &SynassignConfig,
    report_path: &Path,
    logger: &Logger,
) -> Result<()> {
    let translator: Arc<dyn Translator> = match cli.lang.as_ref().or(config.lang_strings.as_ref())
    {
        Some(path) => {
            let strings = LangStrings::load(path)?;
            logger.info(
                "LANG",
                format!("Loaded {} strings from {}", strings.len(), path.display()),
            );
            Arc::new(strings)
        }
        None => {
            logger.debug("LANG", "No language pack configured; using descriptor names");
            Arc::new(LangStrings::new())
        }
    };

    let document = SubmissionDocument::load(&cli.submission)?;
    logger.info(
        "SUBMISSION",
        format!(
            "Assignment {} submission {} with {} plugins",
            document.assignment.id,
            document.submission.id,
            document.submission.plugins.len()
        ),
    );
    if document.submission.plugins.is_empty() {
        logger.warn("EMPTY", "Submission lists no plugins; nothing to evaluate");
    }

    let report = build_report(&document, translator, logger).await?;

    if cli.dry_run {
        print_summary(&report);
    } else {
        write_report(&report, report_path)?;
        logger.info(
            "REPORT",
            format!("Report written to {}", report_path.display()),
        );
    }

    logger.info(
        "SUMMARY",
        format!(
            "plugins={} changed={} empty={}",
            report.metadata.total_plugins,
            report.metadata.changed_plugins,
            report.metadata.empty_plugins
        ),
    );
    Ok(())
}

fn print_summary(report: &ReportDocument) {
    println!(
        "→ Report dry-run. Plugins={} Changed={} Empty={} Edit bytes={}",
        report.metadata.total_plugins,
        report.metadata.changed_plugins,
        report.metadata.empty_plugins,
        report.metadata.size_for_edit_total
    );
    for (plugin_type, entry) in &report.plugins {
        println!(
            "  {plugin_type}: {} enabled={} edit={} files={}{}",
            entry.display_name.as_deref().unwrap_or("(unnamed)"),
            entry.enabled,
            entry.enabled_for_edit,
            entry.files.len(),
            entry
                .notes
                .as_deref()
                .map(|note| format!(" note={note}"))
                .unwrap_or_default()
        );
    }
}
