//! schedtex - render scheduling-simulation output as LaTeX
//!
//! Provides commands for:
//! - Rendering the TikZ timeline diagram
//! - Rendering the per-task summary table
//! - Exporting named artifact bundles as JSON
//! - Validating simulator output
//!
//! Binary: schedtex

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use u_schedtex::models::Schedule;
use u_schedtex::summary::SummaryInput;
use u_schedtex::validation::{validate_schedule, ValidationError};
use u_schedtex::{
    export_diagram, export_summary, DiagramRenderer, ExportConfig, RenderOptions,
    SummaryExtractor, SummaryOptions,
};

/// schedtex - scheduling diagrams and tables for LaTeX documents
#[derive(Parser)]
#[command(name = "schedtex")]
#[command(about = "Render scheduling-simulation timelines as TikZ diagrams and LaTeX tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the TikZ timeline diagram
    Diagram {
        /// Simulator JSON output (`-` for stdin)
        input: PathBuf,

        /// Omit bars, annotations and the legend
        #[arg(long)]
        blank: bool,

        /// Print annotations above their slots instead of in a legend
        #[arg(long)]
        inline: bool,

        /// Omit labels under RAN bars
        #[arg(long)]
        nobelow: bool,

        /// Fail on malformed input instead of rendering best-effort
        #[arg(long)]
        strict: bool,
    },

    /// Print the per-task summary table
    Summary {
        /// Simulator JSON output (`-` for stdin)
        input: PathBuf,

        /// Leave start, completion, waiting and turnaround empty
        #[arg(long)]
        blank: bool,

        /// Ignore the timeline and summarize the plan only
        #[arg(long)]
        plan_only: bool,
    },

    /// Print artifact bundles as JSON
    Export {
        /// Simulator JSON output (`-` for stdin)
        input: PathBuf,

        /// Export config JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Export only one kind of artifact
        #[arg(long, value_enum)]
        only: Option<ExportKind>,
    },

    /// Check simulator output for malformed slots and references
    Validate {
        /// Simulator JSON output (`-` for stdin)
        input: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportKind {
    Diagram,
    Summary,
}

fn main() -> Result<ExitCode> {
    // Logs go to stderr so stdout stays clean markup.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "schedtex=info,u_schedtex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Diagram {
            input,
            blank,
            inline,
            nobelow,
            strict,
        } => {
            let schedule = load_schedule(&input, io::stdin())?;
            let options = RenderOptions::new()
                .with_blank(blank)
                .with_inline(inline)
                .with_nobelow(nobelow);
            let renderer = DiagramRenderer::with_options(options);
            let tikz = if strict {
                renderer.try_render(&schedule)?
            } else {
                renderer.render(&schedule)
            };
            print!("{tikz}");
        }
        Commands::Summary {
            input,
            blank,
            plan_only,
        } => {
            let schedule = load_schedule(&input, io::stdin())?;
            let source = if plan_only {
                SummaryInput::Plan(&schedule.plan)
            } else {
                SummaryInput::Simulated(&schedule)
            };
            let extractor = SummaryExtractor::with_options(SummaryOptions::new().with_blank(blank));
            println!("{}", extractor.summarize(source));
        }
        Commands::Export {
            input,
            config,
            only,
        } => {
            let schedule = load_schedule(&input, io::stdin())?;
            let config = load_config(config.as_deref())?;
            let bundles = export_bundles(&schedule, &config, only)?;
            info!(bundles = bundles.len(), "exported artifacts");
            println!("{}", serde_json::to_string_pretty(&bundles)?);
        }
        Commands::Validate { input } => {
            let schedule = load_schedule(&input, io::stdin())?;
            if !report_validation(&schedule, &mut io::stdout())? {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Reads a schedule from `path`, or from `stdin` when `path` is `-`.
fn load_schedule(path: &Path, mut stdin: impl Read) -> Result<Schedule> {
    let json = if path.as_os_str() == "-" {
        let mut buf = String::new();
        stdin
            .read_to_string(&mut buf)
            .context("reading schedule from stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    };
    Ok(Schedule::from_json(&json)?)
}

fn load_config(path: Option<&Path>) -> Result<ExportConfig> {
    let Some(path) = path else {
        return Ok(ExportConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    Ok(ExportConfig::from_json(&json)?)
}

/// Bundles keyed by `diagram` / `summary`, filtered by `only`.
fn export_bundles(
    schedule: &Schedule,
    config: &ExportConfig,
    only: Option<ExportKind>,
) -> Result<serde_json::Map<String, serde_json::Value>> {
    let mut bundles = serde_json::Map::new();
    if only != Some(ExportKind::Summary) {
        let bundle = export_diagram(schedule, config);
        bundles.insert("diagram".into(), serde_json::to_value(bundle)?);
    }
    if only != Some(ExportKind::Diagram) {
        let bundle = export_summary(schedule, config);
        bundles.insert("summary".into(), serde_json::to_value(bundle)?);
    }
    Ok(bundles)
}

/// Writes one line per validation problem. Returns whether the schedule
/// is valid.
fn report_validation(schedule: &Schedule, out: &mut impl Write) -> Result<bool> {
    let errors: Vec<ValidationError> = match validate_schedule(schedule) {
        Ok(()) => {
            info!(
                tasks = schedule.plan.task_count(),
                slots = schedule.timeline.len(),
                "schedule is valid"
            );
            return Ok(true);
        }
        Err(errors) => errors,
    };
    for e in &errors {
        warn!(kind = ?e.kind, task = ?e.task, slot = ?e.slot, "{e}");
        writeln!(out, "{e}")?;
    }
    Ok(false)
}
