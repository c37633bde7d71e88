use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use vitality_core::{Action, Button, Session, SessionReport, StepRecord, VitalityConfig};

#[derive(Parser)]
#[command(version, about = "Drive an actor's vitality and record its notifications")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply raw actions (`damage:N`, `heal:N`, `kill`, `revive`) to the core.
    Run(RunArgs),
    /// Press presenter buttons (`damage`, `heal`, `kill`, `revive`).
    Press(PressArgs),
    /// Pretty-print a stored session report.
    Report(ReportArgs),
}

#[derive(Args)]
struct SessionArgs {
    /// TOML config; built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    id: Option<String>,
    /// Also write the JSON report here.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args)]
struct RunArgs {
    #[command(flatten)]
    session: SessionArgs,
    #[arg(long = "action", required = true)]
    actions: Vec<Action>,
}

#[derive(Args)]
struct PressArgs {
    #[command(flatten)]
    session: SessionArgs,
    #[arg(long = "button", required = true)]
    buttons: Vec<Button>,
}

#[derive(Args)]
struct ReportArgs {
    #[arg(long)]
    input: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .ok();
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => handle_run(args),
        Commands::Press(args) => handle_press(args),
        Commands::Report(args) => handle_report(args),
    }
}

fn handle_run(args: RunArgs) -> Result<()> {
    let mut session = open_session(&args.session)?;
    for action in args.actions {
        print_step(&action.to_string(), session.apply(action));
    }
    finish_session(session, &args.session)
}

fn handle_press(args: PressArgs) -> Result<()> {
    let mut session = open_session(&args.session)?;
    for button in args.buttons {
        print_step(button.label(), session.press(button));
    }
    finish_session(session, &args.session)
}

fn handle_report(args: ReportArgs) -> Result<()> {
    let report = load_report(&args.input)?;
    let summary = &report.summary;
    println!(
        "Session {} ({}) -> HP {} / {} [{}], {} changes, {} deaths, {} revives",
        report.id,
        report.timestamp,
        summary.final_value,
        report.config.vitality.max_value,
        if summary.alive { "alive" } else { "dead" },
        summary.changes,
        summary.deaths,
        summary.revives,
    );
    Ok(())
}

fn load_report(path: &Path) -> Result<SessionReport> {
    let data =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let report = serde_json::from_str(&data)
        .with_context(|| format!("{} is not a session report", path.display()))?;
    Ok(report)
}

fn open_session(args: &SessionArgs) -> Result<Session> {
    let config = match args.config.as_deref() {
        Some(path) => VitalityConfig::from_path(path)?,
        None => VitalityConfig::default(),
    };
    let session = Session::new(config)?;
    let state = session.state();
    info!(
        target: "vitality.cli",
        value = state.value(),
        max = state.max_value(),
        "session opened"
    );
    println!("{}", session.presenter().text());
    Ok(session)
}

fn print_step(label: &str, step: &StepRecord) {
    let outcome = step
        .outcome
        .map(|outcome| format!(" {outcome:?}"))
        .unwrap_or_default();
    println!("{label:>10} -> {}{outcome}", step.readout);
}

fn finish_session(session: Session, args: &SessionArgs) -> Result<()> {
    let id = args
        .id
        .clone()
        .unwrap_or_else(|| format!("session-{}", Utc::now().format("%Y%m%dT%H%M%S")));
    let report = session.finish(id);
    let json = serde_json::to_string_pretty(&report)?;
    println!("{json}");

    if let Some(path) = args.out.as_deref() {
        write_report(path, &json)?;
        println!("Report written to {}", path.display());
    }
    Ok(())
}

fn write_report(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
