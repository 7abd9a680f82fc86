use anyhow::Result;
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};

use dcm_harvest::cli::{Cli, Commands};
use dcm_harvest::config::{Config, ConfigService};
use dcm_harvest::doctor;
use dcm_harvest::engine::{options, repo_list, report};
use dcm_harvest::error::{ErrorCode, HarvestError};
use dcm_harvest::service::{HarvestService, RunParams};

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        println!("{}", error_line(&e));
        std::process::exit(1);
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn classify_error(e: &anyhow::Error) -> (String, String) {
    if let Some(he) = e.downcast_ref::<HarvestError>() {
        (he.code.to_string(), he.message.clone())
    } else {
        (ErrorCode::IoError.to_string(), format!("{e:#}"))
    }
}

fn error_line(e: &anyhow::Error) -> String {
    let (code, message) = classify_error(e);
    serde_json::json!({ "error": { "code": code, "message": message } }).to_string()
}

fn serialize_output(value: &impl serde::Serialize, pretty: bool) -> Result<String> {
    if pretty {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(serde_json::to_string(value)?)
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

fn run(cli: Cli) -> Result<()> {
    let pretty = cli.pretty;

    let config = ConfigService::load(cli.config.as_deref())?;

    if cli.debug || config.debug {
        dcm_harvest::logger::init(&config)?;
    }

    match cli.command {
        Commands::Run {
            repos,
            results_dir,
            output,
            keep_workspace,
        } => cmd_run(
            config,
            &repos,
            &results_dir,
            output.as_deref(),
            keep_workspace,
            pretty,
        ),
        Commands::Parse { file } => cmd_parse(file.as_deref(), pretty),
        Commands::Options => {
            print!("{}", options::analysis_options()?);
            Ok(())
        }
        Commands::Doctor => {
            let report = doctor::run_doctor(&config);
            println!("{}", serialize_output(&report, pretty)?);
            Ok(())
        }
        Commands::Init { path } => {
            let config_path = match path {
                Some(p) => {
                    ConfigService::generate_at(&p)?;
                    p
                }
                None => {
                    ConfigService::generate_default()?;
                    ConfigService::default_path()
                }
            };
            eprintln!("Configuration file created at: {}", config_path.display());
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_run(
    config: Config,
    repos: &Path,
    results_dir: &Path,
    output: Option<&Path>,
    keep_workspace: bool,
    pretty: bool,
) -> Result<()> {
    let repositories = repo_list::load_repositories(repos)?;
    let results_dir = absolute(results_dir)?;
    let output = output.map(absolute).transpose()?;

    let service = HarvestService::new(config).keep_workspace(keep_workspace);
    let summary = service.run(&RunParams {
        repositories: &repositories,
        results_dir: &results_dir,
        output: output.as_deref(),
    })?;

    println!("{}", serialize_output(&summary, pretty)?);
    Ok(())
}

fn cmd_parse(file: Option<&Path>, pretty: bool) -> Result<()> {
    let text = match file {
        Some(path) => {
            if !path.exists() {
                return Err(HarvestError::file_not_found(&path.display().to_string()).into());
            }
            std::fs::read_to_string(path)?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let counts = report::parse_report(&text);
    println!("{}", serialize_output(&counts, pretty)?);
    Ok(())
}

/// Clones receive absolute destinations regardless of the cwd the tools run in.
fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(std::path::absolute(path)?)
}
