use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::Config;
use crate::engine::{analyzer, clone, export, manifest, options, report, workspace::Workspace};
use crate::models::metrics::MetricsRecord;
use crate::models::summary::{RepoOutcome, RepoStatus, RunSummary};

// ---------------------------------------------------------------------------
// HarvestService: sequential clone → analyze → scrape loop
// ---------------------------------------------------------------------------

pub struct HarvestService {
    config: Config,
    keep_workspace: bool,
}

/// Parameters for a full run.
pub struct RunParams<'a> {
    pub repositories: &'a [String],
    pub results_dir: &'a Path,
    /// Defaults to `<results_dir>/results.csv`
    pub output: Option<&'a Path>,
}

impl HarvestService {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            keep_workspace: false,
        }
    }

    /// Leave checkouts in place after the run and reuse any found at the start.
    ///
    /// Without it, a leftover checkout (e.g. from a killed run) is deleted and
    /// cloned again, since it may belong to a different URL.
    pub fn keep_workspace(mut self, keep: bool) -> Self {
        self.keep_workspace = keep;
        self
    }

    /// Analyze every repository in order and write the CSV.
    ///
    /// Per-repository failures degrade to zero metrics; only workspace and
    /// output errors abort the run.
    pub fn run(&self, params: &RunParams<'_>) -> Result<RunSummary> {
        let workspace = Workspace::new(params.results_dir);
        workspace.prepare()?;

        let total = params.repositories.len();
        info!(total, workspace = %workspace.root().display(), "starting run");

        let mut outcomes = Vec::with_capacity(total);
        for (i, url) in params.repositories.iter().enumerate() {
            let index = i + 1;
            let outcome = self.analyze_repository(&workspace, url, index);
            eprintln!(
                "{index}/{total}: {url} - {}",
                outcome.record.metrics_line()
            );
            if !self.keep_workspace {
                workspace.remove_repo(index);
            }
            outcomes.push(outcome);
        }

        if !self.keep_workspace {
            workspace.cleanup();
        }

        let output = params
            .output
            .map(PathBuf::from)
            .unwrap_or_else(|| params.results_dir.join("results.csv"));
        let summary = RunSummary::new(output, outcomes);
        export::write_results_csv(&summary.output, summary.records())?;
        info!(
            output = %summary.output.display(),
            analyzed = summary.analyzed,
            clone_failed = summary.clone_failed,
            "run complete"
        );

        Ok(summary)
    }

    /// Clone (or reuse), configure, analyze and scrape one repository.
    pub fn analyze_repository(&self, workspace: &Workspace, url: &str, index: usize) -> RepoOutcome {
        let checkout = workspace.repo_path(index);
        let outcome = |status, record| RepoOutcome {
            index,
            status,
            record,
        };

        if checkout.exists() && !self.keep_workspace {
            warn!(index, url, path = %checkout.display(), "discarding stale checkout");
            workspace.remove_repo(index);
        }

        let status = if checkout.exists() {
            info!(index, url, "reusing kept checkout");
            RepoStatus::Reused
        } else {
            if let Err(e) = clone::clone_repository(
                &self.config.git_command,
                url,
                &checkout,
                self.config.shallow_clone,
            ) {
                warn!(index, url, error = %e, "clone failed");
                eprintln!("{e}");
                return outcome(RepoStatus::CloneFailed, MetricsRecord::empty(url));
            }
            RepoStatus::Analyzed
        };

        let root = manifest::find_manifest_dir(&checkout, &self.config.manifest_file);
        if let Err(e) = options::write_analysis_options(&root, &self.config.options_file) {
            warn!(index, url, error = %e, "could not write analyzer options");
        }

        let output = match analyzer::run_analyzer(
            &self.config.analyzer_command,
            &self.config.analyzer_args,
            &root,
        ) {
            Ok(out) => out,
            Err(e) => {
                warn!(index, url, error = %e, "analyzer failed");
                return outcome(RepoStatus::AnalyzerFailed, MetricsRecord::empty(url));
            }
        };

        let counts = report::parse_report(&output);
        outcome(status, MetricsRecord::from_counts(url, &counts))
    }
}
