use serde::Serialize;
use std::path::PathBuf;

use super::metrics::MetricsRecord;

/// How a repository's record was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepoStatus {
    /// Cloned and analyzed
    Analyzed,
    /// A checkout kept by an earlier `--keep-workspace` run was analyzed without cloning
    Reused,
    /// Clone failed; metrics are all zero
    CloneFailed,
    /// The analyzer could not be launched; metrics are all zero
    AnalyzerFailed,
}

/// Outcome of one repository in a run.
#[derive(Debug, Clone, Serialize)]
pub struct RepoOutcome {
    pub index: usize,
    pub status: RepoStatus,
    #[serde(flatten)]
    pub record: MetricsRecord,
}

/// Result of a full `run`.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub output: PathBuf,
    pub total: usize,
    pub analyzed: usize,
    pub clone_failed: usize,
    pub analyzer_failed: usize,
    pub repositories: Vec<RepoOutcome>,
}

impl RunSummary {
    pub fn new(output: PathBuf, repositories: Vec<RepoOutcome>) -> Self {
        let count = |wanted: &[RepoStatus]| {
            repositories
                .iter()
                .filter(|o| wanted.contains(&o.status))
                .count()
        };
        Self {
            total: repositories.len(),
            analyzed: count(&[RepoStatus::Analyzed, RepoStatus::Reused]),
            clone_failed: count(&[RepoStatus::CloneFailed]),
            analyzer_failed: count(&[RepoStatus::AnalyzerFailed]),
            output,
            repositories,
        }
    }

    /// Records in input order, ready for CSV export.
    pub fn records(&self) -> impl Iterator<Item = &MetricsRecord> {
        self.repositories.iter().map(|o| &o.record)
    }
}
