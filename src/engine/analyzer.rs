use std::path::Path;
use std::process::Command;

use anyhow::Result;
use tracing::debug;

use crate::error::HarvestError;

/// Run the metrics tool in `dir` and return its stdout.
///
/// Only a failure to launch the tool is an error. A non-zero exit status is
/// expected (every metric is over a zero threshold) and its stdout is still
/// returned for parsing.
pub fn run_analyzer(program: &str, args: &[String], dir: &Path) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| HarvestError::analyzer_failed(format_args!("{program}: {e}")))?;

    debug!(
        status = %output.status,
        stdout_bytes = output.stdout.len(),
        stderr = %String::from_utf8_lossy(&output.stderr).trim(),
        "analyzer finished"
    );

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
