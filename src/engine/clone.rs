use std::path::Path;
use std::process::Command;

use anyhow::{Result, bail};
use tracing::debug;

use crate::error::HarvestError;

/// Clone `url` into `dest` with the configured version-control client.
///
/// The client's stdout/stderr are captured; a non-zero exit or a failure
/// to launch it yields a `CLONE_FAILED` error.
pub fn clone_repository(git: &str, url: &str, dest: &Path, shallow: bool) -> Result<()> {
    let mut cmd = Command::new(git);
    cmd.arg("clone").arg("--quiet");
    if shallow {
        cmd.args(["--depth", "1"]);
    }
    cmd.arg(url).arg(dest);

    debug!(?cmd, "cloning");
    let output = cmd
        .output()
        .map_err(|e| HarvestError::clone_failed(url, &format!("could not run {git}: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = match stderr.trim() {
            "" => output.status.to_string(),
            msg => msg.to_string(),
        };
        bail!(HarvestError::clone_failed(url, &detail));
    }

    Ok(())
}
