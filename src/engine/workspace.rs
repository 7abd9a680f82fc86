use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Scratch directory holding one indexed checkout per repository.
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Directory name created under the results directory.
    pub const DIR_NAME: &'static str = "repositories";

    pub fn new(results_dir: &Path) -> Self {
        Self {
            root: results_dir.join(Self::DIR_NAME),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the scratch directory. Existing checkouts are left in place.
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.root).with_context(|| {
            format!("Failed to create workspace: {}", self.root.display())
        })?;
        debug!(root = %self.root.display(), "workspace ready");
        Ok(())
    }

    /// Checkout path for the 1-based repository `index`.
    pub fn repo_path(&self, index: usize) -> PathBuf {
        self.root.join(index.to_string())
    }

    /// Delete the checkout for `index`. Failures are logged, never fatal.
    pub fn remove_repo(&self, index: usize) {
        remove_tree(&self.repo_path(index));
    }

    /// Delete the whole scratch directory.
    pub fn cleanup(&self) {
        remove_tree(&self.root);
    }
}

fn remove_tree(path: &Path) {
    if !path.exists() {
        return;
    }
    match fs::remove_dir_all(path) {
        Ok(()) => debug!(path = %path.display(), "removed"),
        Err(e) => warn!(path = %path.display(), error = %e, "failed to remove directory"),
    }
}
