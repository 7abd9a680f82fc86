use anyhow::{Context, Result, bail};
use std::path::Path;

use crate::error::HarvestError;

/// Read repository locations, one per line, keeping file order.
///
/// Lines are trimmed; blank lines and `#` comments are skipped.
pub fn load_repositories(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        bail!(HarvestError::file_not_found(&path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read repository list: {}", path.display()))?;
    Ok(parse_repositories(&content))
}

pub fn parse_repositories(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.starts_with('#'))
        .map(str::to_string)
        .collect()
}
