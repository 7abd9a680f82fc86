use anyhow::{Context, Result};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Metrics enabled in the analyzer options, each with threshold 0 so that
/// every value is reported.
pub const ENABLED_METRICS: [&str; 8] = [
    "source-lines-of-code",
    "cyclomatic-complexity",
    "coupling-between-object-classes",
    "depth-of-inheritance-tree",
    "number-of-methods",
    "response-for-class",
    "number-of-external-imports",
    "weighted-methods-per-class",
];

/// Render the `dart_code_metrics` options document.
pub fn analysis_options() -> Result<String> {
    let mut metrics = Mapping::new();
    for name in ENABLED_METRICS {
        metrics.insert(Value::from(name), Value::from(0u64));
    }
    let mut section = Mapping::new();
    section.insert(Value::from("metrics"), Value::Mapping(metrics));
    let mut doc = Mapping::new();
    doc.insert(Value::from("dart_code_metrics"), Value::Mapping(section));

    Ok(serde_yaml::to_string(&doc)?)
}

/// Overwrite `file_name` in `dir` with the analyzer options.
pub fn write_analysis_options(dir: &Path, file_name: &str) -> Result<PathBuf> {
    let path = dir.join(file_name);
    fs::write(&path, analysis_options()?)
        .with_context(|| format!("Failed to write analyzer options: {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_metric_has_zero_threshold() {
        let doc: Value = serde_yaml::from_str(&analysis_options().unwrap()).unwrap();
        let metrics = doc["dart_code_metrics"]["metrics"].as_mapping().unwrap();
        assert_eq!(metrics.len(), ENABLED_METRICS.len());
        for name in ENABLED_METRICS {
            assert_eq!(metrics[name].as_u64(), Some(0), "{name}");
        }
    }

    #[test]
    fn test_metric_order_is_stable() {
        let text = analysis_options().unwrap();
        let positions: Vec<usize> = ENABLED_METRICS
            .iter()
            .map(|m| text.find(m).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("analysis_options.yaml"), "include: lints.yaml\n").unwrap();

        let path = write_analysis_options(dir.path(), "analysis_options.yaml").unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert!(!content.contains("include"));
        assert!(content.starts_with("dart_code_metrics:"));
    }
}
