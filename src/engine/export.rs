use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::models::metrics::MetricsRecord;

/// Write the header row and one row per record, in the given order.
pub fn write_results_csv<'a>(
    path: &Path,
    records: impl IntoIterator<Item = &'a MetricsRecord>,
) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create results file: {}", path.display()))?;
    write_csv(file, records)
        .with_context(|| format!("Failed to write results file: {}", path.display()))
}

/// CSV encoding into any writer. The header is written even with no records.
pub fn write_csv<'a, W: Write>(
    out: W,
    records: impl IntoIterator<Item = &'a MetricsRecord>,
) -> Result<()> {
    // Headers are written by hand so an empty run still gets them.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);
    writer.write_record(MetricsRecord::HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
