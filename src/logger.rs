//! File logging for `--debug` runs, rotated daily in local time.

use anyhow::Result;
use logroller::{LogRollerBuilder, Rotation, RotationAge, TimeZone};
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};
use time::macros::format_description;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::prelude::*;

use crate::config::Config;

/// Log files are named `dcm-harvest.YYYY-MM-DD`.
const LOG_FILE_PREFIX: &str = "dcm-harvest";

/// Environment variable overriding the default `debug` filter.
const LOG_FILTER_ENV: &str = "DCM_HARVEST_LOG";

const RETENTION: Duration = Duration::from_secs(3 * 24 * 60 * 60);

/// Install the global subscriber writing to `config.log_path`.
pub fn init(config: &Config) -> Result<()> {
    fs::create_dir_all(&config.log_path)?;
    cleanup_old_logs(&config.log_path, RETENTION)?;

    let appender = LogRollerBuilder::new(config.log_path.as_path(), Path::new(LOG_FILE_PREFIX))
        .rotation(Rotation::AgeBased(RotationAge::Daily))
        .time_zone(TimeZone::Local)
        .max_keep_files(3)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to create log roller: {}", e))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    let time_format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let local_offset = time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC);
    let timer = OffsetTime::new(local_offset, time_format);

    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new("dcm_harvest=debug"));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_timer(timer),
    );

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    // The writer thread must outlive every span; the process exits right after the run.
    std::mem::forget(guard);

    Ok(())
}

/// Remove our log files whose modification time is older than `max_age`.
pub fn cleanup_old_logs(log_path: &Path, max_age: Duration) -> Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let cutoff = SystemTime::now() - max_age;

    for entry in fs::read_dir(log_path)? {
        let entry = entry?;
        let path = entry.path();

        let is_ours = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(LOG_FILE_PREFIX));
        if !path.is_file() || !is_ours {
            continue;
        }

        if let Ok(metadata) = entry.metadata()
            && let Ok(modified) = metadata.modified()
            && modified < cutoff
        {
            let _ = fs::remove_file(&path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backdate(path: &Path, age: Duration) {
        let secs = (SystemTime::now() - age)
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let stamp = libc::timespec {
            tv_sec: secs as libc::time_t,
            tv_nsec: 0,
        };
        let times = [stamp, stamp];
        let c_path = std::ffi::CString::new(path.to_str().unwrap()).unwrap();
        let ret = unsafe { libc::utimensat(libc::AT_FDCWD, c_path.as_ptr(), times.as_ptr(), 0) };
        assert_eq!(ret, 0, "utimensat failed: {}", std::io::Error::last_os_error());
    }

    const FOUR_DAYS: Duration = Duration::from_secs(4 * 24 * 60 * 60);

    #[test]
    fn test_cleanup_removes_only_expired_logs() {
        let dir = tempfile::TempDir::new().unwrap();

        let old_file = dir.path().join("dcm-harvest.2020-01-01");
        fs::write(&old_file, "old log").unwrap();
        backdate(&old_file, FOUR_DAYS);

        let recent_file = dir.path().join("dcm-harvest.2026-10-18");
        fs::write(&recent_file, "recent log").unwrap();

        cleanup_old_logs(dir.path(), RETENTION).unwrap();

        assert!(!old_file.exists(), "Expired log file should be deleted");
        assert!(recent_file.exists(), "Recent log file should be kept");
    }

    #[test]
    fn test_cleanup_ignores_foreign_files() {
        let dir = tempfile::TempDir::new().unwrap();

        let other_file = dir.path().join("other-app.log");
        fs::write(&other_file, "other log").unwrap();
        backdate(&other_file, FOUR_DAYS);

        cleanup_old_logs(dir.path(), RETENTION).unwrap();

        assert!(other_file.exists(), "Foreign log file should be kept");
    }

    #[test]
    fn test_cleanup_nonexistent_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        assert!(cleanup_old_logs(&missing, RETENTION).is_ok());
    }

    #[test]
    fn test_cleanup_ignores_subdirectories() {
        let dir = tempfile::TempDir::new().unwrap();
        let subdir = dir.path().join("dcm-harvest.subdir");
        fs::create_dir(&subdir).unwrap();

        cleanup_old_logs(dir.path(), Duration::ZERO).unwrap();

        assert!(subdir.exists(), "Subdirectory should not be deleted");
    }
}
