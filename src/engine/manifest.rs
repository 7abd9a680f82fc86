use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Locate the directory holding `manifest` inside a checkout.
///
/// The checkout root wins if it holds the manifest itself. Otherwise the
/// shallowest match is chosen, ties broken by path. Hidden directories
/// (`.git`, `.dart_tool`) and gitignored paths are skipped. Falls back to
/// `root` when nothing matches.
pub fn find_manifest_dir(root: &Path, manifest: &str) -> PathBuf {
    if root.join(manifest).is_file() {
        return root.to_path_buf();
    }

    let mut builder = WalkBuilder::new(root);
    builder.hidden(true).git_ignore(true).git_global(false);

    let mut best: Option<(usize, PathBuf)> = None;
    for entry in builder.build() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file())
            || entry.file_name() != std::ffi::OsStr::new(manifest)
        {
            continue;
        }
        let Some(dir) = entry.path().parent() else {
            continue;
        };
        let candidate = (entry.depth(), dir.to_path_buf());
        if best.as_ref().is_none_or(|b| candidate < *b) {
            best = Some(candidate);
        }
    }

    match best {
        Some((_, dir)) => {
            debug!(dir = %dir.display(), "found {manifest}");
            dir
        }
        None => {
            debug!(root = %root.display(), "no {manifest}, analyzing checkout root");
            root.to_path_buf()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "name: sample\n").unwrap();
    }

    #[test]
    fn test_root_manifest_wins() {
        let dir = tempfile::TempDir::new().unwrap();
        touch(&dir.path().join("pubspec.yaml"));
        touch(&dir.path().join("packages/core/pubspec.yaml"));
        assert_eq!(find_manifest_dir(dir.path(), "pubspec.yaml"), dir.path());
    }

    #[test]
    fn test_nested_manifest_found() {
        let dir = tempfile::TempDir::new().unwrap();
        touch(&dir.path().join("app/pubspec.yaml"));
        assert_eq!(
            find_manifest_dir(dir.path(), "pubspec.yaml"),
            dir.path().join("app")
        );
    }

    #[test]
    fn test_shallowest_then_path_order() {
        let dir = tempfile::TempDir::new().unwrap();
        touch(&dir.path().join("a/deep/nested/pubspec.yaml"));
        touch(&dir.path().join("z/pubspec.yaml"));
        touch(&dir.path().join("m/pubspec.yaml"));
        assert_eq!(
            find_manifest_dir(dir.path(), "pubspec.yaml"),
            dir.path().join("m")
        );
    }

    #[test]
    fn test_hidden_dirs_skipped() {
        let dir = tempfile::TempDir::new().unwrap();
        touch(&dir.path().join(".dart_tool/pubspec.yaml"));
        assert_eq!(find_manifest_dir(dir.path(), "pubspec.yaml"), dir.path());
    }

    #[test]
    fn test_falls_back_to_root() {
        let dir = tempfile::TempDir::new().unwrap();
        touch(&dir.path().join("README.md"));
        assert_eq!(find_manifest_dir(dir.path(), "pubspec.yaml"), dir.path());
    }
}
