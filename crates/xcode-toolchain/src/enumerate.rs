//! Discovery of candidate Xcode bundles

use crate::error::{Result, XcodeError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

static BUNDLE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Xcode.*\.app$").expect("bundle pattern is valid"));

/// Whether a directory entry name looks like an Xcode bundle
pub fn is_bundle_name(name: &str) -> bool {
    BUNDLE_NAME_RE.is_match(name)
}

/// List direct children of `applications_dir` that are real `Xcode*.app`
/// directories. Symlinks and regular files are ignored.
///
/// Results are in filesystem order. An unreadable directory is an error.
pub fn enumerate(applications_dir: &Path) -> Result<Vec<PathBuf>> {
    let unreadable = |source| XcodeError::ApplicationsDirUnreadable {
        path: applications_dir.to_path_buf(),
        source,
    };

    let mut candidates = Vec::new();
    for entry in std::fs::read_dir(applications_dir).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;

        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !is_bundle_name(name) {
            continue;
        }

        // file_type() does not follow symlinks
        let file_type = match entry.file_type() {
            Ok(ft) => ft,
            Err(e) => {
                tracing::debug!(path = %entry.path().display(), error = %e, "cannot stat entry");
                continue;
            }
        };
        if file_type.is_symlink() || !file_type.is_dir() {
            tracing::debug!(path = %entry.path().display(), "skipping non-directory bundle name");
            continue;
        }

        candidates.push(entry.path());
    }

    tracing::debug!(
        dir = %applications_dir.display(),
        count = candidates.len(),
        "enumerated Xcode candidates"
    );
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_bundle_name_pattern() {
        assert!(is_bundle_name("Xcode.app"));
        assert!(is_bundle_name("Xcode_15.0.1.app"));
        assert!(is_bundle_name("Xcode-beta.app"));
        assert!(!is_bundle_name("xcode.app"));
        assert!(!is_bundle_name("Xcode.app.bak"));
        assert!(!is_bundle_name("MyXcode.app"));
        assert!(!is_bundle_name("Safari.app"));
    }

    #[test]
    fn test_enumerate_filters_entries() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("Xcode_15.0.app")).unwrap();
        fs::create_dir(dir.path().join("Xcode_14.3.1.app")).unwrap();
        fs::create_dir(dir.path().join("Safari.app")).unwrap();
        fs::write(dir.path().join("Xcode_file.app"), "not a bundle").unwrap();

        let mut found = enumerate(dir.path()).unwrap();
        found.sort();
        assert_eq!(
            found,
            vec![
                dir.path().join("Xcode_14.3.1.app"),
                dir.path().join("Xcode_15.0.app"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_enumerate_skips_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("Xcode_15.0.app");
        fs::create_dir(&real).unwrap();
        std::os::unix::fs::symlink(&real, dir.path().join("Xcode.app")).unwrap();

        let found = enumerate(dir.path()).unwrap();
        assert_eq!(found, vec![real]);
    }

    #[test]
    fn test_enumerate_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(enumerate(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_enumerate_missing_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = enumerate(&dir.path().join("Applications")).unwrap_err();
        assert!(matches!(err, XcodeError::ApplicationsDirUnreadable { .. }));
    }
}
