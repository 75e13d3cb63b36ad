//! Sorted catalog of installed Xcode versions

use crate::enumerate::enumerate;
use crate::error::Result;
use crate::metadata::{extract, Extraction, SkipReason};
use crate::record::VersionRecord;
use crate::version;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A candidate bundle that did not yield a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCandidate {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Installed versions, newest first
#[derive(Debug, Clone, Default, Serialize)]
pub struct VersionCatalog {
    records: Vec<VersionRecord>,
    #[serde(skip)]
    skipped: Vec<SkippedCandidate>,
}

impl VersionCatalog {
    /// Scan `applications_dir` and build a fresh catalog
    pub fn build(applications_dir: &Path) -> Result<Self> {
        let mut records = Vec::new();
        let mut skipped = Vec::new();

        for candidate in enumerate(applications_dir)? {
            match extract(&candidate) {
                Extraction::Found(record) => {
                    tracing::debug!(
                        path = %candidate.display(),
                        version = %record.version(),
                        release_type = %record.release_type(),
                        "found Xcode"
                    );
                    records.push(record);
                }
                Extraction::Skipped(reason) => {
                    match &reason {
                        SkipReason::MissingFile(_) => tracing::debug!(
                            path = %candidate.display(),
                            %reason,
                            "not an Xcode installation"
                        ),
                        _ => tracing::warn!(
                            path = %candidate.display(),
                            %reason,
                            "skipping broken Xcode installation"
                        ),
                    }
                    skipped.push(SkippedCandidate {
                        path: candidate,
                        reason,
                    });
                }
            }
        }

        let mut catalog = Self::from_records(records);
        catalog.skipped = skipped;
        Ok(catalog)
    }

    /// Build a catalog from already extracted records.
    ///
    /// Sorting is stable, so records with equal versions keep their input order.
    pub fn from_records(mut records: Vec<VersionRecord>) -> Self {
        records.sort_by(|a, b| version::compare(b.version(), a.version()));
        Self {
            records,
            skipped: Vec::new(),
        }
    }

    pub fn records(&self) -> &[VersionRecord] {
        &self.records
    }

    pub fn skipped(&self) -> &[SkippedCandidate] {
        &self.skipped
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VersionRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a VersionCatalog {
    type Item = &'a VersionRecord;
    type IntoIter = std::slice::Iter<'a, VersionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::tests::write_bundle;
    use crate::record::ReleaseType;
    use proptest::prelude::*;
    use semver::Version;
    use std::cmp::Ordering;

    #[test]
    fn test_build_sorts_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path(), "Xcode_9.4.app", Some("9.4"), None, Some("GM"));
        write_bundle(dir.path(), "Xcode_14.3.1.app", Some("14.3.1"), None, Some("GM"));
        write_bundle(dir.path(), "Xcode_10.0.app", Some("10.0"), None, Some("GM"));

        let catalog = VersionCatalog::build(dir.path()).unwrap();
        let versions: Vec<String> = catalog.iter().map(|r| r.version().to_string()).collect();
        assert_eq!(versions, vec!["14.3.1", "10.0.0", "9.4.0"]);
        assert!(catalog.skipped().is_empty());
    }

    #[test]
    fn test_build_drops_invalid_candidates() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path(), "Xcode_15.0.app", Some("15.0"), Some("15A240d"), Some("GM"));
        std::fs::create_dir(dir.path().join("Xcode_empty.app")).unwrap();
        write_bundle(dir.path(), "Xcode_weird.app", Some("unknown"), None, None);

        let catalog = VersionCatalog::build(dir.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.records()[0].path(), dir.path().join("Xcode_15.0.app"));

        let mut reasons: Vec<_> = catalog.skipped().iter().map(|s| s.path.clone()).collect();
        reasons.sort();
        assert_eq!(
            reasons,
            vec![
                dir.path().join("Xcode_empty.app"),
                dir.path().join("Xcode_weird.app"),
            ]
        );
    }

    #[test]
    fn test_build_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = VersionCatalog::build(dir.path()).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_build_unreadable_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(VersionCatalog::build(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn test_from_records_is_stable_for_ties() {
        let stable = VersionRecord::new(Version::new(15, 0, 0), None, ReleaseType::Gm, "/A/Xcode.app");
        let beta = VersionRecord::new(
            Version::new(15, 0, 0),
            None,
            ReleaseType::Beta,
            "/A/Xcode-beta.app",
        );
        let catalog = VersionCatalog::from_records(vec![stable.clone(), beta.clone()]);
        assert_eq!(catalog.records(), &[stable, beta]);
    }

    fn release_type() -> impl Strategy<Value = ReleaseType> {
        prop_oneof![
            Just(ReleaseType::Gm),
            Just(ReleaseType::Beta),
            Just(ReleaseType::Unknown),
        ]
    }

    proptest! {
        #[test]
        fn catalog_is_sorted_descending(
            entries in prop::collection::vec((0u64..30, 0u64..10, 0u64..10, release_type()), 1..20)
        ) {
            let records = entries
                .iter()
                .enumerate()
                .map(|(i, (major, minor, patch, rt))| {
                    VersionRecord::new(
                        Version::new(*major, *minor, *patch),
                        None,
                        *rt,
                        format!("/Applications/Xcode_{}.app", i),
                    )
                })
                .collect();
            let catalog = VersionCatalog::from_records(records);

            prop_assert_eq!(catalog.len(), entries.len());
            for pair in catalog.records().windows(2) {
                prop_assert_ne!(
                    version::compare(pair[0].version(), pair[1].version()),
                    Ordering::Less
                );
            }
            for record in &catalog {
                prop_assert_eq!(record.is_stable(), record.release_type() == ReleaseType::Gm);
            }
        }
    }
}
