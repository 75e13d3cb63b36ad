//! Picking one installation for a version specifier

use crate::catalog::VersionCatalog;
use crate::record::VersionRecord;
use crate::specifier::Specifier;
use crate::version::{self, VersionRange};
use std::cmp::Ordering;

/// Resolve a raw specifier string against the catalog.
///
/// `None` is the normal "no match" outcome, including for an empty catalog.
pub fn resolve<'a>(catalog: &'a VersionCatalog, specifier: &str) -> Option<&'a VersionRecord> {
    if catalog.is_empty() {
        return None;
    }
    resolve_specifier(catalog, &Specifier::parse(specifier))
}

/// Resolve an already parsed specifier
pub fn resolve_specifier<'a>(
    catalog: &'a VersionCatalog,
    specifier: &Specifier,
) -> Option<&'a VersionRecord> {
    let selected = match specifier {
        Specifier::Latest => best(catalog.iter()),
        Specifier::LatestStable => best(catalog.iter().filter(|r| r.is_stable())),
        Specifier::Range { expr, stable } => {
            let range = match VersionRange::parse(expr) {
                Ok(range) => range,
                Err(e) => {
                    tracing::warn!(range = %expr, error = %e, "unparseable range matches nothing");
                    return None;
                }
            };
            best(
                catalog
                    .iter()
                    .filter(|r| r.is_stable() == *stable)
                    .filter(|r| range.satisfies(r.version())),
            )
        }
    };

    match selected {
        Some(record) => tracing::info!(
            %specifier,
            version = %record.version(),
            path = %record.path().display(),
            "resolved Xcode"
        ),
        None => tracing::info!(%specifier, "no Xcode matched"),
    }
    selected
}

/// Highest version; on equal versions the earliest record wins
fn best<'a>(records: impl Iterator<Item = &'a VersionRecord>) -> Option<&'a VersionRecord> {
    records.fold(None, |best, record| match best {
        Some(current)
            if version::compare(record.version(), current.version()) != Ordering::Greater =>
        {
            Some(current)
        }
        _ => Some(record),
    })
}
