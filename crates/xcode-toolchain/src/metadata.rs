//! Reading `version.plist` and `LicenseInfo.plist` from an Xcode bundle

use crate::record::{ReleaseType, VersionRecord};
use crate::version;
use plist::{Dictionary, Value};
use std::fmt;
use std::path::{Path, PathBuf};

/// Version descriptor, relative to the bundle root
pub const VERSION_PLIST: &str = "Contents/version.plist";

/// License descriptor, relative to the bundle root
pub const LICENSE_PLIST: &str = "Contents/Resources/LicenseInfo.plist";

const SHORT_VERSION_KEY: &str = "CFBundleShortVersionString";
const BUILD_VERSION_KEY: &str = "ProductBuildVersion";
const LICENSE_TYPE_KEY: &str = "licenseType";

/// Outcome of inspecting one candidate bundle
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Found(VersionRecord),
    Skipped(SkipReason),
}

/// Why a candidate produced no record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// `version.plist` does not exist; not an Xcode install
    MissingFile(PathBuf),
    /// `version.plist` exists but could not be parsed
    ParseError { path: PathBuf, message: String },
    /// The short version string is absent or not coercible
    InvalidVersion(Option<String>),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingFile(path) => write!(f, "missing {}", path.display()),
            SkipReason::ParseError { path, message } => {
                write!(f, "cannot parse {}: {}", path.display(), message)
            }
            SkipReason::InvalidVersion(Some(raw)) => write!(f, "invalid version '{}'", raw),
            SkipReason::InvalidVersion(None) => write!(f, "no {}", SHORT_VERSION_KEY),
        }
    }
}

/// Inspect a bundle and build its record.
///
/// Per-candidate problems never escape as errors: they are reported as
/// [`Extraction::Skipped`] so one broken install cannot hide the others.
pub fn extract(bundle: &Path) -> Extraction {
    let version_path = bundle.join(VERSION_PLIST);
    let version_info = match read_plist(&version_path) {
        Ok(Some(dict)) => dict,
        Ok(None) => return Extraction::Skipped(SkipReason::MissingFile(version_path)),
        Err(message) => {
            return Extraction::Skipped(SkipReason::ParseError {
                path: version_path,
                message,
            });
        }
    };

    let raw_version = string_field(&version_info, SHORT_VERSION_KEY);
    let Some(version) = raw_version.as_deref().and_then(version::coerce) else {
        return Extraction::Skipped(SkipReason::InvalidVersion(raw_version));
    };

    let build_number = string_field(&version_info, BUILD_VERSION_KEY);
    let release_type = read_release_type(bundle);

    Extraction::Found(VersionRecord::new(
        version,
        build_number,
        release_type,
        bundle,
    ))
}

/// Missing or unreadable license info classifies as `Unknown`
fn read_release_type(bundle: &Path) -> ReleaseType {
    let license_path = bundle.join(LICENSE_PLIST);
    match read_plist(&license_path) {
        Ok(Some(dict)) => {
            ReleaseType::from_license_type(string_field(&dict, LICENSE_TYPE_KEY).as_deref())
        }
        Ok(None) => ReleaseType::Unknown,
        Err(message) => {
            tracing::warn!(
                path = %license_path.display(),
                error = %message,
                "ignoring unreadable license info"
            );
            ReleaseType::Unknown
        }
    }
}

/// `Ok(None)` when the file does not exist
fn read_plist(path: &Path) -> Result<Option<Dictionary>, String> {
    if !path.is_file() {
        return Ok(None);
    }
    let value = Value::from_file(path).map_err(|e| e.to_string())?;
    value
        .into_dictionary()
        .map(Some)
        .ok_or_else(|| "top-level value is not a dictionary".to_string())
}

/// Read a scalar as a string, stringifying numbers and booleans
fn string_field(dict: &Dictionary, key: &str) -> Option<String> {
    let value = dict.get(key)?;
    if let Some(s) = value.as_string() {
        return Some(s.to_string());
    }
    if let Some(n) = value.as_signed_integer() {
        return Some(n.to_string());
    }
    if let Some(n) = value.as_unsigned_integer() {
        return Some(n.to_string());
    }
    if let Some(n) = value.as_real() {
        return Some(n.to_string());
    }
    value.as_boolean().map(|b| b.to_string())
}
