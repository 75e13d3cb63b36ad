//! Normalized description of one installed Xcode

use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Release channel of an installation, read from its license metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReleaseType {
    /// Final ("Gold Master") release
    #[serde(rename = "GM")]
    Gm,
    Beta,
    Unknown,
}

impl ReleaseType {
    /// Classify a raw `licenseType` value
    pub fn from_license_type(license_type: Option<&str>) -> Self {
        match license_type {
            Some(raw) if !raw.is_empty() => {
                if raw.to_lowercase().contains("beta") {
                    ReleaseType::Beta
                } else {
                    ReleaseType::Gm
                }
            }
            _ => ReleaseType::Unknown,
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReleaseType::Gm => "GM",
            ReleaseType::Beta => "Beta",
            ReleaseType::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// One valid Xcode installation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionRecord {
    version: Version,
    #[serde(skip_serializing_if = "Option::is_none")]
    build_number: Option<String>,
    release_type: ReleaseType,
    stable: bool,
    path: PathBuf,
}

impl VersionRecord {
    pub fn new(
        version: Version,
        build_number: Option<String>,
        release_type: ReleaseType,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            version,
            build_number,
            release_type,
            stable: release_type == ReleaseType::Gm,
            path: path.into(),
        }
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Opaque build identifier such as `15A240d`
    pub fn build_number(&self) -> Option<&str> {
        self.build_number.as_deref()
    }

    pub fn release_type(&self) -> ReleaseType {
        self.release_type
    }

    /// True only for GM releases
    pub fn is_stable(&self) -> bool {
        self.stable
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for VersionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)?;
        if let Some(build) = &self.build_number {
            write!(f, " ({})", build)?;
        }
        if !self.stable {
            write!(f, " [{}]", self.release_type)?;
        }
        Ok(())
    }
}
