use setup_xcode_core::error::{Error as CoreError, ErrorCode, ErrorReport};
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, XcodeError>;

#[derive(Error, Debug)]
pub enum XcodeError {
    #[error("This task is intended only for macOS platform. It can't be run on '{0}' platform")]
    UnsupportedPlatform(String),

    #[error("Failed to read applications directory {}: {source}", .path.display())]
    ApplicationsDirUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Could not find Xcode version that satisfied version spec: '{spec}' (no Xcode installations found in '{}')",
        .dir.display()
    )]
    NoInstallations { spec: String, dir: PathBuf },

    #[error("Could not find Xcode version that satisfied version spec: '{0}'")]
    VersionNotFound(String),

    #[error("Invalid version: Directory '{}' doesn't exist", .0.display())]
    InvalidVersion(PathBuf),

    #[error("Failed to switch to Xcode at {}: {message}", .path.display())]
    ActivationFailed {
        path: PathBuf,
        message: String,
        exit_code: Option<i32>,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl XcodeError {
    /// Error code used for reporting and exit status
    pub fn code(&self) -> ErrorCode {
        match self {
            XcodeError::UnsupportedPlatform(_) => ErrorCode::UnsupportedPlatform,
            XcodeError::ApplicationsDirUnreadable { source, .. } => match source.kind() {
                std::io::ErrorKind::NotFound => ErrorCode::DirectoryNotFound,
                std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
                _ => ErrorCode::IoError,
            },
            XcodeError::NoInstallations { .. } | XcodeError::VersionNotFound(_) => {
                ErrorCode::XcodeNotFound
            }
            XcodeError::InvalidVersion(_) | XcodeError::ActivationFailed { .. } => {
                ErrorCode::XcodeError
            }
            XcodeError::Core(err) => err.code,
        }
    }

    /// Process exit code for the pipeline step
    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }

    /// Serializable form for `--format json` output
    pub fn to_report(&self) -> ErrorReport {
        if let XcodeError::Core(err) = self {
            return err.to_report();
        }
        let code = self.code();
        ErrorReport {
            code,
            code_str: code.to_string(),
            category: code.category().to_string(),
            message: self.to_string(),
            context: None,
            suggestion: None,
            source: std::error::Error::source(self).map(|e| e.to_string()),
        }
    }
}
