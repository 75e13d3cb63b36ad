//! Switching the host's active developer directory

use crate::error::{Result, XcodeError};
use crate::record::VersionRecord;
use setup_xcode_core::config::XcodeConfig;
use setup_xcode_core::error::ErrorCode;
use setup_xcode_core::process::{command_exists, run_argv};
use std::path::PathBuf;

/// Runs the select command for a resolved record
#[derive(Debug, Clone)]
pub struct Activator {
    select_command: Vec<String>,
    sdk_root_env: String,
}

/// What a successful activation changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub path: PathBuf,
    /// Variable to export to later pipeline steps, and its value
    pub export: (String, String),
}

impl Activator {
    pub fn new(select_command: Vec<String>, sdk_root_env: impl Into<String>) -> Self {
        Self {
            select_command,
            sdk_root_env: sdk_root_env.into(),
        }
    }

    pub fn from_config(config: &XcodeConfig) -> Self {
        Self::new(config.select_command.clone(), config.sdk_root_env.clone())
    }

    /// Make `record` the active Xcode.
    ///
    /// The path is re-checked first since the catalog may be stale.
    pub fn activate(&self, record: &VersionRecord) -> Result<Activation> {
        let path = record.path();
        if !path.exists() {
            return Err(XcodeError::InvalidVersion(path.to_path_buf()));
        }

        if let Some(program) = self.select_command.first() {
            if !command_exists(program) {
                return Err(XcodeError::ActivationFailed {
                    path: path.to_path_buf(),
                    message: format!("select command '{}' not found in PATH", program),
                    exit_code: None,
                });
            }
        }

        let path_arg = path.to_string_lossy();
        tracing::info!(version = %record.version(), path = %path.display(), "switching Xcode");

        let result = run_argv(&self.select_command, &[path_arg.as_ref()]).map_err(|e| {
            if e.code == ErrorCode::ConfigError {
                XcodeError::Core(e)
            } else {
                XcodeError::ActivationFailed {
                    path: path.to_path_buf(),
                    message: e.message.clone(),
                    exit_code: None,
                }
            }
        })?;

        if !result.success {
            let stderr = result.stderr.trim();
            let message = if stderr.is_empty() {
                format!("select command exited with code {}", result.exit_code)
            } else {
                format!(
                    "select command exited with code {}: {}",
                    result.exit_code, stderr
                )
            };
            return Err(XcodeError::ActivationFailed {
                path: path.to_path_buf(),
                message,
                exit_code: Some(result.exit_code),
            });
        }

        Ok(Activation {
            path: path.to_path_buf(),
            export: (self.sdk_root_env.clone(), path_arg.into_owned()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ReleaseType;
    use semver::Version;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    fn record_at(path: PathBuf) -> VersionRecord {
        VersionRecord::new(Version::new(15, 0, 0), None, ReleaseType::Gm, path)
    }

    #[test]
    fn test_missing_path_is_invalid_version() {
        let dir = tempfile::tempdir().unwrap();
        let activator = Activator::new(argv(&["true"]), "MD_APPLE_SDK_ROOT");

        let err = activator
            .activate(&record_at(dir.path().join("Xcode_gone.app")))
            .unwrap_err();
        assert!(matches!(err, XcodeError::InvalidVersion(_)));
        assert!(err.to_string().contains("Xcode_gone.app"));
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_activation_exports_path() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = dir.path().join("Xcode_15.0.app");
        std::fs::create_dir(&bundle).unwrap();

        let activator = Activator::new(argv(&["true"]), "MD_APPLE_SDK_ROOT");
        let activation = activator.activate(&record_at(bundle.clone())).unwrap();

        assert_eq!(activation.path, bundle);
        assert_eq!(
            activation.export,
            ("MD_APPLE_SDK_ROOT".to_string(), bundle.display().to_string())
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_select_command_receives_path() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = dir.path().join("Xcode_15.0.app");
        std::fs::create_dir(&bundle).unwrap();
        let marker = dir.path().join("selected");

        let script = format!("printf '%s' \"$1\" > '{}'", marker.display());
        let activator = Activator::new(argv(&["sh", "-c", &script, "sh"]), "DEVELOPER_DIR");
        activator.activate(&record_at(bundle.clone())).unwrap();

        assert_eq!(
            std::fs::read_to_string(marker).unwrap(),
            bundle.display().to_string()
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_command_is_activation_error() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = dir.path().join("Xcode_15.0.app");
        std::fs::create_dir(&bundle).unwrap();

        let activator = Activator::new(
            argv(&["sh", "-c", "echo 'permission denied' >&2; exit 1", "sh"]),
            "MD_APPLE_SDK_ROOT",
        );
        let err = activator.activate(&record_at(bundle)).unwrap_err();
        match err {
            XcodeError::ActivationFailed {
                exit_code, message, ..
            } => {
                assert_eq!(exit_code, Some(1));
                assert!(message.contains("permission denied"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_empty_select_command_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let activator = Activator::new(Vec::new(), "MD_APPLE_SDK_ROOT");
        let err = activator
            .activate(&record_at(dir.path().to_path_buf()))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConfigError);
    }

    #[test]
    fn test_missing_select_program() {
        let dir = tempfile::tempdir().unwrap();
        let activator = Activator::new(argv(&["nonexistent_select_12345"]), "MD_APPLE_SDK_ROOT");
        let err = activator
            .activate(&record_at(dir.path().to_path_buf()))
            .unwrap_err();
        assert!(matches!(err, XcodeError::ActivationFailed { exit_code: None, .. }));
        assert!(err.to_string().contains("nonexistent_select_12345"));
    }
}
