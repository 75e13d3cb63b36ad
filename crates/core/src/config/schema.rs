//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Directory scanned for `Xcode*.app` bundles when nothing else is configured
pub const DEFAULT_APPLICATIONS_DIR: &str = "/Applications";

/// Variable exported to later pipeline steps with the selected developer dir
pub const DEFAULT_SDK_ROOT_ENV: &str = "MD_APPLE_SDK_ROOT";

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigSchema {
    #[serde(default)]
    pub xcode: XcodeConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Xcode discovery and activation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct XcodeConfig {
    /// Directory whose direct children are scanned for Xcode bundles
    #[serde(default = "default_applications_dir")]
    pub applications_dir: PathBuf,

    /// Name of the environment variable exported with the selected path
    #[serde(default = "default_sdk_root_env")]
    pub sdk_root_env: String,

    /// Command used to switch the active developer directory.
    /// The selected bundle path is appended as the last argument.
    #[serde(default = "default_select_command")]
    pub select_command: Vec<String>,
}

impl Default for XcodeConfig {
    fn default() -> Self {
        Self {
            applications_dir: default_applications_dir(),
            sdk_root_env: default_sdk_root_env(),
            select_command: default_select_command(),
        }
    }
}

fn default_applications_dir() -> PathBuf {
    PathBuf::from(DEFAULT_APPLICATIONS_DIR)
}

fn default_sdk_root_env() -> String {
    DEFAULT_SDK_ROOT_ENV.to_string()
}

fn default_select_command() -> Vec<String> {
    vec!["sudo", "xcode-select", "-s"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON log lines instead of the compact format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
