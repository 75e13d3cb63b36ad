//! Core utilities for the setup-xcode pipeline step
//!
//! This crate provides the plumbing shared by the toolchain library and the
//! binary:
//!
//! - **Error handling**: errors with codes, context, recovery suggestions and exit codes
//! - **Process execution**: captured command execution for `xcode-select`
//! - **Configuration**: TOML-based configuration with defaults
//! - **Pipeline**: step outputs, exported variables and annotations for the CI runner
//!
//! # Example
//!
//! ```rust,no_run
//! use setup_xcode_core::{config::Config, pipeline::Pipeline};
//!
//! let config = Config::load(None).expect("config");
//! let pipeline = Pipeline::from_env();
//! pipeline
//!     .set_output("path", &config.schema.xcode.applications_dir.display().to_string())
//!     .expect("output");
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod pipeline;
pub mod process;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema, XcodeConfig};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::pipeline::Pipeline;
    pub use crate::process::{run_argv, run_command, CommandResult};
}
