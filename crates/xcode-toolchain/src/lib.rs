//! Xcode version discovery and selection
//!
//! This crate provides functionality to:
//! - Enumerate `Xcode*.app` bundles in an applications directory
//! - Read each bundle's version and release channel from its plists
//! - Build a catalog of installed versions, newest first
//! - Resolve a version specifier (`latest`, `latest-stable`, `<range>`, `<range>-beta`)
//! - Activate the chosen installation with `xcode-select`
//!
//! ```rust,no_run
//! use setup_xcode_toolchain::{resolve, VersionCatalog};
//! use std::path::Path;
//!
//! let catalog = VersionCatalog::build(Path::new("/Applications"))?;
//! if let Some(record) = resolve(&catalog, "latest-stable") {
//!     println!("{} at {}", record.version(), record.path().display());
//! }
//! # Ok::<(), setup_xcode_toolchain::XcodeError>(())
//! ```

pub mod activate;
pub mod catalog;
pub mod enumerate;
pub mod error;
pub mod metadata;
pub mod platform;
pub mod record;
pub mod resolve;
pub mod specifier;
pub mod version;

pub use activate::{Activation, Activator};
pub use catalog::{SkippedCandidate, VersionCatalog};
pub use error::{Result, XcodeError};
pub use metadata::{Extraction, SkipReason};
pub use record::{ReleaseType, VersionRecord};
pub use resolve::{resolve, resolve_specifier};
pub use specifier::Specifier;
