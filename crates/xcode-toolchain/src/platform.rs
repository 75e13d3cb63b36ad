//! Host platform guard

use crate::error::{Result, XcodeError};

/// Fail unless running on macOS
pub fn ensure_macos() -> Result<()> {
    check_platform(std::env::consts::OS)
}

/// Fail unless `os` (a `std::env::consts::OS` value) is macOS
pub fn check_platform(os: &str) -> Result<()> {
    if os == "macos" {
        Ok(())
    } else {
        Err(XcodeError::UnsupportedPlatform(os.to_string()))
    }
}
