//! CLI utilities for setup-xcode
//!
//! Provides shared CLI functionality:
//! - Status messages
//! - Count formatting

#![warn(missing_docs)]

pub mod output;
