//! The `xcode-version` input grammar
//!
//! ```text
//! latest            newest installed version, any channel
//! latest-stable     newest GM version
//! <range>-beta      newest non-GM version satisfying <range>
//! <range>           newest GM version satisfying <range>
//! ```
//!
//! Tokens are matched exactly: no trimming, case-sensitive.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

pub const LATEST: &str = "latest";
pub const LATEST_STABLE: &str = "latest-stable";
pub const BETA_SUFFIX: &str = "-beta";

/// A parsed version specifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Specifier {
    Latest,
    LatestStable,
    /// A range expression restricted to one stability channel
    Range { expr: String, stable: bool },
}

impl Specifier {
    pub fn parse(raw: &str) -> Self {
        match raw {
            LATEST => Specifier::Latest,
            LATEST_STABLE => Specifier::LatestStable,
            _ => match raw.strip_suffix(BETA_SUFFIX) {
                Some(expr) => Specifier::Range {
                    expr: expr.to_string(),
                    stable: false,
                },
                None => Specifier::Range {
                    expr: raw.to_string(),
                    stable: true,
                },
            },
        }
    }
}

impl FromStr for Specifier {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Specifier::Latest => f.write_str(LATEST),
            Specifier::LatestStable => f.write_str(LATEST_STABLE),
            Specifier::Range { expr, stable: true } => f.write_str(expr),
            Specifier::Range {
                expr,
                stable: false,
            } => write!(f, "{}{}", expr, BETA_SUFFIX),
        }
    }
}
