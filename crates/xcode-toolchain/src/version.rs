//! Semantic version helpers
//!
//! Xcode reports loose versions such as `14.2` or `15`. These are coerced
//! into strict `semver::Version`s for ordering, while range expressions use
//! the npm grammar (`^`, `~`, x-ranges, hyphen ranges, `||`) provided by
//! `node-semver`.

use once_cell::sync::Lazy;
use regex::Regex;
use semver::Version;
use std::cmp::Ordering;
use std::fmt;

/// Up to three numeric components, not embedded in a longer digit run
static COERCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^\d])(\d{1,16})(?:\.(\d{1,16}))?(?:\.(\d{1,16}))?(?:$|[^\d])")
        .expect("coerce pattern is valid")
});

/// Coerce a loose version string into a strict semantic version.
///
/// Missing minor and patch components become zero; leading noise and any
/// pre-release or build suffix are dropped.
pub fn coerce(input: &str) -> Option<Version> {
    let caps = COERCE_RE.captures(input)?;
    let component = |i: usize| -> Option<u64> {
        match caps.get(i) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };
    Some(Version::new(component(1)?, component(2)?, component(3)?))
}

/// Whether `input` is a strict, fully qualified semantic version
pub fn is_valid(input: &str) -> bool {
    Version::parse(input).is_ok()
}

/// Semantic version precedence
pub fn compare(a: &Version, b: &Version) -> Ordering {
    a.cmp(b)
}

/// `A - B` spanning a whole comparator set
static HYPHEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\S+)\s+-\s+(\S+)\s*$").expect("hyphen pattern is valid")
});

/// A comparator whose version may lack its minor or patch component
static PARTIAL_COMPARATOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(<=|>=|<|>)\s*v?(\d+)(?:\.(\d+|[xX*]))?(?:\.(\d+|[xX*]))?")
        .expect("partial comparator pattern is valid")
});

/// Rewrite range forms into the explicit comparators npm expands them to,
/// since `node-semver` reads some of them differently.
///
/// An empty comparator set means `*`. Partial versions in comparators are
/// widened to the whole release they name: `<=15.2` becomes `<15.3.0-0`,
/// `>15` becomes `>=16.0.0`. Hyphen ranges are rewritten as `>=A <=B` first.
fn desugar(expr: &str) -> String {
    expr.split("||")
        .map(|set| {
            let set = match HYPHEN_RE.captures(set) {
                Some(caps) => format!(">={} <={}", &caps[1], &caps[2]),
                None => set.trim().to_string(),
            };
            if set.is_empty() {
                return "*".to_string();
            }
            PARTIAL_COMPARATOR_RE
                .replace_all(&set, |caps: &regex::Captures| widen_comparator(caps))
                .into_owned()
        })
        .collect::<Vec<_>>()
        .join(" || ")
}

fn widen_comparator(caps: &regex::Captures) -> String {
    let numeric = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u64>().ok());
    let op = &caps[1];
    let major = numeric(2);
    let minor = numeric(3);
    // a wildcard minor makes the patch irrelevant
    let patch = if minor.is_some() { numeric(4) } else { None };

    let widened = match (major, minor, patch) {
        (_, _, Some(_)) | (None, _, _) => None,
        (Some(major), None, _) => match op {
            "<=" => major.checked_add(1).map(|next| format!("<{}.0.0-0", next)),
            "<" => Some(format!("<{}.0.0-0", major)),
            ">=" => Some(format!(">={}.0.0", major)),
            _ => major.checked_add(1).map(|next| format!(">={}.0.0", next)),
        },
        (Some(major), Some(minor), None) => match op {
            "<=" => minor
                .checked_add(1)
                .map(|next| format!("<{}.{}.0-0", major, next)),
            "<" => Some(format!("<{}.{}.0-0", major, minor)),
            ">=" => Some(format!(">={}.{}.0", major, minor)),
            _ => minor
                .checked_add(1)
                .map(|next| format!(">={}.{}.0", major, next)),
        },
    };
    widened.unwrap_or_else(|| caps[0].to_string())
}

/// A parsed npm-style range expression
#[derive(Debug, Clone)]
pub struct VersionRange {
    expr: String,
    range: node_semver::Range,
}

impl VersionRange {
    /// Parse a range expression such as `^15`, `~14.3.0`, `14.x || 15.0.0`
    ///
    /// The expression as written is kept for display.
    pub fn parse(expr: &str) -> Result<Self, node_semver::SemverError> {
        let range = node_semver::Range::parse(desugar(expr))?;
        Ok(Self {
            expr: expr.to_string(),
            range,
        })
    }

    /// Whether `version` falls within the range
    pub fn satisfies(&self, version: &Version) -> bool {
        match node_semver::Version::parse(version.to_string()) {
            Ok(v) => self.range.satisfies(&v),
            Err(_) => false,
        }
    }

    /// The expression as written
    pub fn as_str(&self) -> &str {
        &self.expr
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expr)
    }
}
