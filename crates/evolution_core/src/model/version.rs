//! Loosely formatted numeric versions.
//!
//! # Responsibility
//! - Extract the first `major[.minor[.patch]]` run from free text.
//! - Define equality and ordering for versions with missing components.
//!
//! # Invariants
//! - `major` is always present.
//! - Missing `minor`/`patch` render as absent but compare as `0`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

static VERSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]+)(?:\.([0-9]+)(?:\.([0-9]+))?)?").expect("version pattern is a valid regex")
});

/// Structured version value, e.g. `5`, `5.9` or `5.9.1`.
#[derive(Debug, Clone, Copy)]
pub struct Version {
    major: u64,
    minor: Option<u64>,
    patch: Option<u64>,
}

impl Version {
    /// Parses the first numeric version run found anywhere in `input`.
    ///
    /// Text before and after the run is ignored, so `"Swift 5.9"` and
    /// `"v5.9.1-beta"` both match. Returns `None` when `input` contains no
    /// digit run or when `major` does not fit in a `u64`.
    ///
    /// An overflowing `minor`/`patch` component is dropped instead of
    /// rejecting the whole match.
    pub fn parse(input: &str) -> Option<Self> {
        let captures = VERSION_PATTERN.captures(input)?;
        let major = captures.get(1)?.as_str().parse::<u64>().ok()?;
        let minor = captures
            .get(2)
            .and_then(|value| value.as_str().parse::<u64>().ok());
        let patch = captures
            .get(3)
            .and_then(|value| value.as_str().parse::<u64>().ok());

        Some(Self {
            major,
            minor,
            patch,
        })
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> Option<u64> {
        self.minor
    }

    pub fn patch(&self) -> Option<u64> {
        self.patch
    }

    fn comparison_key(&self) -> (u64, u64, u64) {
        (
            self.major,
            self.minor.unwrap_or(0),
            self.patch.unwrap_or(0),
        )
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.comparison_key() == other.comparison_key()
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.comparison_key().hash(state);
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    /// Lexicographic: major, then minor, then patch.
    fn cmp(&self, other: &Self) -> Ordering {
        self.comparison_key().cmp(&other.comparison_key())
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.major)?;
        if let Some(minor) = self.minor {
            write!(f, ".{minor}")?;
        }
        if let Some(patch) = self.patch {
            write!(f, ".{patch}")?;
        }
        Ok(())
    }
}

/// Returned by [`Version::from_str`] when the input holds no version run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionParseError {
    pub input: String,
}

impl Display for VersionParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "no version found in `{}`", self.input)
    }
}

impl Error for VersionParseError {}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| VersionParseError {
            input: s.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Version;
    use std::collections::HashSet;

    fn v(input: &str) -> Version {
        Version::parse(input).expect("fixture should parse")
    }

    #[test]
    fn parse_captures_only_present_components() {
        let major_only = v("5");
        assert_eq!(major_only.major(), 5);
        assert_eq!(major_only.minor(), None);
        assert_eq!(major_only.patch(), None);

        let full = v("5.9.1");
        assert_eq!(full.minor(), Some(9));
        assert_eq!(full.patch(), Some(1));
    }

    #[test]
    fn parse_ignores_surrounding_text() {
        let parsed = v("v5.9.1-beta");
        assert_eq!(
            (parsed.major(), parsed.minor(), parsed.patch()),
            (5, Some(9), Some(1))
        );
        assert_eq!(v("Swift 6").to_string(), "6");
    }

    #[test]
    fn parse_rejects_text_without_digits() {
        assert!(Version::parse("").is_none());
        assert!(Version::parse("Next").is_none());
        assert!("none".parse::<Version>().is_err());
    }

    #[test]
    fn trailing_dot_is_not_part_of_the_match() {
        let parsed = v("5.");
        assert_eq!(parsed.minor(), None);
        assert_eq!(parsed.to_string(), "5");
    }

    #[test]
    fn overflowing_major_is_no_match() {
        assert!(Version::parse("99999999999999999999999").is_none());
    }

    #[test]
    fn hash_agrees_with_zero_defaulting_equality() {
        let set: HashSet<Version> = [v("5"), v("5.0"), v("5.0.0")].into_iter().collect();
        assert_eq!(set.len(), 1);
    }
}
