//! Release tag attached to implemented proposals.

use super::version::Version;
use std::fmt::{Display, Formatter};

const NEXT_KEYWORD: &str = "next";
const LANGUAGE_NAME: &str = "Swift";
const NBSP: char = '\u{00a0}';

/// Release a proposal shipped in, derived from free text.
///
/// Construction never fails: unrecognized text becomes `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionTag {
    Unknown,
    Specific(Version),
    /// Unreleased "next" version.
    Next,
}

impl VersionTag {
    /// Derives a tag from raw text.
    ///
    /// A numeric version anywhere in `raw` wins over the `next` keyword, which
    /// is matched case-insensitively after trimming.
    pub fn from_text(raw: &str) -> Self {
        if let Some(version) = Version::parse(raw) {
            return Self::Specific(version);
        }
        if raw.trim().to_lowercase().contains(NEXT_KEYWORD) {
            return Self::Next;
        }
        Self::Unknown
    }

    pub fn version(&self) -> Option<Version> {
        match self {
            Self::Specific(version) => Some(*version),
            Self::Unknown | Self::Next => None,
        }
    }

    /// Human label such as `Swift 5.9` (no-break space), `None` when unknown.
    pub fn version_description(&self) -> Option<String> {
        match self {
            Self::Unknown => None,
            Self::Specific(version) => Some(format!("{LANGUAGE_NAME}{NBSP}{version}")),
            Self::Next => Some(format!("{LANGUAGE_NAME}{NBSP}Next")),
        }
    }

    /// Text written to the `version` field on encode.
    ///
    /// Feeding it back through [`VersionTag::from_text`] yields the same tag.
    pub fn wire_text(&self) -> String {
        match self {
            Self::Unknown => String::new(),
            Self::Specific(version) => version.to_string(),
            Self::Next => "Next".to_string(),
        }
    }
}

impl From<&str> for VersionTag {
    fn from(value: &str) -> Self {
        Self::from_text(value)
    }
}

impl Display for VersionTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.version_description() {
            Some(description) => f.write_str(&description),
            None => f.write_str("unknown"),
        }
    }
}
