//! Web link attached to people and discussions.
//!
//! # Invariants
//! - A `Link` is never empty and never contains whitespace.
//! - Encoding writes back the exact (trimmed) feed text.

use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};
use url::{ParseError, Url};

/// Placeholder base used only to check that a relative reference resolves.
const RESOLUTION_BASE: &str = "https://link.invalid/";

/// Absolute URL, or a reference relative to wherever the feed is hosted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Link {
    Absolute(Url),
    Relative(String),
}

impl Link {
    /// `None` for empty text, text with whitespace, or text that is not a
    /// URL reference.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() || raw.chars().any(char::is_whitespace) {
            return None;
        }
        match Url::parse(raw) {
            Ok(url) => Some(Self::Absolute(url)),
            Err(ParseError::RelativeUrlWithoutBase) => Url::parse(RESOLUTION_BASE)
                .and_then(|base| base.join(raw))
                .ok()
                .map(|_| Self::Relative(raw.to_string())),
            Err(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Absolute(url) => url.as_str(),
            Self::Relative(reference) => reference,
        }
    }

    pub fn url(&self) -> Option<&Url> {
        match self {
            Self::Absolute(url) => Some(url),
            Self::Relative(_) => None,
        }
    }
}

impl Display for Link {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
