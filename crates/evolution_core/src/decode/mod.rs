//! Resilient decoding of the evolution feed.
//!
//! # Responsibility
//! - Turn raw feed bytes into an [`EvolutionDocument`](crate::EvolutionDocument) and back.
//! - Separate fatal document-level errors from per-record failures.
//!
//! # Invariants
//! - Only document-level field errors abort a decode.
//! - Record-level failures surface as data (the undecodable id list).

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod date;
mod document;
pub mod guard;
pub mod status;

pub use date::DateError;
pub use document::{decode, decode_from_str, encode, encode_pretty};

pub type DecodeResult<T> = Result<T, DecodeError>;
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Fatal document-level decode error.
#[derive(Debug)]
pub enum DecodeError {
    /// Invalid JSON, or a required top-level field missing or mistyped.
    MalformedScalar(serde_json::Error),
    /// `creationDate` matched no accepted format.
    InvalidDate(DateError),
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedScalar(err) => write!(f, "malformed evolution document: {err}"),
            Self::InvalidDate(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MalformedScalar(err) => Some(err),
            Self::InvalidDate(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(value: serde_json::Error) -> Self {
        Self::MalformedScalar(value)
    }
}

impl From<DateError> for DecodeError {
    fn from(value: DateError) -> Self {
        Self::InvalidDate(value)
    }
}

#[derive(Debug)]
pub struct EncodeError(serde_json::Error);

impl Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to encode evolution document: {}", self.0)
    }
}

impl Error for EncodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl From<serde_json::Error> for EncodeError {
    fn from(value: serde_json::Error) -> Self {
        Self(value)
    }
}
