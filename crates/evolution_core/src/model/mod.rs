//! Typed model of the evolution proposal feed.
//!
//! # Responsibility
//! - Define immutable value types produced by the decoder.
//! - Own equality/ordering rules for versions and statuses.
//!
//! # Invariants
//! - Model values hold no shared mutable state.
//! - Timestamps are normalized to UTC.

pub mod document;
pub mod link;
pub mod proposal;
pub mod status;
pub mod version;
pub mod version_tag;

/// Absolute instant with any feed offset resolved to UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
