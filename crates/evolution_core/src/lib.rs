//! Resilient decoder for the language evolution proposal feed.
//! Produces a strongly typed model from semi-structured JSON, isolating
//! malformed proposals instead of failing the whole document.

pub mod decode;
pub mod logging;
pub mod model;

pub use decode::date::{parse_review_period, parse_timestamp};
pub use decode::guard::{decode_tolerant, TolerantDecode, UNKNOWN_RECORD_ID};
pub use decode::status::StatusError;
pub use decode::{
    decode, decode_from_str, encode, encode_pretty, DateError, DecodeError, DecodeResult,
    EncodeError, EncodeResult,
};
pub use logging::{default_log_level, init_logging, logging_status, LogConfig, LoggingError};
pub use model::document::EvolutionDocument;
pub use model::link::Link;
pub use model::proposal::{
    Discussion, Implementation, Issue, IssueSeverity, Person, Proposal, TrackingBug,
    UpcomingFeatureFlag,
};
pub use model::status::{ProposalStatus, ReviewPeriod};
pub use model::version::{Version, VersionParseError};
pub use model::version_tag::VersionTag;
pub use model::Timestamp;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
