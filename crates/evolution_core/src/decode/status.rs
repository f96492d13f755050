//! Discriminated decoding for the proposal `status` object.
//!
//! # Responsibility
//! - Read the `state` discriminator, then only the fields that variant uses.
//! - Keep "key absent" and "key present with null" distinct.
//!
//! # Invariants
//! - `activeReview` never fails; unusable dates yield a `None` period.
//! - `implemented` requires the `version` key, though its value may be null.

use super::date::{format_review_period, parse_review_period};
use crate::model::status::ProposalStatus;
use crate::model::version_tag::VersionTag;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

const STATE_KEY: &str = "state";
const START_KEY: &str = "start";
const END_KEY: &str = "end";
const VERSION_KEY: &str = "version";

/// Raw status object: every value must be a string or null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusFields(BTreeMap<String, Option<String>>);

/// Three-state view of one status field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Absent,
    Null,
    Text(&'a str),
}

impl StatusFields {
    pub fn field(&self, key: &str) -> FieldValue<'_> {
        match self.0.get(key) {
            None => FieldValue::Absent,
            Some(None) => FieldValue::Null,
            Some(Some(value)) => FieldValue::Text(value.as_str()),
        }
    }

    fn set(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), Some(value.into()));
    }
}

/// Per-record status decoding failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusError {
    /// `state` key is absent or null.
    MissingState,
    UnknownState(String),
    /// `implemented` status without a `version` key.
    MissingVersion,
}

impl Display for StatusError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingState => write!(f, "status is missing `state`"),
            Self::UnknownState(state) => write!(f, "unknown status state `{state}`"),
            Self::MissingVersion => {
                write!(f, "implemented status is missing implementation `version`")
            }
        }
    }
}

impl Error for StatusError {}

/// Decodes a status from its raw fields.
///
/// # Errors
/// - [`StatusError::MissingState`] when there is no usable discriminator.
/// - [`StatusError::UnknownState`] for discriminators outside the known set.
/// - [`StatusError::MissingVersion`] for `implemented` without `version`.
pub fn decode_status(fields: &StatusFields) -> Result<ProposalStatus, StatusError> {
    let state = match fields.field(STATE_KEY) {
        FieldValue::Text(state) => state,
        FieldValue::Absent | FieldValue::Null => return Err(StatusError::MissingState),
    };

    let status = match state {
        "awaitingReview" => ProposalStatus::AwaitingReview,
        "scheduledForReview" => ProposalStatus::ScheduledForReview,
        "activeReview" => {
            let period = match (fields.field(START_KEY), fields.field(END_KEY)) {
                (FieldValue::Text(start), FieldValue::Text(end)) => {
                    parse_review_period(start, end)
                }
                _ => None,
            };
            ProposalStatus::ActiveReview(period)
        }
        "returnedForRevision" => ProposalStatus::ReturnedForRevision,
        "withdrawn" => ProposalStatus::Withdrawn,
        "accepted" => ProposalStatus::Accepted,
        "acceptedWithRevisions" => ProposalStatus::AcceptedWithRevisions,
        "rejected" => ProposalStatus::Rejected,
        "implemented" => {
            let raw = match fields.field(VERSION_KEY) {
                FieldValue::Absent => return Err(StatusError::MissingVersion),
                FieldValue::Null => "",
                FieldValue::Text(version) => version,
            };
            ProposalStatus::Implemented(VersionTag::from_text(raw))
        }
        "previewing" => ProposalStatus::Previewing,
        other => return Err(StatusError::UnknownState(other.to_string())),
    };
    Ok(status)
}

/// Rebuilds the wire fields for `status`.
///
/// `start`/`end` are omitted when an active review has no period.
pub fn encode_status(status: &ProposalStatus) -> StatusFields {
    let mut fields = StatusFields::default();
    fields.set(STATE_KEY, status.state_key());
    match status {
        ProposalStatus::ActiveReview(Some(period)) => {
            let (start, end) = format_review_period(period);
            fields.set(START_KEY, start);
            fields.set(END_KEY, end);
        }
        ProposalStatus::Implemented(tag) => fields.set(VERSION_KEY, tag.wire_text()),
        _ => {}
    }
    fields
}
