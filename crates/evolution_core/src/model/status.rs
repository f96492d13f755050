//! Proposal review status.
//!
//! # Invariants
//! - `ActiveReview` periods always satisfy `start < end`.
//! - Wire shape is `{state, start?, end?, version?}`; see `decode::status`.

use super::version_tag::VersionTag;
use super::Timestamp;
use crate::decode::status::{decode_status, encode_status, StatusFields};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Half-open review window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReviewPeriod {
    start: Timestamp,
    end: Timestamp,
}

impl ReviewPeriod {
    /// Returns `None` unless `start < end`.
    pub fn new(start: Timestamp, end: Timestamp) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    pub fn start(&self) -> &Timestamp {
        &self.start
    }

    pub fn end(&self) -> &Timestamp {
        &self.end
    }
}

/// Lifecycle state of a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProposalStatus {
    AwaitingReview,
    ScheduledForReview,
    /// Review window is `None` when the feed gave no usable dates.
    ActiveReview(Option<ReviewPeriod>),
    ReturnedForRevision,
    Withdrawn,
    Accepted,
    AcceptedWithRevisions,
    Rejected,
    Implemented(VersionTag),
    Previewing,
}

impl ProposalStatus {
    /// Wire discriminator written to the `state` field.
    pub fn state_key(&self) -> &'static str {
        match self {
            Self::AwaitingReview => "awaitingReview",
            Self::ScheduledForReview => "scheduledForReview",
            Self::ActiveReview(_) => "activeReview",
            Self::ReturnedForRevision => "returnedForRevision",
            Self::Withdrawn => "withdrawn",
            Self::Accepted => "accepted",
            Self::AcceptedWithRevisions => "acceptedWithRevisions",
            Self::Rejected => "rejected",
            Self::Implemented(_) => "implemented",
            Self::Previewing => "previewing",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::AwaitingReview => "Awaiting Review",
            Self::ScheduledForReview => "Scheduled for Review",
            Self::ActiveReview(_) => "Active Review",
            Self::ReturnedForRevision => "Returned for Revision",
            Self::Withdrawn => "Withdrawn",
            Self::Accepted => "Accepted",
            Self::AcceptedWithRevisions => "Accepted with Revisions",
            Self::Rejected => "Rejected",
            Self::Implemented(_) => "Implemented",
            Self::Previewing => "Previewing",
        }
    }

    /// Long-form description of what the state means for a proposal.
    pub fn explanation(&self) -> &'static str {
        match self {
            Self::AwaitingReview => "The proposal is awaiting review. Once known, the dates for the actual review will be placed in the proposal document. When the review period begins, the review manager will update the state to Active\u{a0}review.",
            Self::ScheduledForReview => "The public review of the proposal in the Swift forums has been scheduled for the specified date\u{a0}range.",
            Self::ActiveReview(_) => "The proposal is undergoing public review in the Swift forums. The review will continue through the specified date\u{a0}range.",
            Self::ReturnedForRevision => "The proposal has been returned from review for additional revision to the current\u{a0}draft.",
            Self::Withdrawn => "The proposal has been withdrawn by the original\u{a0}submitter.",
            Self::Accepted => "The proposal has been accepted and is either awaiting implementation or is actively being\u{a0}implemented.",
            Self::AcceptedWithRevisions => "The proposal has been accepted, contingent upon the inclusion of one or more\u{a0}revisions.",
            Self::Rejected => "The proposal has been considered and\u{a0}rejected.",
            Self::Implemented(_) => "The proposal has been implemented.",
            Self::Previewing => "The proposal has been accepted and is available for preview in the Standard Library Preview\u{a0}package.",
        }
    }

    pub fn review_period(&self) -> Option<&ReviewPeriod> {
        match self {
            Self::ActiveReview(period) => period.as_ref(),
            _ => None,
        }
    }

    pub fn implemented_version(&self) -> Option<&VersionTag> {
        match self {
            Self::Implemented(tag) => Some(tag),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for ProposalStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = StatusFields::deserialize(deserializer)?;
        decode_status(&fields).map_err(serde::de::Error::custom)
    }
}

impl Serialize for ProposalStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        encode_status(self).serialize(serializer)
    }
}
