//! Evolution proposal record and its nested entities.
//!
//! # Responsibility
//! - Mirror one element of the feed's `proposals` array.
//! - Keep optional feed sections distinguishable from empty ones.
//!
//! # Invariants
//! - `id` (`SE-NNNN`) is the natural key; uniqueness is assumed, not enforced.
//! - Optional sections are omitted on encode when absent.

use super::link::Link;
use super::status::ProposalStatus;
use serde::{Deserialize, Deserializer, Serialize};

/// One language-change proposal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    /// `SE-NNNN`, e.g. `SE-0147`.
    pub id: String,
    pub title: String,
    pub summary: String,
    /// Path of the proposal document inside the evolution repository.
    pub link: String,
    /// SHA of the latest update to the proposal's Markdown file.
    pub sha: String,
    pub authors: Vec<Person>,
    pub review_managers: Vec<Person>,
    pub status: ProposalStatus,
    pub discussions: Vec<Discussion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_bugs: Option<Vec<TrackingBug>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation: Option<Vec<Implementation>>,
    /// IDs of proposals that form a line of succession to this one.
    #[serde(
        rename = "previousProposalIDs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub previous_proposal_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upcoming_feature_flag: Option<UpcomingFeatureFlag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<Issue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<Issue>>,
}

impl Proposal {
    /// Creates a proposal with all optional sections absent.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        status: ProposalStatus,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: String::new(),
            link: String::new(),
            sha: String::new(),
            authors: Vec::new(),
            review_managers: Vec::new(),
            status,
            discussions: Vec::new(),
            tracking_bugs: None,
            implementation: None,
            previous_proposal_ids: None,
            upcoming_feature_flag: None,
            warnings: None,
            errors: None,
        }
    }
}

/// Author or review manager.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    /// `None` when the feed link is missing, empty or not a URL reference.
    #[serde(
        default,
        deserialize_with = "deserialize_link",
        skip_serializing_if = "Option::is_none"
    )]
    pub link: Option<Link>,
}

/// Forum thread related to a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Discussion {
    /// `Pitch`, `Review`, `Acceptance`, ...
    pub name: String,
    #[serde(
        default,
        deserialize_with = "deserialize_link",
        skip_serializing_if = "Option::is_none"
    )]
    pub link: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackingBug {
    pub id: String,
    pub assignee: String,
    pub link: String,
    pub radar: String,
    pub resolution: String,
    pub status: String,
    pub title: String,
    pub updated: String,
}

/// Pull request or commit implementing a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Implementation {
    /// `commit` or `pull`.
    #[serde(rename = "type")]
    pub kind: String,
    pub account: String,
    pub repository: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingFeatureFlag {
    pub flag: String,
    /// Language mode in which the feature is always enabled, if announced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_in_language_mode: Option<String>,
    /// Release the flag became available in, when it differs from the
    /// implementation release.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<String>,
}

/// Feed-generator diagnostic attached to a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Issue {
    pub kind: String,
    /// What is wrong.
    pub message: String,
    /// How to address it.
    pub suggestion: String,
    /// Unique across warnings and errors.
    pub code: i64,
}

/// Which list an [`Issue`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueSeverity {
    Warning,
    Error,
}

fn deserialize_link<'de, D>(deserializer: D) -> Result<Option<Link>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Link::parse))
}
