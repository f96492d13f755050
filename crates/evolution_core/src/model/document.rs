//! Top-level evolution feed document.
//!
//! # Invariants
//! - `proposals` holds only fully decoded records.
//! - `undecodable_proposals` is populated by decoding only and never encoded.

use super::proposal::{Issue, IssueSeverity, Proposal, UpcomingFeatureFlag};
use super::version::Version;
use super::Timestamp;

/// Decoded evolution feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvolutionDocument {
    commit: String,
    creation_date: Timestamp,
    schema_version: String,
    tool_version: String,
    implementation_versions: Vec<String>,
    proposals: Vec<Proposal>,
    undecodable_proposals: Vec<String>,
}

impl EvolutionDocument {
    /// Builds a document with an empty undecodable list.
    pub fn new(
        commit: impl Into<String>,
        creation_date: Timestamp,
        schema_version: impl Into<String>,
        tool_version: impl Into<String>,
        implementation_versions: Vec<String>,
        proposals: Vec<Proposal>,
    ) -> Self {
        Self {
            commit: commit.into(),
            creation_date,
            schema_version: schema_version.into(),
            tool_version: tool_version.into(),
            implementation_versions,
            proposals,
            undecodable_proposals: Vec::new(),
        }
    }

    pub(crate) fn with_undecodable(mut self, undecodable_proposals: Vec<String>) -> Self {
        self.undecodable_proposals = undecodable_proposals;
        self
    }

    /// Evolution repository commit the feed was generated from.
    pub fn commit(&self) -> &str {
        &self.commit
    }

    pub fn creation_date(&self) -> &Timestamp {
        &self.creation_date
    }

    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    /// Version of the extraction tool that produced the feed.
    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }

    /// Unique implemented versions as published, lowest to highest.
    pub fn implementation_versions(&self) -> &[String] {
        &self.implementation_versions
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    /// Identifiers of records that failed to decode, in feed order.
    pub fn undecodable_proposals(&self) -> &[String] {
        &self.undecodable_proposals
    }

    pub fn proposal(&self, id: &str) -> Option<&Proposal> {
        self.proposals.iter().find(|proposal| proposal.id == id)
    }

    /// Implementation versions that parse as [`Version`]; others are skipped.
    pub fn implementation_versions_parsed(&self) -> Vec<Version> {
        self.implementation_versions
            .iter()
            .filter_map(|raw| Version::parse(raw))
            .collect()
    }

    pub fn upcoming_feature_flags(&self) -> impl Iterator<Item = (&str, &UpcomingFeatureFlag)> {
        self.proposals.iter().filter_map(|proposal| {
            proposal
                .upcoming_feature_flag
                .as_ref()
                .map(|flag| (proposal.id.as_str(), flag))
        })
    }

    /// Warnings then errors per proposal, in proposal order.
    pub fn issues(&self) -> impl Iterator<Item = (&str, IssueSeverity, &Issue)> {
        self.proposals.iter().flat_map(|proposal| {
            let id = proposal.id.as_str();
            let warnings = proposal
                .warnings
                .iter()
                .flatten()
                .map(move |issue| (id, IssueSeverity::Warning, issue));
            let errors = proposal
                .errors
                .iter()
                .flatten()
                .map(move |issue| (id, IssueSeverity::Error, issue));
            warnings.chain(errors)
        })
    }
}
