//! Human-readable debug rendering of decoded feeds.
//!
//! # Responsibility
//! - Present `evolution_core` values in a boxed, line-oriented layout.
//! - Stay read-only over the model; decoding never depends on this module.

use evolution_core::{
    Discussion, EvolutionDocument, Implementation, Issue, Person, Proposal, ProposalStatus,
    TrackingBug, UpcomingFeatureFlag, Version,
};
use std::collections::BTreeMap;

const SECTION_RULE: &str = "├ ─ ─ ─ ─ ─ ─ ─ ─";
const PROPOSAL_RULE: &str = "├ ─ ─ ─ ─";
const CLOSING_RULE: &str = "└────────";
const MISSING_LINK: &str = "empty or invalid URL";
const SUMMARY_MAX_CHARS: usize = 100;
const SHA_MAX_CHARS: usize = 5;

pub fn render_document(document: &EvolutionDocument) -> String {
    let value_indent = " ".repeat("implementation versions: ".len());
    let mut lines = vec![
        "┌── Evolution File".to_string(),
        format!("│ commit: {:?}", document.commit()),
        format!(
            "│ creationDate: {}",
            document.creation_date().format("%Y-%m-%d %H:%M:%S UTC")
        ),
        format!("│ schema version: {:?}", document.schema_version()),
        format!("│ tool version: {:?}", document.tool_version()),
        SECTION_RULE.to_string(),
    ];

    let groups = group_by_major(&document.implementation_versions_parsed());
    lines.push(format!(
        "│ implementation versions: {}",
        groups.join(&format!("\n│ {value_indent}"))
    ));
    lines.push(SECTION_RULE.to_string());

    let proposals = document.proposals();
    let range = match (proposals.first(), proposals.last()) {
        (Some(first), Some(last)) => format!(" ({:?} – {:?})", first.id, last.id),
        _ => String::new(),
    };
    lines.push(format!("│ proposals: {}{range}", proposals.len()));

    let undecodable = document.undecodable_proposals();
    let mut undecodable_line = format!("│ undecodable proposals: {}", undecodable.len());
    if !undecodable.is_empty() {
        undecodable_line.push(' ');
        undecodable_line.push_str(&undecodable.join(&format!(
            "\n│ {}",
            " ".repeat("undecodable proposals: ".len())
        )));
    }
    lines.push(undecodable_line);
    lines.push(CLOSING_RULE.to_string());
    lines.join("\n")
}

pub fn render_proposal(proposal: &Proposal) -> String {
    let mut out = ProposalLines::default();
    out.raw(format!("┌── Proposal {}", proposal.id));
    out.field("title", &proposal.title);
    out.field("summary", &truncate(&proposal.summary, SUMMARY_MAX_CHARS));
    out.field("link", &proposal.link);
    out.field("sha", &truncate(&proposal.sha, SHA_MAX_CHARS));
    out.raw(PROPOSAL_RULE);

    out.list("authors", proposal.authors.iter().map(render_person));
    out.list(
        "review managers",
        proposal.review_managers.iter().map(render_person),
    );
    out.field("status", &render_status(&proposal.status));
    out.raw(PROPOSAL_RULE);

    out.list(
        "discussions",
        proposal.discussions.iter().map(render_discussion),
    );
    if let Some(bugs) = &proposal.tracking_bugs {
        out.list("tracking bugs", bugs.iter().map(render_tracking_bug));
    }
    if let Some(implementation) = &proposal.implementation {
        out.list(
            "implementation",
            implementation.iter().map(render_implementation),
        );
    }
    if let Some(previous) = &proposal.previous_proposal_ids {
        out.field("previous proposal IDs", &previous.join(", "));
    }
    if let Some(flag) = &proposal.upcoming_feature_flag {
        out.field("upcoming feature flag", &render_feature_flag(flag));
    }

    if let Some(warnings) = &proposal.warnings {
        out.raw(PROPOSAL_RULE);
        out.issues("! warning", warnings);
    }
    if let Some(errors) = &proposal.errors {
        if proposal.warnings.is_none() {
            out.raw(PROPOSAL_RULE);
        }
        out.issues("! errors", errors);
    }
    out.raw(CLOSING_RULE);
    out.lines.join("\n")
}

/// Status label, with the review window for active reviews.
pub fn render_status(status: &ProposalStatus) -> String {
    match status.review_period() {
        Some(period) => format!(
            "{} {} – {}",
            status.label(),
            period.start().format("%B %-d, %Y"),
            period.end().format("%B %-d, %Y")
        ),
        None => match status {
            ProposalStatus::Implemented(tag) => format!("{} ({tag})", status.label()),
            _ => status.label().to_string(),
        },
    }
}

pub fn render_issue(issue: &Issue) -> String {
    [
        format!("{:?}", issue.kind),
        issue.code.to_string(),
        format!("{:?}", issue.message),
        format!("{:?}", issue.suggestion),
    ]
    .join(" | ")
}

pub fn render_feature_flag(flag: &UpcomingFeatureFlag) -> String {
    let mut parts = vec![flag.flag.clone()];
    if let Some(available) = &flag.available {
        parts.push(format!("available from: {available}"));
    }
    if let Some(mode) = &flag.enabled_in_language_mode {
        parts.push(format!("language mode: {mode}"));
    }
    parts.join(" | ")
}

#[derive(Default)]
struct ProposalLines {
    lines: Vec<String>,
}

impl ProposalLines {
    fn raw(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn field(&mut self, name: &str, value: &str) {
        self.lines.push(format!("│ {name}: {value}"));
    }

    /// Continuation lines align under the first value.
    fn list(&mut self, name: &str, values: impl Iterator<Item = String>) {
        let separator = format!("\n│   {}", " ".repeat(name.chars().count()));
        let joined = values.collect::<Vec<_>>().join(&separator);
        self.field(name, &joined);
    }

    fn issues(&mut self, label: &str, issues: &[Issue]) {
        let separator = format!("\n│ {}", " ".repeat(label.chars().count() + 2));
        let joined = issues
            .iter()
            .map(render_issue)
            .collect::<Vec<_>>()
            .join(&separator);
        self.lines.push(format!("│ {label}: {joined}"));
    }
}

fn render_person(person: &Person) -> String {
    render_named_link(&person.name, person.link.as_ref().map(|link| link.as_str()))
}

fn render_discussion(discussion: &Discussion) -> String {
    render_named_link(
        &discussion.name,
        discussion.link.as_ref().map(|link| link.as_str()),
    )
}

fn render_named_link(name: &str, link: Option<&str>) -> String {
    format!("{name} ({})", link.unwrap_or(MISSING_LINK))
}

fn render_tracking_bug(bug: &TrackingBug) -> String {
    format!("{} ({})", bug.id, bug.link)
}

fn render_implementation(implementation: &Implementation) -> String {
    format!(
        "{} {} on {}/{}",
        implementation.id, implementation.kind, implementation.account, implementation.repository
    )
}

/// One line per major version, versions ascending.
fn group_by_major(versions: &[Version]) -> Vec<String> {
    let mut groups: BTreeMap<u64, Vec<Version>> = BTreeMap::new();
    for version in versions {
        groups.entry(version.major()).or_default().push(*version);
    }
    groups
        .into_values()
        .map(|mut group| {
            group.sort();
            group
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut truncated = value.chars().take(max_chars).collect::<String>();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::{render_document, render_feature_flag, render_proposal, render_status, truncate};
    use evolution_core::{decode_from_str, ProposalStatus, UpcomingFeatureFlag, VersionTag};

    const FEED: &str = r#"{
        "commit": "abc",
        "creationDate": "2024-04-28T10:00:00Z",
        "schemaVersion": "1.0.0",
        "toolVersion": "1.0.2",
        "implementationVersions": ["4.2", "5.9", "5.10", "6.0", "Next"],
        "proposals": [
            {
                "id": "SE-0001",
                "title": "Keywords as argument labels",
                "summary": "Allow most keywords.",
                "link": "0001-keywords.md",
                "sha": "1234567890",
                "authors": [{"name": "Doug", "link": "https://github.com/DougGregor"}, {"name": "Anon"}],
                "reviewManagers": [],
                "status": {"state": "activeReview", "start": "2024-04-16", "end": "2024-04-29"},
                "discussions": [],
                "errors": [{"kind": "error", "message": "m", "suggestion": "s", "code": 3}]
            },
            {"id": "SE-0002", "status": {"state": "nope"}}
        ]
    }"#;

    #[test]
    fn document_rendering_lists_counts_and_grouped_versions() {
        let document = decode_from_str(FEED).unwrap();
        let rendered = render_document(&document);

        assert!(rendered.starts_with("┌── Evolution File"));
        assert!(rendered.contains("│ commit: \"abc\""));
        assert!(rendered.contains("│ implementation versions: 4.2\n│ "));
        assert!(rendered.contains("5.9 5.10"));
        assert!(rendered.contains("│ proposals: 1 (\"SE-0001\" – \"SE-0001\")"));
        assert!(rendered.contains("│ undecodable proposals: 1 SE-0002"));
        assert!(rendered.ends_with("└────────"));
    }

    #[test]
    fn proposal_rendering_truncates_and_marks_missing_links() {
        let document = decode_from_str(FEED).unwrap();
        let rendered = render_proposal(document.proposal("SE-0001").unwrap());

        assert!(rendered.contains("│ sha: 12345..."));
        assert!(rendered.contains("Anon (empty or invalid URL)"));
        assert!(rendered.contains("│ status: Active Review April 16, 2024 – April 29, 2024"));
        assert!(rendered.contains("│ ! errors: \"error\" | 3 | \"m\" | \"s\""));
        assert!(!rendered.contains("tracking bugs"));
    }

    #[test]
    fn status_rendering_includes_implemented_version() {
        let status = ProposalStatus::Implemented(VersionTag::from_text("5.9"));
        assert_eq!(render_status(&status), "Implemented (Swift\u{a0}5.9)");
        assert_eq!(render_status(&ProposalStatus::Rejected), "Rejected");
    }

    #[test]
    fn feature_flag_rendering_skips_absent_parts() {
        let flag = UpcomingFeatureFlag {
            flag: "StrictConcurrency".to_string(),
            enabled_in_language_mode: Some("6".to_string()),
            available: None,
        };
        assert_eq!(render_feature_flag(&flag), "StrictConcurrency | language mode: 6");
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("héllo", 5), "héllo");
        assert_eq!(truncate("héllo!", 5), "héllo...");
    }
}
