//! Subcommand dispatch.

use crate::error::CliError;
use crate::render::{render_document, render_feature_flag, render_issue, render_proposal};
use crate::source::{ByteSource, InputSource};
use clap::Subcommand;
use evolution_core::{decode, encode, encode_pretty, EvolutionDocument, IssueSeverity};
use log::info;
use std::io::Write;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print a summary of the whole feed.
    Summary {
        #[arg(help = "Feed JSON path, or - for stdin")]
        input: String,
    },
    /// Print one proposal.
    Show {
        #[arg(help = "Feed JSON path, or - for stdin")]
        input: String,
        #[arg(help = "Proposal identifier, e.g. SE-0401")]
        id: String,
    },
    /// List identifiers of proposals that failed to decode.
    Failures {
        #[arg(help = "Feed JSON path, or - for stdin")]
        input: String,
    },
    /// List warnings and errors reported for proposals.
    Issues {
        #[arg(help = "Feed JSON path, or - for stdin")]
        input: String,
    },
    /// List upcoming feature flags.
    Flags {
        #[arg(help = "Feed JSON path, or - for stdin")]
        input: String,
    },
    /// Re-encode the decoded feed as JSON.
    Encode {
        #[arg(help = "Feed JSON path, or - for stdin")]
        input: String,
        #[arg(long, help = "Pretty-print the output")]
        pretty: bool,
    },
}

impl Command {
    fn input(&self) -> &str {
        match self {
            Self::Summary { input }
            | Self::Show { input, .. }
            | Self::Failures { input }
            | Self::Issues { input }
            | Self::Flags { input }
            | Self::Encode { input, .. } => input,
        }
    }
}

/// Loads the feed named by `command` and writes the command output to `out`.
pub fn run(command: &Command, out: &mut impl Write) -> Result<(), CliError> {
    let document = load(&InputSource::from_arg(command.input()))?;

    match command {
        Command::Summary { .. } => writeln!(out, "{}", render_document(&document))?,
        Command::Show { id, .. } => {
            let proposal = document
                .proposal(id)
                .ok_or_else(|| CliError::ProposalNotFound(id.clone()))?;
            writeln!(out, "{}", render_proposal(proposal))?;
        }
        Command::Failures { .. } => {
            for id in document.undecodable_proposals() {
                writeln!(out, "{id}")?;
            }
        }
        Command::Issues { .. } => {
            for (id, severity, issue) in document.issues() {
                let label = match severity {
                    IssueSeverity::Warning => "warning",
                    IssueSeverity::Error => "error",
                };
                writeln!(out, "{id} {label}: {}", render_issue(issue))?;
            }
        }
        Command::Flags { .. } => {
            for (id, flag) in document.upcoming_feature_flags() {
                writeln!(out, "{id} {}", render_feature_flag(flag))?;
            }
        }
        Command::Encode { pretty, .. } => {
            let bytes = if *pretty {
                encode_pretty(&document)?
            } else {
                encode(&document)?
            };
            out.write_all(&bytes)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn load(source: &impl ByteSource) -> Result<EvolutionDocument, CliError> {
    let bytes = source.read_bytes().map_err(|error| CliError::Read {
        source_name: source.describe(),
        error,
    })?;
    info!(
        "event=feed_load module=cli status=ok source={} bytes={}",
        source.describe(),
        bytes.len()
    );
    Ok(decode(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::{run, Command};
    use crate::error::CliError;
    use std::io::Write;

    const FEED: &str = r#"{
        "commit": "abc",
        "creationDate": "2024-04-28T10:00:00+00:00",
        "schemaVersion": "1.0.0",
        "toolVersion": "1.0.2",
        "implementationVersions": ["5.9"],
        "proposals": [
            {
                "id": "SE-0010",
                "title": "Flagged",
                "summary": "",
                "link": "0010.md",
                "sha": "abc",
                "authors": [],
                "reviewManagers": [],
                "status": {"state": "implemented", "version": "5.9"},
                "discussions": [],
                "upcomingFeatureFlag": {"flag": "BareSlashRegex", "enabledInLanguageMode": "6"},
                "warnings": [{"kind": "warning", "message": "m", "suggestion": "s", "code": 1}]
            },
            {"id": "SE-0011", "status": {"state": "implemented"}},
            "garbage"
        ]
    }"#;

    fn feed_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FEED.as_bytes()).unwrap();
        file
    }

    fn run_to_string(command: Command) -> Result<String, CliError> {
        let mut out = Vec::new();
        run(&command, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn input(file: &tempfile::NamedTempFile) -> String {
        file.path().to_str().unwrap().to_string()
    }

    #[test]
    fn failures_lists_ids_in_feed_order() {
        let file = feed_file();
        let output = run_to_string(Command::Failures {
            input: input(&file),
        })
        .unwrap();
        assert_eq!(output, "SE-0011\nunknown\n");
    }

    #[test]
    fn flags_and_issues_are_listed_per_proposal() {
        let file = feed_file();
        let flags = run_to_string(Command::Flags {
            input: input(&file),
        })
        .unwrap();
        assert_eq!(flags, "SE-0010 BareSlashRegex | language mode: 6\n");

        let issues = run_to_string(Command::Issues {
            input: input(&file),
        })
        .unwrap();
        assert_eq!(
            issues,
            "SE-0010 warning: \"warning\" | 1 | \"m\" | \"s\"\n"
        );
    }

    #[test]
    fn show_reports_missing_proposal() {
        let file = feed_file();
        let err = run_to_string(Command::Show {
            input: input(&file),
            id: "SE-9999".to_string(),
        })
        .unwrap_err();
        assert!(matches!(err, CliError::ProposalNotFound(ref id) if id == "SE-9999"));
    }

    #[test]
    fn encode_drops_undecodable_records() {
        let file = feed_file();
        let output = run_to_string(Command::Encode {
            input: input(&file),
            pretty: false,
        })
        .unwrap();
        let reencoded = evolution_core::decode_from_str(output.trim_end()).unwrap();
        assert_eq!(reencoded.proposals().len(), 1);
        assert!(reencoded.undecodable_proposals().is_empty());
    }

    #[test]
    fn unreadable_input_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = run_to_string(Command::Summary {
            input: missing.to_str().unwrap().to_string(),
        })
        .unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
    }
}
