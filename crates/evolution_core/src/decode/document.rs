//! Document-level decode/encode entry points.

use super::date::{format_timestamp, parse_timestamp};
use super::guard::decode_tolerant;
use super::{DecodeError, DecodeResult, EncodeResult};
use crate::model::document::EvolutionDocument;
use crate::model::proposal::Proposal;
use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Wire shape read before per-record decoding.
///
/// Proposals stay raw so each one can fail on its own.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    commit: String,
    creation_date: String,
    schema_version: String,
    tool_version: String,
    implementation_versions: Vec<String>,
    proposals: Vec<Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentWire<'a> {
    commit: &'a str,
    creation_date: String,
    schema_version: &'a str,
    tool_version: &'a str,
    implementation_versions: &'a [String],
    proposals: &'a [Proposal],
}

/// Decodes an evolution feed from UTF-8 JSON bytes.
///
/// # Errors
/// - [`DecodeError::MalformedScalar`] for invalid JSON or bad top-level fields.
/// - [`DecodeError::InvalidDate`] when `creationDate` is unparseable.
///
/// Malformed proposals never fail the call; their ids are listed in
/// [`EvolutionDocument::undecodable_proposals`].
pub fn decode(bytes: &[u8]) -> DecodeResult<EvolutionDocument> {
    let started_at = Instant::now();
    info!(
        "event=document_decode module=decode status=start bytes={}",
        bytes.len()
    );

    match decode_inner(bytes) {
        Ok(document) => {
            info!(
                "event=document_decode module=decode status=ok duration_ms={} proposals={} undecodable={}",
                started_at.elapsed().as_millis(),
                document.proposals().len(),
                document.undecodable_proposals().len()
            );
            Ok(document)
        }
        Err(err) => {
            error!(
                "event=document_decode module=decode status=error duration_ms={} error_code={} error={}",
                started_at.elapsed().as_millis(),
                error_code(&err),
                err
            );
            Err(err)
        }
    }
}

/// Same as [`decode`] for already-loaded text.
pub fn decode_from_str(input: &str) -> DecodeResult<EvolutionDocument> {
    decode(input.as_bytes())
}

/// Encodes `document` as compact JSON.
///
/// The undecodable id list is not part of the output.
pub fn encode(document: &EvolutionDocument) -> EncodeResult<Vec<u8>> {
    Ok(serde_json::to_vec(&to_wire(document))?)
}

pub fn encode_pretty(document: &EvolutionDocument) -> EncodeResult<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(&to_wire(document))?)
}

fn decode_inner(bytes: &[u8]) -> DecodeResult<EvolutionDocument> {
    let raw: RawDocument = serde_json::from_slice(bytes)?;
    let creation_date = parse_timestamp(&raw.creation_date)?;
    let records = decode_tolerant::<Proposal>(&raw.proposals);

    Ok(EvolutionDocument::new(
        raw.commit,
        creation_date,
        raw.schema_version,
        raw.tool_version,
        raw.implementation_versions,
        records.decoded,
    )
    .with_undecodable(records.failed_ids))
}

fn to_wire(document: &EvolutionDocument) -> DocumentWire<'_> {
    DocumentWire {
        commit: document.commit(),
        creation_date: format_timestamp(document.creation_date()),
        schema_version: document.schema_version(),
        tool_version: document.tool_version(),
        implementation_versions: document.implementation_versions(),
        proposals: document.proposals(),
    }
}

fn error_code(err: &DecodeError) -> &'static str {
    match err {
        DecodeError::MalformedScalar(_) => "malformed_scalar",
        DecodeError::InvalidDate(_) => "invalid_date",
    }
}
