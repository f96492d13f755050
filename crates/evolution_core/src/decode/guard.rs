//! Tolerant collection decoding.
//!
//! # Responsibility
//! - Decode array elements independently so one bad record cannot sink the batch.
//! - Recover a best-effort identifier for every element that failed.
//!
//! # Invariants
//! - Both output lists keep the relative input order.
//! - An element lands in exactly one of the two lists.

use log::warn;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Identifier recorded when a failed element has no readable `id`.
pub const UNKNOWN_RECORD_ID: &str = "unknown";

/// Outcome of decoding a collection element by element.
#[derive(Debug, Clone, PartialEq)]
pub struct TolerantDecode<T> {
    pub decoded: Vec<T>,
    /// Identifiers of the elements that failed, or [`UNKNOWN_RECORD_ID`].
    pub failed_ids: Vec<String>,
}

impl<T> Default for TolerantDecode<T> {
    fn default() -> Self {
        Self {
            decoded: Vec::new(),
            failed_ids: Vec::new(),
        }
    }
}

/// Identifier-only view of a record.
#[derive(Deserialize)]
struct RecordId {
    #[serde(default)]
    id: Option<String>,
}

/// Decodes every element of `elements` as `T`.
///
/// Only JSON objects are records; any other element fails with id
/// [`UNKNOWN_RECORD_ID`]. A failing object is retried as an identifier-only
/// record against the same raw value; if that also fails its id is
/// [`UNKNOWN_RECORD_ID`].
pub fn decode_tolerant<T>(elements: &[Value]) -> TolerantDecode<T>
where
    T: DeserializeOwned,
{
    let mut outcome = TolerantDecode::default();
    for (index, element) in elements.iter().enumerate() {
        if !element.is_object() {
            warn!(
                "event=record_decode module=decode status=error index={} id={} error=record is not an object",
                index, UNKNOWN_RECORD_ID
            );
            outcome.failed_ids.push(UNKNOWN_RECORD_ID.to_string());
            continue;
        }
        match T::deserialize(element) {
            Ok(value) => outcome.decoded.push(value),
            Err(err) => {
                let id = recover_id(element);
                warn!(
                    "event=record_decode module=decode status=error index={} id={} error={}",
                    index, id, err
                );
                outcome.failed_ids.push(id);
            }
        }
    }
    outcome
}

fn recover_id(element: &Value) -> String {
    RecordId::deserialize(element)
        .ok()
        .and_then(|record| record.id)
        .unwrap_or_else(|| UNKNOWN_RECORD_ID.to_string())
}
