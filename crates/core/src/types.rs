//! Shared telemetry record types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Normalized descriptive attributes of a clicked element. Sorted map so
/// the JSON encoding of a record's `attributes` field is deterministic.
pub type AttributeMap = BTreeMap<String, String>;

/// A completed telemetry record, handed to the sink and then discarded.
///
/// Field names follow the wire contract exactly: camelCase keys, and the
/// `attributes` key is omitted entirely for events that carry none (page
/// views). `attributes` is a JSON-encoded [`AttributeMap`] kept as a flat
/// string so the record stays transport-agnostic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub session_id: String,
    pub url: String,
    /// `"pageview"`, or `"<semantic name>click"` (e.g. `"linkclick"`).
    pub event: String,
    /// ISO-8601 UTC with millisecond precision.
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<String>,
}
