//! Session identity and record assembly — one random id per mounted engine,
//! stamped into every record it emits.

use chrono::{DateTime, SecondsFormat, Utc};
use rand::rngs::OsRng;
use rand::RngCore;

use clicktrail_core::{AttributeMap, EventRecord, TrailResult};

/// Correlation scope for one mounted engine instance.
///
/// The id is 16 bytes from the OS secure RNG rendered as lowercase hex.
/// It is immutable for the instance's lifetime; a fresh mount gets a fresh
/// id (this is not a durable cross-reload session).
#[derive(Debug, Clone)]
pub struct TrackingSession {
    id: String,
    created_at: DateTime<Utc>,
}

impl TrackingSession {
    pub fn new() -> Self {
        let mut bytes = [0u8; 16];
        OsRng.fill_bytes(&mut bytes);
        Self {
            id: hex::encode(bytes),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Page-view record for `url`: fixed event name, no attributes.
    pub fn record_page_view(&self, url: &str) -> EventRecord {
        EventRecord {
            session_id: self.id.clone(),
            url: url.to_string(),
            event: "pageview".to_string(),
            timestamp: now_timestamp(),
            attributes: None,
        }
    }

    /// Click record: event name is `<semantic_name>click`; the attribute
    /// map is JSON-encoded into the record's flat `attributes` string.
    pub fn record_click(
        &self,
        semantic_name: &str,
        url: &str,
        attributes: &AttributeMap,
    ) -> TrailResult<EventRecord> {
        Ok(EventRecord {
            session_id: self.id.clone(),
            url: url.to_string(),
            event: format!("{semantic_name}click"),
            timestamp: now_timestamp(),
            attributes: Some(serde_json::to_string(attributes)?),
        })
    }
}

impl Default for TrackingSession {
    fn default() -> Self {
        Self::new()
    }
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_is_lowercase_hex() {
        let session = TrackingSession::new();
        assert_eq!(session.id().len(), 32);
        assert!(session.id().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_sessions_are_independent() {
        let a = TrackingSession::new();
        let b = TrackingSession::new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_page_views_share_session_id() {
        let session = TrackingSession::new();
        let first = session.record_page_view("/");
        let second = session.record_page_view("/pricing");

        assert_eq!(first.session_id, second.session_id);
        assert_eq!(first.event, "pageview");
        assert!(first.attributes.is_none());
        assert_eq!(second.url, "/pricing");

        // Timestamps are stamped per record and must parse as RFC 3339 UTC.
        for record in [&first, &second] {
            let parsed = DateTime::parse_from_rfc3339(&record.timestamp).unwrap();
            assert_eq!(parsed.offset().local_minus_utc(), 0);
            assert!(record.timestamp.ends_with('Z'));
        }
    }

    #[test]
    fn test_click_record_encodes_attributes() {
        let session = TrackingSession::new();
        let mut attributes = AttributeMap::new();
        attributes.insert("data-action".into(), "buy".into());

        let record = session.record_click("button", "/checkout", &attributes).unwrap();
        assert_eq!(record.event, "buttonclick");
        assert_eq!(record.url, "/checkout");
        assert_eq!(record.attributes.as_deref(), Some(r#"{"data-action":"buy"}"#));
    }

    #[test]
    fn test_empty_attribute_map_encodes_as_empty_object() {
        let session = TrackingSession::new();
        let record = session.record_click("link", "/", &AttributeMap::new()).unwrap();
        assert_eq!(record.attributes.as_deref(), Some("{}"));
    }
}
