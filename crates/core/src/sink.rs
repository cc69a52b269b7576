//! Event sink — trait for delivering completed telemetry records.
//!
//! The engine hands each finished [`EventRecord`] to an `Arc<dyn EventSink>`
//! supplied by the embedder. Delivery is synchronous; the engine applies no
//! retry or suppression, so a failing sink propagates straight back through
//! the notification handler that triggered it.

use crate::types::EventRecord;
use anyhow::Result;
use std::sync::{Arc, Mutex};
use tracing::debug;

pub trait EventSink: Send + Sync {
    fn deliver(&self, record: EventRecord) -> Result<()>;
}

/// Discards every record. The production default when no sink is configured.
pub struct NoOpSink;

impl EventSink for NoOpSink {
    fn deliver(&self, _record: EventRecord) -> Result<()> {
        Ok(())
    }
}

/// Writes each record to the diagnostic log. The debug-build default, so
/// developers observe synthesized events without wiring a real sink.
pub struct LogSink;

impl EventSink for LogSink {
    fn deliver(&self, record: EventRecord) -> Result<()> {
        debug!(
            session_id = %record.session_id,
            event = %record.event,
            url = %record.url,
            timestamp = %record.timestamp,
            attributes = ?record.attributes,
            "telemetry record"
        );
        Ok(())
    }
}

/// In-memory sink that captures records for testing.
#[derive(Default)]
pub struct CaptureSink {
    records: Mutex<Vec<EventRecord>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn records(&self) -> Vec<EventRecord> {
        self.records.lock().expect("sink mutex poisoned").clone()
    }

    pub fn count(&self) -> usize {
        self.records.lock().expect("sink mutex poisoned").len()
    }

    pub fn count_event(&self, event: &str) -> usize {
        self.records
            .lock()
            .expect("sink mutex poisoned")
            .iter()
            .filter(|r| r.event == event)
            .count()
    }

    pub fn clear(&self) {
        self.records.lock().expect("sink mutex poisoned").clear();
    }
}

impl EventSink for CaptureSink {
    fn deliver(&self, record: EventRecord) -> Result<()> {
        self.records.lock().expect("sink mutex poisoned").push(record);
        Ok(())
    }
}

/// Convenience: a no-op sink for embedders that want records discarded.
pub fn noop_sink() -> Arc<dyn EventSink> {
    Arc::new(NoOpSink)
}

/// Convenience: a capture sink for tests.
pub fn capture_sink() -> Arc<CaptureSink> {
    Arc::new(CaptureSink::new())
}

/// The sink used when the embedder configures none: diagnostic log in debug
/// builds, silent discard in release builds.
pub fn default_sink() -> Arc<dyn EventSink> {
    #[cfg(debug_assertions)]
    {
        Arc::new(LogSink)
    }
    #[cfg(not(debug_assertions))]
    {
        Arc::new(NoOpSink)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn make_record(event: &str) -> EventRecord {
        EventRecord {
            session_id: "00".repeat(16),
            url: "/pricing".into(),
            event: event.into(),
            timestamp: "2026-08-06T12:00:00.000Z".into(),
            attributes: None,
        }
    }

    #[test]
    fn test_capture_sink() {
        let sink = capture_sink();
        assert_eq!(sink.count(), 0);

        sink.deliver(make_record("pageview")).unwrap();
        sink.deliver(make_record("pageview")).unwrap();
        sink.deliver(make_record("linkclick")).unwrap();

        assert_eq!(sink.count(), 3);
        assert_eq!(sink.count_event("pageview"), 2);
        assert_eq!(sink.count_event("linkclick"), 1);

        let records = sink.records();
        assert_eq!(records[2].url, "/pricing");

        sink.clear();
        assert_eq!(sink.count(), 0);
    }

    #[test]
    fn test_noop_sink_never_errors() {
        let sink = noop_sink();
        assert!(sink.deliver(make_record("buttonclick")).is_ok());
    }

    #[test]
    fn test_log_sink_delivers() {
        let sink = LogSink;
        assert!(sink.deliver(make_record("pageview")).is_ok());
    }
}
