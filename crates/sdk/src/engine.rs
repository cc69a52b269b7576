//! Engine wiring — composes resolver, extractor, and session, owns the
//! click and navigation subscriptions for the lifetime of a mount, and
//! forwards finished records to the sink.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use clicktrail_core::sink::default_sink;
use clicktrail_core::{EventSink, TrailResult};

use crate::attributes::{extract, FilterPolicy, IncludeAllMode};
use crate::host::UiHost;
use crate::resolver::{resolve, DEFAULT_MEANINGFUL_TAGS};
use crate::session::TrackingSession;

/// Engine configuration. `Default` gives the stock policy: broad ignore
/// set, anchor/button targets, no prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Keep only attributes with this prefix (stripped from output keys).
    pub allow_prefix: Option<String>,
    /// Attribute-name prefixes to drop. Empty means the default ignore set.
    pub ignore_patterns: Vec<String>,
    pub include_all: IncludeAllMode,
    /// Tags that count as meaningful interaction targets.
    pub meaningful_tags: Vec<String>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            allow_prefix: None,
            ignore_patterns: Vec::new(),
            include_all: IncludeAllMode::Auto,
            meaningful_tags: DEFAULT_MEANINGFUL_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Emission counters for one mounted engine. Dropped clicks are resolution
/// misses — a normal outcome, counted for diagnostics only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineMetrics {
    pub page_views: u64,
    pub clicks_emitted: u64,
    pub clicks_dropped: u64,
}

#[derive(Default)]
struct MetricCells {
    page_views: Cell<u64>,
    clicks_emitted: Cell<u64>,
    clicks_dropped: Cell<u64>,
}

/// A mounted tracker instance.
///
/// [`attach`](TrackerEngine::attach) validates the policy, mints a session,
/// emits the initial page view, and subscribes to the host's click and
/// navigation streams; [`detach`](TrackerEngine::detach) (or drop) removes
/// both subscriptions together.
pub struct TrackerEngine<'h, H: UiHost> {
    host: &'h H,
    session: Rc<TrackingSession>,
    subscriptions: Option<(H::Subscription, H::Subscription)>,
    metrics: Rc<MetricCells>,
}

impl<'h, H: UiHost> TrackerEngine<'h, H> {
    /// Mount the engine on `host`. Attaching counts as the first navigation,
    /// so one page-view record for the current location is emitted before
    /// this returns.
    ///
    /// Fails with [`TrailError::Config`](clicktrail_core::TrailError::Config)
    /// when the filter policy violates a mutual-exclusion rule; no partial
    /// engine is created. With no `sink`, debug builds log records and
    /// release builds discard them.
    pub fn attach(
        host: &'h H,
        config: TrackerConfig,
        sink: Option<Arc<dyn EventSink>>,
    ) -> TrailResult<Self> {
        let policy = FilterPolicy::new(
            config.ignore_patterns,
            config.allow_prefix,
            config.include_all,
        )?;
        let sink = sink.unwrap_or_else(default_sink);
        let session = Rc::new(TrackingSession::new());
        let metrics = Rc::new(MetricCells::default());
        let location = Rc::new(RefCell::new(host.location()));

        info!(
            session_id = %session.id(),
            url = %location.borrow(),
            "tracker attached"
        );

        let first = session.record_page_view(location.borrow().as_str());
        sink.deliver(first)?;
        metrics.page_views.set(1);

        let nav_session = Rc::clone(&session);
        let nav_sink = Arc::clone(&sink);
        let nav_metrics = Rc::clone(&metrics);
        let nav_location = Rc::clone(&location);
        let navigation = host.subscribe_navigation(Box::new(move |url: &str| {
            *nav_location.borrow_mut() = url.to_string();
            let record = nav_session.record_page_view(url);
            debug!(url = %record.url, "page view");
            nav_sink.deliver(record)?;
            nav_metrics.page_views.set(nav_metrics.page_views.get() + 1);
            Ok(())
        }));

        let click_session = Rc::clone(&session);
        let click_sink = Arc::clone(&sink);
        let click_metrics = Rc::clone(&metrics);
        let click_location = Rc::clone(&location);
        let meaningful_tags = config.meaningful_tags;
        let clicks = host.subscribe_clicks(Box::new(move |target: Option<H::Element>| {
            let Some(meaningful) = resolve(target.as_ref(), &meaningful_tags) else {
                click_metrics.clicks_dropped.set(click_metrics.clicks_dropped.get() + 1);
                debug!("click without meaningful target dropped");
                return Ok(());
            };

            let attributes = extract(Some(&meaningful.element), &policy);
            let record = click_session.record_click(
                &meaningful.semantic_name,
                click_location.borrow().as_str(),
                &attributes,
            )?;
            debug!(
                event = %record.event,
                attribute_count = attributes.len(),
                "click captured"
            );
            click_sink.deliver(record)?;
            click_metrics.clicks_emitted.set(click_metrics.clicks_emitted.get() + 1);
            Ok(())
        }));

        Ok(Self {
            host,
            session,
            subscriptions: Some((clicks, navigation)),
            metrics,
        })
    }

    /// The session id stamped into every record this engine emits.
    pub fn session_id(&self) -> &str {
        self.session.id()
    }

    pub fn metrics(&self) -> EngineMetrics {
        EngineMetrics {
            page_views: self.metrics.page_views.get(),
            clicks_emitted: self.metrics.clicks_emitted.get(),
            clicks_dropped: self.metrics.clicks_dropped.get(),
        }
    }

    /// Unmount: remove both subscriptions. Notifications after this call
    /// cannot reach the engine's handlers.
    pub fn detach(mut self) {
        self.teardown();
        info!(session_id = %self.session.id(), "tracker detached");
    }

    fn teardown(&mut self) {
        if let Some((clicks, navigation)) = self.subscriptions.take() {
            self.host.unsubscribe(clicks);
            self.host.unsubscribe(navigation);
        }
    }
}

impl<'h, H: UiHost> Drop for TrackerEngine<'h, H> {
    fn drop(&mut self) {
        self.teardown();
    }
}
