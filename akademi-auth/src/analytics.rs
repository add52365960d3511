//! Fire-and-forget usage analytics.
//!
//! Hooks called from page rendering and the video player. The contract is
//! strict: accept the payload, return nothing, never fail and never block —
//! rendering must not depend on telemetry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// A single analytics event payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum AnalyticsEvent {
    /// A page was shown.
    PageView {
        /// Page name, e.g. `dashboard.html`.
        page: String,
    },
    /// Playback progressed within a module video.
    VideoProgress {
        /// The module being watched.
        module_id: String,
        /// Seconds watched so far.
        progress_secs: f64,
        /// Total video length in seconds.
        duration_secs: f64,
    },
    /// A module was finished.
    ModuleComplete {
        /// The completed module.
        module_id: String,
    },
}

/// A timestamped event as a sink receives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedEvent {
    /// When the event was recorded.
    pub at: DateTime<Utc>,
    /// The payload.
    #[serde(flatten)]
    pub event: AnalyticsEvent,
}

/// Destination for analytics events. Implementations must be infallible.
pub trait AnalyticsSink: Send + Sync {
    /// Accepts one event. Must not fail, block, or panic.
    fn record(&self, event: &RecordedEvent);
}

/// Sink that writes events to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl AnalyticsSink for LogSink {
    fn record(&self, event: &RecordedEvent) {
        debug!(target: "akademi::analytics", event = ?event.event, "analytics event");
    }
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl AnalyticsSink for NoopSink {
    fn record(&self, _event: &RecordedEvent) {}
}

/// The analytics entry points the rest of the client calls.
pub struct Analytics {
    sink: Arc<dyn AnalyticsSink>,
}

impl Analytics {
    /// Creates an analytics front end over the given sink.
    pub fn new(sink: Arc<dyn AnalyticsSink>) -> Self {
        Self { sink }
    }

    /// Analytics that log locally and go nowhere else.
    #[must_use]
    pub fn logging() -> Self {
        Self::new(Arc::new(LogSink))
    }

    /// Analytics that drop everything.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(Arc::new(NoopSink))
    }

    /// Records a page view.
    pub fn page_view(&self, page: &str) {
        self.emit(AnalyticsEvent::PageView {
            page: page.to_string(),
        });
    }

    /// Records video playback progress.
    pub fn video_progress(&self, module_id: &str, progress_secs: f64, duration_secs: f64) {
        self.emit(AnalyticsEvent::VideoProgress {
            module_id: module_id.to_string(),
            progress_secs,
            duration_secs,
        });
    }

    /// Records a module completion.
    pub fn module_complete(&self, module_id: &str) {
        self.emit(AnalyticsEvent::ModuleComplete {
            module_id: module_id.to_string(),
        });
    }

    fn emit(&self, event: AnalyticsEvent) {
        self.sink.record(&RecordedEvent {
            at: Utc::now(),
            event,
        });
    }
}
