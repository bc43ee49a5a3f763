//! Fire-and-forget analytics. Events are stamped with the emission time and
//! current path, then handed to a sink. Delivery is best-effort and
//! at-most-once: a sink failure is logged and swallowed, never surfaced,
//! because analytics must not be able to break the page.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Well-known event actions.
pub mod actions {
    pub const CLICK: &str = "click";
    pub const VIEW: &str = "view";
    pub const SUBMIT: &str = "submit";
    pub const SCROLL: &str = "scroll";
    pub const ERROR: &str = "error";
}

/// Well-known event categories.
pub mod categories {
    pub const NAVIGATION: &str = "navigation";
    pub const HERO: &str = "hero";
    pub const PROPERTY: &str = "property";
    pub const CTA: &str = "cta";
    pub const FORM: &str = "form";
    pub const FOOTER: &str = "footer";
    pub const ENGAGEMENT: &str = "engagement";
}

/// An event as described by the caller. Extra context fields ride along in
/// the free-form map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub action: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    #[serde(flatten)]
    pub context: BTreeMap<String, Value>,
}

impl AnalyticsEvent {
    pub fn new(action: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            category: category.into(),
            label: None,
            value: None,
            context: BTreeMap::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_context(mut self, key: impl Into<String>, value: Value) -> Self {
        self.context.insert(key.into(), value);
        self
    }
}

/// An event after metadata stamping, as delivered to the sink.
#[derive(Debug, Clone, Serialize)]
pub struct StampedEvent {
    #[serde(flatten)]
    pub event: AnalyticsEvent,
    pub timestamp: i64,
    pub url: String,
}

#[derive(Debug, thiserror::Error)]
#[error("analytics sink rejected event: {0}")]
pub struct SinkError(pub String);

/// Delivery capability. The default implementation logs through `tracing`;
/// a real telemetry backend can be substituted without touching call sites.
pub trait AnalyticsSink: Send + Sync {
    fn emit(&self, event: &StampedEvent) -> Result<(), SinkError>;
}

/// Sink that writes events to the service log.
#[derive(Debug, Default, Clone)]
pub struct ConsoleSink;

impl AnalyticsSink for ConsoleSink {
    fn emit(&self, event: &StampedEvent) -> Result<(), SinkError> {
        let payload = serde_json::to_string(event)
            .unwrap_or_else(|err| format!("{{\"unserializable\":\"{err}\"}}"));
        tracing::info!(
            target: "analytics",
            action = %event.event.action.to_uppercase(),
            %payload,
            "analytics event"
        );
        Ok(())
    }
}

/// Sink that records delivered events, for tests and the CLI demo.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<StampedEvent>>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<StampedEvent> {
        self.events.lock().expect("recording sink mutex poisoned").clone()
    }
}

impl AnalyticsSink for RecordingSink {
    fn emit(&self, event: &StampedEvent) -> Result<(), SinkError> {
        let mut guard = self.events.lock().expect("recording sink mutex poisoned");
        guard.push(event.clone());
        Ok(())
    }
}

/// Stamps and forwards events to the configured sink.
#[derive(Clone)]
pub struct EventTracker {
    sink: Arc<dyn AnalyticsSink>,
}

impl EventTracker {
    pub fn new(sink: Arc<dyn AnalyticsSink>) -> Self {
        Self { sink }
    }

    /// Track a single event from the given page path. Infallible by design:
    /// malformed events are dropped and sink failures swallowed, both at
    /// debug level.
    pub fn track(&self, event: AnalyticsEvent, current_path: &str) {
        if event.action.trim().is_empty() || event.category.trim().is_empty() {
            tracing::debug!(
                action = %event.action,
                category = %event.category,
                "dropping analytics event with empty action or category"
            );
            return;
        }

        let stamped = StampedEvent {
            event,
            timestamp: Utc::now().timestamp_millis(),
            url: current_path.to_string(),
        };

        if let Err(err) = self.sink.emit(&stamped) {
            tracing::debug!(%err, "analytics sink failure swallowed");
        }
    }
}
