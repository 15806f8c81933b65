//! Audit record capture
//!
//! Installs a thread-local `tracing` subscriber that keeps every event
//! emitted on the engine's audit target. `#[tokio::test]` runs on a
//! current-thread runtime, so the guard covers the whole test body.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use pinbot_engine::AUDIT_TARGET;
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

/// One captured audit record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    pub level: Level,
    pub actor: String,
    pub message: String,
    /// `transient` field of failure records
    pub transient: Option<bool>,
}

/// Shared view of the records captured so far
#[derive(Debug, Clone, Default)]
pub struct AuditLog {
    records: Arc<Mutex<Vec<AuditRecord>>>,
}

impl AuditLog {
    /// Start capturing on the current thread until the guard drops
    pub fn capture() -> (Self, DefaultGuard) {
        let log = Self::default();
        let subscriber = Registry::default().with(AuditLayer { log: log.clone() });
        let guard = tracing::subscriber::set_default(subscriber);
        (log, guard)
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().clone()
    }

    /// Records at `level` whose message contains `needle`
    pub fn matching(&self, level: Level, needle: &str) -> Vec<AuditRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.level == level && r.message.contains(needle))
            .collect()
    }
}

struct AuditLayer {
    log: AuditLog,
}

impl<S: Subscriber> Layer<S> for AuditLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if event.metadata().target() != AUDIT_TARGET {
            return;
        }

        let mut fields = FieldCollector::default();
        event.record(&mut fields);
        self.log.records.lock().push(AuditRecord {
            level: *event.metadata().level(),
            actor: fields.actor,
            message: fields.message,
            transient: fields.transient,
        });
    }
}

#[derive(Default)]
struct FieldCollector {
    actor: String,
    message: String,
    transient: Option<bool>,
}

impl Visit for FieldCollector {
    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "transient" {
            self.transient = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "actor" {
            self.actor = value.to_string();
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            "actor" => self.actor = format!("{value:?}"),
            _ => {}
        }
    }
}
