// ── Notification channel ──
//
// Producers push transient messages through a cloneable `Notifier`
// without ever blocking. The single consumer, `NotificationCenter`,
// timestamps what arrives and prunes entries once their display time
// has elapsed. Expiry runs on the tokio clock.

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{DateTime, Utc};
use strum::Display;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::trace;

use crate::navigation::ViewKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

/// A message as it travels through the channel, before it is stamped.
#[derive(Debug, Clone)]
struct Pending {
    message: String,
    severity: Severity,
    source: Option<ViewKind>,
}

/// A visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
    /// The view that raised it, if any.
    pub source: Option<ViewKind>,
    expires_at: Instant,
}

/// Cloneable producer handle.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Pending>,
    source: Option<ViewKind>,
}

impl Notifier {
    /// A handle whose messages are tagged with `view`.
    pub fn for_view(&self, view: ViewKind) -> Self {
        Self {
            tx: self.tx.clone(),
            source: Some(view),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(message.into(), Severity::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(message.into(), Severity::Error);
    }

    fn push(&self, message: String, severity: Severity) {
        trace!(%severity, %message, "notify");
        // A closed channel means the consumer is gone; nothing to show.
        let _ = self.tx.send(Pending {
            message,
            severity,
            source: self.source,
        });
    }
}

/// Consumer side: owns the visible queue, in arrival order.
#[derive(Debug)]
pub struct NotificationCenter {
    rx: mpsc::UnboundedReceiver<Pending>,
    visible: VecDeque<Notification>,
    ttl: Duration,
    next_id: u64,
}

/// Build a connected producer/consumer pair.
pub fn channel(ttl: Duration) -> (Notifier, NotificationCenter) {
    let (tx, rx) = mpsc::unbounded_channel();
    let notifier = Notifier { tx, source: None };
    let center = NotificationCenter {
        rx,
        visible: VecDeque::new(),
        ttl,
        next_id: 0,
    };
    (notifier, center)
}

impl NotificationCenter {
    /// Pull in everything produced since the last call, then drop expired entries.
    pub fn tick(&mut self) {
        self.drain();
        let now = Instant::now();
        self.visible.retain(|n| n.expires_at > now);
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Drop every notification raised by `view`, including ones still queued.
    pub fn retire_source(&mut self, view: ViewKind) {
        self.drain();
        self.visible.retain(|n| n.source != Some(view));
    }

    pub fn dismiss(&mut self, id: u64) {
        self.visible.retain(|n| n.id != id);
    }

    pub fn clear(&mut self) {
        self.drain();
        self.visible.clear();
    }

    fn drain(&mut self) {
        while let Ok(pending) = self.rx.try_recv() {
            let id = self.next_id;
            self.next_id += 1;
            self.visible.push_back(Notification {
                id,
                message: pending.message,
                severity: pending.severity,
                created_at: Utc::now(),
                source: pending.source,
                expires_at: Instant::now() + self.ttl,
            });
        }
    }
}
