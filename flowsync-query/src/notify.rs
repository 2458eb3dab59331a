//! Notifications and the sinks that display them
//!
//! Engines never render anything themselves. Every success or failure they
//! want surfaced is handed to a [`NotificationSink`] injected at
//! construction. Delivery is fire-and-forget: a sink must not block and
//! cannot report back.

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// How long a notification stays on screen.
pub const NOTIFICATION_DURATION: Duration = Duration::from_millis(3000);

pub const SUCCESS_TITLE: &str = "Request succeeded";
pub const FAILURE_TITLE: &str = "Request failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub kind: NotificationKind,
    #[serde(rename = "durationMs", serialize_with = "serialize_millis")]
    pub duration: Duration,
    /// Error detail, present on failures only.
    pub error: Option<String>,
}

fn serialize_millis<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

impl Notification {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            title: SUCCESS_TITLE.to_string(),
            description: description.into(),
            kind: NotificationKind::Success,
            duration: NOTIFICATION_DURATION,
            error: None,
        }
    }

    /// A failure notification; the description doubles as the error detail.
    pub fn error(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            title: FAILURE_TITLE.to_string(),
            description: message.clone(),
            kind: NotificationKind::Error,
            duration: NOTIFICATION_DURATION,
            error: Some(message),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

/// Receives notifications from the engines.
pub trait NotificationSink: Send + Sync {
    fn show(&self, notification: Notification);
}

impl<S: NotificationSink + ?Sized> NotificationSink for Arc<S> {
    fn show(&self, notification: Notification) {
        (**self).show(notification)
    }
}

/// Writes notifications to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn show(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                info!(title = %notification.title, "{}", notification.description)
            }
            NotificationKind::Error => {
                warn!(title = %notification.title, "{}", notification.description)
            }
        }
    }
}

/// Keeps every notification in memory, in delivery order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything shown so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.entries().clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.entries().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn clear(&self) {
        self.entries().clear();
    }

    // Poisoning is ignored: a push either happened or it did not.
    fn entries(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.notifications
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl NotificationSink for RecordingSink {
    fn show(&self, notification: Notification) {
        self.entries().push(notification);
    }
}

/// Forwards notifications to an unbounded channel.
///
/// Once the receiver is gone notifications are silently dropped.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: mpsc::UnboundedSender<Notification>,
}

impl ChannelSink {
    pub fn new(sender: mpsc::UnboundedSender<Notification>) -> Self {
        Self { sender }
    }

    /// A sink together with the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

impl NotificationSink for ChannelSink {
    fn show(&self, notification: Notification) {
        let _ = self.sender.send(notification);
    }
}
