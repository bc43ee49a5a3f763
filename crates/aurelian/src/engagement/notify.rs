use std::sync::{Arc, Mutex};

/// Visual register of a notice, mirroring the site's toast variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeTone {
    Standard,
    Gold,
    Destructive,
}

/// A user-facing toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub tone: NoticeTone,
}

impl Notice {
    pub fn standard(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            tone: NoticeTone::Standard,
        }
    }

    pub fn gold(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            tone: NoticeTone::Gold,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            tone: NoticeTone::Destructive,
        }
    }
}

/// Notification capability injected into the engagement machines. Explicit
/// dependency rather than an ambient singleton so its lifetime is owned by
/// whoever wires the services together.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Notifier that writes notices to the service log.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        tracing::info!(
            target: "notices",
            title = %notice.title,
            description = %notice.description,
            tone = ?notice.tone,
            "notice"
        );
    }
}

/// Notifier that records notices, for tests and the CLI demo.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("notifier mutex poisoned").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        let mut guard = self.notices.lock().expect("notifier mutex poisoned");
        guard.push(notice);
    }
}
