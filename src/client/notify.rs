//! Success and error toasts waiting to be shown

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub text: String,
}

/// Pending notifications. A text already pending is not queued twice.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    pending: Vec<Notification>,
}

impl Notifications {
    pub fn success(&mut self, text: impl Into<String>) {
        self.push(NotificationKind::Success, text.into());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(NotificationKind::Error, text.into());
    }

    fn push(&mut self, kind: NotificationKind, text: String) {
        if self.pending.iter().any(|n| n.text == text) {
            return;
        }
        tracing::debug!(?kind, %text, "Notification");
        self.pending.push(Notification { kind, text });
    }

    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }

    /// Hand the pending notifications to the renderer
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }
}
