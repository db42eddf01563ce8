//! User-facing notifications.
//!
//! View-models never render anything themselves. Every outcome that the user
//! must see (a success, a rejected form, a failed request) is handed to a
//! [`Notifier`], and destructive actions ask it for confirmation first.

use std::sync::{Mutex, PoisonError};

/// Kind of notification, used for presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    Success,
    /// Input rejected locally before any request was made.
    Validation,
    Error,
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Validation,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Presentation surface for notifications and confirmations.
pub trait Notifier: Send + Sync {
    /// Show a notification to the user.
    fn notify(&self, notification: Notification);

    /// Ask the user to confirm a destructive action.
    ///
    /// Returns `true` only on explicit confirmation.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Notifier that records everything it is given.
///
/// Confirmation prompts are recorded too and answered with a fixed reply.
#[derive(Debug)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
    prompts: Mutex<Vec<String>>,
    confirm_reply: bool,
}

impl RecordingNotifier {
    /// A recorder that confirms every prompt.
    #[must_use]
    pub const fn confirming() -> Self {
        Self::with_reply(true)
    }

    /// A recorder that declines every prompt.
    #[must_use]
    pub const fn declining() -> Self {
        Self::with_reply(false)
    }

    const fn with_reply(confirm_reply: bool) -> Self {
        Self {
            notifications: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
            confirm_reply,
        }
    }

    /// Snapshot of the notifications received so far.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages of the notifications received so far.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .map(|notification| notification.message)
            .collect()
    }

    /// Confirmation prompts received so far.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_owned());
        self.confirm_reply
    }
}
