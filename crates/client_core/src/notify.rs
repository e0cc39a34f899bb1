//! User-visible notification channel.

use shared::error::ErrorCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn for_code(code: ErrorCode) -> Self {
        Self::new(code.user_title(), code.user_message())
    }
}

/// Fire-and-forget modal notification sink provided by the host.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
