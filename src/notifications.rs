//! Transient user notifications.
use std::fmt;
use std::time::Duration;

/// How long a toast stays up before dismissing itself.
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Success => write!(f, "success"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub dismiss_after: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            dismiss_after: DEFAULT_DISMISS_AFTER,
        }
    }
}

/// Auto-dismissing toast area of the page.
pub trait NotificationSurface: Send + Sync {
    fn show(&self, notification: &Notification);
}

/// Blocking alert dialog.
pub trait AlertSink: Send + Sync {
    fn alert(&self, message: &str);
}

/// Anything the pipeline can report to.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Shows toasts when the page has a notification area, alerts otherwise.
pub struct PageNotifier<S, A> {
    surface: Option<S>,
    alert: A,
}

impl<S: NotificationSurface, A: AlertSink> PageNotifier<S, A> {
    pub fn new(surface: Option<S>, alert: A) -> Self {
        Self { surface, alert }
    }
}

impl<S: NotificationSurface, A: AlertSink> Notifier for PageNotifier<S, A> {
    fn notify(&self, notification: Notification) {
        tracing::debug!("Notify [{}]: {}", notification.severity, notification.message);
        match &self.surface {
            Some(surface) => surface.show(&notification),
            None => self.alert.alert(&notification.message),
        }
    }
}
