//! Transient user notifications ("toasts").
//!
//! DESIGN
//! ======
//! The view-model receives a `Notifier` capability instead of reaching for a
//! global toast channel. `ToastQueue` is the server-side sink: it holds the
//! toasts of one collection page until they are dismissed or expire, and the
//! page renders whatever is still visible.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::Serialize;
use uuid::Uuid;

pub const SUCCESS_TOAST_DURATION: Duration = Duration::from_secs(8);
pub const FAILURE_TOAST_DURATION: Duration = Duration::from_secs(4);

// =============================================================================
// TOAST
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ToastId(Uuid);

impl ToastId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Loading,
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    /// `None` keeps the toast until it is dismissed.
    #[serde(skip)]
    pub duration: Option<Duration>,
}

impl Toast {
    #[must_use]
    pub fn loading(message: impl Into<String>) -> Self {
        Self { kind: ToastKind::Loading, message: message.into(), duration: None }
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: ToastKind::Success, message: message.into(), duration: Some(SUCCESS_TOAST_DURATION) }
    }

    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self { kind: ToastKind::Failure, message: message.into(), duration: Some(FAILURE_TOAST_DURATION) }
    }
}

// =============================================================================
// NOTIFIER
// =============================================================================

/// Notification sink handed to the view-model.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast) -> ToastId;

    fn dismiss(&self, id: ToastId);
}

/// A loading toast that is dismissed when the guard drops, on every path.
pub struct PendingToast<'a> {
    notifier: &'a dyn Notifier,
    id: ToastId,
}

impl<'a> PendingToast<'a> {
    pub fn show(notifier: &'a dyn Notifier, message: impl Into<String>) -> Self {
        let id = notifier.notify(Toast::loading(message));
        Self { notifier, id }
    }
}

impl Drop for PendingToast<'_> {
    fn drop(&mut self) {
        self.notifier.dismiss(self.id);
    }
}

// =============================================================================
// TOAST QUEUE
// =============================================================================

/// A toast as rendered by the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleToast {
    pub id: ToastId,
    #[serde(flatten)]
    pub toast: Toast,
}

struct Entry {
    id: ToastId,
    toast: Toast,
    shown_at: Instant,
}

/// In-memory toast sink for one collection page.
#[derive(Default)]
pub struct ToastQueue {
    entries: Mutex<Vec<Entry>>,
}

impl ToastQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toasts still on screen, oldest first. Expired toasts are pruned.
    pub fn visible(&self) -> Vec<VisibleToast> {
        self.visible_at(Instant::now())
    }

    pub(crate) fn visible_at(&self, now: Instant) -> Vec<VisibleToast> {
        let mut entries = self.lock();
        entries.retain(|e| e.toast.duration.is_none_or(|d| now.duration_since(e.shown_at) < d));
        entries
            .iter()
            .map(|e| VisibleToast { id: e.id, toast: e.toast.clone() })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Entry>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, toast: Toast) -> ToastId {
        let id = ToastId::new();
        self.lock().push(Entry { id, toast, shown_at: Instant::now() });
        id
    }

    fn dismiss(&self, id: ToastId) {
        self.lock().retain(|e| e.id != id);
    }
}

#[cfg(test)]
#[path = "notify_test.rs"]
mod tests;
