use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Destructive,
}

// A transient notification shown over the current screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

/// Toast queue shared by every screen of one app instance.
#[derive(Clone, Default)]
pub struct Notifier {
    toasts: Arc<Mutex<Vec<Toast>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&self, title: impl Into<String>, description: impl Into<String>) -> Uuid {
        self.push(title.into(), description.into(), ToastVariant::Default)
    }

    /// Destructive "Error" toast. An empty error message is replaced by
    /// `fallback`.
    pub fn error(&self, err: &AppError, fallback: &str) -> Uuid {
        let message = err.to_string();
        let description = if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        };
        self.push("Error".to_string(), description, ToastVariant::Destructive)
    }

    /// Close a toast. Unknown ids are ignored.
    pub fn dismiss(&self, id: Uuid) {
        self.toasts.lock().retain(|t| t.id != id);
    }

    /// Toasts still open, oldest first.
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().clone()
    }

    pub fn last(&self) -> Option<Toast> {
        self.toasts.lock().last().cloned()
    }

    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.toasts.lock())
    }

    fn push(&self, title: String, description: String, variant: ToastVariant) -> Uuid {
        let id = Uuid::new_v4();
        self.toasts.lock().push(Toast {
            id,
            title,
            description,
            variant,
        });
        id
    }
}
