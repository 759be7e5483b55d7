//! User-facing failure notifications.
//!
//! A failed cart operation surfaces exactly one short message through a
//! [`Notifier`]. The storefront shows them as transient toasts.

use std::sync::Mutex;
use tracing::error;

/// Requested quantity exceeds the available stock.
pub const OUT_OF_STOCK: &str = "Quantidade solicitada fora de estoque";
/// Adding a product failed for any reason other than stock.
pub const ADD_FAILED: &str = "Erro na adição do produto";
/// Removing a product failed.
pub const REMOVE_FAILED: &str = "Erro na remoção do produto";
/// Changing a product's quantity failed for any reason other than stock.
pub const UPDATE_FAILED: &str = "Erro na alteração de quantidade do produto";

/// Transient notification channel towards the user.
pub trait Notifier: Send + Sync {
    /// Surface an error message.
    fn error(&self, message: &str);
}

/// Emits notifications as `tracing` error events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        error!(notice = message, "cart notification");
    }
}

/// Keeps every message, in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages received so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// The most recent message.
    pub fn last(&self) -> Option<String> {
        self.messages.lock().ok().and_then(|m| m.last().cloned())
    }

    /// Drain all messages.
    pub fn take(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|mut m| std::mem::take(&mut *m))
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier() {
        let notifier = RecordingNotifier::new();
        notifier.error(OUT_OF_STOCK);
        notifier.error(ADD_FAILED);
        assert_eq!(notifier.last().as_deref(), Some(ADD_FAILED));
        assert_eq!(notifier.take(), vec![OUT_OF_STOCK, ADD_FAILED]);
        assert!(notifier.messages().is_empty());
    }
}
