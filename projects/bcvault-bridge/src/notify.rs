//! User-facing notification collaborator.
//!
//! Toasts are informational only; nothing in the signing contract depends on
//! them. The default sink writes through the log facade so a host app can
//! swap in its own presentation.

/// Success/failure toast sink.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notifier that forwards toasts to the log facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        log::info!("✅ {}", message);
    }

    fn error(&self, message: &str) {
        log::error!("❌ {}", message);
    }
}
