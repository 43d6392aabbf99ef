//! Notification collaborator

/// Shows transient success/error notifications (toasts).
///
/// Fire-and-forget: the form never inspects a result.
pub trait Notifier: Send + Sync {
    fn notify_success(&self, message: &str);

    fn notify_error(&self, message: &str);
}

/// Notifier that writes through the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify_success(&self, message: &str) {
        log::info!("[notify] {}", message);
    }

    fn notify_error(&self, message: &str) {
        log::warn!("[notify] {}", message);
    }
}
