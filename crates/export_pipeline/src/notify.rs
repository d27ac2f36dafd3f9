//! User notifications
//!
//! The façade reports every export outcome through a [`Notifier`], exactly
//! once per request.

use crate::sink::SavedFile;
use std::sync::Mutex;

pub trait Notifier: Send + Sync {
    fn success(&self, file: &SavedFile);
    fn error(&self, message: &str);
}

/// Logs notifications through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, file: &SavedFile) {
        match &file.path {
            Some(path) => tracing::info!("Exported {} ({} bytes)", path.display(), file.size),
            None => tracing::info!("Exported {} ({} bytes)", file.file_name, file.size),
        }
    }

    fn error(&self, message: &str) {
        tracing::error!("Export failed: {}", message);
    }
}

/// One recorded notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

/// Records notifications for inspection
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Notification> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn push(&self, event: Notification) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, file: &SavedFile) {
        self.push(Notification::Success(file.file_name.clone()));
    }

    fn error(&self, message: &str) {
        self.push(Notification::Error(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier() {
        let notifier = RecordingNotifier::new();
        notifier.success(&SavedFile {
            file_name: "a.pdf".to_string(),
            path: None,
            size: 3,
        });
        notifier.error("boom");
        assert_eq!(
            notifier.events(),
            vec![
                Notification::Success("a.pdf".to_string()),
                Notification::Error("boom".to_string()),
            ]
        );
    }
}
