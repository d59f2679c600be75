//! User-visible notification sink.
//!
//! The toast analog: catalog, cart, and checkout emit fire-and-forget
//! notifications on user-visible events. Core logic never consumes a
//! return value from the sink, so any frontend can plug in here.

use std::sync::Mutex;

use tracing::info;

/// A fire-and-forget sink for user-visible messages.
pub trait Notifier: Send + Sync {
    /// Deliver a notification. Must not fail and must not block.
    fn notify(&self, title: &str, message: &str);
}

/// Default sink: routes notifications to the `tracing` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, title: &str, message: &str) {
        info!(%title, %message, "notification");
    }
}

/// A sink that records every notification, for assertions in tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications delivered so far, in order.
    #[must_use]
    pub fn seen(&self) -> Vec<(String, String)> {
        self.seen
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Whether any recorded notification has the given title.
    #[must_use]
    pub fn has_title(&self, title: &str) -> bool {
        self.seen().iter().any(|(t, _)| t == title)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, message: &str) {
        self.seen
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push((title.to_owned(), message.to_owned()));
    }
}
