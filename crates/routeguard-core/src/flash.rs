// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session flash messages and the root user warning.

use std::collections::HashMap;

use parking_lot::RwLock;

/// Flash key used for warnings.
pub const WARNING_FLASH_KEY: &str = "warning";

/// Warning shown to root users.
pub const ROOT_WARNING_MESSAGE: &str =
    "You are logged in as an unrestricted root user, this is only recommended for maintenance tasks.";

// =============================================================================
// FlashStore
// =============================================================================

/// Per-session flash message storage owned by the host.
pub trait FlashStore: Send + Sync {
    /// Returns the messages stored under `key` without consuming them.
    fn flashes(&self, key: &str) -> Vec<String>;

    /// Appends a message under `key`.
    fn add_flash(&self, key: &str, message: String);

    /// Appends `message` under `key` unless an equal message is already
    /// stored there. Returns `true` if it was added.
    ///
    /// The default checks and appends in two steps. Stores shared between
    /// concurrent requests should override it with a single atomic update.
    fn add_flash_once(&self, key: &str, message: String) -> bool {
        if self.flashes(key).contains(&message) {
            return false;
        }
        self.add_flash(key, message);
        true
    }
}

/// In-memory session flash bag.
#[derive(Debug, Default)]
pub struct MemorySession {
    flashes: RwLock<HashMap<String, Vec<String>>>,
}

impl MemorySession {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns the messages stored under `key`.
    pub fn take_flashes(&self, key: &str) -> Vec<String> {
        self.flashes.write().remove(key).unwrap_or_default()
    }
}

impl FlashStore for MemorySession {
    fn flashes(&self, key: &str) -> Vec<String> {
        self.flashes.read().get(key).cloned().unwrap_or_default()
    }

    fn add_flash(&self, key: &str, message: String) {
        self.flashes
            .write()
            .entry(key.to_string())
            .or_default()
            .push(message);
    }

    fn add_flash_once(&self, key: &str, message: String) -> bool {
        let mut flashes = self.flashes.write();
        let messages = flashes.entry(key.to_string()).or_default();
        if messages.contains(&message) {
            return false;
        }
        messages.push(message);
        true
    }
}

// =============================================================================
// RootWarning
// =============================================================================

/// Adds a one-time warning flash when a root user bypasses a check.
#[derive(Debug, Clone)]
pub struct RootWarning {
    enabled: bool,
    message: String,
}

impl RootWarning {
    /// Creates the warning with the default message.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            message: ROOT_WARNING_MESSAGE.to_string(),
        }
    }

    /// Replaces the message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Returns `true` if the warning is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Appends the warning to the session unless disabled, the request is
    /// a background request, or the session already holds it.
    ///
    /// "Once" means once while the message is unconsumed: after the host
    /// displays and removes the flash, the next bypass adds it again.
    ///
    /// Returns `true` if a flash was added.
    pub fn notify(&self, session: Option<&dyn FlashStore>, background: bool) -> bool {
        if !self.enabled || background {
            return false;
        }
        let Some(session) = session else {
            return false;
        };
        session.add_flash_once(WARNING_FLASH_KEY, self.message.clone())
    }
}

impl Default for RootWarning {
    fn default() -> Self {
        Self::new(true)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Barrier};
    use std::thread;

    /// Store relying on the two-step default of `add_flash_once`.
    #[derive(Default)]
    struct PlainStore(MemorySession);

    impl FlashStore for PlainStore {
        fn flashes(&self, key: &str) -> Vec<String> {
            self.0.flashes(key)
        }

        fn add_flash(&self, key: &str, message: String) {
            self.0.add_flash(key, message);
        }
    }

    #[test]
    fn test_concurrent_notify_adds_single_flash() {
        let warning = Arc::new(RootWarning::default());
        let session = Arc::new(MemorySession::new());
        let barrier = Arc::new(Barrier::new(16));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let warning = warning.clone();
                let session = session.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    warning.notify(Some(&*session), false)
                })
            })
            .collect();

        let added = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|added| *added)
            .count();

        assert_eq!(added, 1);
        assert_eq!(session.flashes(WARNING_FLASH_KEY), vec![ROOT_WARNING_MESSAGE]);
    }

    #[test]
    fn test_add_flash_once() {
        let session = MemorySession::new();

        assert!(session.add_flash_once("warning", "a".to_string()));
        assert!(!session.add_flash_once("warning", "a".to_string()));
        assert!(session.add_flash_once("warning", "b".to_string()));
        assert!(session.add_flash_once("info", "a".to_string()));
        assert_eq!(session.flashes("warning"), vec!["a", "b"]);
    }

    #[test]
    fn test_default_add_flash_once() {
        let store = PlainStore::default();

        assert!(RootWarning::default().notify(Some(&store), false));
        assert!(!RootWarning::default().notify(Some(&store), false));
        assert_eq!(store.flashes(WARNING_FLASH_KEY).len(), 1);
    }

    #[test]
    fn test_notify_once_per_session() {
        let warning = RootWarning::default();
        let session = MemorySession::new();

        assert!(warning.notify(Some(&session), false));
        assert!(!warning.notify(Some(&session), false));
        assert!(!warning.notify(Some(&session), false));
        assert_eq!(session.flashes(WARNING_FLASH_KEY), vec![ROOT_WARNING_MESSAGE]);
    }

    #[test]
    fn test_notify_keeps_other_warnings() {
        let warning = RootWarning::default();
        let session = MemorySession::new();
        session.add_flash(WARNING_FLASH_KEY, "Disk almost full".to_string());

        assert!(warning.notify(Some(&session), false));
        assert_eq!(session.flashes(WARNING_FLASH_KEY).len(), 2);
    }

    #[test]
    fn test_notify_suppressed() {
        let session = MemorySession::new();

        assert!(!RootWarning::new(false).notify(Some(&session), false));
        assert!(!RootWarning::default().notify(Some(&session), true));
        assert!(!RootWarning::default().notify(None, false));
        assert!(session.flashes(WARNING_FLASH_KEY).is_empty());
    }

    #[test]
    fn test_take_flashes() {
        let session = MemorySession::new();
        session.add_flash("info", "saved".to_string());

        assert_eq!(session.take_flashes("info"), vec!["saved"]);
        assert!(session.take_flashes("info").is_empty());
    }

    #[test]
    fn test_warning_reappears_after_flash_consumed() {
        let warning = RootWarning::default().with_message("careful");
        let session = MemorySession::new();

        assert!(warning.notify(Some(&session), false));
        session.take_flashes(WARNING_FLASH_KEY);
        assert!(warning.notify(Some(&session), false));
    }
}
