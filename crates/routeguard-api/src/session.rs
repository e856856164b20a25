// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Request-scoped session handle.

use std::fmt;
use std::sync::Arc;

use routeguard_core::{FlashStore, MemorySession};

/// Shared handle to the session of a request.
///
/// The host's session layer inserts it into the request extensions; the
/// access middleware uses it to add the root warning flash.
#[derive(Clone)]
pub struct SessionHandle(Arc<dyn FlashStore>);

impl SessionHandle {
    /// Wraps a session store.
    pub fn new(store: Arc<dyn FlashStore>) -> Self {
        Self(store)
    }

    /// Creates a handle over a fresh in-memory session.
    pub fn memory() -> (Self, Arc<MemorySession>) {
        let session = Arc::new(MemorySession::new());
        (Self(session.clone()), session)
    }

    /// Returns the session store.
    pub fn store(&self) -> &dyn FlashStore {
        self.0.as_ref()
    }
}

impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandle").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routeguard_core::WARNING_FLASH_KEY;

    #[test]
    fn test_handle_shares_store() {
        let (handle, session) = SessionHandle::memory();
        let cloned = handle.clone();

        cloned.store().add_flash(WARNING_FLASH_KEY, "careful".to_string());
        assert_eq!(session.flashes(WARNING_FLASH_KEY), vec!["careful"]);
    }
}
