//! Serialize-on-write persistence for store state.
//!
//! State is wrapped the way the browser client's persistence middleware
//! wrote it, `{"state": {...}, "version": 0}`, so payloads exported from a
//! browser can be dropped into a storage directory and read back.

use std::sync::Arc;

use local_storage::LocalStorage;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::PortalStoreResult;

/// Version written into every envelope.
pub const STATE_VERSION: u32 = 0;

#[derive(Debug, Serialize, Deserialize)]
struct Envelope<S> {
    state: S,
    #[serde(default)]
    version: u32,
}

/// Where a store writes its state, if anywhere.
#[derive(Clone)]
pub struct Persistence {
    storage: Option<Arc<dyn LocalStorage>>,
    key: &'static str,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence")
            .field("key", &self.key)
            .field("enabled", &self.storage.is_some())
            .finish()
    }
}

impl Persistence {
    /// Persists under `key` in `storage`.
    pub fn new(storage: Arc<dyn LocalStorage>, key: &'static str) -> Self {
        Self {
            storage: Some(storage),
            key,
        }
    }

    /// Keeps state in memory only.
    pub fn in_memory(key: &'static str) -> Self {
        Self { storage: None, key }
    }

    /// Returns true if state is written to storage.
    pub fn is_enabled(&self) -> bool {
        self.storage.is_some()
    }

    /// Reads the stored state. `Ok(None)` when nothing is stored.
    pub fn try_load<S: DeserializeOwned>(&self) -> PortalStoreResult<Option<S>> {
        let Some(storage) = &self.storage else {
            return Ok(None);
        };
        let Some(raw) = storage.get(self.key)? else {
            return Ok(None);
        };
        let envelope: Envelope<S> = serde_json::from_str(&raw)?;
        if envelope.version != STATE_VERSION {
            tracing::debug!(
                key = self.key,
                version = envelope.version,
                "Loading state written with another version"
            );
        }
        Ok(Some(envelope.state))
    }

    /// Reads the stored state, starting empty when there is none or it
    /// cannot be read.
    pub fn load<S: DeserializeOwned + Default>(&self) -> S {
        match self.try_load() {
            Ok(Some(state)) => {
                tracing::debug!(key = self.key, "Rehydrated state");
                state
            }
            Ok(None) => S::default(),
            Err(e) => {
                tracing::warn!(key = self.key, error = %e, "Discarding unreadable state");
                S::default()
            }
        }
    }

    /// Writes the state.
    pub fn try_save<S: Serialize>(&self, state: &S) -> PortalStoreResult<()> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };
        let raw = serde_json::to_string(&Envelope {
            state,
            version: STATE_VERSION,
        })?;
        storage.set(self.key, &raw)?;
        Ok(())
    }

    /// Writes the state; failures are logged and otherwise ignored.
    pub fn save<S: Serialize>(&self, state: &S) {
        if let Err(e) = self.try_save(state) {
            tracing::warn!(key = self.key, error = %e, "Failed to persist state");
        }
    }
}
