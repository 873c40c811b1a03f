//! Session-scoped persistence for the live blocked-ads counter.
//!
//! The store holds a single value, cleared at browser restart. Only the
//! in-memory counter is authoritative during a live session; the persisted
//! value exists for the display surface and may lag by one throttle window.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::errors::StorageError;

/// Persisted shape: `{"adsBlockedLive": n}`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct SessionState {
    ads_blocked_live: u64,
}

/// Trait defining the session store interface.
pub trait SessionStoreTrait {
    /// Loads the persisted live count. A missing store yields 0.
    fn load_live_count(&self) -> Result<u64, StorageError>;
    fn save_live_count(&mut self, count: u64) -> Result<(), StorageError>;
}

/// JSON-file session store with a path override for tests.
pub struct FileSessionStore {
    path: String,
}

impl FileSessionStore {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl SessionStoreTrait for FileSessionStore {
    fn load_live_count(&self) -> Result<u64, StorageError> {
        let path = Path::new(&self.path);
        if !path.exists() {
            return Ok(0);
        }
        let content = fs::read_to_string(path)
            .map_err(|e| StorageError::IoError(format!("Failed to read session file: {}", e)))?;
        let state: SessionState = serde_json::from_str(&content).map_err(|e| {
            StorageError::SerializationError(format!("Failed to parse session file: {}", e))
        })?;
        Ok(state.ads_blocked_live)
    }

    fn save_live_count(&mut self, count: u64) -> Result<(), StorageError> {
        let path = Path::new(&self.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StorageError::IoError(format!("Failed to create session directory: {}", e))
            })?;
        }
        let state = SessionState {
            ads_blocked_live: count,
        };
        let json = serde_json::to_string(&state).map_err(|e| {
            StorageError::SerializationError(format!("Failed to serialize session state: {}", e))
        })?;
        fs::write(path, json)
            .map_err(|e| StorageError::IoError(format!("Failed to write session file: {}", e)))
    }
}

/// In-memory store for tests and the demo. Tracks the number of writes so
/// throttling behavior is observable.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    count: u64,
    writes: u32,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_count(count: u64) -> Self {
        Self { count, writes: 0 }
    }

    pub fn write_count(&self) -> u32 {
        self.writes
    }

    pub fn stored(&self) -> u64 {
        self.count
    }
}

impl SessionStoreTrait for MemorySessionStore {
    fn load_live_count(&self) -> Result<u64, StorageError> {
        Ok(self.count)
    }

    fn save_live_count(&mut self, count: u64) -> Result<(), StorageError> {
        self.count = count;
        self.writes += 1;
        Ok(())
    }
}
