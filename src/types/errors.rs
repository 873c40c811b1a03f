use std::fmt;

// === RequestError ===

/// Errors related to intercepted outgoing requests.
#[derive(Debug)]
pub enum RequestError {
    /// The request target matched a known ad-endpoint fragment and was rejected.
    Blocked(String),
    /// The underlying transport failed to dispatch the request.
    Transport(String),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Blocked(url) => write!(f, "Blocked by JAblock: {}", url),
            RequestError::Transport(msg) => write!(f, "Transport failure: {}", msg),
        }
    }
}

impl std::error::Error for RequestError {}

// === StorageError ===

/// Errors related to session-state persistence.
#[derive(Debug)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    IoError(String),
    /// The stored payload could not be serialized or deserialized.
    SerializationError(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::IoError(msg) => write!(f, "Session storage I/O error: {}", msg),
            StorageError::SerializationError(msg) => {
                write!(f, "Session storage serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for StorageError {}

// === SettingsError ===

/// Errors related to the settings engine.
#[derive(Debug)]
pub enum SettingsError {
    /// Reading or writing the config file failed.
    IoError(String),
    /// The settings payload could not be serialized or deserialized.
    SerializationError(String),
    /// The provided settings key is not recognized.
    InvalidKey(String),
    /// The provided whitelist entry is not a valid hostname.
    InvalidHostname(String),
    /// The whitelist already contains this entry.
    DuplicateEntry(String),
    /// The provided whitelist index is out of bounds.
    InvalidIndex(usize),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidHostname(host) => write!(f, "Invalid hostname: {}", host),
            SettingsError::DuplicateEntry(host) => {
                write!(f, "Hostname already whitelisted: {}", host)
            }
            SettingsError::InvalidIndex(index) => {
                write!(f, "Invalid whitelist index: {}", index)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === MessageError ===

/// Errors related to message dispatch between contexts.
#[derive(Debug)]
pub enum MessageError {
    /// The aggregator or settings lock was poisoned by a panicked holder.
    LockPoisoned(String),
    /// The receiving context was torn down before the message arrived.
    ChannelClosed,
}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageError::LockPoisoned(msg) => write!(f, "Lock poisoned: {}", msg),
            MessageError::ChannelClosed => write!(f, "Message channel closed"),
        }
    }
}

impl std::error::Error for MessageError {}
