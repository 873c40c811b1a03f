use jablock::types::errors::*;

// === RequestError Tests ===

#[test]
fn request_error_blocked_display() {
    let err = RequestError::Blocked("https://doubleclick.net/ad".to_string());
    assert_eq!(
        err.to_string(),
        "Blocked by JAblock: https://doubleclick.net/ad"
    );
}

#[test]
fn request_error_transport_display() {
    let err = RequestError::Transport("connection refused".to_string());
    assert_eq!(err.to_string(), "Transport failure: connection refused");
}

#[test]
fn request_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(RequestError::Blocked("url".to_string()));
    assert!(err.source().is_none());
}

// === StorageError Tests ===

#[test]
fn storage_error_display_variants() {
    assert_eq!(
        StorageError::IoError("disk full".to_string()).to_string(),
        "Session storage I/O error: disk full"
    );
    assert_eq!(
        StorageError::SerializationError("bad json".to_string()).to_string(),
        "Session storage serialization error: bad json"
    );
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("no such file".to_string()).to_string(),
        "Settings I/O error: no such file"
    );
    assert_eq!(
        SettingsError::SerializationError("truncated".to_string()).to_string(),
        "Settings serialization error: truncated"
    );
    assert_eq!(
        SettingsError::InvalidKey("bogus".to_string()).to_string(),
        "Invalid settings key: bogus"
    );
    assert_eq!(
        SettingsError::InvalidHostname("not a host".to_string()).to_string(),
        "Invalid hostname: not a host"
    );
    assert_eq!(
        SettingsError::DuplicateEntry("youtube.com".to_string()).to_string(),
        "Hostname already whitelisted: youtube.com"
    );
    assert_eq!(
        SettingsError::InvalidIndex(9).to_string(),
        "Invalid whitelist index: 9"
    );
}

#[test]
fn settings_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> =
        Box::new(SettingsError::InvalidHostname("x".to_string()));
    assert!(err.source().is_none());
}

// === MessageError Tests ===

#[test]
fn message_error_display_variants() {
    assert_eq!(
        MessageError::LockPoisoned("poisoned".to_string()).to_string(),
        "Lock poisoned: poisoned"
    );
    assert_eq!(MessageError::ChannelClosed.to_string(), "Message channel closed");
}
