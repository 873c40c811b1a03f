// jablock services
// Services provide core functionality: selector catalog, identity tracking,
// scanning, request interception, scan scheduling, settings, session storage.

pub mod content_scanner;
pub mod identity_tracker;
pub mod reactive_loop;
pub mod request_shim;
pub mod selector_catalog;
pub mod session_store;
pub mod settings_engine;
