//! jablock — a reactive in-page ad blocking engine with cross-tab live
//! counters.
//!
//! This library crate exposes all modules for use by the binaries and
//! integration tests.

pub mod app;
pub mod managers;
pub mod message_handler;
pub mod runtime;
pub mod services;
pub mod types;
