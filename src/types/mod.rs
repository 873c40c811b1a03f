// jablock shared type definitions
// Each submodule defines types used across the engine.

pub mod dom;
pub mod errors;
pub mod message;
pub mod scan;
pub mod settings;
