//! Backend test support utilities
//!
//! Shared by the backend's unit and integration tests: unified logging
//! initialization and assertions for the JSON error envelope.

pub mod envelope;
pub mod logging;
