//! Adapters for external dependencies.

pub mod drinks_sea;
