//! Repository functions over the storage adapters.

pub mod drinks;
