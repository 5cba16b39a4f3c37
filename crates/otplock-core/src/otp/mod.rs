//! Token-gate sub-modules.

pub mod config;
pub mod core;
pub mod service;
pub mod types;

// Re-export top-level items for convenience.
pub use self::core::{current_unix_time, verify, window_at, TokenEngine};
pub use self::service::TokenGate;
pub use self::types::*;
