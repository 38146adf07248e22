// Common module - shared types and utilities for the key setup

pub mod config;
pub mod environment;
pub mod error;
pub mod helpers;

// Re-export commonly used types for convenience
pub use config::KeySetupConfig;
pub use environment::ProcessEnv;
pub use error::KeySetupError;
pub use helpers::safe_key_log;
