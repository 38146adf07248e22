// src/services/mod.rs
//
// Services that locate, generate and persist the encryption keys

pub mod env_file;
pub mod key_material;
pub mod key_setup;


// Re-export commonly used types for convenience
pub use key_setup::{run_key_setup, set_up_encryption_keys, KeySetup};
