// Error types for the key setup routine

use std::path::PathBuf;
use thiserror::Error;

/// Failures while ensuring a single key
/// Never surfaced past `KeySetup::ensure_key`, only logged
#[derive(Debug, Error)]
pub enum KeySetupError {
    #[error("Failed to read configuration store {path}: {source}")]
    ReadStore {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write configuration store {path}: {source}")]
    WriteStore {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid key name: {0:?}")]
    InvalidKeyName(String),
}
