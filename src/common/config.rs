// src/common/config.rs
//! Key setup configuration
//! Where the development store lives and which keys must exist in it

use std::path::{Path, PathBuf};

use super::environment::EnvLookup;

/// Key used by development builds of the consuming application
pub const DEV_KEY_NAME: &str = "CB_ENCRYPTION_KEY_DEV";

/// Key used by deployed builds of the consuming application
pub const MAIN_KEY_NAME: &str = "CB_ENCRYPTION_KEY";

/// Processed in this order
pub const RECOGNIZED_KEYS: [&str; 2] = [DEV_KEY_NAME, MAIN_KEY_NAME];

/// Overrides the store location
pub const ENV_FILE_VAR: &str = "KEYSETUP_ENV_FILE";

/// Store file at the application root
pub const DEFAULT_ENV_FILE: &str = ".env";

#[derive(Debug, Clone)]
pub struct KeySetupConfig {
    pub env_file: PathBuf,
    pub key_names: Vec<String>,
}

impl Default for KeySetupConfig {
    fn default() -> Self {
        Self {
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            key_names: RECOGNIZED_KEYS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl KeySetupConfig {
    pub fn from_env(env: &dyn EnvLookup) -> Self {
        let env_file = env
            .var(ENV_FILE_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_FILE));

        Self {
            env_file,
            ..Self::default()
        }
    }

    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = path.into();
        self
    }
}

/// Load the store into the process environment; variables already set win
/// Returns false when the store is missing or unreadable
pub fn load_store_into_env(path: &Path) -> bool {
    dotenv::from_path(path).is_ok()
}

/// Result of looking for `--env-file` on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvFileArg {
    Path(PathBuf),
    /// Flag given without a path after it
    MissingValue,
}

/// CLI argument parsing for the store path (`--env-file <path>` or `--env-file=<path>`)
pub fn parse_env_file_arg<I>(args: I) -> Option<EnvFileArg>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let value = if arg == "--env-file" {
            args.next()
        } else if let Some(path) = arg.strip_prefix("--env-file=") {
            Some(path.to_string())
        } else {
            continue;
        };

        return Some(match value.filter(|path| !path.is_empty()) {
            Some(path) => EnvFileArg::Path(PathBuf::from(path)),
            None => EnvFileArg::MissingValue,
        });
    }

    None
}
