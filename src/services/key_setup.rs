// src/services/key_setup.rs
use std::path::Path;
use tracing::{debug, error, info, warn};

use crate::common::config::{KeySetupConfig, DEV_KEY_NAME, MAIN_KEY_NAME};
use crate::common::environment::{EnvLookup, EnvironmentContext};
use crate::common::{safe_key_log, KeySetupError};
use crate::services::env_file::{self, StoreEdit};
use crate::services::key_material;

/// What happened to a single key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Production/CI and the variable is set
    PresentInEnvironment,
    /// Production/CI and the variable is missing or empty
    MissingFromEnvironment,
    /// Development and the store already holds a value
    AlreadyConfigured,
    /// Development and a new key was written to the store
    Generated,
    /// Development and the store could not be read or written
    StoreUnavailable,
}

pub struct KeySetup<'a> {
    config: KeySetupConfig,
    env: &'a dyn EnvLookup,
    context: EnvironmentContext,
}

impl<'a> KeySetup<'a> {
    /// Classify the environment from `env` and prepare the setup
    pub fn new(config: KeySetupConfig, env: &'a dyn EnvLookup) -> Self {
        let context = EnvironmentContext::detect(env);
        Self::with_context(config, env, context)
    }

    pub fn with_context(
        config: KeySetupConfig,
        env: &'a dyn EnvLookup,
        context: EnvironmentContext,
    ) -> Self {
        Self {
            config,
            env,
            context,
        }
    }

    /// Ensure every recognized key, one after the other
    pub async fn ensure_all(&self) -> Vec<(String, KeyOutcome)> {
        info!(
            environment = self.context.label(),
            "Checking encryption keys"
        );

        let mut outcomes = Vec::with_capacity(self.config.key_names.len());
        for name in &self.config.key_names {
            let outcome = self.ensure_key(name).await;
            outcomes.push((name.clone(), outcome));
        }

        outcomes
    }

    /// Ensure a single key exists; never fails
    pub async fn ensure_key(&self, name: &str) -> KeyOutcome {
        if self.context.is_production_or_ci() {
            return self.check_environment(name);
        }

        match self.ensure_in_store(name).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(
                    key = name,
                    error = %e,
                    "The encryption key could not be set up. Please ensure you have {} and {} in your .env file.",
                    DEV_KEY_NAME,
                    MAIN_KEY_NAME
                );
                KeyOutcome::StoreUnavailable
            }
        }
    }

    fn check_environment(&self, name: &str) -> KeyOutcome {
        match self.env.var(name).filter(|value| !value.is_empty()) {
            Some(value) => {
                if !key_material::is_valid_key(&value) {
                    warn!(
                        key = name,
                        "{} is set but is not a 64-character hex key",
                        name
                    );
                }
                info!(key = name, "✓ {} is set in environment variables", name);
                KeyOutcome::PresentInEnvironment
            }
            None => {
                warn!(
                    key = name,
                    "{} is not set in environment variables. Please set it in your deployment platform (e.g., Render dashboard).",
                    name
                );
                KeyOutcome::MissingFromEnvironment
            }
        }
    }

    async fn ensure_in_store(&self, name: &str) -> Result<KeyOutcome, KeySetupError> {
        env_file::validate_key_name(name)?;

        let path = self.config.env_file.as_path();
        let content = read_store(path).await?;

        let mut generated = None;
        let edit = env_file::ensure_entry(&content, name, || {
            let key = key_material::generate_key();
            generated = Some(safe_key_log(&key));
            key
        })?;

        let Some(updated) = edit.content() else {
            debug!(key = name, path = %path.display(), "Encryption key already configured");
            return Ok(KeyOutcome::AlreadyConfigured);
        };

        write_store(path, updated).await?;

        let action = match &edit {
            StoreEdit::Filled { .. } => "filled",
            _ => "appended",
        };
        info!(
            key = name,
            action,
            value = generated.as_deref().unwrap_or("***"),
            path = %path.display(),
            "Set up encryption key {}",
            name
        );

        Ok(KeyOutcome::Generated)
    }
}

async fn read_store(path: &Path) -> Result<String, KeySetupError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| KeySetupError::ReadStore {
            path: path.to_path_buf(),
            source,
        })
}

async fn write_store(path: &Path, content: &str) -> Result<(), KeySetupError> {
    tokio::fs::write(path, content)
        .await
        .map_err(|source| KeySetupError::WriteStore {
            path: path.to_path_buf(),
            source,
        })
}

/// Bootstrap entry point: ensure both keys, always reporting success
pub async fn set_up_encryption_keys(config: KeySetupConfig, env: &dyn EnvLookup) -> bool {
    run_key_setup(KeySetup::new(config, env)).await
}

/// Same as `set_up_encryption_keys` for an already configured setup
pub async fn run_key_setup(setup: KeySetup<'_>) -> bool {
    let outcomes = setup.ensure_all().await;

    let generated = outcomes
        .iter()
        .filter(|(_, outcome)| *outcome == KeyOutcome::Generated)
        .count();
    let problems = outcomes
        .iter()
        .filter(|(_, outcome)| {
            matches!(
                outcome,
                KeyOutcome::MissingFromEnvironment | KeyOutcome::StoreUnavailable
            )
        })
        .count();

    debug!(
        keys = outcomes.len(),
        generated, problems, "Encryption key setup finished"
    );

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_store_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.env");

        match read_store(&path).await {
            Err(KeySetupError::ReadStore { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected ReadStore error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_write_store_failure_is_write_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join(".env");

        match write_store(&path, "CB_ENCRYPTION_KEY=abc\n").await {
            Err(KeySetupError::WriteStore { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected WriteStore error, got {:?}", other),
        }
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_write_store_overwrites_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "OLD=1\nLONGER_LINE=2\n").unwrap();

        write_store(&path, "NEW=1\n").await.unwrap();
        assert_eq!(read_store(&path).await.unwrap(), "NEW=1\n");
    }
}
