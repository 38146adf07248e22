// src/main.rs
use std::env;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// ============================================================================
// MODULE IMPORTS
// ============================================================================

mod common;
mod services;

// ============================================================================
// COMMON IMPORTS
// ============================================================================

use common::config::{load_store_into_env, parse_env_file_arg, EnvFileArg};
use common::environment::parse_environment_args;
use common::{KeySetupConfig, ProcessEnv};
use services::{run_key_setup, set_up_encryption_keys, KeySetup};

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // ========================================================================
    // CONFIGURATION
    // ========================================================================

    let env = ProcessEnv;
    let mut config = KeySetupConfig::from_env(&env);
    match parse_env_file_arg(env::args()) {
        Some(EnvFileArg::Path(path)) => {
            info!("🔧 CLI override: env file = {}", path.display());
            config = config.with_env_file(path);
        }
        Some(EnvFileArg::MissingValue) => {
            warn!(
                "--env-file given without a path, using {}",
                config.env_file.display()
            );
        }
        None => {}
    }

    // Indicators set in the store count towards classification
    load_store_into_env(&config.env_file);

    // ========================================================================
    // KEY SETUP
    // ========================================================================

    match parse_environment_args(env::args()) {
        Some(context) => {
            info!("🔧 CLI override: environment = {}", context.label());
            run_key_setup(KeySetup::with_context(config, &env, context)).await;
        }
        None => {
            set_up_encryption_keys(config, &env).await;
        }
    }

    info!("Encryption key setup complete");

    Ok(())
}
