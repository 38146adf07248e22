// src/common/environment.rs
//! Runtime environment classification
//! Decides whether keys live in a local .env file or in the deployment platform

use std::collections::HashMap;
use std::env;

/// Read access to environment variables
/// Lets tests supply a fixed map instead of touching the real process env
pub trait EnvLookup {
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

impl EnvLookup for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Variables that must equal `production`
const PRODUCTION_FLAGS: &[&str] = &["NODE_ENV", "APP_ENV"];

/// Variables that must equal `true`
const BOOLEAN_FLAGS: &[&str] = &["CI", "RENDER"];

/// Platform identifiers, any non-empty value counts
const PLATFORM_MARKERS: &[&str] = &["RENDER_EXTERNAL_URL", "RENDER_SERVICE_NAME"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentContext {
    /// Keys are read from the process environment and never written
    ProductionOrCi,
    /// Keys are kept in the local configuration store
    Development,
}

impl EnvironmentContext {
    pub fn detect(env: &dyn EnvLookup) -> Self {
        let production = PRODUCTION_FLAGS
            .iter()
            .any(|name| env.var(name).as_deref() == Some("production"));
        let flagged = BOOLEAN_FLAGS
            .iter()
            .any(|name| env.var(name).as_deref() == Some("true"));
        let hosted = PLATFORM_MARKERS
            .iter()
            .any(|name| env.var(name).is_some_and(|value| !value.is_empty()));

        if production || flagged || hosted {
            Self::ProductionOrCi
        } else {
            Self::Development
        }
    }

    pub fn is_production_or_ci(&self) -> bool {
        matches!(self, Self::ProductionOrCi)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ProductionOrCi => "production/CI",
            Self::Development => "development",
        }
    }
}

/// CLI argument parsing for the environment override
pub fn parse_environment_args<I>(args: I) -> Option<EnvironmentContext>
where
    I: IntoIterator<Item = String>,
{
    for arg in args {
        match arg.as_str() {
            "--dev" | "--development" => return Some(EnvironmentContext::Development),
            "--prod" | "--production" | "--ci" => return Some(EnvironmentContext::ProductionOrCi),
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_environment_is_development() {
        let env = env_of(&[]);
        assert_eq!(EnvironmentContext::detect(&env), EnvironmentContext::Development);
    }

    #[test]
    fn test_each_indicator_classifies_as_production() {
        let cases = [
            ("NODE_ENV", "production"),
            ("APP_ENV", "production"),
            ("CI", "true"),
            ("RENDER", "true"),
            ("RENDER_EXTERNAL_URL", "https://app.onrender.com"),
            ("RENDER_SERVICE_NAME", "api"),
        ];

        for (name, value) in cases {
            let env = env_of(&[(name, value)]);
            assert!(
                EnvironmentContext::detect(&env).is_production_or_ci(),
                "{}={} should classify as production/CI",
                name,
                value
            );
        }
    }

    #[test]
    fn test_falsy_indicators_stay_development() {
        let env = env_of(&[
            ("NODE_ENV", "development"),
            ("CI", "false"),
            ("RENDER", "1"),
            ("RENDER_EXTERNAL_URL", ""),
            ("RENDER_SERVICE_NAME", ""),
        ]);
        assert_eq!(EnvironmentContext::detect(&env), EnvironmentContext::Development);
    }

    #[test]
    fn test_parse_environment_args() {
        let args = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        assert_eq!(
            parse_environment_args(args(&["keysetup", "--prod"])),
            Some(EnvironmentContext::ProductionOrCi)
        );
        assert_eq!(
            parse_environment_args(args(&["keysetup", "--dev"])),
            Some(EnvironmentContext::Development)
        );
        assert_eq!(parse_environment_args(args(&["keysetup"])), None);
    }
}
