use anyhow::{ensure, Context, Result};
use config::{Config, Environment, File};
use poiproxy_core::RegistryConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings of the server binary.
///
/// Layered as: defaults, then the optional configuration file, then
/// `POIPROXY_*` environment variables (`POIPROXY_REGISTRY__DIRECTORY` for
/// nested keys). Command line flags are applied on top by `main`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    pub server_port: u16,
    pub log_level: String,
    pub registry: RegistryConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_port: 8080,
            log_level: "info".to_string(),
            registry: RegistryConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn load(file: &Path) -> Result<Self> {
        Self::load_with_env(file, Environment::with_prefix("POIPROXY"))
    }

    fn load_with_env(file: &Path, env: Environment) -> Result<Self> {
        let settings = Config::builder()
            .add_source(Config::try_from(&Self::default()).context("Invalid default configuration")?)
            .add_source(File::from(file).required(false))
            .add_source(env.prefix_separator("_").separator("__").try_parsing(true))
            .build()
            .with_context(|| format!("Failed to load configuration from {:?}", file))?;

        let config: Self = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        ensure!(
            !config.registry.suffix.is_empty(),
            "registry.suffix must not be empty"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn no_env() -> Environment {
        Environment::with_prefix("POIPROXY").source(Some(HashMap::new()))
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig::load_with_env(&dir.path().join("absent.toml"), no_env()).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("poiproxy.toml");
        std::fs::write(
            &file,
            "server_port = 9090\n\n[registry]\ndirectory = \"/srv/services\"\n",
        )
        .unwrap();

        let config = ServerConfig::load_with_env(&file, no_env()).unwrap();
        assert_eq!(config.server_port, 9090);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.registry.directory, PathBuf::from("/srv/services"));
        assert_eq!(config.registry.suffix, ".json");
    }

    #[test]
    fn test_empty_suffix_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("poiproxy.toml");
        std::fs::write(&file, "[registry]\nsuffix = \"\"\n").unwrap();

        let err = ServerConfig::load_with_env(&file, no_env()).unwrap_err();
        assert!(err.to_string().contains("suffix"));
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("poiproxy.toml");
        std::fs::write(&file, "server_port = 9090\n").unwrap();

        let env: HashMap<String, String> = [
            ("POIPROXY_SERVER_PORT", "7070"),
            ("POIPROXY_REGISTRY__SUFFIX", ".poi"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let env = Environment::with_prefix("POIPROXY").source(Some(env));

        let config = ServerConfig::load_with_env(&file, env).unwrap();
        assert_eq!(config.server_port, 7070);
        assert_eq!(config.registry.suffix, ".poi");
    }
}
