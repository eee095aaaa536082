pub mod logging;
pub mod seed;

use anyhow::{Context, anyhow};
use rolekeeper_core::{Dashboard, EntityStore, StorePolicy};
use rolekeeper_model::{PermissionType, PermissionUniverse};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

use crate::validation::{self, ConfigWarnings};
use logging::LoggingConfig;
use seed::SeedConfig;

pub const CONFIG_PATH_VAR: &str = "ROLEKEEPER_CONFIG_PATH";
pub const CONFIG_JSON_VAR: &str = "ROLEKEEPER_CONFIG_JSON";

const DEFAULT_FILES: &[&str] = &[
    "rolekeeper.toml",
    "rolekeeper.json",
    "config/rolekeeper.toml",
    "config/rolekeeper.json",
];

fn default_permissions() -> Vec<PermissionType> {
    PermissionType::all().to_vec()
}

/// Source that produced the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

/// Text format of a configuration source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    /// TOML first, then JSON
    Detect,
}

impl ConfigFormat {
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => ConfigFormat::Toml,
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Detect,
        }
    }
}

/// Top-level console settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RolekeeperConfig {
    /// Strictness of the entity store. Defaults accept blank fields, allow
    /// users to name roles that do not exist and ignore unknown ids.
    pub policy: StorePolicy,
    /// Permission universe roles may draw from. Shrinking it rejects seed
    /// roles that still grant a removed permission.
    #[serde(default = "default_permissions")]
    pub permissions: Vec<PermissionType>,
    pub seed: SeedConfig,
    pub logging: LoggingConfig,
}

impl Default for RolekeeperConfig {
    fn default() -> Self {
        Self {
            policy: StorePolicy::default(),
            permissions: default_permissions(),
            seed: SeedConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// A loaded configuration together with where it came from and the guard
/// rail warnings it raised.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: RolekeeperConfig,
    pub source: ConfigSource,
    pub warnings: ConfigWarnings,
}

impl RolekeeperConfig {
    /// Load `.env`, resolve the configuration from the process environment
    /// and run the guard rails. Warnings are logged and returned.
    pub fn load() -> anyhow::Result<ConfigLoad> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "Loaded .env file"),
            Err(err) if err.not_found() => {}
            Err(err) => return Err(err).context("failed to load .env file"),
        }

        let (config, source) = Self::load_from_env()?;
        let warnings = config.validate()?;
        for warning in warnings.iter() {
            match warning.hint() {
                Some(hint) => warn!(hint, "{warning}"),
                None => warn!("{warning}"),
            }
        }
        info!(source = ?source, "Rolekeeper configuration loaded");

        Ok(ConfigLoad {
            config,
            source,
            warnings,
        })
    }

    /// Load configuration using environment variables.
    /// Evaluation order:
    /// 1) `$ROLEKEEPER_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$ROLEKEEPER_CONFIG_JSON` (inline JSON),
    /// 3) the first default file found in the working directory,
    /// 4) defaults.
    pub fn load_from_env() -> anyhow::Result<(Self, ConfigSource)> {
        Self::load_with(|key| env::var(key).ok(), Path::new("."))
    }

    /// Same resolution as [`Self::load_from_env`] with an explicit variable
    /// lookup and directory for default files.
    pub fn load_with<F>(
        lookup: F,
        base_dir: &Path,
    ) -> anyhow::Result<(Self, ConfigSource)>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path_str) = lookup(CONFIG_PATH_VAR)
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str);
            let config = Self::load_from_file(&path)?;
            return Ok((config, ConfigSource::EnvPath(path)));
        }

        if let Some(raw) = lookup(CONFIG_JSON_VAR)
            && !raw.trim().is_empty()
        {
            let parsed = Self::parse(&raw, ConfigFormat::Json)
                .with_context(|| format!("failed to parse {CONFIG_JSON_VAR}"))?;
            return Ok((parsed, ConfigSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file(base_dir) {
            let config = Self::load_from_file(&path)?;
            return Ok((config, ConfigSource::File(path)));
        }

        Ok((Self::default(), ConfigSource::Default))
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read rolekeeper config from {}", path.display())
        })?;
        Self::parse(&contents, ConfigFormat::for_path(path)).with_context(
            || format!("invalid rolekeeper config {}", path.display()),
        )
    }

    pub fn parse(contents: &str, format: ConfigFormat) -> anyhow::Result<Self> {
        match format {
            ConfigFormat::Toml => Ok(toml::from_str(contents)?),
            ConfigFormat::Json => Ok(serde_json::from_str(contents)?),
            ConfigFormat::Detect => Self::parse(contents, ConfigFormat::Toml)
                .or_else(|toml_err| {
                    Self::parse(contents, ConfigFormat::Json).map_err(
                        |json_err| {
                            anyhow!(
                                "neither TOML ({toml_err}) nor JSON ({json_err})"
                            )
                        },
                    )
                }),
        }
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        toml::to_string(self).context("failed to render rolekeeper config")
    }

    fn find_default_file(base_dir: &Path) -> Option<PathBuf> {
        DEFAULT_FILES
            .iter()
            .map(|candidate| base_dir.join(candidate))
            .find(|path| path.exists())
    }

    pub fn universe(&self) -> PermissionUniverse {
        PermissionUniverse::new(self.permissions.clone())
    }

    /// Guard rails: hard errors for configurations the store would reject,
    /// warnings for ones it accepts but that are probably mistakes.
    pub fn validate(
        &self,
    ) -> Result<ConfigWarnings, validation::ConfigGuardRailError> {
        validation::apply_guard_rails(self)
    }

    pub fn build_store(&self) -> anyhow::Result<EntityStore> {
        EntityStore::from_seed(
            self.seed.users.clone(),
            self.seed.roles.clone(),
            self.universe(),
            self.policy,
        )
        .context("failed to seed entity store from configuration")
    }

    pub fn build_dashboard(&self) -> anyhow::Result<Dashboard> {
        self.build_store().map(Dashboard::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_console() {
        let config = RolekeeperConfig::default();
        assert_eq!(config.permissions.len(), 4);
        assert_eq!(config.seed.users.len(), 3);
        assert_eq!(config.seed.roles.len(), 3);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = RolekeeperConfig::parse(
            "[policy]\nvalidation = \"strict\"\n",
            ConfigFormat::Toml,
        )
        .unwrap();

        assert!(config.policy.is_strict_validation());
        assert_eq!(config.seed, SeedConfig::default());
        assert_eq!(config.permissions, default_permissions());
    }

    #[test]
    fn detect_falls_back_to_json() {
        let config = RolekeeperConfig::parse(
            r#"{ "permissions": ["read"], "logging": { "ansi": false } }"#,
            ConfigFormat::Detect,
        )
        .unwrap();

        assert_eq!(config.permissions, vec![PermissionType::Read]);
        assert!(!config.logging.ansi);
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(ConfigFormat::for_path(Path::new("a.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::for_path(Path::new("a.json")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::for_path(Path::new("a.conf")), ConfigFormat::Detect);
    }

    #[test]
    fn garbage_reports_both_parsers() {
        let err = RolekeeperConfig::parse("{{ nope", ConfigFormat::Detect)
            .unwrap_err()
            .to_string();
        assert!(err.starts_with("neither TOML"));
        assert!(err.contains("nor JSON"));
    }
}
