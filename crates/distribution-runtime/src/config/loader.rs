//! Configuration loader using figment.
//!
//! Sources are layered, later ones overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. Profile-specific file (`distribution.{profile}.toml` / `.yaml`)
//! 3. Main file (`distribution.toml` / `distribution.yaml`)
//! 4. Environment variables (`DISTRIBUTION_*`)
//! 5. Programmatic overrides passed to [`ConfigLoader::merge`] or
//!    [`ConfigLoader::set`], key by key
//!
//! # Feature Flags
//!
//! - `toml-config` *(default)*: searches `distribution.toml` and `config.toml`
//! - `yaml-config`: searches `distribution.yaml`, `distribution.yml`,
//!   `config.yaml` and `config.yml`
//!
//! # Environment Variable Mapping
//!
//! The `DISTRIBUTION_` prefix is stripped and `__` separates nesting levels:
//!
//! - `DISTRIBUTION_LOGGING__LEVEL=debug` → `logging.level = "debug"`
//! - `DISTRIBUTION_EVENTS__STAMP_ENQUEUE_TIME=false` → `events.stamp_enqueue_time = false`
//!
//! # Example
//!
//! ```rust,ignore
//! use distribution_runtime::config::ConfigLoader;
//!
//! let config = ConfigLoader::new()
//!     .profile("production")
//!     .file("./conf/distribution.toml")
//!     .load()?;
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use figment::{Figment, Provider};
#[cfg(any(feature = "yaml-config", feature = "toml-config"))]
use figment::providers::Format;
#[cfg(feature = "toml-config")]
use figment::providers::Toml;
#[cfg(feature = "yaml-config")]
use figment::providers::Yaml;
use figment::providers::{Env, Serialized};
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use super::error::{ConfigError, ConfigResult};
use super::schema::DistributionConfig;
use super::validation::validate_config;

/// Prefix of environment variables read by the loader.
pub const ENV_PREFIX: &str = "DISTRIBUTION_";

/// Environment variable selecting the active profile.
pub const PROFILE_ENV: &str = "DISTRIBUTION_PROFILE";

/// Directory name below the user config directory.
const CONFIG_DIR_NAME: &str = "distribution";

/// Configuration profile for environment-specific settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Profile {
    #[default]
    Development,
    Production,
    Custom(String),
}

impl Profile {
    /// Returns the profile name as used in file names.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Custom(name) => name,
        }
    }

    /// Parses a profile name; `prod` and `dev` are accepted as shorthands.
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "development" | "dev" => Self::Development,
            _ => Self::Custom(name.to_string()),
        }
    }

    /// Reads the profile from `DISTRIBUTION_PROFILE`, defaulting to development.
    pub fn from_env() -> Self {
        std::env::var(PROFILE_ENV)
            .map(|name| Self::parse(&name))
            .unwrap_or_default()
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Multi-source configuration loader.
pub struct ConfigLoader {
    overrides: Figment,
    profile: Profile,
    search_paths: Vec<PathBuf>,
    load_env: bool,
    config_file: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a loader reading the profile from the environment.
    pub fn new() -> Self {
        Self {
            overrides: Figment::new(),
            profile: Profile::from_env(),
            search_paths: Vec::new(),
            load_env: true,
            config_file: None,
        }
    }

    /// Sets the configuration profile.
    pub fn profile(mut self, profile: impl AsRef<str>) -> Self {
        self.profile = Profile::parse(profile.as_ref());
        self
    }

    /// Adds a directory searched for configuration files.
    ///
    /// When no search path is added, the current directory and the user
    /// config directory are searched.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Loads exactly this file instead of searching.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enables environment variables (the default).
    pub fn with_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Disables environment variables.
    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Merges a provider on top of every other source.
    ///
    /// Only the keys the provider sets are overridden, so a partial provider
    /// leaves file and environment values for other keys in place. Passing
    /// `Serialized::defaults(full_config)` replaces everything.
    pub fn merge(mut self, provider: impl Provider) -> Self {
        self.overrides = self.overrides.merge(provider);
        self
    }

    /// Overrides a single dotted key, e.g. `events.topic_base`.
    pub fn set(self, key: &str, value: impl Serialize) -> Self {
        self.merge(Serialized::default(key, value))
    }

    /// Loads the configuration without validating it.
    pub fn load(self) -> ConfigResult<DistributionConfig> {
        let profile = self.profile.clone();
        let config: DistributionConfig = self.build_figment()?.extract()?;

        debug!(
            profile = %profile,
            logging_level = %config.logging.level,
            topic_base = %config.events.topic_base,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Loads the configuration and runs [`validate_config`] on it.
    pub fn load_validated(self) -> ConfigResult<DistributionConfig> {
        let config = self.load()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn build_figment(mut self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(DistributionConfig::default()));

        figment = match self.config_file.take() {
            Some(path) if path.exists() => {
                info!(path = %path.display(), "Loading configuration file");
                Self::merge_config_file(figment, &path)?
            }
            Some(path) => return Err(ConfigError::FileNotFound(path)),
            None => self.load_config_files(figment),
        };

        if self.load_env {
            trace!(prefix = ENV_PREFIX, "Loading environment variables");
            figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        }

        Ok(figment.merge(std::mem::take(&mut self.overrides)))
    }

    /// Merges one file, dispatching on its extension.
    fn merge_config_file(figment: Figment, path: &Path) -> ConfigResult<Figment> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            #[cfg(feature = "toml-config")]
            "toml" => Ok(figment.merge(Toml::file(path))),
            #[cfg(feature = "yaml-config")]
            "yaml" | "yml" => Ok(figment.merge(Yaml::file(path))),
            _ => Err(ConfigError::ParseError(format!(
                "Unsupported or disabled configuration file format: .{ext}"
            ))),
        }
    }

    fn resolve_search_paths(&self) -> Vec<PathBuf> {
        if !self.search_paths.is_empty() {
            return self.search_paths.clone();
        }
        std::env::current_dir()
            .ok()
            .into_iter()
            .chain(dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME)))
            .collect()
    }

    /// Merges the first matching file of one format, preceded by its profile
    /// variant. Returns whether a main file was found.
    #[cfg(any(feature = "toml-config", feature = "yaml-config"))]
    fn load_format_files<F>(
        &self,
        figment: &mut Figment,
        search_paths: &[PathBuf],
        file_names: &[&str],
        merge_fn: F,
    ) -> bool
    where
        F: Fn(Figment, &Path) -> Figment,
    {
        for dir in search_paths {
            for file_name in file_names {
                let Some((stem, ext)) = file_name.rsplit_once('.') else {
                    continue;
                };

                let profile_path = dir.join(format!("{stem}.{}.{ext}", self.profile));
                if profile_path.exists() {
                    debug!(path = %profile_path.display(), "Loading profile-specific config");
                    *figment = merge_fn(std::mem::take(figment), &profile_path);
                }

                let main_path = dir.join(file_name);
                if main_path.exists() {
                    info!(path = %main_path.display(), "Loading configuration file");
                    *figment = merge_fn(std::mem::take(figment), &main_path);
                    return true;
                }
            }
        }
        false
    }

    #[allow(unused_mut, unused_variables)]
    fn load_config_files(&self, mut figment: Figment) -> Figment {
        let search_paths = self.resolve_search_paths();
        let mut found = false;

        #[cfg(feature = "toml-config")]
        {
            found |= self.load_format_files(
                &mut figment,
                &search_paths,
                &["distribution.toml", "config.toml"],
                |fig, path| fig.merge(Toml::file(path)),
            );
        }

        #[cfg(feature = "yaml-config")]
        {
            found |= self.load_format_files(
                &mut figment,
                &search_paths,
                &[
                    "distribution.yaml",
                    "distribution.yml",
                    "config.yaml",
                    "config.yml",
                ],
                |fig, path| fig.merge(Yaml::file(path)),
            );
        }

        if !found {
            warn!("No configuration file found, using defaults");
        }
        figment
    }
}

/// Loads the configuration from the default locations and validates it.
pub fn load_config() -> ConfigResult<DistributionConfig> {
    ConfigLoader::new().load_validated()
}

/// Loads the configuration from `path`, with environment overrides, and
/// validates it.
pub fn load_config_from_file(path: impl AsRef<Path>) -> ConfigResult<DistributionConfig> {
    ConfigLoader::new().file(path).load_validated()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;
    use crate::config::schema::LogLevel;

    #[test]
    fn test_default_config() {
        Jail::expect_with(|jail| {
            let config = ConfigLoader::new()
                .search_path(jail.directory())
                .without_env()
                .load()
                .map_err(|e| e.to_string())?;

            assert_eq!(config.logging.level.as_str(), "info");
            assert_eq!(config.events.topic_base, "org/apache/sling/distribution");
            assert!(config.events.stamp_enqueue_time);
            Ok(())
        });
    }

    #[test]
    fn test_profile_parse() {
        assert_eq!(Profile::parse("prod"), Profile::Production);
        assert_eq!(Profile::parse("Development"), Profile::Development);
        assert_eq!(Profile::parse("staging"), Profile::Custom("staging".into()));
    }

    #[test]
    fn test_profile_from_env() {
        Jail::expect_with(|jail| {
            jail.set_env(PROFILE_ENV, "production");
            assert_eq!(Profile::from_env(), Profile::Production);
            Ok(())
        });
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn test_file_and_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "distribution.toml",
                r#"
                [logging]
                level = "debug"

                [events]
                topic_base = "com/example/distribution"
                "#,
            )?;
            jail.set_env("DISTRIBUTION_EVENTS__STAMP_ENQUEUE_TIME", "false");

            let config = ConfigLoader::new()
                .search_path(jail.directory())
                .load()
                .map_err(|e| e.to_string())?;

            assert_eq!(config.logging.level, LogLevel::Debug);
            assert_eq!(config.events.topic_base, "com/example/distribution");
            assert!(!config.events.stamp_enqueue_time);
            Ok(())
        });
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn test_profile_file_is_overridden_by_main_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "distribution.production.toml",
                "[logging]\nlevel = \"warn\"\nthread_ids = true\n",
            )?;
            jail.create_file("distribution.toml", "[logging]\nlevel = \"error\"\n")?;

            let config = ConfigLoader::new()
                .profile("prod")
                .search_path(jail.directory())
                .without_env()
                .load()
                .map_err(|e| e.to_string())?;

            assert_eq!(config.logging.level, LogLevel::Error);
            assert!(config.logging.thread_ids);
            Ok(())
        });
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn test_partial_override_keeps_other_sources() {
        use crate::config::schema::EventsConfig;

        Jail::expect_with(|jail| {
            jail.create_file(
                "distribution.toml",
                "[logging]\nlevel = \"debug\"\n\n[events]\nstamp_enqueue_time = false\n",
            )?;

            let config = ConfigLoader::new()
                .search_path(jail.directory())
                .without_env()
                .set("events.topic_base", "com/example/distribution")
                .load()
                .map_err(|e| e.to_string())?;

            assert_eq!(config.logging.level, LogLevel::Debug);
            assert_eq!(config.events.topic_base, "com/example/distribution");
            assert!(!config.events.stamp_enqueue_time);

            let config = ConfigLoader::new()
                .search_path(jail.directory())
                .without_env()
                .merge(Serialized::default(
                    "events",
                    EventsConfig {
                        topic_base: "com/example/other".to_string(),
                        stamp_enqueue_time: true,
                    },
                ))
                .load()
                .map_err(|e| e.to_string())?;

            assert_eq!(config.logging.level, LogLevel::Debug);
            assert_eq!(config.events.topic_base, "com/example/other");
            assert!(config.events.stamp_enqueue_time);
            Ok(())
        });
    }

    #[test]
    fn test_override_beats_environment() {
        Jail::expect_with(|jail| {
            jail.set_env("DISTRIBUTION_LOGGING__LEVEL", "warn");
            jail.set_env("DISTRIBUTION_EVENTS__TOPIC_BASE", "from/env");

            let config = ConfigLoader::new()
                .search_path(jail.directory())
                .set("events.topic_base", "from/code")
                .load()
                .map_err(|e| e.to_string())?;

            assert_eq!(config.logging.level, LogLevel::Warn);
            assert_eq!(config.events.topic_base, "from/code");
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file() {
        Jail::expect_with(|jail| {
            let missing = jail.directory().join("nope.toml");
            let result = ConfigLoader::new().file(&missing).without_env().load();
            assert!(matches!(result, Err(ConfigError::FileNotFound(p)) if p == missing));
            Ok(())
        });
    }

    #[test]
    fn test_load_validated_rejects_bad_topic_base() {
        Jail::expect_with(|jail| {
            jail.set_env("DISTRIBUTION_EVENTS__TOPIC_BASE", "/leading/slash");

            let result = ConfigLoader::new()
                .search_path(jail.directory())
                .load_validated();
            assert!(matches!(result, Err(ConfigError::InvalidTopicBase { .. })));
            Ok(())
        });
    }
}
