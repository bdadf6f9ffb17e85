//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.quip/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct QuipConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub countdown: CountdownConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CountdownConfig {
    pub seconds: Option<u32>,
    pub tick_millis: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "https://api.chucknorris.io";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_COUNTDOWN_SECS: u32 = 5;
pub const DEFAULT_TICK_MILLIS: u64 = 1000;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub countdown_secs: u32,
    pub tick: Duration,
    /// `None` seeds category sampling from OS entropy.
    pub seed: Option<u64>,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub seed: Option<u64>,
    pub countdown_secs: Option<u32>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.quip/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".quip").join("config.toml"))
}

/// Load config from `~/.quip/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `QuipConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<QuipConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(QuipConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<QuipConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(QuipConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: QuipConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# Quip Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# seed = 42                          # Or set QUIP_SEED; fixes category sampling

# [api]
# base_url = "https://api.chucknorris.io"   # Or set QUIP_BASE_URL
# request_timeout_secs = 10

# [countdown]
# seconds = 5                        # Time to pick a category
# tick_millis = 1000
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &QuipConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env(
    config: &QuipConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env("QUIP_BASE_URL"))
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Seed: CLI → env → config → entropy
    let seed = cli
        .seed
        .or_else(|| {
            env("QUIP_SEED").and_then(|s| match s.trim().parse() {
                Ok(seed) => Some(seed),
                Err(e) => {
                    warn!("Ignoring invalid QUIP_SEED {:?}: {}", s, e);
                    None
                }
            })
        })
        .or(config.general.seed);

    let countdown_secs = match cli
        .countdown_secs
        .or(config.countdown.seconds)
        .unwrap_or(DEFAULT_COUNTDOWN_SECS)
    {
        0 => {
            warn!("Countdown of 0 seconds would never clear the choices, using 1");
            1
        }
        secs => secs,
    };

    ResolvedConfig {
        base_url: base_url.trim_end_matches('/').to_string(),
        request_timeout: Duration::from_secs(
            config
                .api
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        ),
        countdown_secs,
        tick: Duration::from_millis(config.countdown.tick_millis.unwrap_or(DEFAULT_TICK_MILLIS)),
        seed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = QuipConfig::default();
        assert!(config.api.base_url.is_none());
        assert!(config.general.seed.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&QuipConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.countdown_secs, DEFAULT_COUNTDOWN_SECS);
        assert_eq!(resolved.tick, Duration::from_secs(1));
        assert_eq!(resolved.request_timeout, Duration::from_secs(10));
        assert!(resolved.seed.is_none());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = QuipConfig {
            general: GeneralConfig { seed: Some(7) },
            api: ApiConfig {
                base_url: Some("http://localhost:9000/".to_string()),
                request_timeout_secs: Some(3),
            },
            countdown: CountdownConfig {
                seconds: Some(8),
                tick_millis: Some(250),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.base_url, "http://localhost:9000");
        assert_eq!(resolved.request_timeout, Duration::from_secs(3));
        assert_eq!(resolved.countdown_secs, 8);
        assert_eq!(resolved.tick, Duration::from_millis(250));
        assert_eq!(resolved.seed, Some(7));
    }

    #[test]
    fn test_env_beats_config_and_cli_beats_env() {
        let config = QuipConfig {
            api: ApiConfig {
                base_url: Some("http://from-config".to_string()),
                ..Default::default()
            },
            general: GeneralConfig { seed: Some(1) },
            ..Default::default()
        };
        let env = |key: &str| match key {
            "QUIP_BASE_URL" => Some("http://from-env".to_string()),
            "QUIP_SEED" => Some("2".to_string()),
            _ => None,
        };

        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.base_url, "http://from-env");
        assert_eq!(resolved.seed, Some(2));

        let cli = CliOverrides {
            base_url: Some("http://from-cli".to_string()),
            seed: Some(3),
            countdown_secs: Some(2),
        };
        let resolved = resolve_with_env(&config, &cli, env);
        assert_eq!(resolved.base_url, "http://from-cli");
        assert_eq!(resolved.seed, Some(3));
        assert_eq!(resolved.countdown_secs, 2);
    }

    #[test]
    fn test_zero_countdown_is_raised_to_one() {
        let cli = CliOverrides {
            countdown_secs: Some(0),
            ..CliOverrides::default()
        };
        let resolved = resolve_with_env(&QuipConfig::default(), &cli, no_env);
        assert_eq!(resolved.countdown_secs, 1);

        let mut config = QuipConfig::default();
        config.countdown.seconds = Some(0);
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.countdown_secs, 1);
    }

    #[test]
    fn test_invalid_env_seed_falls_back_to_config() {
        let config = QuipConfig {
            general: GeneralConfig { seed: Some(11) },
            ..Default::default()
        };
        let env = |key: &str| (key == "QUIP_SEED").then(|| "not-a-number".to_string());
        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.seed, Some(11));
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
seed = 99

[api]
base_url = "http://127.0.0.1:8080"
request_timeout_secs = 30

[countdown]
seconds = 10
tick_millis = 500
"#;
        let config: QuipConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.seed, Some(99));
        assert_eq!(config.api.base_url.as_deref(), Some("http://127.0.0.1:8080"));
        assert_eq!(config.api.request_timeout_secs, Some(30));
        assert_eq!(config.countdown.seconds, Some(10));
        assert_eq!(config.countdown.tick_millis, Some(500));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[countdown]
seconds = 3
"#;
        let config: QuipConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.countdown.seconds, Some(3));
        assert!(config.countdown.tick_millis.is_none());
        assert!(config.api.base_url.is_none());
    }

    #[test]
    fn test_generated_default_is_valid_toml() {
        let config: QuipConfig = toml::from_str(DEFAULT_CONFIG_CONTENT).unwrap();
        assert!(config.api.base_url.is_none());
    }

    #[test]
    fn test_load_config_from_generates_missing_file() {
        let dir = std::env::temp_dir().join(format!("quip-config-test-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        let config = load_config_from(&path).unwrap();
        assert!(config.general.seed.is_none());
        assert!(path.exists());

        fs::write(&path, "[general]\nseed = 5\n").unwrap();
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.general.seed, Some(5));

        fs::write(&path, "[general\nseed = ").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));

        let _ = fs::remove_dir_all(&dir);
    }
}
