//! Configuration file parsing and management.
//!
//! Handles loading configuration from TOML files and the `DS_*`
//! environment variables, with precedence (lowest to highest):
//! XDG config, home directory config, local directory config,
//! environment variables, CLI arguments. The merge itself happens in the
//! CLI; this module supplies discovery, parsing, and validation.

use crate::error::DomainScoutError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Configuration loaded from TOML files.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Default values for CLI options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    /// Candidate generation defaults (prefixes/suffixes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<GenerationConfig>,
}

/// Default configuration values that map to CLI options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    /// Default batch size (concurrent checks per chunk)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<usize>,

    /// Default reachability timeout (as string, e.g. "10s", "2m")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    /// Default DNS lookup timeout (as string)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_timeout: Option<String>,

    /// Default DNS-over-HTTPS resolver endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolver: Option<String>,

    /// Default JSON output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

/// Candidate generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GenerationConfig {
    /// Subdomain prefixes ("" is the bare apex and is allowed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefixes: Option<Vec<String>>,

    /// TLD suffixes, each starting with a dot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffixes: Option<Vec<String>>,
}

/// Configuration discovery and loading.
pub struct ConfigManager {
    /// Whether to emit notices about discovered files
    pub verbose: bool,
}

impl ConfigManager {
    /// Create a new configuration manager.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Load configuration from a specific file.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, DomainScoutError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DomainScoutError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            DomainScoutError::config(format!(
                "Failed to read configuration file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: FileConfig = toml::from_str(&content).map_err(|e| {
            DomainScoutError::config(format!("Failed to parse TOML configuration: {}", e))
        })?;

        validate_config(&config)?;

        Ok(config)
    }

    /// Discover and load configuration files in precedence order.
    ///
    /// Later files win: XDG config first, then the home directory, then
    /// the current directory.
    pub fn discover_and_load(&self) -> Result<FileConfig, DomainScoutError> {
        let mut merged = FileConfig::default();
        let mut loaded = Vec::new();

        let candidates = [
            self.xdg_config_path(),
            self.home_config_path(),
            self.local_config_path(),
        ];

        for path in candidates.into_iter().flatten() {
            if let Ok(config) = self.load_file(&path) {
                merged = merge_configs(merged, config);
                loaded.push(path);
            }
        }

        if self.verbose && loaded.len() > 1 {
            debug!(
                files = ?loaded,
                "multiple config files found; later files take precedence"
            );
        }

        Ok(merged)
    }

    /// Config file in the current directory.
    fn local_config_path(&self) -> Option<PathBuf> {
        let candidates = ["./domain-scout.toml", "./.domain-scout.toml"];

        candidates
            .iter()
            .map(Path::new)
            .find(|p| p.exists())
            .map(Path::to_path_buf)
    }

    /// Config file in the user's home directory.
    fn home_config_path(&self) -> Option<PathBuf> {
        let home = env::var_os("HOME")?;
        let candidates = [".domain-scout.toml", "domain-scout.toml"];

        candidates
            .iter()
            .map(|c| Path::new(&home).join(c))
            .find(|p| p.exists())
    }

    /// Config file under XDG_CONFIG_HOME (or ~/.config).
    fn xdg_config_path(&self) -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;

        let path = config_dir.join("domain-scout").join("config.toml");
        path.exists().then_some(path)
    }
}

/// Merge two configurations; values from `higher` win.
pub fn merge_configs(lower: FileConfig, higher: FileConfig) -> FileConfig {
    FileConfig {
        defaults: match (lower.defaults, higher.defaults) {
            (Some(mut lo), Some(hi)) => {
                if hi.batch_size.is_some() {
                    lo.batch_size = hi.batch_size;
                }
                if hi.timeout.is_some() {
                    lo.timeout = hi.timeout;
                }
                if hi.dns_timeout.is_some() {
                    lo.dns_timeout = hi.dns_timeout;
                }
                if hi.resolver.is_some() {
                    lo.resolver = hi.resolver;
                }
                if hi.json.is_some() {
                    lo.json = hi.json;
                }
                Some(lo)
            }
            (lo, hi) => hi.or(lo),
        },
        generation: match (lower.generation, higher.generation) {
            (Some(mut lo), Some(hi)) => {
                if hi.prefixes.is_some() {
                    lo.prefixes = hi.prefixes;
                }
                if hi.suffixes.is_some() {
                    lo.suffixes = hi.suffixes;
                }
                Some(lo)
            }
            (lo, hi) => hi.or(lo),
        },
    }
}

/// Validate a configuration for common issues.
fn validate_config(config: &FileConfig) -> Result<(), DomainScoutError> {
    if let Some(defaults) = &config.defaults {
        if let Some(batch_size) = defaults.batch_size {
            if batch_size == 0 || batch_size > 100 {
                return Err(DomainScoutError::config(
                    "batch_size must be between 1 and 100",
                ));
            }
        }

        for (name, value) in [
            ("timeout", &defaults.timeout),
            ("dns_timeout", &defaults.dns_timeout),
        ] {
            if let Some(timeout_str) = value {
                if parse_timeout_string(timeout_str).is_none() {
                    return Err(DomainScoutError::config(format!(
                        "Invalid {} '{}'. Use a format like '10s', '30s', '2m'",
                        name, timeout_str
                    )));
                }
            }
        }

        if let Some(resolver) = &defaults.resolver {
            if !resolver.starts_with("https://") {
                return Err(DomainScoutError::config(
                    "resolver must be an https:// URL",
                ));
            }
        }
    }

    if let Some(generation) = &config.generation {
        // Prefixes may be empty strings (the bare apex), but a non-empty
        // prefix has to end with a dot to splice onto the term.
        if let Some(prefixes) = &generation.prefixes {
            for prefix in prefixes {
                if !prefix.is_empty() && !prefix.ends_with('.') {
                    return Err(DomainScoutError::config(format!(
                        "Prefix '{}' must end with a dot (or be empty for the bare domain)",
                        prefix
                    )));
                }
            }
        }

        if let Some(suffixes) = &generation.suffixes {
            if suffixes.is_empty() {
                return Err(DomainScoutError::config("suffix list cannot be empty"));
            }
            for suffix in suffixes {
                if !suffix.starts_with('.') || suffix.len() < 2 {
                    return Err(DomainScoutError::config(format!(
                        "Suffix '{}' must start with a dot, e.g. '.com'",
                        suffix
                    )));
                }
            }
        }
    }

    Ok(())
}

/// Environment variable configuration mirroring the CLI options.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub batch_size: Option<usize>,
    pub timeout: Option<String>,
    pub dns_timeout: Option<String>,
    pub resolver: Option<String>,
    pub prefixes: Option<Vec<String>>,
    pub suffixes: Option<Vec<String>>,
    pub json: Option<bool>,
    pub config: Option<String>,
}

/// Load configuration from `DS_*` environment variables.
///
/// Invalid values are logged and ignored rather than aborting the run.
pub fn load_env_config() -> EnvConfig {
    let mut env_config = EnvConfig::default();

    if let Ok(val) = env::var("DS_BATCH_SIZE") {
        match val.parse::<usize>() {
            Ok(batch_size) if (1..=100).contains(&batch_size) => {
                debug!(batch_size, "using DS_BATCH_SIZE");
                env_config.batch_size = Some(batch_size);
            }
            _ => warn!(value = %val, "invalid DS_BATCH_SIZE, must be 1-100"),
        }
    }

    for (var, slot) in [
        ("DS_TIMEOUT", &mut env_config.timeout),
        ("DS_DNS_TIMEOUT", &mut env_config.dns_timeout),
    ] {
        if let Ok(val) = env::var(var) {
            if parse_timeout_string(&val).is_some() {
                debug!(var, value = %val, "using timeout from environment");
                *slot = Some(val);
            } else {
                warn!(var, value = %val, "invalid timeout, use a format like '10s' or '2m'");
            }
        }
    }

    if let Ok(resolver) = env::var("DS_RESOLVER") {
        if !resolver.trim().is_empty() {
            debug!(resolver = %resolver, "using DS_RESOLVER");
            env_config.resolver = Some(resolver);
        }
    }

    // Comma-separated lists; an empty element in DS_SUBDOMAIN keeps the
    // bare apex in play ("" is a valid prefix).
    if let Ok(prefix_str) = env::var("DS_SUBDOMAIN") {
        let prefixes: Vec<String> = prefix_str.split(',').map(|s| s.trim().to_string()).collect();
        if !prefixes.is_empty() {
            env_config.prefixes = Some(prefixes);
        }
    }

    if let Ok(suffix_str) = env::var("DS_TLD") {
        let suffixes: Vec<String> = suffix_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if !suffixes.is_empty() {
            env_config.suffixes = Some(suffixes);
        }
    }

    if let Ok(val) = env::var("DS_JSON") {
        match val.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => env_config.json = Some(true),
            "false" | "0" | "no" | "off" => env_config.json = Some(false),
            _ => warn!(value = %val, "invalid DS_JSON, use true/false"),
        }
    }

    if let Ok(config_path) = env::var("DS_CONFIG") {
        if !config_path.trim().is_empty() {
            env_config.config = Some(config_path);
        }
    }

    env_config
}

/// Parse a timeout string like "10s", "30s", "2m" into seconds.
pub fn parse_timeout_string(timeout_str: &str) -> Option<u64> {
    let timeout_str = timeout_str.trim().to_lowercase();

    if let Some(s) = timeout_str.strip_suffix('s') {
        s.parse::<u64>().ok()
    } else if let Some(m) = timeout_str.strip_suffix('m') {
        m.parse::<u64>().ok().map(|m| m * 60)
    } else {
        // Assume seconds if no unit
        timeout_str.parse::<u64>().ok()
    }
}
