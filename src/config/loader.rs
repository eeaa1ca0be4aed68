//! Configuration loader with layered sources
//!
//! Application settings are loaded from the following sources, highest
//! precedence first:
//! 1. Environment variables (PATHGATE__*)
//! 2. Configuration file (TOML)
//! 3. Default values
//!
//! Path rules come from a separate JSON or TOML document referenced by
//! `rules` (or passed directly).

use crate::access_control::{CompositePathValidator, SharedWhitelist};
use crate::config::types::{AppConfig, PathRulesConfig};
use crate::error::{ConfigError, ConfigResult};
use config::{Config, Environment, File, FileFormat};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Default configuration file paths to check (in order)
const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "pathgate.toml",
    ".pathgate.toml",
    "~/.config/pathgate/config.toml",
    "/etc/pathgate/config.toml",
];

/// Format of a path rules document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RulesFormat {
    #[default]
    Json,
    Toml,
}

impl RulesFormat {
    /// Pick the format from the file extension, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => RulesFormat::Toml,
            _ => RulesFormat::Json,
        }
    }
}

/// Load configuration from a TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> ConfigResult<AppConfig> {
    let config = Config::builder()
        .add_source(File::from_str(toml_str, FileFormat::Toml))
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Load configuration from files and environment
pub fn load_config(config_path: Option<&str>) -> ConfigResult<AppConfig> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        // Explicit path provided - must exist
        let expanded = shellexpand::tilde(path);
        if !Path::new(expanded.as_ref()).exists() {
            return Err(ConfigError::Load(format!(
                "Configuration file not found: {}",
                path
            )));
        }
        builder = builder.add_source(File::new(&expanded, FileFormat::Toml));
    } else {
        // First existing default path wins
        for path in DEFAULT_CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                debug!(path = %expanded, "Using default configuration file");
                builder = builder.add_source(File::new(&expanded, FileFormat::Toml));
                break;
            }
        }
    }

    // e.g. PATHGATE__RULES, PATHGATE__POLICY__UNMATCHED,
    // PATHGATE__WHITELIST__USERNAMES=admin@example.com,ops@example.com
    builder = builder.add_source(
        Environment::with_prefix("PATHGATE")
            .prefix_separator("__")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("whitelist.usernames")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Validate configuration values
fn validate_config(config: &AppConfig) -> ConfigResult<()> {
    if let Err(e) = EnvFilter::try_new(&config.logging.level) {
        return Err(ConfigError::Invalid {
            message: format!("logging.level '{}' is invalid: {}", config.logging.level, e),
        });
    }

    if let Some(rules) = &config.rules
        && rules.trim().is_empty()
    {
        return Err(ConfigError::Invalid {
            message: "rules must not be blank (omit it to run without groups)".to_string(),
        });
    }

    Ok(())
}

/// Parse a path rules document held in memory
///
/// Decoding is strict: every name, path and username must be a string.
pub fn load_rules_from_str(
    contents: &str,
    format: RulesFormat,
    source_name: &str,
) -> ConfigResult<PathRulesConfig> {
    match format {
        RulesFormat::Json => {
            serde_json::from_str(contents).map_err(|e| ConfigError::decode(source_name, e))
        }
        RulesFormat::Toml => {
            toml::from_str(contents).map_err(|e| ConfigError::decode(source_name, e))
        }
    }
}

/// Parse a path rules document from a reader
pub fn load_rules_from_reader<R: Read>(
    mut reader: R,
    format: RulesFormat,
    source_name: &str,
) -> ConfigResult<PathRulesConfig> {
    let mut contents = String::new();
    reader
        .read_to_string(&mut contents)
        .map_err(|e| ConfigError::read(source_name, e))?;

    load_rules_from_str(&contents, format, source_name)
}

/// Read and parse a path rules file
pub fn load_rules(path: &str) -> ConfigResult<PathRulesConfig> {
    let expanded = shellexpand::tilde(path);
    let path = Path::new(expanded.as_ref());

    let file = std::fs::File::open(path).map_err(|e| ConfigError::read(&*expanded, e))?;
    load_rules_from_reader(file, RulesFormat::from_path(path), &expanded)
}

/// Build the path validator for an optional rules file.
///
/// Without a rules file the validator has no groups and only consults the
/// whitelist.
pub fn load_path_validator(
    rules_path: Option<&str>,
    whitelist: SharedWhitelist,
) -> ConfigResult<CompositePathValidator> {
    match rules_path.filter(|p| !p.is_empty()) {
        Some(path) => {
            let rules = load_rules(path)?;
            info!(source = path, groups = rules.groups.len(), "Loaded path rules");
            CompositePathValidator::from_config(&rules, whitelist)
        }
        None => {
            info!("No path rules configured, only the whitelist applies");
            Ok(CompositePathValidator::empty(whitelist))
        }
    }
}
