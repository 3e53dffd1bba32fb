//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.docchat/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::Level;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::state::ThemeMode;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DocchatConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
    #[serde(default)]
    pub models: Vec<ModelEntry>,
    /// Messages from loading, replayed once the logger is up.
    #[serde(skip)]
    pub diagnostics: Vec<Diagnostic>,
}

/// A log record produced before the logger exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

impl Diagnostic {
    fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub theme: Option<ThemeMode>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
    pub pick_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub default_model: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct VoiceConfig {
    pub command: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ModelEntry {
    pub name: String,
    pub description: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_VOICE_LANGUAGE: &str = "en-US";
pub const DEFAULT_LOG_FILE: &str = "docchat.log";

/// Models the stock backend accepts on `/set-model`.
fn default_models() -> Vec<ModelEntry> {
    vec![
        ModelEntry {
            name: "gpt-4-0".to_string(),
            description: Some("OpenAI worker".to_string()),
        },
        ModelEntry {
            name: "mistral".to_string(),
            description: Some("Mistral via Hugging Face".to_string()),
        },
    ]
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub backend_url: String,
    pub timeout: Duration,
    /// Model to select on startup. `None` leaves the backend's default.
    pub model_name: Option<String>,
    pub voice_command: Option<String>,
    pub voice_language: String,
    pub theme: ThemeMode,
    pub log_level: log::LevelFilter,
    pub log_file: PathBuf,
    pub pick_dir: PathBuf,
    pub initial_file: Option<PathBuf>,
    pub models: Vec<ModelEntry>,
    /// Loading and resolution messages, oldest first.
    pub diagnostics: Vec<Diagnostic>,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub backend_url: Option<String>,
    pub voice_command: Option<String>,
    pub file: Option<PathBuf>,
    pub dir: Option<PathBuf>,
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

/// Returns the path to `~/.docchat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".docchat").join("config.toml"))
}

/// Load config from `~/.docchat/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `DocchatConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<DocchatConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            let mut config = DocchatConfig::default();
            config.diagnostics.push(Diagnostic::new(
                Level::Warn,
                "Could not determine home directory, using default config",
            ));
            return Ok(config);
        }
    };

    if !path.exists() {
        let mut config = DocchatConfig::default();
        config.diagnostics.push(Diagnostic::new(
            Level::Info,
            format!("No config file found, generating default at {}", path.display()),
        ));
        if let Err(message) = generate_default_config(&path) {
            config.diagnostics.push(Diagnostic::new(Level::Warn, message));
        }
        return Ok(config);
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<DocchatConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let mut config: DocchatConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    let summary = format!("Config: {:?}", config);
    config.diagnostics.extend([
        Diagnostic::new(Level::Info, format!("Loaded config from {}", path.display())),
        Diagnostic::new(Level::Debug, summary),
    ]);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) -> Result<(), String> {
    let default_content = r#"# docchat configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# theme = "dark"                     # "dark" or "light" (Ctrl+T toggles at runtime)
# log_level = "debug"                # "error", "warn", "info", "debug", "trace", "off"
# log_file = "docchat.log"
# pick_dir = "~/Documents"           # Where the file picker (Ctrl+O) starts

# [backend]
# base_url = "http://localhost:8000" # Or set DOCCHAT_BACKEND_URL
# timeout_secs = 120
# default_model = "gpt-4-0"          # Sent to /set-model on startup. Or set DOCCHAT_MODEL

# [voice]
# command = "whisper-listen --once"  # Prints one transcript to stdout. Or set DOCCHAT_VOICE_COMMAND
# language = "en-US"                 # Passed to the command as DOCCHAT_VOICE_LANG

# [[models]]
# name = "gpt-4-0"
# description = "OpenAI worker"

# [[models]]
# name = "mistral"
# description = "Mistral via Hugging Face"
"#;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {e}"))?;
    }
    fs::write(path, default_content).map_err(|e| format!("Failed to write default config: {e}"))
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &DocchatConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], with the environment supplied by the caller.
pub fn resolve_with_env(
    config: &DocchatConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let mut diagnostics = config.diagnostics.clone();

    // Backend URL: CLI → env → config → default
    let backend_url = cli
        .backend_url
        .clone()
        .or_else(|| env("DOCCHAT_BACKEND_URL"))
        .or_else(|| config.backend.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

    // Model: env → config (no default: the backend picks its own)
    let model_name = env("DOCCHAT_MODEL").or_else(|| config.backend.default_model.clone());

    // Voice command: CLI → env → config; blank means disabled
    let voice_command = cli
        .voice_command
        .clone()
        .or_else(|| env("DOCCHAT_VOICE_COMMAND"))
        .or_else(|| config.voice.command.clone())
        .filter(|c| !c.trim().is_empty());

    let voice_language = config
        .voice
        .language
        .clone()
        .unwrap_or_else(|| DEFAULT_VOICE_LANGUAGE.to_string());

    let log_level = config
        .general
        .log_level
        .as_deref()
        .and_then(|level| match level.parse() {
            Ok(level) => Some(level),
            Err(_) => {
                diagnostics.push(Diagnostic::new(
                    Level::Warn,
                    format!("Unknown log_level '{level}', using debug"),
                ));
                None
            }
        })
        .unwrap_or(log::LevelFilter::Debug);

    let pick_dir = cli
        .dir
        .clone()
        .or_else(|| config.general.pick_dir.as_deref().map(expand_home))
        .unwrap_or_else(|| PathBuf::from("."));

    let models = if config.models.is_empty() {
        default_models()
    } else {
        config.models.clone()
    };

    ResolvedConfig {
        backend_url,
        timeout: Duration::from_secs(
            config
                .backend
                .timeout_secs
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        ),
        model_name,
        voice_command,
        voice_language,
        theme: config.general.theme.unwrap_or_default(),
        log_level,
        log_file: PathBuf::from(
            config
                .general
                .log_file
                .as_deref()
                .unwrap_or(DEFAULT_LOG_FILE),
        ),
        pick_dir,
        initial_file: cli.file.clone(),
        models,
        diagnostics,
    }
}

/// Expands a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
