use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::paths;
use crate::ui::Style;

/// Default reveal speed for shell output, per character.
pub const DEFAULT_TYPEWRITER_MS: u64 = 8;

/// Default settings in the `[termfolio]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TermfolioConfig {
    /// Default provider name for chat mode.
    pub provider: Option<String>,
    /// Default model name for chat mode.
    pub model: Option<String>,
    /// Milliseconds per character when revealing output; 0 disables it.
    pub typewriter_ms: Option<u64>,
}

/// Configuration for a completion provider.
///
/// Each provider has an endpoint and optional API key settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The OpenAI-compatible API endpoint URL.
    pub endpoint: String,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// List of available models for this provider.
    #[serde(default)]
    pub models: Vec<String>,
}

impl ProviderConfig {
    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone().filter(|key| !key.is_empty())
    }

    /// Returns `true` if this provider requires an API key.
    pub const fn requires_api_key(&self) -> bool {
        self.api_key.is_some() || self.api_key_env.is_some()
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/termfolio/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Default settings.
    #[serde(default)]
    pub termfolio: TermfolioConfig,
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

/// The completion backend chat mode talks to.
#[derive(Debug, Clone)]
pub struct ChatBackend {
    /// The selected provider name.
    pub provider_name: String,
    /// The API endpoint URL.
    pub endpoint: String,
    /// The model to chat with.
    pub model: String,
    /// The API key, if one was found.
    pub api_key: Option<String>,
    /// Whether the provider declares a key at all.
    pub requires_api_key: bool,
}

impl ChatBackend {
    /// A key is declared but could not be resolved.
    pub const fn is_missing_key(&self) -> bool {
        self.requires_api_key && self.api_key.is_none()
    }
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// `None` when no provider is configured; chat still opens but every
    /// message reports the missing configuration.
    pub chat: Option<ChatBackend>,
    /// Per-character reveal delay; zero disables the effect.
    pub typewriter: Duration,
}

/// Options for resolving configuration.
///
/// Contains CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Provider name override.
    pub provider: Option<String>,
    /// Model name override.
    pub model: Option<String>,
    /// Disable the typewriter effect.
    pub no_typewriter: bool,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// CLI options take precedence over config file values. A missing provider
/// is not an error; an unknown one is.
///
/// # Errors
///
/// Returns an error if the named provider does not exist or no model can be
/// determined for it.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let typewriter = if options.no_typewriter {
        Duration::ZERO
    } else {
        Duration::from_millis(
            config_file
                .termfolio
                .typewriter_ms
                .unwrap_or(DEFAULT_TYPEWRITER_MS),
        )
    };

    let provider_name = options
        .provider
        .as_ref()
        .or(config_file.termfolio.provider.as_ref())
        .cloned();

    let Some(provider_name) = provider_name else {
        return Ok(ResolvedConfig {
            chat: None,
            typewriter,
        });
    };

    let provider_config = config_file.providers.get(&provider_name).ok_or_else(|| {
        let mut available: Vec<_> = config_file.providers.keys().map(String::as_str).collect();
        available.sort_unstable();
        if available.is_empty() {
            anyhow::anyhow!(
                "Provider '{provider_name}' not found\n\n\
                 No providers configured. Add providers to ~/.config/termfolio/config.toml"
            )
        } else {
            anyhow::anyhow!(
                "Provider '{provider_name}' not found\n\n\
                 Available providers:\n  \
                 - {}\n\n\
                 Add providers to ~/.config/termfolio/config.toml",
                available.join("\n  - ")
            )
        }
    })?;

    let model = options
        .model
        .as_ref()
        .or(config_file.termfolio.model.as_ref())
        .or(provider_config.models.first())
        .cloned()
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Missing required configuration: 'model'\n\n\
                 Please provide it via:\n  \
                 - CLI option: termfolio --model <name>\n  \
                 - Config file: ~/.config/termfolio/config.toml"
            )
        })?;

    // Warn if model is not in provider's models list
    if !provider_config.models.is_empty() && !provider_config.models.contains(&model) {
        crate::warn!(
            "{} Model '{}' is not in the configured models list for '{}'\n\
             Configured models: {}\n\
             Proceeding anyway...\n",
            Style::warning("Warning:"),
            model,
            provider_name,
            provider_config.models.join(", ")
        );
    }

    Ok(ResolvedConfig {
        chat: Some(ChatBackend {
            provider_name,
            endpoint: provider_config.endpoint.clone(),
            model,
            api_key: provider_config.get_api_key(),
            requires_api_key: provider_config.requires_api_key(),
        }),
        typewriter,
    })
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/termfolio/config.toml`
    /// or `~/.config/termfolio/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    /// Uses an explicit config file path.
    pub const fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    /// Loads the config file, treating a missing file as empty.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if !self.config_path.exists() {
            return Ok(ConfigFile::default());
        }
        self.load()
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }
}
