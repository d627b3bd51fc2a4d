//! Provider listing command handler.

use anyhow::Result;

use crate::config::{ConfigFile, ConfigManager};
use crate::ui::Style;

/// Prints configured providers to stdout.
///
/// If `specific_provider` is provided, shows detailed information for that provider.
/// Otherwise, lists all configured providers with their endpoints and models.
pub fn print_providers(specific_provider: Option<&str>) -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = manager.load_or_default()?;
    print_providers_from(&config, specific_provider)
}

fn print_providers_from(config: &ConfigFile, specific_provider: Option<&str>) -> Result<()> {
    if config.providers.is_empty() {
        println!("No providers configured.");
        println!(
            "{}",
            Style::hint("Add providers to ~/.config/termfolio/config.toml to enable chat mode")
        );
        return Ok(());
    }

    let default_provider = config.termfolio.provider.as_deref();

    if let Some(provider_name) = specific_provider {
        let Some(provider) = config.providers.get(provider_name) else {
            anyhow::bail!("Provider '{provider_name}' not found");
        };

        let is_default = default_provider == Some(provider_name);
        println!(
            "{} {}{}",
            Style::header("Provider:"),
            Style::value(provider_name),
            if is_default {
                format!(" {}", Style::default_marker())
            } else {
                String::new()
            }
        );
        println!(
            "  {} = {}",
            Style::label("endpoint"),
            Style::secondary(&provider.endpoint)
        );
        if provider.requires_api_key() {
            let has_key = provider.get_api_key().is_some();
            println!(
                "  {}  = {}",
                Style::label("api_key"),
                if has_key {
                    Style::success("(set)")
                } else {
                    Style::warning("(not set)")
                }
            );
        }
        if provider.models.is_empty() {
            println!(
                "  {}   = {}",
                Style::label("models"),
                Style::secondary("(none configured)")
            );
        } else {
            println!("  {}:", Style::label("models"));
            for model in &provider.models {
                println!("    - {}", Style::value(model));
            }
        }
    } else {
        let mut names: Vec<&String> = config.providers.keys().collect();
        names.sort_unstable();

        println!("{}\n", Style::header("Configured providers"));
        for name in names {
            let provider = &config.providers[name];
            let is_default = default_provider == Some(name.as_str());
            println!(
                "  {}{}",
                Style::value(name),
                if is_default {
                    format!(" {}", Style::default_marker())
                } else {
                    String::new()
                }
            );
            println!(
                "    {} {}",
                Style::label("endpoint:"),
                Style::secondary(&provider.endpoint)
            );
            if !provider.models.is_empty() {
                println!(
                    "    {} {}",
                    Style::label("models:"),
                    provider.models.join(", ")
                );
            }
        }
    }

    Ok(())
}
