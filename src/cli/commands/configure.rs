//! Configure command handler for editing default settings.

use anyhow::{Result, bail};
use inquire::{CustomType, Select, Text};

use crate::config::{ConfigFile, ConfigManager, DEFAULT_TYPEWRITER_MS, TermfolioConfig};
use crate::ui::{Style, handle_prompt_cancellation};

/// Runs the configure command.
///
/// With `show`, prints the current defaults. Otherwise lets the user pick the
/// default provider, model and typewriter speed.
pub fn run_configure(show: bool) -> Result<()> {
    let manager = ConfigManager::new()?;
    if show {
        let config = manager.load_or_default()?;
        print_current_defaults(&config);
        println!(
            "  {}     {}",
            Style::label("file"),
            Style::secondary(manager.config_path().display())
        );
        return Ok(());
    }

    handle_prompt_cancellation(|| run_configure_inner(&manager))
}

fn run_configure_inner(manager: &ConfigManager) -> Result<()> {
    let mut config = manager.load_or_default()?;

    // Check if at least one provider is configured
    if config.providers.is_empty() {
        bail!(
            "No providers configured.\n\n\
             Add a [providers.<name>] section to {} first.",
            manager.config_path().display()
        );
    }

    // Display current defaults
    print_current_defaults(&config);

    let mut provider_names: Vec<String> = config.providers.keys().cloned().collect();
    provider_names.sort_unstable();

    let provider = select_provider(&provider_names, config.termfolio.provider.as_deref())?;

    let available_models: Vec<String> = config
        .providers
        .get(&provider)
        .map(|p| p.models.clone())
        .unwrap_or_default();
    let model = select_model(&available_models, config.termfolio.model.as_deref())?;

    let typewriter_ms = select_typewriter_ms(config.termfolio.typewriter_ms)?;

    config.termfolio = TermfolioConfig {
        provider: Some(provider),
        model: Some(model),
        typewriter_ms: Some(typewriter_ms),
    };

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display())
    );

    Ok(())
}

fn print_current_defaults(config: &ConfigFile) {
    println!("{}", Style::header("Current defaults"));
    println!(
        "  {}  {}",
        Style::label("provider"),
        config
            .termfolio
            .provider
            .as_deref()
            .map_or_else(|| Style::secondary("(not set)"), Style::value)
    );
    println!(
        "  {}     {}",
        Style::label("model"),
        config
            .termfolio
            .model
            .as_deref()
            .map_or_else(|| Style::secondary("(not set)"), Style::value)
    );
    println!(
        "  {}  {}",
        Style::label("typewriter"),
        config.termfolio.typewriter_ms.map_or_else(
            || Style::secondary(format!("{DEFAULT_TYPEWRITER_MS}ms {}", Style::default_marker())),
            |ms| Style::value(format!("{ms}ms"))
        )
    );
    println!();
}

fn select_provider(providers: &[String], default: Option<&str>) -> Result<String> {
    let default_index = default
        .and_then(|d| providers.iter().position(|p| p == d))
        .unwrap_or(0);

    let selection = Select::new("Default provider:", providers.to_vec())
        .with_starting_cursor(default_index)
        .prompt()?;

    Ok(selection)
}

fn select_model(available_models: &[String], default: Option<&str>) -> Result<String> {
    if available_models.is_empty() {
        // No models configured, fall back to text input
        let mut prompt = Text::new("Default model:").with_help_message("Enter the model name");

        if let Some(d) = default {
            prompt = prompt.with_default(d);
        }

        let model = prompt.prompt()?;

        if model.trim().is_empty() {
            bail!("Model name cannot be empty");
        }

        Ok(model.trim().to_string())
    } else {
        let default_index = default
            .and_then(|d| available_models.iter().position(|m| m == d))
            .unwrap_or(0);

        let selection = Select::new("Default model:", available_models.to_vec())
            .with_starting_cursor(default_index)
            .prompt()?;

        Ok(selection)
    }
}

fn select_typewriter_ms(default: Option<u64>) -> Result<u64> {
    let ms = CustomType::<u64>::new("Typewriter delay (ms per character):")
        .with_default(default.unwrap_or(DEFAULT_TYPEWRITER_MS))
        .with_help_message("0 prints output at once")
        .with_error_message("Please enter a whole number of milliseconds")
        .prompt()?;

    Ok(ms)
}
