use anyhow::Result;
use tracing::debug;

use crate::app::{Session, SessionOptions, build_service};
use crate::config::{ConfigManager, ResolveOptions, resolve_config};

pub struct ShellOptions {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub no_typewriter: bool,
    pub start_in_chat: bool,
}

/// Runs the interactive shell until the visitor quits.
pub async fn run_shell(options: ShellOptions) -> Result<()> {
    let manager = ConfigManager::new()?;
    let config_file = manager.load_or_default()?;

    let resolve_options = ResolveOptions {
        provider: options.provider,
        model: options.model,
        no_typewriter: options.no_typewriter,
    };
    let resolved = resolve_config(&resolve_options, &config_file)?;

    match &resolved.chat {
        Some(backend) => debug!(
            provider = %backend.provider_name,
            model = %backend.model,
            "chat backend resolved"
        ),
        None => debug!("no chat provider configured"),
    }

    let service = build_service(resolved.chat.as_ref());
    let mut session = Session::new(
        service,
        SessionOptions {
            start_in_chat: options.start_in_chat,
            typewriter: resolved.typewriter,
            backend: resolved.chat,
        },
    )?;
    session.run().await
}
