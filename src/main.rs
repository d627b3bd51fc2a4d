use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use termfolio_cli::cli::commands::{commands, configure, providers, run, shell};
use termfolio_cli::cli::{Args, Command};
use termfolio_cli::output::{self, OutputConfig};

const LOG_ENV: &str = "TERMFOLIO_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing();
    output::init(OutputConfig::from_flags(args.quiet, args.no_color));

    let shell_options = |start_in_chat| shell::ShellOptions {
        provider: args.provider.clone(),
        model: args.model.clone(),
        no_typewriter: args.no_typewriter,
        start_in_chat,
    };

    match &args.command {
        Some(Command::Run { words }) => {
            run::run_once(words)?;
        }
        Some(Command::Commands) => {
            commands::print_commands();
        }
        Some(Command::Providers { provider }) => {
            providers::print_providers(provider.as_deref())?;
        }
        Some(Command::Configure { show }) => {
            configure::run_configure(*show)?;
        }
        Some(Command::Chat) => {
            shell::run_shell(shell_options(true)).await?;
        }
        None => {
            shell::run_shell(shell_options(false)).await?;
        }
    }

    Ok(())
}
