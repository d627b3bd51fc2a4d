use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "termfolio")]
#[command(about = "A portfolio you explore from a simulated shell")]
#[command(version)]
pub struct Args {
    /// Completion provider for chat mode (from config.toml)
    #[arg(short = 'p', long, global = true)]
    pub provider: Option<String>,

    /// Model name for chat mode
    #[arg(short = 'm', long, global = true)]
    pub model: Option<String>,

    /// Print output at once instead of character by character
    #[arg(long, global = true)]
    pub no_typewriter: bool,

    /// Suppress banners and status messages
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute one shell command and print its output
    Run {
        /// The command, e.g. `about` or `help ai`
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },
    /// List the shell's command vocabulary
    Commands,
    /// Start directly in chat mode
    Chat,
    /// List configured completion providers
    Providers {
        /// Show details for a specific provider
        provider: Option<String>,
    },
    /// Configure termfolio defaults
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
