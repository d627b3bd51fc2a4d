//! # termfolio - A portfolio shell
//!
//! `termfolio` presents a personal portfolio as a simulated command-line
//! shell. Visitors type commands (`about`, `projects`, `contact`, ...) and get
//! canned responses, or switch into a chat mode backed by an
//! OpenAI-compatible completion endpoint.
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive shell
//! termfolio
//!
//! # Run a single command
//! termfolio run projects
//!
//! # Jump straight into chat
//! termfolio chat --provider openai
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/termfolio/config.toml`:
//!
//! ```toml
//! [termfolio]
//! provider = "openai"
//! model = "gpt-4o-mini"
//! typewriter_ms = 8
//!
//! [providers.openai]
//! endpoint = "https://api.openai.com"
//! api_key_env = "OPENAI_API_KEY"
//! models = ["gpt-4o-mini"]
//! ```

/// Shell and chat modes tied together, plus the interactive session.
pub mod app;

/// Chat relay, completion service boundary and HTTP client.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and provider settings.
pub mod config;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Command table, interpreter and prompt state of the simulated shell.
pub mod shell;

/// Terminal UI components (spinner, colors, typewriter).
pub mod ui;
