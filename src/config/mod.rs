//! Configuration file management and completion provider settings.

mod manager;

pub use manager::{
    ChatBackend, ConfigFile, ConfigManager, DEFAULT_TYPEWRITER_MS, ProviderConfig,
    ResolveOptions, ResolvedConfig, TermfolioConfig, resolve_config,
};
