//! Shared types, error model, and configuration for InterwikiExtracts.
//!
//! This crate is the foundation depended on by the other InterwikiExtracts
//! crates. It provides:
//! - [`ExtractError`] — the unified error taxonomy
//! - Domain types ([`ExtractFormat`], [`ParamValue`], [`Extract`], [`RenderHint`])
//! - Collaborator traits ([`PrefixDirectory`], [`MessageRenderer`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod messages;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, ConfigError, ConfigResult, DefaultsConfig, InterwikiEntry, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{ExtractError, Result};
pub use messages::{EnglishMessages, MESSAGE_PREFIX, MessageRenderer, error_marker};
pub use types::{Extract, ExtractFormat, InterwikiPrefix, InvocationParams, ParamValue,
    PrefixDirectory, RenderHint};
