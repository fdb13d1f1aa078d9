//! Shared types, error model, configuration, and text normalization for dinodir.
//!
//! This crate is the foundation depended on by all other dinodir crates.
//! It provides:
//! - [`DinoDirError`]: the unified error type
//! - Domain types ([`EntityReference`], [`DetailRecord`], [`AggregateResult`])
//! - Configuration ([`AppConfig`], [`SourceConfig`], [`EnrichConfig`], config loading)
//! - Field normalization ([`clean_text`], [`to_identifier_case`])

pub mod config;
pub mod error;
pub mod text;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, EnrichConfig, EnrichmentSection, ServerConfig, SourceConfig, SourceSection,
    apply_env_overrides, config_dir, config_file_path, init_config, load_config,
    load_config_from,
};
pub use error::{DinoDirError, Result};
pub use text::{clean_text, humanize_slug, to_identifier_case};
pub use types::{AggregateResult, DetailRecord, EntityReference, NO_DATA, ReferenceList};
