//! Shared types, error model, and configuration for the web content chunker.
//!
//! This crate is the foundation depended on by all other webchunker crates.
//! It provides:
//! - [`ChunkerError`]: the unified error type and its [`ErrorKind`] classification
//! - Domain types ([`Section`], [`ChunkResult`], [`BoundaryRule`])
//! - Configuration ([`AppConfig`], [`FetchConfig`], [`ExtractConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DEFAULT_USER_AGENT, ExtractConfig, ExtractionSection, FetchConfig, FetchSection,
    config_dir, config_file_path, init_config, load_config, load_config_from,
};
pub use error::{ChunkerError, ErrorKind, Result};
pub use types::{
    BoundaryRule, ChunkResult, FOOTER_TITLE, MAIN_CONTENT_TITLE, NAVIGATION_TITLE, Section,
};
