//! Configuration and preset management for mixdown.
//!
//! This crate provides the immutable configuration values the compiler is
//! constructed with, and the file formats they are loaded from.
//!
//! # Features
//!
//! - **Mastering Presets**: limiter, headroom, loudness and dither settings per export target
//! - **Preset Table**: factory rows plus user rows, built once and injected into the compiler
//! - **Mix Graphs**: bus routing loaded from TOML or JSON
//! - **Paths**: Platform-specific config and preset directories
//!
//! # Example
//!
//! ```rust
//! use mixdown_config::{MasteringPreset, PresetTable};
//!
//! let table = PresetTable::factory().with_preset(
//!     MasteringPreset::new("broadcast")
//!         .with_limiter(-2.0)
//!         .with_headroom(-3.0)
//!         .with_loudnorm(-23.0),
//! );
//!
//! assert!(table.get("podcast").is_some());
//! assert_eq!(table.get("broadcast").and_then(|p| p.loudnorm_target), Some(-23.0));
//! ```

mod error;
mod mix_graph;
mod preset;
mod table;

/// Platform-specific paths for presets and configuration.
pub mod paths;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_presets, get_factory_preset, is_factory_preset,
};
pub use mix_graph::{load_mix_graph, mix_graph_from_json, mix_graph_from_toml};
pub use paths::{
    ensure_presets_dir, ensure_user_presets_dir, list_presets_in_dir, preset_name_from_path,
    user_config_dir, user_presets_dir,
};
pub use preset::MasteringPreset;
pub use table::PresetTable;
