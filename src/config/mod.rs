//! Configuration module
//!
//! Handles loading application settings from TOML files and environment
//! variables, and loading the group path rules.

pub mod loader;
pub mod types;

pub use loader::{
    RulesFormat, load_config, load_config_from_str, load_path_validator, load_rules,
    load_rules_from_reader, load_rules_from_str,
};
pub use types::*;
