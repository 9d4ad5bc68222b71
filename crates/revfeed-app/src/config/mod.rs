//! Configuration file parsing for the reviews feed
//!
//! Supports:
//! - `.revfeed/config.toml` - Feed, layout, rating and copy settings

pub mod settings;
pub mod types;

pub use settings::{init_config_dir, load_settings};
pub use types::*;
