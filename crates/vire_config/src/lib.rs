//! Loading of `vire.toml` project configuration.
//!
//! Only the settings that change synthesis behavior or diagnostic output live
//! here: the language generation, the error limit and the renderer choice.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::*;
