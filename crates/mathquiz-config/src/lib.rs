//! mathquiz-config: Configuration and logging bootstrap.
//!
//! Loads the quiz configuration from TOML or JSON and installs the
//! `tracing` subscriber it describes.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{load_config, load_config_from, LogConfig, QuizConfig, QuizSettings};
pub use error::ConfigError;
pub use logging::init_logging;
