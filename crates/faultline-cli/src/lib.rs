//! Faultline CLI library
//!
//! Flag parsing, configuration loading and the command flow behind the
//! `injection` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use config::load_configuration;
pub use error::{CliError, Result};
