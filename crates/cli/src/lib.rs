//! calprint - command line front end for the calendar renderer.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use config::Config;
pub use error::{CliError, Result};
