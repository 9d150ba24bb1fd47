//! Shared pieces of the imgio command-line tool
//!
//! Argument parsers and the subcommand implementations live here so they
//! can be tested without spawning the binary.

pub mod commands;
pub mod parsers;

pub use parsers::{parse_layout, parse_region};

use std::path::Path;

use imgio_core::{load_config, ImageIo};

/// Build a dispatcher from the config search path, reporting any config
/// warnings through the logger.
pub fn open_dispatcher(config_path: Option<&Path>) -> ImageIo {
    let handle = load_config(config_path);
    match &handle.source {
        Some(source) => log::info!("using config {}", source.display()),
        None => log::info!("no config file found, using defaults"),
    }
    ImageIo::from_handle(&handle)
}
