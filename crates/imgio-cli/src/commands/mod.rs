//! Subcommand implementations.

mod convert;
mod formats;
mod info;
mod overlay;

pub use convert::cmd_convert;
pub use formats::cmd_formats;
pub use info::{cmd_info, inspect, FileInfo};
pub use overlay::cmd_overlay;
