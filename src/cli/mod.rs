//! Interactive menu around the tree: argument parsing, input handling and output

pub mod args;
pub mod error;
pub mod exitcode;
pub mod menu;
pub mod output;
pub mod preset;

pub use args::Cli;
pub use error::{CliError, CliResult};
pub use menu::{run, Menu, Settings};
pub use preset::Preset;
