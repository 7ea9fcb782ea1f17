//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

use super::Preset;

/// Build, inspect and export an AVL tree of integers from an interactive menu
#[derive(Parser, Debug)]
#[command(name = "avl-explorer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log verbosity: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,

    /// Write a Graphviz file to PATH after every insert or delete
    #[arg(long, env = "AVL_AUTO_EXPORT", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub auto_export: Option<PathBuf>,

    /// Also render a PNG next to the auto-exported Graphviz file (needs --auto-export)
    #[arg(long, env = "AVL_AUTO_PNG")]
    pub png: bool,

    /// Graphviz program used to render PNG images
    #[arg(long, env = "AVL_DOT_COMMAND", value_name = "PROGRAM", default_value = "dot")]
    pub dot_command: String,

    /// Start from a preset tree
    #[arg(short, long, value_enum, value_name = "PRESET")]
    pub load: Option<Preset>,

    /// Read commands without printing menus and prompts (for piped input)
    #[arg(short, long)]
    pub script: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_flags() {
        let cli = Cli::parse_from([
            "avl-explorer",
            "-dd",
            "--load",
            "left-right",
            "--script",
            "--auto-export",
            "out/tree.dot",
            "--png",
        ]);
        assert_eq!(cli.debug, 2);
        assert_eq!(cli.load, Some(Preset::LeftRight));
        assert!(cli.script);
        assert_eq!(cli.auto_export, Some(PathBuf::from("out/tree.dot")));
        assert!(cli.png);
        assert_eq!(cli.dot_command, "dot");
    }
}
