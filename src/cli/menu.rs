//! Line oriented menu loop driving a [`Tree`]
//!
//! Input and output are generic so the loop runs the same against a terminal
//! or in-memory buffers. Keys are parsed here; the tree only ever sees valid integers.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use super::{output, Cli, CliError, CliResult, Preset};
use crate::export::{self, Format};
use crate::{render, Tree};

/// Base name used when a manual export is given an empty file name.
pub const DEFAULT_EXPORT_BASE: &str = "avl_tree_manual";

#[derive(Clone, Debug)]
pub struct Settings {
    /// Graphviz file rewritten after each successful insert or delete.
    pub auto_export: Option<PathBuf>,
    /// Render a PNG next to the auto-exported Graphviz file.
    pub png: bool,
    /// Graphviz program used for PNG rendering.
    pub dot_command: String,
    /// Print menus and prompts.
    pub prompts: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_export: None,
            png: false,
            dot_command: "dot".to_string(),
            prompts: true,
        }
    }
}

impl TryFrom<&Cli> for Settings {
    type Error = CliError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        if cli.png && cli.auto_export.is_none() {
            return Err(CliError::InvalidArgs(
                "--png needs --auto-export to know where to write".to_string(),
            ));
        }
        Ok(Self {
            auto_export: cli.auto_export.clone(),
            png: cli.png,
            dot_command: cli.dot_command.clone(),
            prompts: !cli.script,
        })
    }
}

pub struct Menu<R, W> {
    input: R,
    out: W,
    tree: Tree,
    settings: Settings,
}

/// Runs the menu for the parsed command line until the user quits or input ends.
pub fn run<R: BufRead, W: Write>(cli: &Cli, input: R, out: W) -> CliResult<Tree> {
    let settings = Settings::try_from(cli)?;
    // An unusable auto-export target is a setup error, later write failures only warn
    if let Some(path) = &settings.auto_export {
        export::export(&Tree::new(), Format::Dot, path)?;
    }
    let mut menu = Menu::new(input, out, settings);
    if let Some(preset) = cli.load {
        menu.load(preset)?;
    }
    menu.run()?;
    Ok(menu.into_tree())
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, out: W, settings: Settings) -> Self {
        Self {
            input,
            out,
            tree: Tree::new(),
            settings,
        }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn into_tree(self) -> Tree {
        self.tree
    }

    pub fn run(&mut self) -> CliResult<()> {
        if self.settings.prompts {
            output::header(&mut self.out, "=== AVL TREE EXPLORER ===")?;
        }
        loop {
            self.show_menu()?;
            let line = match self.prompt("Select an option: ")? {
                None => break,
                Some(line) => line,
            };
            debug!(choice = %line, "menu");
            match line.as_str() {
                "1" => self.insert_keys()?,
                "2" => self.delete_key()?,
                "3" => self.search_key()?,
                "4" => self.show_hierarchy()?,
                "5" => self.show_diagram()?,
                "6" => self.choose_preset()?,
                "7" => self.manual_export()?,
                "0" | "q" => break,
                _ => output::failure(&mut self.out, "Invalid option, try again.")?,
            }
        }
        if self.settings.prompts {
            output::info(&mut self.out, "Bye.\n")?;
        }
        Ok(())
    }

    /// Replaces the current tree with a preset.
    pub fn load(&mut self, preset: Preset) -> CliResult<()> {
        info!(?preset, "loading preset");
        self.tree = preset.keys().iter().copied().collect();
        output::success(&mut self.out, &format!("Loaded preset: {}", preset.title()))?;
        self.show_diagram()?;
        self.auto_export()
    }

    fn show_menu(&mut self) -> CliResult<()> {
        if !self.settings.prompts {
            return Ok(());
        }
        output::header(&mut self.out, "\n=== MENU ===")?;
        output::info(
            &mut self.out,
            "1. Insert keys one by one\n\
             2. Delete a key\n\
             3. Search a key\n\
             4. Show tree (hierarchy)\n\
             5. Show tree (diagram)\n\
             6. Load preset\n\
             7. Export tree\n\
             0. Quit\n",
        )?;
        Ok(())
    }

    fn insert_keys(&mut self) -> CliResult<()> {
        if self.settings.prompts {
            output::header(&mut self.out, "\n=== INSERT KEYS ===")?;
            output::detail(&mut self.out, "Enter one integer per line, 'q' to go back.")?;
        }
        loop {
            let line = match self.prompt("Key: ")? {
                None => return Ok(()),
                Some(line) => line,
            };
            if line.eq_ignore_ascii_case("q") {
                return Ok(());
            }
            let key = match parse_key(&line) {
                Some(key) => key,
                None => {
                    output::failure(&mut self.out, &format!("'{line}' is not a valid integer."))?;
                    continue;
                }
            };
            if self.tree.insert(key) {
                output::success(&mut self.out, &format!("Inserted {key}."))?;
                self.after_mutation()?;
            } else {
                output::warning(&mut self.out, &format!("{key} is already in the tree."))?;
            }
        }
    }

    fn delete_key(&mut self) -> CliResult<()> {
        let key = match self.prompt_key("Key to delete: ")? {
            None => return Ok(()),
            Some(key) => key,
        };
        if self.tree.remove(key) {
            output::success(&mut self.out, &format!("Deleted {key}."))?;
            self.after_mutation()?;
        } else {
            output::warning(&mut self.out, &format!("{key} is not in the tree."))?;
        }
        Ok(())
    }

    fn search_key(&mut self) -> CliResult<()> {
        let key = match self.prompt_key("Key to search: ")? {
            None => return Ok(()),
            Some(key) => key,
        };
        if self.tree.contains(key) {
            output::success(&mut self.out, &format!("{key} is in the tree."))?;
        } else {
            output::failure(&mut self.out, &format!("{key} is NOT in the tree."))?;
        }
        Ok(())
    }

    fn show_hierarchy(&mut self) -> CliResult<()> {
        output::header(&mut self.out, "\nCurrent tree:")?;
        output::info(&mut self.out, &render::hierarchy(&self.tree))?;
        Ok(())
    }

    fn show_diagram(&mut self) -> CliResult<()> {
        output::header(&mut self.out, "\n=== AVL TREE ===")?;
        output::info(&mut self.out, &render::diagram(&self.tree))?;
        if !self.tree.is_empty() {
            output::info(&mut self.out, "\n")?;
            output::info(&mut self.out, &render::connectors(&self.tree))?;
        }
        Ok(())
    }

    fn choose_preset(&mut self) -> CliResult<()> {
        if self.settings.prompts {
            output::header(&mut self.out, "\n=== LOAD PRESET ===")?;
            for (i, preset) in Preset::ALL.iter().enumerate() {
                output::info(&mut self.out, &format!("{}. {}\n", i + 1, preset.title()))?;
            }
        }
        let line = match self.prompt("Select a preset: ")? {
            None => return Ok(()),
            Some(line) => line,
        };
        match line.parse().ok().and_then(Preset::from_choice) {
            Some(preset) => self.load(preset),
            None => {
                output::failure(&mut self.out, "Invalid option.")?;
                Ok(())
            }
        }
    }

    fn manual_export(&mut self) -> CliResult<()> {
        if self.settings.prompts {
            output::header(&mut self.out, "\n=== EXPORT TREE ===")?;
            output::info(&mut self.out, "1. Plain text\n2. DOT (Graphviz)\n")?;
        }
        let format = match self.prompt("Format: ")? {
            None => return Ok(()),
            Some(line) => match line.parse::<Format>() {
                Ok(format) => format,
                Err(e) => {
                    output::failure(&mut self.out, &e)?;
                    return Ok(());
                }
            },
        };
        let base = match self.prompt("File name (without extension): ")? {
            None => return Ok(()),
            Some(line) if line.is_empty() => DEFAULT_EXPORT_BASE.to_string(),
            Some(line) => line,
        };

        match export::export_to_base(&self.tree, format, Path::new(&base)) {
            Ok(path) => {
                output::success(&mut self.out, &format!("Exported to {}", path.display()))?;
                if format == Format::Dot {
                    output::detail(
                        &mut self.out,
                        &format!("Render with: dot -Tpng {} -o {base}.png", path.display()),
                    )?;
                }
            }
            Err(e) => {
                warn!(error = %e, "manual export failed");
                output::failure(&mut self.out, &format!("Export failed: {e}"))?;
            }
        }
        Ok(())
    }

    fn after_mutation(&mut self) -> CliResult<()> {
        self.show_hierarchy()?;
        self.auto_export()
    }

    #[instrument(level = "debug", skip(self))]
    fn auto_export(&mut self) -> CliResult<()> {
        let path = match &self.settings.auto_export {
            None => return Ok(()),
            Some(path) => path.clone(),
        };
        if let Err(e) = export::export(&self.tree, Format::Dot, &path) {
            warn!(error = %e, "auto export failed");
            output::warning(&mut self.out, &e)?;
            return Ok(());
        }
        if self.settings.png {
            let png = path.with_extension("png");
            if let Err(e) = export::render_png(&self.settings.dot_command, &path, &png) {
                warn!(error = %e, "png rendering failed");
                output::warning(&mut self.out, &e)?;
            }
        }
        Ok(())
    }

    /// Prints `message` when prompting and reads one trimmed line, `None` at end of input.
    fn prompt(&mut self, message: &str) -> CliResult<Option<String>> {
        if self.settings.prompts {
            write!(self.out, "{message}")?;
            self.out.flush()?;
        }
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_key(&mut self, message: &str) -> CliResult<Option<i32>> {
        let line = match self.prompt(message)? {
            None => return Ok(None),
            Some(line) => line,
        };
        match parse_key(&line) {
            Some(key) => Ok(Some(key)),
            None => {
                output::failure(&mut self.out, &format!("'{line}' is not a valid integer."))?;
                Ok(None)
            }
        }
    }
}

fn parse_key(line: &str) -> Option<i32> {
    line.trim().parse().ok()
}
