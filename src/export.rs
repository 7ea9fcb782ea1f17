//! Writing rendered trees to files.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, instrument};

use crate::{render, Tree};

/// First line of every plain text export.
pub const TEXT_HEADER: &str = "=== AVL TREE EXPORT ===";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown export format '{0}', expected 'txt' or 'dot'")]
    UnknownFormat(String),

    #[error("cannot run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} failed with {status}: {stderr}")]
    Graphviz {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Sideways indented key listing.
    Text,
    /// Graphviz digraph.
    Dot,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Text => "txt",
            Format::Dot => "dot",
        }
    }

    pub fn render(self, tree: &Tree) -> String {
        match self {
            Format::Text => format!("{TEXT_HEADER}\n{}", render::text(tree)),
            Format::Dot => render::dot(tree),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "txt" | "text" => Ok(Format::Text),
            "2" | "dot" | "graphviz" => Ok(Format::Dot),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Renders `tree` in `format` and writes it to `path`, replacing any existing file.
#[instrument(level = "debug", skip(tree), fields(len = tree.len()))]
pub fn export(tree: &Tree, format: Format, path: &Path) -> Result<(), ExportError> {
    fs::write(path, format.render(tree)).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), %format, "exported tree");
    Ok(())
}

/// Writes `<base>.<extension>` next to `base` and returns the written path.
pub fn export_to_base(tree: &Tree, format: Format, base: &Path) -> Result<PathBuf, ExportError> {
    let path = base.with_extension(format.extension());
    export(tree, format, &path)?;
    Ok(path)
}

/// Runs Graphviz (`program`, usually `dot`) to turn the DOT file at `dot` into a PNG at `png`.
#[instrument(level = "debug")]
pub fn render_png(program: &str, dot: &Path, png: &Path) -> Result<(), ExportError> {
    let output = Command::new(program)
        .arg("-Tpng")
        .arg(dot)
        .arg("-o")
        .arg(png)
        .output()
        .map_err(|source| ExportError::Spawn {
            program: program.to_string(),
            source,
        })?;
    if !output.status.success() {
        return Err(ExportError::Graphviz {
            program: program.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    debug!(png = %png.display(), "rendered image");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("txt".parse::<Format>().unwrap(), Format::Text);
        assert_eq!(" DOT ".parse::<Format>().unwrap(), Format::Dot);
        assert_eq!("2".parse::<Format>().unwrap(), Format::Dot);
        assert!(matches!(
            "png".parse::<Format>(),
            Err(ExportError::UnknownFormat(name)) if name == "png"
        ));
    }

    #[test]
    fn test_export_text() {
        let dir = tempfile::tempdir().unwrap();
        let tree: Tree = [2, 1, 3].into_iter().collect();

        let path = export_to_base(&tree, Format::Text, &dir.path().join("tree")).unwrap();
        assert_eq!(path.extension().unwrap(), "txt");
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "=== AVL TREE EXPORT ===\n    3\n2\n    1\n");
    }

    #[test]
    fn test_export_dot_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.dot");

        export(&Tree::new(), Format::Dot, &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("digraph AVLTree {"));
        assert!(content.contains("shape=plaintext"));
    }

    #[test]
    fn test_export_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("tree.dot");

        let err = export(&Tree::new(), Format::Dot, &path).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
        assert!(err.to_string().contains("tree.dot"));
    }

    #[test]
    fn test_render_png_without_graphviz() {
        let dir = tempfile::tempdir().unwrap();
        let dot = dir.path().join("tree.dot");
        export(&Tree::new(), Format::Dot, &dot).unwrap();

        let err = render_png("avl-explorer-no-such-dot", &dot, &dot.with_extension("png"))
            .unwrap_err();
        assert!(matches!(
            &err,
            ExportError::Spawn { program, .. } if program == "avl-explorer-no-such-dot"
        ));
        assert!(err.to_string().starts_with("cannot run avl-explorer-no-such-dot"));
        assert!(!dot.with_extension("png").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_render_png_failing_program() {
        let dir = tempfile::tempdir().unwrap();
        let dot = dir.path().join("tree.dot");

        let err = render_png("false", &dot, &dot.with_extension("png")).unwrap_err();
        assert!(matches!(err, ExportError::Graphviz { .. }));
    }
}
