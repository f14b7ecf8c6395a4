//! Puzzle input loading.

use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

/// Errors raised while reading a puzzle input.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("input file {} does not exist", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read `path` into its lines, without line terminators.
///
/// Trailing blank lines are dropped; blank lines in the middle of the file
/// are kept since several puzzle formats use them as section separators.
pub fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>, InputError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            InputError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            InputError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let lines = split_lines(&text);
    debug!("read {} lines from {}", lines.len(), path.display());
    Ok(lines)
}

/// Split `text` into lines the way [`read_lines`] does.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text.lines().map(str::to_owned).collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_blank_lines_only() {
        let lines = split_lines("a\n\nb\r\n\n  \n");
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn missing_file_is_reported() {
        let path = std::env::temp_dir().join("crucible-core-definitely-missing.txt");
        match read_lines(&path) {
            Err(InputError::NotFound { path: p }) => assert_eq!(p, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn reads_existing_file() {
        let path = std::env::temp_dir().join(format!("crucible-core-{}.txt", std::process::id()));
        std::fs::write(&path, "12\n34\n\n").unwrap();
        let lines = read_lines(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(lines, vec!["12", "34"]);
    }
}
