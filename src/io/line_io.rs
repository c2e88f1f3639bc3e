use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use tempfile::NamedTempFile;

/// Error type for line persistence operations
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("{path}:{line} changed on disk since it was read")]
    Conflict {
        path: PathBuf,
        line: usize,
        expected: String,
        found: String,
    },
    #[error("{path} has no line {line}")]
    OutOfRange { path: PathBuf, line: usize },
    #[error("could not access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> PersistError + '_ {
    move |source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Optimistically replace one line of one file.
///
/// The whole file is read into a 1-indexed line table and `line_number` is
/// checked against `expected` before anything is written. On mismatch the
/// file is left untouched and a conflict is reported: first check-and-write
/// wins, a writer holding a stale line fails loudly. On match the entire
/// file is rewritten (there is no safe in-place replacement for
/// variable-length lines) through a temp file renamed over the original.
pub fn rewrite_line(
    path: &Path,
    line_number: usize,
    expected: &str,
    new_line: &str,
) -> Result<(), PersistError> {
    let content = fs::read_to_string(path).map_err(io_err(path))?;

    // index 0 is a sentinel so line numbers are 1-based
    let mut lines: Vec<&str> = vec![""];
    lines.extend(content.lines());

    if line_number == 0 || line_number >= lines.len() {
        return Err(PersistError::OutOfRange {
            path: path.to_path_buf(),
            line: line_number,
        });
    }
    if lines[line_number] != expected {
        return Err(PersistError::Conflict {
            path: path.to_path_buf(),
            line: line_number,
            expected: expected.to_string(),
            found: lines[line_number].to_string(),
        });
    }
    lines[line_number] = new_line;

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err(path))?;
    for line in &lines[1..] {
        writeln!(tmp, "{line}").map_err(io_err(path))?;
    }
    tmp.persist(path).map_err(|e| io_err(path)(e.error))?;
    Ok(())
}

/// Append a blank open item to the configured write target and return its
/// address. Directory targets get a dated file synthesized inside them. The
/// returned line number is found by re-counting the file after the append.
pub fn append_item(write_to: &Path) -> Result<(PathBuf, usize, String), PersistError> {
    let target = if write_to.is_dir() {
        write_to.join(format!("{}.tado", Local::now().format("%Y-%m-%d")))
    } else {
        write_to.to_path_buf()
    };

    let raw = "[ ] ".to_string();

    let mut content = match fs::read_to_string(&target) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(io_err(&target)(e)),
    };
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(&raw);
    content.push('\n');
    fs::write(&target, &content).map_err(io_err(&target))?;

    let line = content.lines().count();
    Ok((target, line, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_rewrite_line_replaces_only_target() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.md", "one\n[ ] two\nthree\n");

        rewrite_line(&path, 2, "[ ] two", "[x] two").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "one\n[x] two\nthree\n");
    }

    #[test]
    fn test_conflict_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let original = "one\n[ ] two was edited externally\nthree\n";
        let path = write(&dir, "a.md", original);

        let err = rewrite_line(&path, 2, "[ ] two", "[x] two").unwrap_err();
        assert!(matches!(err, PersistError::Conflict { line: 2, .. }));
        // byte-for-byte unchanged
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_out_of_range() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.md", "only\n");
        assert!(matches!(
            rewrite_line(&path, 5, "x", "y"),
            Err(PersistError::OutOfRange { line: 5, .. })
        ));
        assert!(matches!(
            rewrite_line(&path, 0, "x", "y"),
            Err(PersistError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.md");
        assert!(matches!(
            rewrite_line(&path, 1, "x", "y"),
            Err(PersistError::Io { .. })
        ));
    }

    #[test]
    fn test_append_item_to_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "inbox.tado", "[ ] existing\n");

        let (target, line, raw) = append_item(&path).unwrap();
        assert_eq!(target, path);
        assert_eq!(line, 2);
        assert_eq!(raw, "[ ] ");
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[ ] existing\n[ ] \n"
        );
    }

    #[test]
    fn test_append_item_handles_missing_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "inbox.tado", "[ ] existing");

        let (_, line, _) = append_item(&path).unwrap();
        assert_eq!(line, 2);
    }

    #[test]
    fn test_append_item_to_directory_synthesizes_dated_file() {
        let dir = TempDir::new().unwrap();
        let (target, line, raw) = append_item(dir.path()).unwrap();

        let name = target.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.ends_with(".tado"), "got {name}");
        assert_eq!(line, 1);
        // the created file is immediately rewritable at that address
        rewrite_line(&target, line, &raw, "[ ] first note").unwrap();
        assert_eq!(
            fs::read_to_string(&target).unwrap(),
            "[ ] first note\n"
        );
    }
}
