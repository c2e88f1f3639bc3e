use std::fs;
use std::path::{Path, PathBuf};

use crate::io::config_io::parse_dir_config;
use crate::model::config::Config;
use crate::model::item::Pool;
use crate::parse::line::is_item;

/// Collect every scannable file for a session: the write target's tree (when
/// it is a directory) plus the working directory's tree.
pub fn gather_files(config: &Config, cwd: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if config.write_to.is_dir() {
        walk(&config.write_to, &config.extensions, &mut files);
    }
    if cwd != config.write_to {
        walk(cwd, &config.extensions, &mut files);
    }

    files
}

/// Recursive directory walk. A `.tado` file in a directory may override the
/// extension set for that whole subtree. Dot-entries are skipped.
fn walk(dir: &Path, extensions: &[String], files: &mut Vec<PathBuf>) {
    let mut extensions = extensions.to_vec();
    if let Some(cfg) = parse_dir_config(&dir.join(".tado"))
        && !cfg.extensions.is_empty()
    {
        extensions = cfg.extensions;
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }

        if path.is_dir() {
            walk(&path, &extensions, files);
        } else if matches_extension(&path, &extensions) {
            files.push(path);
        }
    }
}

fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension() else {
        return false;
    };
    let ext = ext.to_string_lossy().to_lowercase();
    extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext))
}

/// Scan files line-by-line and add every recognized item line to the pool.
/// Unreadable files (permissions, non-utf8 content) are skipped rather than
/// aborting the scan.
pub fn scan_into(pool: &mut Pool, files: &[PathBuf]) {
    for file in files {
        let Ok(content) = fs::read_to_string(file) else {
            continue;
        };
        for (idx, line) in content.lines().enumerate() {
            if is_item(line) {
                pool.insert(file.clone(), idx + 1, line.to_string());
            }
        }
    }
}
