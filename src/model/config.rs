use std::path::PathBuf;

use serde::Deserialize;

/// Resolved runtime configuration, built once at startup and passed into
/// every component that needs it. Nothing reads ambient state after this.
#[derive(Debug, Clone)]
pub struct Config {
    /// File extensions scanned for items (compared case-insensitively).
    pub extensions: Vec<String>,
    /// Where items authored in-app are appended. A file gets new lines; a
    /// directory gets dated `YYYY-MM-DD.tado` files.
    pub write_to: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            extensions: default_extensions(),
            write_to: home_dir().join(".tado"),
        }
    }
}

pub fn default_extensions() -> Vec<String> {
    ["tado", "xit", "md", "txt"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub(crate) fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Shape of the global `config.toml`. All fields optional; unset fields keep
/// their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub extensions: Option<Vec<String>>,
    #[serde(default)]
    pub write_to: Option<PathBuf>,
}

/// Settings read from a per-directory `.tado` file. These files double as
/// item append targets, so the format is plain `key=value` lines rather than
/// toml.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirConfig {
    pub extensions: Vec<String>,
    pub write_to: Option<PathBuf>,
}
