use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::{Config, ConfigFile, DirConfig, home_dir};

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("could not create write target {path}: {source}")]
    WriteTarget {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Build the runtime configuration: defaults, then the global config file,
/// then the working directory's `.tado`, then CLI overrides. The resolved
/// write target is created if it does not exist yet.
pub fn load(
    cwd: &Path,
    cli_write_to: Option<PathBuf>,
    cli_extensions: &[String],
) -> Result<Config, ConfigError> {
    let mut config = Config::default();

    if let Some(path) = global_config_path()
        && path.exists()
    {
        let file = read_config_file(&path)?;
        if let Some(extensions) = file.extensions {
            config.extensions = extensions;
        }
        if let Some(write_to) = file.write_to {
            config.write_to = write_to;
        }
    }

    if let Some(dir_cfg) = parse_dir_config(&cwd.join(".tado")) {
        config.extensions.extend(dir_cfg.extensions);
        if let Some(write_to) = dir_cfg.write_to {
            config.write_to = write_to;
        }
    }

    if let Some(write_to) = cli_write_to {
        config.write_to = write_to;
    }
    config
        .extensions
        .extend(cli_extensions.iter().cloned());

    ensure_write_target(&config.write_to)?;
    Ok(config)
}

fn global_config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| home_dir().join(".config"));
    Some(base.join("tado").join("config.toml"))
}

fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read settings from a per-directory `.tado` file, if one exists.
///
/// These files double as append targets for new items, so parsing pulls one
/// `key=value` setting per line and stops at the first line that is not a
/// setting. Returns `None` when the file is absent or unreadable.
pub fn parse_dir_config(path: &Path) -> Option<DirConfig> {
    let text = fs::read_to_string(path).ok()?;
    Some(parse_dir_config_text(&text))
}

fn parse_dir_config_text(text: &str) -> DirConfig {
    let mut cfg = DirConfig::default();

    for line in text.lines() {
        let Some((key, value)) = line.split_once('=') else {
            break;
        };
        match key {
            "extensions" => {
                cfg.extensions = value
                    .split(',')
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();
            }
            "writeto" => {
                if !value.is_empty() {
                    cfg.write_to = Some(PathBuf::from(value));
                }
            }
            _ => break,
        }
    }

    cfg
}

fn ensure_write_target(write_to: &Path) -> Result<(), ConfigError> {
    if write_to.exists() {
        return Ok(());
    }
    // a fresh target becomes a directory of dated files
    fs::create_dir_all(write_to).map_err(|source| ConfigError::WriteTarget {
        path: write_to.to_path_buf(),
        source,
    })
}
