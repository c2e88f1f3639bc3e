use std::env;
use std::path::PathBuf;

use crate::cli::commands::{Cli, ListArgs};
use crate::engine::select::Selection;
use crate::io::config_io;
use crate::io::walker::{gather_files, scan_into};
use crate::model::config::Config;
use crate::model::item::Pool;

/// Resolve the scan root and layered configuration from the global flags.
pub fn session(cli: &Cli) -> Result<(Config, PathBuf), Box<dyn std::error::Error>> {
    let cwd = match &cli.dir {
        Some(dir) => std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {e}", dir.display()))?,
        None => env::current_dir()?,
    };
    let config = config_io::load(&cwd, cli.write_to.clone(), &cli.extensions)?;
    Ok((config, cwd))
}

/// `tado list`: scan and print items to stdout, sorted the way the todo
/// view sorts them.
pub fn cmd_list(
    config: Config,
    cwd: &std::path::Path,
    args: ListArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let files = gather_files(&config, cwd);
    let mut pool = Pool::new();
    scan_into(&mut pool, &files);

    if args.all {
        for item in pool.iter() {
            println!("{}  {}", item.display_label(), item.location());
        }
        return Ok(());
    }

    let mut selection = Selection::new();
    selection.rebuild(&pool);
    for &key in selection.keys() {
        if let Some(item) = pool.get(key) {
            println!("{}  {}", item.display_label(), item.location());
        }
    }
    Ok(())
}
