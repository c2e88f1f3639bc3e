use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tado", about = concat!("tado v", env!("CARGO_PKG_VERSION"), " - checkboxes in plain text"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Scan this directory instead of the current one
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<PathBuf>,

    /// File or directory new items are appended to
    #[arg(long, global = true)]
    pub write_to: Option<PathBuf>,

    /// Extra file extension to scan (repeatable)
    #[arg(long = "ext", global = true)]
    pub extensions: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print recognized items without entering the TUI
    List(ListArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Include checked, obsolete, and snoozed items
    #[arg(long)]
    pub all: bool,
}
