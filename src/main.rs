use clap::Parser;
use tado::cli::commands::{Cli, Commands};
use tado::cli::handlers;

fn main() {
    let cli = Cli::parse();

    let (config, cwd) = match handlers::session(&cli) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        // No subcommand: launch the TUI
        None => tado::tui::run(config, &cwd),
        Some(Commands::List(args)) => handlers::cmd_list(config, &cwd, args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
