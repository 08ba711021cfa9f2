//! docview - CLI entry point

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands, ConfigCommands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    docview::logging::init(cli.verbose);

    match cli.command {
        Commands::Preview(args) => commands::preview::handle(args),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Path => commands::config::handle_path(),
            ConfigCommands::Edit => commands::config::handle_edit(),
        },
        Commands::Completions { shell } => commands::completions::handle::<Cli>(shell),
    }
}
