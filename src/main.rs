mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> miette::Result<()> {
    match Cli::parse().command {
        Commands::Export {
            template,
            output,
            data,
            overwrite,
            clean,
            dry_run,
        } => commands::export::run(template, output, data, overwrite, clean, dry_run),
        Commands::List { template, data } => commands::list::run(template, data),
        Commands::Check { template } => commands::check::run(template),
    }
}
