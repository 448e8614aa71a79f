//! mcsetup - Minecraft server installer
//!
//! A command line tool that provisions a Minecraft server directory from the
//! vendors' own downloads, and puts the directory back the way it was when an
//! install fails part way.

use clap::Parser;
use miette::Diagnostic;

mod cli;
mod commands;
mod config;
mod error;
mod hash;
mod installer;
mod logging;
mod memory;
mod net;
mod progress;
mod prompt;
mod report;
mod resolver;
mod template;
mod transaction;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Install(args) => commands::install::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        if let Some(help) = e.help() {
            eprintln!("  {help}");
        }
        std::process::exit(1);
    }
}
