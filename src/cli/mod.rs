//! CLI definitions using clap derive API
//!
//! Submodules hold each command's argument types:
//! - install: Install command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};

pub mod completions;
pub mod install;

pub use completions::CompletionsArgs;
pub use install::InstallArgs;

/// mcsetup - Minecraft server installer
///
/// Set up a Minecraft server directory from the vendor's own downloads.
#[derive(Parser, Debug)]
#[command(
    name = "mcsetup",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Set up a Minecraft server automatically",
    long_about = "mcsetup downloads and verifies a Paper, Spigot, Vanilla or Fabric server jar, \
                  optionally adds Geyser, Floodgate and a Java runtime, and writes the launch \
                  script and config files. A failed install is rolled back completely.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  mcsetup install -s paper -v latest -d ./survival  \x1b[90m# Latest Paper server\x1b[0m\n   \
                  mcsetup install -s fabric -v latest --floodgate   \x1b[90m# Fabric with Bedrock crossplay\x1b[0m\n   \
                  mcsetup install -s vanilla -v 1.20.2 --runtime    \x1b[90m# Bundle a matching Java\x1b[0m\n   \
                  mcsetup install -s spigot --set max-players=50    \x1b[90m# Override server.properties\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Show debug diagnostics
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install a server into a directory
    Install(InstallArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_version() {
        let cli = Cli::try_parse_from(["mcsetup", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_cli_verbose_is_global() {
        let cli = Cli::try_parse_from(["mcsetup", "install", "--verbose"]).unwrap();
        assert!(cli.verbose);
        let cli = Cli::try_parse_from(["mcsetup", "--verbose", "version"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::try_parse_from(["mcsetup", "completions", "bash"]).unwrap();
        match cli.command {
            Commands::Completions(args) => {
                assert_eq!(args.shell, "bash");
            }
            _ => panic!("Expected Completions command"),
        }
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["mcsetup"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
