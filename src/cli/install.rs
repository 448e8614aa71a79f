use std::path::PathBuf;

use clap::Parser;

/// Arguments for the install command
///
/// Anything left unset falls back to the config file, then to the defaults
/// shown here.
#[derive(Parser, Debug, Default)]
#[command(after_help = "EXAMPLES:\n  \
                   Latest Paper server in the current directory:\n    mcsetup install -s paper -v latest\n\n\
                   Fabric with Geyser and Floodgate:\n    mcsetup install -s fabric -v latest -f -d ./crossplay\n\n\
                   Fixed memory and port, no questions asked:\n    mcsetup install -s spigot -v latest -x 6G -p 25570 --no-input --accept-eula\n\n\
                   Geyser settings by dotted key:\n    mcsetup install -s paper -v latest -g --geyser-set bedrock.port=19133")]
pub struct InstallArgs {
    /// The directory for the server
    #[arg(
        long = "directory",
        short = 'd',
        visible_alias = "dir",
        value_name = "DIR",
        env = "MCSETUP_DIRECTORY",
        default_value = "."
    )]
    pub directory: PathBuf,

    /// The server Minecraft version (any release or 'latest')
    #[arg(long, short = 'v', value_name = "VERSION")]
    pub version: Option<String>,

    /// The server software: [p]aper, [s]pigot, [v]anilla, [f]abric
    #[arg(long, short = 's', value_name = "SOFTWARE")]
    pub software: Option<String>,

    /// Paper build number (newest build when omitted)
    #[arg(long, short = 'b', value_name = "BUILD")]
    pub build: Option<u32>,

    /// Minimum RAM in Java format (512M, 2G, ...); matches the maximum when left blank
    #[arg(long = "ram-min", short = 'n', visible_alias = "ram-minimum", value_name = "SIZE")]
    pub ram_min: Option<String>,

    /// Maximum RAM in Java format (512M, 2G, ...) [default: 4G]
    #[arg(long = "ram-max", short = 'x', visible_alias = "ram-maximum", value_name = "SIZE")]
    pub ram_max: Option<String>,

    /// Install Geyser where compatible
    #[arg(long, short = 'g')]
    pub geyser: bool,

    /// Install Floodgate and Geyser where compatible
    #[arg(long, short = 'f')]
    pub floodgate: bool,

    /// Bundle a Java runtime matching the Minecraft version
    #[arg(long, short = 'r')]
    pub runtime: bool,

    /// Server port (sets server-port in server.properties)
    #[arg(long, short = 'p', value_name = "PORT")]
    pub port: Option<u16>,

    /// Override a server.properties setting (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Override a Geyser config setting by dotted key (repeatable)
    #[arg(long = "geyser-set", value_name = "KEY=VALUE")]
    pub geyser_set: Vec<String>,

    /// Installer config file with defaults for these options
    #[arg(long, short = 'c', value_name = "FILE", env = "MCSETUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Install into a non-empty directory without asking
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Accept the Minecraft EULA (https://aka.ms/MinecraftEULA) without asking
    #[arg(long)]
    pub accept_eula: bool,

    /// Never prompt; missing or invalid choices are errors
    #[arg(long)]
    pub no_input: bool,
}

#[cfg(test)]
mod tests {
    use super::super::{Cli, Commands};
    use super::*;

    fn parse(args: &[&str]) -> InstallArgs {
        let cli = Cli::try_parse_from(args).unwrap_or_else(|e| {
            panic!("Failed to parse CLI arguments: {e}");
        });
        match cli.command {
            Commands::Install(args) => args,
            _ => panic!("Expected Install command"),
        }
    }

    #[test]
    fn test_cli_parsing_install_defaults() {
        let args = parse(&["mcsetup", "install"]);
        assert_eq!(args.directory, PathBuf::from("."));
        assert_eq!(args.software, None);
        assert_eq!(args.version, None);
        assert_eq!(args.ram_max, None);
        assert!(!args.geyser);
        assert!(!args.no_input);
        assert!(args.set.is_empty());
    }

    #[test]
    fn test_cli_parsing_install_short_flags() {
        let args = parse(&[
            "mcsetup", "install", "-d", "/srv/mc", "-v", "latest", "-s", "p", "-b", "496", "-n",
            "2G", "-x", "6G", "-g", "-f", "-r", "-p", "25570", "-y",
        ]);
        assert_eq!(args.directory, PathBuf::from("/srv/mc"));
        assert_eq!(args.version.as_deref(), Some("latest"));
        assert_eq!(args.software.as_deref(), Some("p"));
        assert_eq!(args.build, Some(496));
        assert_eq!(args.ram_min.as_deref(), Some("2G"));
        assert_eq!(args.ram_max.as_deref(), Some("6G"));
        assert!(args.geyser && args.floodgate && args.runtime && args.yes);
        assert_eq!(args.port, Some(25570));
    }

    #[test]
    fn test_cli_parsing_install_aliases() {
        let args = parse(&[
            "mcsetup",
            "install",
            "--dir",
            "server",
            "--ram-minimum",
            "1G",
            "--ram-maximum",
            "2G",
        ]);
        assert_eq!(args.directory, PathBuf::from("server"));
        assert_eq!(args.ram_min.as_deref(), Some("1G"));
        assert_eq!(args.ram_max.as_deref(), Some("2G"));
    }

    #[test]
    fn test_cli_parsing_install_repeated_overrides() {
        let args = parse(&[
            "mcsetup",
            "install",
            "--set",
            "motd=Hello",
            "--set",
            "max-players=50",
            "--geyser-set",
            "bedrock.port=19133",
        ]);
        assert_eq!(args.set, vec!["motd=Hello", "max-players=50"]);
        assert_eq!(args.geyser_set, vec!["bedrock.port=19133"]);
    }

    #[test]
    fn test_cli_rejects_bad_port() {
        assert!(Cli::try_parse_from(["mcsetup", "install", "-p", "70000"]).is_err());
    }
}
