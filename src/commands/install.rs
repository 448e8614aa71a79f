//! Install command implementation
//!
//! The installation process:
//! 1. Load the installer config file, if any
//! 2. Merge it under the CLI arguments and validate sizes and overrides
//! 3. Pick a prompter (terminal, or none with `--no-input`)
//! 4. Resolve, download and write the server through the installer, which
//!    rolls everything back on error

use crate::cli::InstallArgs;
use crate::config::SetupConfig;
use crate::error::{Result, SetupError};
use crate::installer::{self, InstallOptions, Outcome};
use crate::memory::MemoryRange;
use crate::net::HttpFetcher;
use crate::prompt::{InquirePrompter, NoInput, Prompter};
use crate::template::{self, Overrides};

/// Maximum heap when neither the CLI nor the config file sets one
pub const DEFAULT_RAM_MAX: &str = "4G";

/// Run install command
pub fn run(args: InstallArgs) -> Result<()> {
    let config = SetupConfig::load(args.config.as_deref())?;
    let options = resolve_options(&args, &config)?;

    let fetcher = HttpFetcher::new()?;
    let prompter: &dyn Prompter = if args.no_input || !console::user_attended() {
        &NoInput
    } else {
        &InquirePrompter
    };

    match installer::install(&options, &fetcher, prompter)? {
        Outcome::Installed => tracing::debug!(directory = %options.directory.display(), "installed"),
        Outcome::Cancelled => tracing::debug!("install cancelled"),
    }
    Ok(())
}

/// Merge CLI arguments over the config file
///
/// Scalars from the CLI win outright. Override maps are layered: config
/// entries, then the config port, then `--set`, then `--port`.
pub fn resolve_options(args: &InstallArgs, config: &SetupConfig) -> Result<InstallOptions> {
    let ram_max = args
        .ram_max
        .as_deref()
        .or(config.ram_max.as_deref())
        .unwrap_or(DEFAULT_RAM_MAX);
    let ram_min = args.ram_min.as_deref().or(config.ram_min.as_deref());
    let memory = MemoryRange::parse(ram_min, ram_max)?;

    let mut server_properties = config.server_property_overrides()?;
    if let Some(port) = config.port {
        server_properties.insert("server-port".to_string(), port.to_string());
    }
    apply_overrides(&mut server_properties, &args.set)?;
    if let Some(port) = args.port {
        server_properties.insert("server-port".to_string(), port.to_string());
    }

    let mut geyser_config = config.geyser_overrides()?;
    apply_overrides(&mut geyser_config, &args.geyser_set)?;

    Ok(InstallOptions {
        directory: args.directory.clone(),
        software: args.software.clone().or_else(|| config.software.clone()),
        version: args.version.clone().or_else(|| config.version.clone()),
        build: args.build.or(config.build),
        memory,
        geyser: args.geyser || config.geyser.unwrap_or(false),
        floodgate: args.floodgate || config.floodgate.unwrap_or(false),
        runtime: args.runtime || config.runtime.unwrap_or(false),
        server_properties,
        geyser_config,
        assume_yes: args.yes,
        accept_eula: args.accept_eula || config.accept_eula.unwrap_or(false),
    })
}

fn apply_overrides(target: &mut Overrides, entries: &[String]) -> Result<()> {
    for entry in entries {
        let (key, value) = parse_override(entry)?;
        target.insert(key, value);
    }
    Ok(())
}

/// Split a `KEY=VALUE` override at the first `=`
pub fn parse_override(input: &str) -> Result<(String, String)> {
    let invalid = || SetupError::InvalidOverride {
        input: input.to_string(),
    };
    let (key, value) = input.split_once('=').ok_or_else(invalid)?;
    let key = key.trim();
    if key.is_empty() || !template::is_single_line(value) {
        return Err(invalid());
    }
    Ok((key.to_string(), value.to_string()))
}
