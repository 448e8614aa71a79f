//! Server directory provisioning
//!
//! This module handles:
//! - Downloading and verifying the server jar for the chosen software
//! - Geyser, Floodgate and Fabric API for Bedrock crossplay
//! - An optional bundled Java runtime
//! - `server.properties`, the Geyser config, `start.sh` and `eula.txt`
//!
//! Every write goes through one [`WriteLedger`] per run. When any step fails
//! the ledger is rolled back and the directory is left as it was found.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SetupError};
use crate::memory::MemoryRange;
use crate::net::{self, Fetch};
use crate::prompt::Prompter;
use crate::report;
use crate::resolver::{self, Selection, Software, VersionManifest};
use crate::template::Overrides;
use crate::transaction::{EntryKind, WriteLedger};

pub mod configs;
mod mojang;
mod paper;
mod plugins;
pub mod runtime;
pub mod script;
mod spigot;


pub const EULA_PROMPT: &str = "Do you agree to the Minecraft EULA? (https://aka.ms/MinecraftEULA)";
pub const NON_EMPTY_PROMPT: &str = "This directory is not empty, install anyway?";

/// Everything an install run needs, merged from CLI and config file
#[derive(Debug, Clone)]
pub struct InstallOptions {
    pub directory: PathBuf,
    pub software: Option<String>,
    pub version: Option<String>,
    pub build: Option<u32>,
    pub memory: MemoryRange,
    pub geyser: bool,
    pub floodgate: bool,
    pub runtime: bool,
    pub server_properties: Overrides,
    pub geyser_config: Overrides,
    /// Install into a non-empty directory without asking
    pub assume_yes: bool,
    pub accept_eula: bool,
}

/// Which crossplay add-ons will actually be installed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PluginPlan {
    pub geyser: bool,
    pub floodgate: bool,
}

impl PluginPlan {
    /// Narrow the requested add-ons to what the selection supports
    ///
    /// Floodgate needs Geyser, so asking for Floodgate asks for both, and
    /// dropping Geyser drops Floodgate too.
    pub fn decide(geyser: bool, floodgate: bool, selection: &Selection) -> (Self, Vec<&'static str>) {
        let mut warnings = Vec::new();
        let mut geyser = geyser || floodgate;

        if geyser && !selection.latest {
            warnings.push(
                "Geyser can only run on the latest Minecraft versions, so it will not be installed. \
                 Set the version to 'latest' to ensure you have the latest version.",
            );
            geyser = false;
        }
        if geyser && !selection.software.supports_geyser() {
            warnings.push(
                "Geyser is only supported on Paper, Spigot, and Fabric servers, so it will not be installed here.",
            );
            geyser = false;
        }

        let plan = PluginPlan {
            geyser,
            floodgate: geyser && floodgate,
        };
        (plan, warnings)
    }
}

/// How the launch script starts the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
    pub jar: String,
    pub jvm_flags: &'static [&'static str],
    pub nogui: &'static str,
}

/// How an install run ended without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Installed,
    /// The user declined to install into a non-empty directory
    Cancelled,
}

/// Writes into one server directory, recording everything in the ledger
pub struct ServerInstaller<'a> {
    root: &'a Path,
    fetcher: &'a dyn Fetch,
    ledger: &'a mut WriteLedger,
}

impl<'a> ServerInstaller<'a> {
    pub fn new(root: &'a Path, fetcher: &'a dyn Fetch, ledger: &'a mut WriteLedger) -> Self {
        Self {
            root,
            fetcher,
            ledger,
        }
    }

    pub fn root(&self) -> &Path {
        self.root
    }

    pub fn fetcher(&self) -> &dyn Fetch {
        self.fetcher
    }

    pub fn ledger(&mut self) -> &mut WriteLedger {
        self.ledger
    }

    /// Download `url`, failing on anything but a 200
    pub fn download(&self, url: &str, resource: &str) -> Result<Vec<u8>> {
        net::fetch(self.fetcher, url, resource)
    }

    /// Create `relative` under the server root
    pub fn make_dir(&mut self, relative: impl AsRef<Path>) -> Result<PathBuf> {
        let path = self.root.join(relative);
        self.ledger.make_dirs(&path)?;
        Ok(path)
    }

    /// Write `contents` to `relative` under the server root, creating parents
    pub fn save(&mut self, relative: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<PathBuf> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            self.ledger.make_dirs(parent)?;
        }
        self.ledger.save_file(&path, contents)?;
        Ok(path)
    }

    fn provision(
        &mut self,
        options: &InstallOptions,
        manifest: &VersionManifest,
        selection: &Selection,
        plan: PluginPlan,
        prompter: &dyn Prompter,
    ) -> Result<()> {
        self.ledger.make_dirs(self.root)?;

        let version = selection.version.as_str();
        report::step(&format!("Searching for {} {version}...", selection.software));

        let (launch, package) = match selection.software {
            Software::Paper => (paper::install(self, version, options.build)?, None),
            Software::Spigot => (spigot::install(self, version)?, None),
            Software::Vanilla => {
                let package = manifest.package(self.fetcher, version)?;
                (mojang::install_vanilla(self, version, &package)?, Some(package))
            }
            Software::Fabric => {
                let package = manifest.package(self.fetcher, version)?;
                (mojang::install_fabric(self, version, &package)?, Some(package))
            }
        };

        plugins::install(self, selection, plan)?;

        let java = if options.runtime {
            let major = match &package {
                Some(package) => package.java_major(),
                None => manifest.package(self.fetcher, version)?.java_major(),
            };
            Some(runtime::install(self, major)?)
        } else {
            None
        };

        configs::write_server_properties(self, &options.server_properties)?;
        configs::write_geyser_config(self, selection.software, plan, &options.geyser_config)?;

        report::info("Writing startup script...");
        script::write(self, &launch, &options.memory, java.as_deref())?;

        self.accept_eula(options.accept_eula, prompter)
    }

    fn accept_eula(&mut self, accepted: bool, prompter: &dyn Prompter) -> Result<()> {
        if accepted || prompter.confirm(EULA_PROMPT, false)? {
            self.save("eula.txt", "eula=true\n")?;
        } else {
            report::info("The EULA was not accepted. Set eula=true in eula.txt before starting the server.");
        }
        Ok(())
    }
}

/// Run a full install into `options.directory`
pub fn install(
    options: &InstallOptions,
    fetcher: &dyn Fetch,
    prompter: &dyn Prompter,
) -> Result<Outcome> {
    for warning in options.memory.warnings() {
        report::warn(warning);
    }

    report::step("Downloading versions...");
    let manifest = VersionManifest::fetch(fetcher)?;
    let selection = resolver::select(
        options.software.as_deref(),
        options.version.as_deref(),
        &manifest,
        prompter,
    )?;
    tracing::debug!(software = selection.software.id(), version = %selection.version, "selected");

    let (plan, warnings) = PluginPlan::decide(options.geyser, options.floodgate, &selection);
    for warning in warnings {
        report::warn(warning);
    }

    if has_entries(&options.directory)?
        && !options.assume_yes
        && !prompter.confirm(NON_EMPTY_PROMPT, false)?
    {
        report::step("Installation cancelled.");
        return Ok(Outcome::Cancelled);
    }

    let mut ledger = WriteLedger::new();
    let result = ServerInstaller::new(&options.directory, fetcher, &mut ledger).provision(
        options,
        &manifest,
        &selection,
        plan,
        prompter,
    );

    match result {
        Ok(()) => {
            ledger.commit();
            report::step("Installation successful!");
            Ok(Outcome::Installed)
        }
        Err(err) => {
            report::rolling_back(&err);
            let rollback = ledger.rollback();
            for failure in &rollback.failures {
                let path = failure.path.display();
                report::rollback_failure(&match failure.kind {
                    EntryKind::File => format!("Could not delete file '{path}'."),
                    EntryKind::Directory => format!("Could not delete directory '{path}'."),
                    EntryKind::Restore => format!("Could not restore file '{path}'."),
                });
            }
            Err(err)
        }
    }
}

/// Whether `dir` exists and already has something in it
fn has_entries(dir: &Path) -> Result<bool> {
    if !dir.is_dir() {
        return Ok(false);
    }
    let mut entries = fs::read_dir(dir).map_err(|e| SetupError::FileReadFailed {
        path: dir.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(entries.next().is_some())
}
