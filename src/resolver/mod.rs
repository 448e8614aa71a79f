//! Software and version resolution
//!
//! This module handles:
//! - Parsing the server software choice
//! - Looking up Minecraft releases in Mojang's version manifest
//! - Vendor download locations for jars, plugins and runtimes
//! - Re-asking for invalid choices, or failing when prompting is disabled

pub mod artifact;
pub mod software;
pub mod version;

pub use software::Software;
pub use version::VersionManifest;

use crate::error::{Result, SetupError};
use crate::prompt::Prompter;
use crate::report;

/// What the user asked to install, after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub software: Software,
    pub version: String,
    /// Whether `version` is the newest Minecraft release
    pub latest: bool,
}

/// Resolve the software and version from the given values, prompting for
/// whatever is missing or invalid
pub fn select(
    software: Option<&str>,
    version: Option<&str>,
    manifest: &VersionManifest,
    prompter: &dyn Prompter,
) -> Result<Selection> {
    let software = choose_software(software, prompter)?;
    let version = choose_version(version, manifest, prompter)?;
    Ok(Selection {
        software,
        latest: manifest.is_latest(&version),
        version,
    })
}

pub fn choose_software(given: Option<&str>, prompter: &dyn Prompter) -> Result<Software> {
    match given.map(str::trim).filter(|s| !s.is_empty()) {
        Some(input) => match input.parse::<Software>() {
            Ok(software) => Ok(software),
            Err(err) if prompter.interactive() => {
                report::step(&err.to_string());
                prompter.select_software()
            }
            Err(err) => Err(err),
        },
        None => prompter.select_software(),
    }
}

pub fn choose_version(
    given: Option<&str>,
    manifest: &VersionManifest,
    prompter: &dyn Prompter,
) -> Result<String> {
    let mut input = given.unwrap_or_default().trim().to_string();
    loop {
        if input.is_empty() {
            if !prompter.interactive() {
                return Err(SetupError::InputRequired {
                    what: "server version".to_string(),
                });
            }
        } else if let Some(version) = manifest.resolve(&input) {
            return Ok(version);
        } else {
            let err = SetupError::InvalidVersion { input };
            if !prompter.interactive() {
                return Err(err);
            }
            report::step(&err.to_string());
        }
        input = prompter.ask_version()?.trim().to_string();
    }
}
