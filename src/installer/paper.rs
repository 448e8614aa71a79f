//! Paper jar from the PaperMC build API

use std::path::{Component, Path};

use serde::Deserialize;

use super::{Launch, ServerInstaller};
use crate::error::{Result, SetupError};
use crate::hash::Checksum;
use crate::net;
use crate::report;
use crate::resolver::artifact;

/// Aikar's G1 tuning, as recommended by the Paper docs
pub const AIKAR_FLAGS: &[&str] = &[
    "-XX:+UseG1GC",
    "-XX:+ParallelRefProcEnabled",
    "-XX:MaxGCPauseMillis=200",
    "-XX:+UnlockExperimentalVMOptions",
    "-XX:+DisableExplicitGC",
    "-XX:+AlwaysPreTouch",
    "-XX:G1NewSizePercent=30",
    "-XX:G1MaxNewSizePercent=40",
    "-XX:G1HeapRegionSize=8M",
    "-XX:G1ReservePercent=20",
    "-XX:G1HeapWastePercent=5",
    "-XX:G1MixedGCCountTarget=4",
    "-XX:InitiatingHeapOccupancyPercent=15",
    "-XX:G1MixedGCLiveThresholdPercent=90",
    "-XX:G1RSetUpdatingPauseTimePercent=5",
    "-XX:SurvivorRatio=32",
    "-XX:+PerfDisableSharedMem",
    "-XX:MaxTenuringThreshold=1",
    "-Dusing.aikars.flags=https://mcflags.emc.gs",
    "-Daikars.new.flags=true",
];

const VERSION_NOT_FOUND: &str = "Version not found.";

#[derive(Debug, Deserialize)]
struct BuildList {
    #[serde(default)]
    builds: Vec<Build>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Build {
    build: u32,
    downloads: Downloads,
}

#[derive(Debug, Deserialize)]
struct Downloads {
    application: Application,
}

#[derive(Debug, Deserialize)]
struct Application {
    name: String,
    sha256: String,
}

fn not_released(version: &str) -> SetupError {
    SetupError::VersionNotReleased {
        software: "Paper".to_string(),
        version: version.to_string(),
    }
}

/// The vendor's jar name, which must be a plain file name inside the root
fn jar_name<'a>(name: &'a str, resource: &str) -> Result<&'a str> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(name),
        _ => Err(SetupError::UnexpectedResponse {
            resource: resource.to_string(),
            reason: format!("'{name}' is not a plain file name"),
        }),
    }
}

pub fn install(
    installer: &mut ServerInstaller<'_>,
    version: &str,
    build: Option<u32>,
) -> Result<Launch> {
    let builds_url = artifact::paper_builds_url(version);
    let resource = format!("Paper builds for {version}");
    let response = installer.fetcher().get(&builds_url, &resource)?;

    // Unknown versions come back as a 404 with an error document
    if response.status == 404 {
        return Err(not_released(version));
    }
    let body = response.into_body(&resource)?;
    let list: BuildList = net::parse_json(&body, &resource)?;

    if let Some(error) = list.error {
        if error == VERSION_NOT_FOUND {
            return Err(not_released(version));
        }
        return Err(SetupError::UnexpectedResponse {
            resource,
            reason: error,
        });
    }

    let selected = match build {
        Some(wanted) => list
            .builds
            .iter()
            .find(|b| b.build == wanted)
            .ok_or(SetupError::BuildNotFound { build: wanted })?,
        None => list.builds.last().ok_or_else(|| not_released(version))?,
    };
    tracing::debug!(build = selected.build, "selected Paper build");

    let application = &selected.downloads.application;
    let name = jar_name(&application.name, &resource)?;
    let url = artifact::paper_download_url(version, selected.build, name);
    let jar = installer.download(&url, "Paper jar")?;
    Checksum::Sha256(application.sha256.clone()).verify(&jar, "jarfile")?;

    installer.save(name, &jar)?;
    report::info("Saved jarfile!");

    Ok(Launch {
        jar: name.to_string(),
        jvm_flags: AIKAR_FLAGS,
        nogui: "--nogui",
    })
}
