//! Geyser, Floodgate and Fabric API

use super::{PluginPlan, ServerInstaller};
use crate::error::{Result, SetupError};
use crate::report;
use crate::resolver::{Selection, Software, artifact};

pub fn install(
    installer: &mut ServerInstaller<'_>,
    selection: &Selection,
    plan: PluginPlan,
) -> Result<()> {
    if !plan.geyser {
        return Ok(());
    }
    match selection.software {
        Software::Paper | Software::Spigot => install_spigot_plugins(installer, plan),
        Software::Fabric => install_fabric_mods(installer, &selection.version, plan),
        Software::Vanilla => Ok(()),
    }
}

fn install_spigot_plugins(installer: &mut ServerInstaller<'_>, plan: PluginPlan) -> Result<()> {
    report::info("Downloading Geyser for Spigot...");
    let jar = installer.download(artifact::GEYSER_SPIGOT_URL, "Geyser for Spigot")?;
    installer.save("plugins/Geyser-Spigot.jar", &jar)?;
    report::info("Installed Geyser for Spigot!");

    if plan.floodgate {
        report::info("Downloading Floodgate for Spigot...");
        let jar = installer.download(artifact::FLOODGATE_SPIGOT_URL, "Floodgate for Spigot")?;
        installer.save("plugins/Floodgate-Spigot.jar", &jar)?;
        report::info("Installed Floodgate for Spigot!");
    }
    Ok(())
}

fn install_fabric_mods(
    installer: &mut ServerInstaller<'_>,
    version: &str,
    plan: PluginPlan,
) -> Result<()> {
    report::info("Installing Geyser now...");

    let releases = installer.download(artifact::FABRIC_API_RELEASES, "Fabric API releases")?;
    let path = artifact::fabric_api_path(&String::from_utf8_lossy(&releases), version).ok_or_else(
        || SetupError::ArtifactNotFound {
            what: format!("a Fabric API release for {version}"),
        },
    )?;
    let jar = installer.download(&format!("{}{path}", artifact::GITHUB), "Fabric API")?;
    installer.save(format!("mods/{}", artifact::file_name_of(&path)), &jar)?;
    report::info("Installed Fabric API!");

    let response = installer
        .fetcher()
        .get(&artifact::geyser_fabric_url(version), "Geyser for Fabric")?;
    if response.status == 404 {
        return Err(SetupError::VersionNotReleased {
            software: "Geyser for Fabric".to_string(),
            version: version.to_string(),
        });
    }
    let jar = response.into_body("Geyser for Fabric jarfile")?;
    installer.save("mods/Geyser-Fabric.jar", &jar)?;
    report::info("Installed Geyser!");

    if plan.floodgate {
        report::info("Installing Floodgate now...");
        let jar = installer.download(artifact::FLOODGATE_FABRIC_URL, "Floodgate for Fabric")?;
        installer.save("mods/Floodgate-Fabric.jar", &jar)?;
        report::info("Installed Floodgate!");
    }
    Ok(())
}
