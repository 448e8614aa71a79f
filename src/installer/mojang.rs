//! Vanilla server jar from Mojang, and Fabric on top of it

use serde::Deserialize;

use super::{Launch, ServerInstaller};
use crate::error::{Result, SetupError};
use crate::hash::{self, Checksum};
use crate::net;
use crate::report;
use crate::resolver::artifact;
use crate::resolver::version::VersionPackage;

/// An installer or loader entry from Fabric meta
#[derive(Debug, Deserialize)]
struct FabricComponent {
    version: String,
    #[serde(default)]
    stable: bool,
}

/// Download the vanilla jar and check it against the package's size and SHA-1
fn vanilla_jar(
    installer: &ServerInstaller<'_>,
    version: &str,
    package: &VersionPackage,
) -> Result<Vec<u8>> {
    let download = package.server_download(version)?;
    let jar = installer.download(&download.url, "vanilla jarfile")?;
    hash::verify_size(&jar, download.size, "Jarfile")?;
    Checksum::Sha1(download.sha1.clone()).verify(&jar, "jarfile")?;
    Ok(jar)
}

pub fn install_vanilla(
    installer: &mut ServerInstaller<'_>,
    version: &str,
    package: &VersionPackage,
) -> Result<Launch> {
    let jar = vanilla_jar(installer, version, package)?;
    let jarfile = format!("vanilla-{version}.jar");
    installer.save(&jarfile, &jar)?;
    report::info("Saved jarfile!");

    Ok(Launch {
        jar: jarfile,
        jvm_flags: &[],
        nogui: "-nogui",
    })
}

pub fn install_fabric(
    installer: &mut ServerInstaller<'_>,
    version: &str,
    package: &VersionPackage,
) -> Result<Launch> {
    let jar = vanilla_jar(installer, version, package)?;
    installer.save("server.jar", &jar)?;
    report::info("Saved vanilla jarfile! Downloading Fabric...");

    let installer_version = newest_component(installer, "installer")?;
    let loader_version = newest_component(installer, "loader")?;
    tracing::debug!(%installer_version, %loader_version, "Fabric components");

    let url = artifact::fabric_server_url(version, &loader_version, &installer_version);
    let launcher = installer.download(&url, "Fabric server launcher")?;
    let jarfile = format!("fabric-{version}.jar");
    installer.save(&jarfile, &launcher)?;
    report::info("Saved Fabric jarfile!");

    Ok(Launch {
        jar: jarfile,
        jvm_flags: &[],
        nogui: "-nogui",
    })
}

/// Newest stable `kind` ("installer" or "loader"), or the newest of any
fn newest_component(installer: &ServerInstaller<'_>, kind: &str) -> Result<String> {
    let url = format!("{}/{kind}", artifact::FABRIC_META);
    let components: Vec<FabricComponent> =
        net::fetch_json(installer.fetcher(), &url, &format!("Fabric {kind} versions"))?;
    components
        .iter()
        .find(|c| c.stable)
        .or_else(|| components.first())
        .map(|c| c.version.clone())
        .ok_or_else(|| SetupError::ArtifactNotFound {
            what: format!("a Fabric {kind} release"),
        })
}
