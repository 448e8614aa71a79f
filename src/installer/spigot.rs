//! Spigot jar from the getbukkit mirror

use super::{Launch, ServerInstaller};
use crate::error::{Result, SetupError};
use crate::report;
use crate::resolver::artifact;

pub fn install(installer: &mut ServerInstaller<'_>, version: &str) -> Result<Launch> {
    let jarfile = format!("spigot-{version}.jar");
    let response = installer
        .fetcher()
        .get(&artifact::spigot_url(version), "Spigot jarfile")?;
    if response.status == 404 {
        return Err(SetupError::VersionNotReleased {
            software: "Spigot".to_string(),
            version: version.to_string(),
        });
    }
    let jar = response.into_body("Spigot jarfile")?;

    installer.save(&jarfile, &jar)?;
    report::info("Saved jarfile!");

    Ok(Launch {
        jar: jarfile,
        jvm_flags: &["-XX:+UseG1GC"],
        nogui: "-nogui",
    })
}
