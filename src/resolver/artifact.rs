//! Vendor download locations
//!
//! URL construction and release-page scraping live here so the rest of the
//! installer only asks "where is artifact X for version Y".

use regex::Regex;

pub const PAPER_VERSIONS_API: &str = "https://api.papermc.io/v2/projects/paper/versions";
pub const SPIGOT_DOWNLOADS: &str = "https://download.getbukkit.org/spigot";
pub const FABRIC_META: &str = "https://meta.fabricmc.net/v2/versions";
pub const FABRIC_API_RELEASES: &str = "https://github.com/FabricMC/fabric/releases/";
pub const GITHUB: &str = "https://github.com";

pub const GEYSER_SPIGOT_URL: &str = "https://ci.opencollab.dev/job/GeyserMC/job/Geyser/job/master/lastSuccessfulBuild/artifact/bootstrap/spigot/target/Geyser-Spigot.jar";
pub const FLOODGATE_SPIGOT_URL: &str = "https://ci.opencollab.dev/job/GeyserMC/job/Floodgate/job/master/lastSuccessfulBuild/artifact/spigot/build/libs/floodgate-spigot.jar";
pub const FLOODGATE_FABRIC_URL: &str = "https://ci.opencollab.dev/job/GeyserMC/job/Floodgate-Fabric/job/master/lastSuccessfulBuild/artifact/build/libs/floodgate-fabric.jar";
pub const GEYSER_CONFIG_TEMPLATE_URL: &str =
    "https://raw.githubusercontent.com/GeyserMC/Geyser/master/core/src/main/resources/config.yml";

pub const ADOPTIUM_ASSETS_API: &str = "https://api.adoptium.net/v3/assets/latest";

/// Build listing for a Paper version (trailing slash included)
pub fn paper_builds_url(version: &str) -> String {
    format!("{PAPER_VERSIONS_API}/{version}/builds/")
}

pub fn paper_download_url(version: &str, build: u32, file_name: &str) -> String {
    format!("{}{build}/downloads/{file_name}", paper_builds_url(version))
}

pub fn spigot_url(version: &str) -> String {
    format!("{SPIGOT_DOWNLOADS}/spigot-{version}.jar")
}

pub fn fabric_server_url(version: &str, loader: &str, installer: &str) -> String {
    format!("{FABRIC_META}/loader/{version}/{loader}/{installer}/server/jar")
}

/// Geyser for Fabric is built per `major.minor` line
pub fn geyser_fabric_url(version: &str) -> String {
    let line: Vec<&str> = version.split('.').take(2).collect();
    format!(
        "https://ci.opencollab.dev/job/GeyserMC/job/Geyser-Fabric/job/java-{}/lastSuccessfulBuild/artifact/build/libs/Geyser-Fabric.jar",
        line.join(".")
    )
}

/// Find the Fabric API jar for `version` in the GitHub releases page
///
/// Returns the site-relative download path, e.g.
/// `/FabricMC/fabric/releases/download/0.91.3%2B1.20.4/fabric-api-0.91.3+1.20.4.jar`.
pub fn fabric_api_path(html: &str, version: &str) -> Option<String> {
    let escaped = regex::escape(version);
    let pattern = format!(
        r"/FabricMC/fabric/releases/download/[0-9.]+%2B{escaped}/fabric-api-[0-9.]+\+{escaped}\.jar"
    );
    let re = Regex::new(&pattern).ok()?;
    re.find(html).map(|m| m.as_str().to_string())
}

/// Last path segment of a download path
pub fn file_name_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Adoptium OS and architecture names for this machine, if a tarball JRE exists
pub fn adoptium_platform() -> Option<(&'static str, &'static str)> {
    let os = match std::env::consts::OS {
        "linux" => "linux",
        "macos" => "mac",
        _ => return None,
    };
    let arch = match std::env::consts::ARCH {
        "x86_64" => "x64",
        "aarch64" => "aarch64",
        _ => return None,
    };
    Some((os, arch))
}

pub fn adoptium_assets_url(major: u32, os: &str, arch: &str) -> String {
    format!(
        "{ADOPTIUM_ASSETS_API}/{major}/hotspot?os={os}&architecture={arch}&image_type=jre&vendor=eclipse"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const RELEASES_HTML: &str = r#"
<a href="/FabricMC/fabric/releases/download/0.92.0%2B1.20.5/fabric-api-0.92.0+1.20.5.jar">new</a>
<a href="/FabricMC/fabric/releases/download/0.91.3%2B1.20.4/fabric-api-0.91.3+1.20.4.jar">jar</a>
<a href="/FabricMC/fabric/releases/download/0.91.3%2B1.20.4/fabric-api-0.91.3+1.20.4-sources.jar">src</a>
"#;

    #[test]
    fn test_fabric_api_path_matches_exact_version() {
        assert_eq!(
            fabric_api_path(RELEASES_HTML, "1.20.4").as_deref(),
            Some("/FabricMC/fabric/releases/download/0.91.3%2B1.20.4/fabric-api-0.91.3+1.20.4.jar")
        );
    }

    #[test]
    fn test_fabric_api_path_dots_are_literal() {
        assert_eq!(fabric_api_path(RELEASES_HTML, "1x20x4"), None);
        assert_eq!(fabric_api_path(RELEASES_HTML, "1.19.2"), None);
    }

    #[test]
    fn test_file_name_of() {
        assert_eq!(
            file_name_of("/FabricMC/fabric/releases/download/0.91.3%2B1.20.4/fabric-api-0.91.3+1.20.4.jar"),
            "fabric-api-0.91.3+1.20.4.jar"
        );
    }

    #[test]
    fn test_geyser_fabric_url_uses_minor_line() {
        assert!(geyser_fabric_url("1.20.4").contains("/job/java-1.20/"));
        assert!(geyser_fabric_url("1.21").contains("/job/java-1.21/"));
    }

    #[test]
    fn test_paper_urls() {
        assert_eq!(
            paper_builds_url("1.20.4"),
            "https://api.papermc.io/v2/projects/paper/versions/1.20.4/builds/"
        );
        assert_eq!(
            paper_download_url("1.20.4", 496, "paper-1.20.4-496.jar"),
            "https://api.papermc.io/v2/projects/paper/versions/1.20.4/builds/496/downloads/paper-1.20.4-496.jar"
        );
    }

    #[test]
    fn test_adoptium_url() {
        let url = adoptium_assets_url(21, "linux", "x64");
        assert!(url.contains("/latest/21/hotspot?"));
        assert!(url.contains("image_type=jre"));
    }
}
