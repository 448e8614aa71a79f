//! Minecraft release lookup against Mojang's launcher metadata

use serde::Deserialize;

use crate::error::{Result, SetupError};
use crate::net::{self, Fetch};

pub const VERSION_MANIFEST_URL: &str =
    "https://launchermeta.mojang.com/mc/game/version_manifest.json";

/// Java major version for releases whose package predates `javaVersion`
const DEFAULT_JAVA_MAJOR: u32 = 8;

#[derive(Debug, Clone, Deserialize)]
pub struct VersionManifest {
    pub latest: Latest,
    pub versions: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Latest {
    pub release: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManifestEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

impl VersionManifest {
    pub fn fetch(fetcher: &dyn Fetch) -> Result<Self> {
        net::fetch_json(fetcher, VERSION_MANIFEST_URL, "version manifest")
    }

    /// Release ids, newest first
    pub fn releases(&self) -> impl Iterator<Item = &str> {
        self.versions
            .iter()
            .filter(|v| v.kind == "release")
            .map(|v| v.id.as_str())
    }

    /// Map user input to a release id; `latest` means the newest release
    pub fn resolve(&self, input: &str) -> Option<String> {
        let input = input.trim().to_lowercase();
        if input == "latest" {
            return Some(self.latest.release.clone());
        }
        self.releases()
            .find(|id| *id == input)
            .map(ToString::to_string)
    }

    pub fn is_latest(&self, version: &str) -> bool {
        self.latest.release == version
    }

    pub fn entry(&self, version: &str) -> Option<&ManifestEntry> {
        self.versions.iter().find(|v| v.id == version)
    }

    /// Fetch the per-version package describing downloads and Java needs
    pub fn package(&self, fetcher: &dyn Fetch, version: &str) -> Result<VersionPackage> {
        let entry = self
            .entry(version)
            .ok_or_else(|| SetupError::InvalidVersion {
                input: version.to_string(),
            })?;
        net::fetch_json(fetcher, &entry.url, &format!("{version} version package"))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersionPackage {
    pub downloads: PackageDownloads,
    #[serde(rename = "javaVersion", default)]
    pub java_version: Option<JavaVersion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PackageDownloads {
    pub server: Option<Download>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Download {
    pub sha1: String,
    pub size: u64,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JavaVersion {
    #[serde(rename = "majorVersion")]
    pub major_version: u32,
}

impl VersionPackage {
    pub fn java_major(&self) -> u32 {
        self.java_version
            .as_ref()
            .map_or(DEFAULT_JAVA_MAJOR, |j| j.major_version)
    }

    pub fn server_download(&self, version: &str) -> Result<&Download> {
        self.downloads
            .server
            .as_ref()
            .ok_or_else(|| SetupError::ArtifactNotFound {
                what: format!("a server download for {version}"),
            })
    }
}
