//! Bundled Java runtime
//!
//! Downloads an Eclipse Temurin JRE matching the Minecraft version's Java
//! major and unpacks it into `runtime/`. Every extracted entry is recorded in
//! the ledger so a failed install removes the runtime too.

use std::fs;
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use serde::Deserialize;
use tar::{Archive, EntryType};

use super::ServerInstaller;
use crate::error::{Result, SetupError};
use crate::hash::{self, Checksum};
use crate::net;
use crate::report;
use crate::resolver::artifact;
use crate::transaction::WriteLedger;

/// Directory under the server root that holds runtimes
pub const RUNTIME_DIR: &str = "runtime";

#[derive(Debug, Deserialize)]
struct Asset {
    binary: Binary,
}

#[derive(Debug, Deserialize)]
struct Binary {
    package: Package,
}

#[derive(Debug, Deserialize)]
struct Package {
    checksum: String,
    link: String,
    name: String,
    size: u64,
}

/// Install a JRE for `major` and return the java executable relative to the
/// server root
pub fn install(installer: &mut ServerInstaller<'_>, major: u32) -> Result<PathBuf> {
    let (os, arch) = artifact::adoptium_platform().ok_or_else(|| SetupError::RuntimeUnavailable {
        major,
        reason: format!(
            "no JRE archive is published for {}/{}",
            std::env::consts::OS,
            std::env::consts::ARCH
        ),
    })?;

    report::info(&format!("Downloading Java {major} runtime..."));
    let url = artifact::adoptium_assets_url(major, os, arch);
    let assets: Vec<Asset> =
        net::fetch_json(installer.fetcher(), &url, &format!("Java {major} runtime listing"))?;
    let package = assets
        .into_iter()
        .map(|asset| asset.binary.package)
        .find(|package| package.name.ends_with(".tar.gz"))
        .ok_or_else(|| SetupError::RuntimeUnavailable {
            major,
            reason: "the listing has no .tar.gz package".to_string(),
        })?;
    tracing::debug!(name = %package.name, size = package.size, "selected runtime package");

    let archive = installer.download(&package.link, "Java runtime")?;
    hash::verify_size(&archive, package.size, "Java runtime")?;
    Checksum::Sha256(package.checksum).verify(&archive, "Java runtime")?;

    let target = installer.make_dir(RUNTIME_DIR)?;
    let top = extract_tar_gz(installer.ledger(), &archive, &target)?.ok_or_else(|| {
        SetupError::RuntimeUnavailable {
            major,
            reason: "the runtime archive is empty".to_string(),
        }
    })?;
    report::info(&format!("Installed Java {major} runtime!"));

    Ok(java_path(&Path::new(RUNTIME_DIR).join(top)))
}

/// Location of the java binary inside an unpacked runtime
pub fn java_path(runtime_root: &Path) -> PathBuf {
    if cfg!(target_os = "macos") {
        runtime_root.join("Contents/Home/bin/java")
    } else {
        runtime_root.join("bin/java")
    }
}

/// Unpack a gzipped tarball into `dest`, recording every created entry
///
/// Returns the first path component of the archive, which for JRE archives
/// is the runtime's top-level directory.
pub fn extract_tar_gz(ledger: &mut WriteLedger, bytes: &[u8], dest: &Path) -> Result<Option<String>> {
    let archive_error = |e: std::io::Error| SetupError::UnexpectedResponse {
        resource: "Java runtime archive".to_string(),
        reason: e.to_string(),
    };

    let mut archive = Archive::new(GzDecoder::new(bytes));
    let mut top = None;

    for entry in archive.entries().map_err(archive_error)? {
        let mut entry = entry.map_err(archive_error)?;
        let kind = entry.header().entry_type();
        if !matches!(
            kind,
            EntryType::Regular
                | EntryType::Continuous
                | EntryType::Directory
                | EntryType::Symlink
                | EntryType::Link
        ) {
            continue;
        }

        let relative = entry_path(&entry.path().map_err(archive_error)?)?;
        let Some(first) = relative.components().next() else {
            continue;
        };
        if top.is_none() {
            top = Some(first.as_os_str().to_string_lossy().into_owned());
        }

        let target = dest.join(&relative);
        if kind == EntryType::Directory {
            ledger.make_dirs(&target)?;
            continue;
        }
        if let Some(parent) = target.parent() {
            ledger.make_dirs(parent)?;
        }

        if target.is_file() {
            let original = fs::read(&target).map_err(|e| SetupError::FileReadFailed {
                path: target.display().to_string(),
                reason: e.to_string(),
            })?;
            ledger.record_replaced(&target, original);
        }
        ledger.write_with(&target, || entry.unpack_in(dest).map(|_| ()))?;
    }

    Ok(top)
}

/// Keep only plain path segments; anything that could leave `dest` is refused
fn entry_path(raw: &Path) -> Result<PathBuf> {
    let mut clean = PathBuf::new();
    for component in raw.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(SetupError::UnsafeArchiveEntry {
                    entry: raw.display().to_string(),
                });
            }
        }
    }
    Ok(clean)
}


#[cfg(test)]
mod tests {
    use super::fixtures::{file_header, jre_archive};
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use tempfile::TempDir;

    #[test]
    fn test_extract_records_every_entry() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("runtime");
        let mut ledger = WriteLedger::new();
        ledger.make_dirs(&dest).unwrap();

        let top = extract_tar_gz(&mut ledger, &jre_archive(), &dest).unwrap();
        assert_eq!(top.as_deref(), Some("jdk-21.0.2+13-jre"));
        assert!(dest.join("jdk-21.0.2+13-jre/bin/java").is_file());
        assert_eq!(ledger.files().len(), 2);
        // runtime, jdk dir, bin
        assert_eq!(ledger.directories().len(), 3);

        let report = ledger.rollback();
        assert!(report.is_clean());
        assert!(!dest.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_keeps_executable_bit() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let mut ledger = WriteLedger::new();
        extract_tar_gz(&mut ledger, &jre_archive(), temp.path()).unwrap();
        let mode = fs::metadata(temp.path().join("jdk-21.0.2+13-jre/bin/java"))
            .unwrap()
            .permissions()
            .mode();
        assert_ne!(mode & 0o100, 0);
        ledger.commit();
    }

    #[test]
    fn test_extract_rejects_parent_components() {
        let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
        let mut header = file_header(4, 0o644);
        let name = b"../evil.txt";
        header.as_gnu_mut().unwrap().name[..name.len()].copy_from_slice(name);
        header.set_cksum();
        builder.append(&header, &b"evil"[..]).unwrap();
        let bytes = builder.into_inner().unwrap().finish().unwrap();

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("runtime");
        fs::create_dir(&dest).unwrap();
        let mut ledger = WriteLedger::new();

        let result = extract_tar_gz(&mut ledger, &bytes, &dest);
        assert!(matches!(result, Err(SetupError::UnsafeArchiveEntry { .. })));
        assert!(!temp.path().join("evil.txt").exists());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_extract_rejects_garbage() {
        let temp = TempDir::new().unwrap();
        let mut ledger = WriteLedger::new();
        let result = extract_tar_gz(&mut ledger, b"not a tarball", temp.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_entry_path() {
        assert_eq!(
            entry_path(Path::new("./jdk/bin/java")).unwrap(),
            PathBuf::from("jdk/bin/java")
        );
        assert!(entry_path(Path::new("/etc/passwd")).is_err());
        assert!(entry_path(Path::new("jdk/../../x")).is_err());
    }
}
