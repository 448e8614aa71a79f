//! Common test utilities for mcsetup integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A scratch area for one test: a server directory that does not exist yet
/// and an isolated config home
pub struct TestDir {
    pub temp: TempDir,
}

impl TestDir {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        Self { temp }
    }

    /// Where the server should be installed
    pub fn server(&self) -> PathBuf {
        self.temp.path().join("server")
    }

    /// Write a file relative to the scratch root and return its path
    #[allow(dead_code)]
    pub fn write_file(&self, path: &str, content: &str) -> PathBuf {
        let file_path = self.temp.path().join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    /// The binary, isolated from the caller's environment and config
    pub fn cmd(&self) -> Command {
        let mut cmd = mcsetup_cmd();
        cmd.env("XDG_CONFIG_HOME", self.temp.path().join("xdg"))
            .env_remove("MCSETUP_CONFIG")
            .env_remove("MCSETUP_DIRECTORY")
            .env_remove("MCSETUP_LOG");
        cmd
    }
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn mcsetup_cmd() -> Command {
    Command::cargo_bin("mcsetup").expect("Failed to find mcsetup binary")
}

/// Whether `path` was left behind
#[allow(dead_code)]
pub fn exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}
