//! Error types and handling for mcsetup
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Errors are grouped by the area that raises them:
//! - memory: RAM size parsing and range checks
//! - selection: software/version/build choices
//! - net: vendor API requests
//! - verify: artifact integrity checks
//! - fs: file system writes
//! - config: installer configuration files and overrides
//! - cli: command-line usage

use miette::Diagnostic;
use thiserror::Error;


/// Main error type for mcsetup operations
#[derive(Error, Diagnostic, Debug)]
pub enum SetupError {
    // Memory errors
    #[error("Invalid RAM format: '{value}'")]
    #[diagnostic(
        code(mcsetup::memory::invalid_format),
        help("Use the Java format, eg: 512M, 2G, 1536M")
    )]
    InvalidMemorySize { value: String },

    #[error("Maximum RAM size ({max}) is less than the minimum ({min})")]
    #[diagnostic(
        code(mcsetup::memory::inverted_range),
        help("Leave --ram-min unset to match the maximum automatically")
    )]
    MemoryRangeInverted { min: String, max: String },

    // Selection errors
    #[error("'{input}' isn't a valid type of server software")]
    #[diagnostic(
        code(mcsetup::selection::invalid_software),
        help("Supported software: paper, spigot, vanilla, fabric")
    )]
    InvalidSoftware { input: String },

    #[error("'{input}' isn't a valid version")]
    #[diagnostic(
        code(mcsetup::selection::invalid_version),
        help("Use any Minecraft release id (e.g. 1.20.4) or 'latest'")
    )]
    InvalidVersion { input: String },

    #[error("No {what} given and prompting is disabled")]
    #[diagnostic(code(mcsetup::selection::input_required))]
    InputRequired { what: String },

    #[error("This version of {software} has not been released yet: {version}")]
    #[diagnostic(code(mcsetup::selection::not_released))]
    VersionNotReleased { software: String, version: String },

    #[error("The selected build could not be found: {build}")]
    #[diagnostic(
        code(mcsetup::selection::build_not_found),
        help("Omit --build to use the newest build")
    )]
    BuildNotFound { build: u32 },

    #[error("Could not find {what}")]
    #[diagnostic(code(mcsetup::selection::artifact_not_found))]
    ArtifactNotFound { what: String },

    #[error("Failed to prompt for input: {message}")]
    #[diagnostic(code(mcsetup::selection::prompt_failed))]
    PromptFailed { message: String },

    // Network errors
    #[error("Error {status}: {reason} when getting {resource}")]
    #[diagnostic(code(mcsetup::net::http_status))]
    HttpStatus {
        status: u16,
        reason: String,
        resource: String,
    },

    #[error("There appears to be no internet connection")]
    #[diagnostic(
        code(mcsetup::net::no_connection),
        help("Check your connection and try again")
    )]
    NoConnection { url: String },

    #[error("Request failed for {url}: {reason}")]
    #[diagnostic(code(mcsetup::net::request_failed))]
    RequestFailed { url: String, reason: String },

    #[error("Unexpected response for {resource}: {reason}")]
    #[diagnostic(code(mcsetup::net::unexpected_response))]
    UnexpectedResponse { resource: String, reason: String },

    // Verification errors
    #[error("Hashes do not match for downloaded {artifact}")]
    #[diagnostic(
        code(mcsetup::verify::hash_mismatch),
        help("The download was corrupted or tampered with. Try again later")
    )]
    HashMismatch { artifact: String },

    #[error("{artifact} size does not match the vendor-specified size ({actual} != {expected})")]
    #[diagnostic(code(mcsetup::verify::size_mismatch))]
    SizeMismatch {
        artifact: String,
        expected: u64,
        actual: u64,
    },

    #[error("Refusing to extract archive entry outside the runtime directory: {entry}")]
    #[diagnostic(code(mcsetup::verify::unsafe_archive_entry))]
    UnsafeArchiveEntry { entry: String },

    #[error("No Java {major} runtime is available: {reason}")]
    #[diagnostic(
        code(mcsetup::verify::runtime_unavailable),
        help("Install Java yourself and run again without --runtime")
    )]
    RuntimeUnavailable { major: u32, reason: String },

    // File system errors
    #[error("You do not have permission to write at '{path}'")]
    #[diagnostic(code(mcsetup::fs::permission_denied))]
    PermissionDenied { path: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(mcsetup::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to read file: {path}")]
    #[diagnostic(code(mcsetup::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to create directory: {path}")]
    #[diagnostic(code(mcsetup::fs::create_dir_failed))]
    DirectoryCreateFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(mcsetup::fs::io_error))]
    IoError { message: String },

    // Configuration errors
    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(mcsetup::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(mcsetup::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("{file} has no setting named '{key}', so it was left out")]
    #[diagnostic(code(mcsetup::config::unknown_template_key))]
    UnknownTemplateKey { file: String, key: String },

    #[error("Invalid override '{input}'")]
    #[diagnostic(
        code(mcsetup::config::invalid_override),
        help("Overrides are written as KEY=VALUE on one line, e.g. --set max-players=50")
    )]
    InvalidOverride { input: String },

    // CLI errors
    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(mcsetup::cli::unknown_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnknownShell { shell: String },
}

impl From<std::io::Error> for SetupError {
    fn from(err: std::io::Error) -> Self {
        SetupError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for SetupError {
    fn from(err: serde_yaml::Error) -> Self {
        SetupError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for SetupError {
    fn from(err: serde_json::Error) -> Self {
        SetupError::UnexpectedResponse {
            resource: "vendor response".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for SetupError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map_or_else(|| "unknown".to_string(), ToString::to_string);
        if err.is_connect() || err.is_timeout() {
            SetupError::NoConnection { url }
        } else {
            SetupError::RequestFailed {
                url,
                reason: err.to_string(),
            }
        }
    }
}

impl From<inquire::InquireError> for SetupError {
    fn from(err: inquire::InquireError) -> Self {
        SetupError::PromptFailed {
            message: err.to_string(),
        }
    }
}

/// Map a write failure to the matching error, singling out permission problems
pub fn write_error(path: &std::path::Path, err: &std::io::Error) -> SetupError {
    if err.kind() == std::io::ErrorKind::PermissionDenied {
        SetupError::PermissionDenied {
            path: path.display().to_string(),
        }
    } else {
        SetupError::FileWriteFailed {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, SetupError>;
