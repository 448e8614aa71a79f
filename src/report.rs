//! User-facing status messages
//!
//! Every message the installer shows goes through [`raise`] or one of the
//! shorthands below, so the prefix style stays consistent. The severity decides
//! what happens next: `Info` and `Warn` print and carry on, `Fatal` hands the
//! error back to the caller, which rolls back and exits.

use console::style;

use crate::error::{Result, SetupError};

/// How serious a reported condition is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Fatal,
}

/// Report `err` at the given severity
///
/// Returns `Err(err)` only for [`Severity::Fatal`].
pub fn raise(severity: Severity, err: SetupError) -> Result<()> {
    match severity {
        Severity::Info => {
            info(&err.to_string());
            Ok(())
        }
        Severity::Warn => {
            warn(&err.to_string());
            Ok(())
        }
        Severity::Fatal => Err(err),
    }
}

pub fn info(message: &str) {
    tracing::info!("{message}");
    println!("{} {}", style("Info:").cyan().bold(), message);
}

pub fn warn(message: &str) {
    tracing::warn!("{message}");
    eprintln!("{} {}", style("Warning:").yellow().bold(), message);
}

/// Announce that a fatal error is being rolled back
pub fn rolling_back(err: &SetupError) {
    tracing::error!(error = %err, "install failed");
    eprintln!("{} Rolling back changes...", style("Fatal:").red().bold());
}

/// A rollback step that could not be completed
pub fn rollback_failure(message: &str) {
    eprintln!("{} {message}", style("Error:").red().bold());
}

/// Plain progress line without a severity prefix
pub fn step(message: &str) {
    println!("{message}");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SetupError {
        SetupError::ArtifactNotFound {
            what: "a Fabric API release for 1.20.4".to_string(),
        }
    }

    #[test]
    fn test_info_continues() {
        assert!(raise(Severity::Info, sample()).is_ok());
    }

    #[test]
    fn test_warn_continues() {
        assert!(raise(Severity::Warn, sample()).is_ok());
    }

    #[test]
    fn test_fatal_propagates_error() {
        let result = raise(Severity::Fatal, sample());
        assert!(matches!(result, Err(SetupError::ArtifactNotFound { .. })));
    }
}
