//! Interactive questions
//!
//! The installer only talks to the user through [`Prompter`], so runs with
//! `--no-input` (or without a terminal) and tests can answer without inquire.

use inquire::{Confirm, Select, Text};

use crate::error::{Result, SetupError};
use crate::resolver::Software;

pub trait Prompter {
    /// Whether questions reach a person; when false, missing choices are errors
    fn interactive(&self) -> bool;

    fn select_software(&self) -> Result<Software>;

    fn ask_version(&self) -> Result<String>;

    fn confirm(&self, message: &str, default: bool) -> Result<bool>;
}

/// Terminal prompts
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn interactive(&self) -> bool {
        true
    }

    fn select_software(&self) -> Result<Software> {
        Select::new("Server software", Software::ALL.to_vec())
            .with_starting_cursor(0)
            .without_filtering()
            .with_help_message("↑↓ to move, ENTER to select")
            .prompt()
            .map_err(SetupError::from)
    }

    fn ask_version(&self) -> Result<String> {
        Text::new("Server version (any release or 'latest'):")
            .prompt()
            .map_err(SetupError::from)
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        Confirm::new(message)
            .with_default(default)
            .prompt()
            .map_err(SetupError::from)
    }
}

/// Never asks; confirmations take their default
pub struct NoInput;

impl Prompter for NoInput {
    fn interactive(&self) -> bool {
        false
    }

    fn select_software(&self) -> Result<Software> {
        Err(SetupError::InputRequired {
            what: "server software".to_string(),
        })
    }

    fn ask_version(&self) -> Result<String> {
        Err(SetupError::InputRequired {
            what: "server version".to_string(),
        })
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        tracing::debug!(message, default, "confirmation answered with default");
        Ok(default)
    }
}
