//! Command implementations for the mcsetup CLI

pub mod completions;
pub mod install;
pub mod version;
