//! Server software flavors

use std::fmt;
use std::str::FromStr;

use crate::error::SetupError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Software {
    Paper,
    Spigot,
    Vanilla,
    Fabric,
}

impl Software {
    pub const ALL: [Software; 4] = [
        Software::Paper,
        Software::Spigot,
        Software::Vanilla,
        Software::Fabric,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Software::Paper => "paper",
            Software::Spigot => "spigot",
            Software::Vanilla => "vanilla",
            Software::Fabric => "fabric",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Software::Paper => "Paper",
            Software::Spigot => "Spigot",
            Software::Vanilla => "Vanilla",
            Software::Fabric => "Fabric",
        }
    }

    /// Bukkit-style servers that load jars from `plugins/`
    pub fn loads_plugins(self) -> bool {
        matches!(self, Software::Paper | Software::Spigot)
    }

    pub fn supports_geyser(self) -> bool {
        !matches!(self, Software::Vanilla)
    }

    /// Whether the install needs the vanilla server jar from Mojang
    pub fn needs_vanilla_jar(self) -> bool {
        matches!(self, Software::Vanilla | Software::Fabric)
    }
}

impl FromStr for Software {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "p" | "paper" => Ok(Software::Paper),
            "s" | "spigot" => Ok(Software::Spigot),
            "v" | "vanilla" => Ok(Software::Vanilla),
            "f" | "fabric" => Ok(Software::Fabric),
            _ => Err(SetupError::InvalidSoftware {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Software {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
