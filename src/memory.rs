//! Java-style memory sizes (`512M`, `2G`, ...)

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SetupError};

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;
const TIB: u64 = GIB * 1024;

/// Below this the server runs poorly
pub const LOW_MEMORY_BYTES: u64 = 512 * MIB;

/// Above this the JVM stops benefiting
pub const HIGH_MEMORY_BYTES: u64 = 32 * GIB;

/// A heap size as passed to `-Xms`/`-Xmx`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySize {
    raw: String,
    bytes: u64,
}

impl MemorySize {
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// The size exactly as the user wrote it, for the launch script
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for MemorySize {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self> {
        let raw = s.trim();
        let invalid = || SetupError::InvalidMemorySize {
            value: s.to_string(),
        };

        let suffix = raw.chars().last().ok_or_else(invalid)?;
        let number = &raw[..raw.len() - suffix.len_utf8()];
        if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let number: u64 = number.parse().map_err(|_| invalid())?;

        let unit = match suffix.to_ascii_uppercase() {
            'B' => 1,
            'K' => KIB,
            'M' => MIB,
            'G' => GIB,
            'T' => TIB,
            _ => return Err(invalid()),
        };

        Ok(Self {
            raw: raw.to_string(),
            bytes: number.checked_mul(unit).ok_or_else(invalid)?,
        })
    }
}

impl fmt::Display for MemorySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Minimum and maximum heap for the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryRange {
    pub min: MemorySize,
    pub max: MemorySize,
}

impl MemoryRange {
    /// Parse both sizes; a missing minimum matches the maximum
    pub fn parse(min: Option<&str>, max: &str) -> Result<Self> {
        let max: MemorySize = max.parse()?;
        let min = match min {
            Some(min) => min.parse()?,
            None => max.clone(),
        };
        if max.bytes < min.bytes {
            return Err(SetupError::MemoryRangeInverted {
                min: min.raw,
                max: max.raw,
            });
        }
        Ok(Self { min, max })
    }

    /// Advice about sizes that work but are probably not what the user wants
    pub fn warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();
        if self.max.bytes > self.min.bytes {
            warnings.push(
                "If the minimum and maximum RAM do not match, there will be unused memory, which is wasted.",
            );
        }
        if self.max.bytes < LOW_MEMORY_BYTES {
            warnings.push("Minecraft will not run well with less than 512MB RAM.");
        }
        if self.max.bytes > HIGH_MEMORY_BYTES {
            warnings.push("Minecraft will not benefit from more than 32GB RAM.");
        }
        warnings
    }
}
