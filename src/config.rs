//! Parser configuration.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Environment variable consulted by [`Config::from_env`].
pub const LANGUAGE_LEVEL_ENV: &str = "JAST_LANGUAGE_LEVEL";

/// Java language level; constructs introduced after the selected level are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LanguageLevel {
    Java8 = 8,
    Java9 = 9,
    Java10 = 10,
    Java11 = 11,
    Java14 = 14,
    Java15 = 15,
    Java16 = 16,
    Java17 = 17,
    Java21 = 21,
}

impl LanguageLevel {
    pub const LATEST: LanguageLevel = LanguageLevel::Java21;

    /// Level for a release number. Releases without their own variant map to
    /// the closest earlier level that introduced syntax.
    pub fn from_release(release: u32) -> Option<Self> {
        Some(match release {
            0..=7 => return None,
            8 => LanguageLevel::Java8,
            9 => LanguageLevel::Java9,
            10 => LanguageLevel::Java10,
            11..=13 => LanguageLevel::Java11,
            14 => LanguageLevel::Java14,
            15 => LanguageLevel::Java15,
            16 => LanguageLevel::Java16,
            17..=20 => LanguageLevel::Java17,
            _ => LanguageLevel::Java21,
        })
    }

    pub fn release(&self) -> u32 {
        *self as u32
    }
}

impl Default for LanguageLevel {
    fn default() -> Self {
        LanguageLevel::LATEST
    }
}

impl fmt::Display for LanguageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Java {}", self.release())
    }
}

impl FromStr for LanguageLevel {
    type Err = Error;

    /// Accepts `17`, `1.8`, `java17` and `Java 17`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim().to_ascii_lowercase();
        let digits = trimmed.trim_start_matches("java").trim();
        let digits = digits.strip_prefix("1.").unwrap_or(digits);
        let release: u32 = digits
            .parse()
            .map_err(|_| Error::config_error(format!("invalid language level '{}'", s)))?;
        LanguageLevel::from_release(release)
            .ok_or_else(|| Error::config_error(format!("unsupported language level '{}'", s)))
    }
}

/// Parser configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub language_level: LanguageLevel,
}

impl Config {
    pub fn new(language_level: LanguageLevel) -> Self {
        Self { language_level }
    }

    /// Read the language level from `JAST_LANGUAGE_LEVEL`, defaulting to the latest.
    pub fn from_env() -> Result<Self> {
        match std::env::var(LANGUAGE_LEVEL_ENV) {
            Ok(value) => {
                let level = value.parse()?;
                log::debug!("language level {} from {}", level, LANGUAGE_LEVEL_ENV);
                Ok(Self::new(level))
            }
            Err(std::env::VarError::NotPresent) => Ok(Self::default()),
            Err(err) => Err(Error::config_error(format!("{}: {}", LANGUAGE_LEVEL_ENV, err))),
        }
    }

    pub fn with_language_level(mut self, level: LanguageLevel) -> Self {
        self.language_level = level;
        self
    }

    /// Whether syntax introduced in `level` is accepted.
    pub fn supports(&self, level: LanguageLevel) -> bool {
        self.language_level >= level
    }
}
