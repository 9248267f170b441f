use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

/// Device software version as reported by the firewall, e.g. `8.0.0` or
/// `10.1.6-h3`.
///
/// Comparisons look at the numeric triple only; the hotfix suffix is kept
/// for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub suffix: String,
}

/// Errors returned when a version string cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("invalid version {0:?}: expected MAJOR[.MINOR[.PATCH]][-SUFFIX]")]
    Invalid(String),
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            suffix: String::new(),
        }
    }

    /// True when `self` is the same as or newer than `other`.
    pub fn gte(&self, other: &Version) -> bool {
        self.numbers() >= other.numbers()
    }

    fn numbers(&self) -> (u32, u32, u32) {
        (self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let invalid = || VersionError::Invalid(raw.to_string());

        let (numbers, suffix) = match trimmed.split_once('-') {
            Some((numbers, suffix)) if !suffix.is_empty() => (numbers, suffix),
            Some(_) => return Err(invalid()),
            None => (trimmed, ""),
        };

        let mut parts = [0u32; 3];
        let mut count = 0;
        for piece in numbers.split('.') {
            if count == parts.len() {
                return Err(invalid());
            }
            parts[count] = piece.parse().map_err(|_| invalid())?;
            count += 1;
        }

        Ok(Self {
            major: parts[0],
            minor: parts[1],
            patch: parts[2],
            suffix: suffix.to_string(),
        })
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.suffix.is_empty() {
            write!(f, "-{}", self.suffix)?;
        }
        Ok(())
    }
}
