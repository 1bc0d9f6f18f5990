//! Schema version identifiers.

use std::fmt;
use std::str::FromStr;

use crate::config::VERSION_PATTERN;
use crate::error::{QtiError, Result};

/// A totally ordered schema revision (`major.minor.patch`).
///
/// Ordering is lexicographic over the three components, so
/// `2.1.0 < 2.1.1 < 2.2.0 < 2.2.2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    major: u16,
    minor: u16,
    patch: u16,
}

impl Version {
    pub const V2_1_0: Version = Version::new(2, 1, 0);
    pub const V2_1_1: Version = Version::new(2, 1, 1);
    pub const V2_2_0: Version = Version::new(2, 2, 0);
    pub const V2_2_1: Version = Version::new(2, 2, 1);
    pub const V2_2_2: Version = Version::new(2, 2, 2);

    /// Create a version from its components.
    #[must_use]
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse `MAJOR.MINOR[.PATCH]`, with an optional leading `v`.
    ///
    /// A missing patch component is read as `0`.
    ///
    /// # Examples
    /// ```
    /// use qtibind_marshal::Version;
    ///
    /// assert_eq!(Version::parse("2.2").unwrap(), Version::V2_2_0);
    /// assert!(Version::parse("2.1.1").unwrap() < Version::V2_2_0);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || QtiError::InvalidVersion(text.to_string());
        let caps = VERSION_PATTERN.captures(text.trim()).ok_or_else(invalid)?;

        let component = |idx: usize| -> Result<u16> {
            match caps.get(idx) {
                Some(m) => m.as_str().parse().map_err(|_| invalid()),
                None => Ok(0),
            }
        };

        Ok(Self::new(component(1)?, component(2)?, component(3)?))
    }

    #[must_use]
    pub fn major(&self) -> u16 {
        self.major
    }

    #[must_use]
    pub fn minor(&self) -> u16 {
        self.minor
    }

    #[must_use]
    pub fn patch(&self) -> u16 {
        self.patch
    }

    /// True when a capability introduced in `since` is available in `self`.
    #[must_use]
    pub fn supports(&self, since: Option<Version>) -> bool {
        since.is_none_or(|since| *self >= since)
    }
}

impl FromStr for Version {
    type Err = QtiError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
