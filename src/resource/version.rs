//! Dotted version type for installed resources.
//!
//! Covers both the record-level version fields and the version directory
//! names an installer produces: one to four numeric dot-separated
//! components with an optional `-prerelease` label (`1.2`, `1.2.3.4`,
//! `2.0.0-beta`). Missing components count as zero, so `1.2` and `1.2.0`
//! compare equal; a release orders above its own prerelease.

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const MAX_COMPONENTS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    #[error("empty version string")]
    Empty,
    #[error("more than {MAX_COMPONENTS} version components")]
    TooManyComponents,
    #[error("invalid version component '{0}'")]
    InvalidComponent(String),
    #[error("empty prerelease label")]
    EmptyPrerelease,
}

#[derive(Debug, Clone)]
pub struct PsVersion {
    parts: Vec<u64>,
    prerelease: Option<String>,
}

impl PsVersion {
    /// Numeric component at `index`, zero when absent.
    pub fn part(&self, index: usize) -> u64 {
        self.parts.get(index).copied().unwrap_or(0)
    }

    pub fn prerelease(&self) -> Option<&str> {
        self.prerelease.as_deref()
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }
}

impl FromStr for PsVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let (numeric, prerelease) = match s.split_once('-') {
            Some((numeric, label)) => {
                if label.is_empty() {
                    return Err(VersionParseError::EmptyPrerelease);
                }
                (numeric, Some(label.to_string()))
            }
            None => (s, None),
        };

        let mut parts = Vec::new();
        for component in numeric.split('.') {
            if parts.len() == MAX_COMPONENTS {
                return Err(VersionParseError::TooManyComponents);
            }
            if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
                return Err(VersionParseError::InvalidComponent(component.to_string()));
            }
            let value = component
                .parse::<u64>()
                .map_err(|_| VersionParseError::InvalidComponent(component.to_string()))?;
            parts.push(value);
        }

        Ok(PsVersion { parts, prerelease })
    }
}

impl fmt::Display for PsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numeric: Vec<String> = self.parts.iter().map(u64::to_string).collect();
        write!(f, "{}", numeric.join("."))?;
        if let Some(label) = &self.prerelease {
            write!(f, "-{}", label)?;
        }
        Ok(())
    }
}

impl PartialEq for PsVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PsVersion {}

impl PartialOrd for PsVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PsVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        for index in 0..MAX_COMPONENTS {
            match self.part(index).cmp(&other.part(index)) {
                Ordering::Equal => {}
                unequal => return unequal,
            }
        }
        match (&self.prerelease, &other.prerelease) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        }
    }
}

impl Serialize for PsVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> PsVersion {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_component_counts() {
        assert_eq!(v("2").part(0), 2);
        assert_eq!(v("1.2").part(1), 2);
        assert_eq!(v("1.2.3").part(2), 3);
        assert_eq!(v("1.2.3.4").part(3), 4);
        assert!("1.2.3.4.5".parse::<PsVersion>().is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!("".parse::<PsVersion>(), Err(VersionParseError::Empty));
        assert!("abc".parse::<PsVersion>().is_err());
        assert!("1..2".parse::<PsVersion>().is_err());
        assert!("1.2.".parse::<PsVersion>().is_err());
        assert!("1.2.x".parse::<PsVersion>().is_err());
        assert!("-beta".parse::<PsVersion>().is_err());
        assert_eq!(
            "1.0-".parse::<PsVersion>(),
            Err(VersionParseError::EmptyPrerelease)
        );
    }

    #[test]
    fn test_parse_prerelease() {
        let version = v("2.0.0-beta");
        assert!(version.is_prerelease());
        assert_eq!(version.prerelease(), Some("beta"));
        // Label may itself contain a dash
        assert_eq!(v("2.0.0-rc-1").prerelease(), Some("rc-1"));
    }

    #[test]
    fn test_missing_components_are_zero() {
        assert_eq!(v("1.0"), v("1.0.0"));
        assert_eq!(v("1"), v("1.0.0.0"));
        assert!(v("1.0.0.1") > v("1.0"));
    }

    #[test]
    fn test_numeric_ordering() {
        assert!(v("2.0.0") > v("1.9.9"));
        assert!(v("1.10.0") > v("1.9.0"));
        assert!(v("0.9.0") < v("1.0.0"));
    }

    #[test]
    fn test_release_orders_above_its_prerelease() {
        assert!(v("2.0.0") > v("2.0.0-beta"));
        assert!(v("2.0.0-beta") > v("1.9.9"));
        assert_eq!(v("2.0.0-Beta"), v("2.0.0-beta"));
        assert!(v("2.0.0-alpha") < v("2.0.0-beta"));
    }

    #[test]
    fn test_display_round_trip() {
        assert_eq!(v("1.2.3").to_string(), "1.2.3");
        assert_eq!(v("2.0.0-beta").to_string(), "2.0.0-beta");
        assert_eq!(v("1.2").to_string(), "1.2");
    }

    #[test]
    fn test_serialize_as_string() {
        let json = serde_json::to_string(&v("1.2.3-rc1")).unwrap();
        assert_eq!(json, "\"1.2.3-rc1\"");
    }
}
