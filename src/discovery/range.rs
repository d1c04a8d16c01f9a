//! Parsed form of a version argument.
//!
//! A version argument is either a single version token, which becomes an
//! exact-match range, or a range expression with bracket/parenthesis bounds
//! (`[1.0,2.0)`, `(,2.0]`, `[1.0,]`, `[1.0]`), either side omissible.

use log::debug;
use std::fmt;

use crate::error::DiscoveryError;
use crate::resource::PsVersion;

/// Inclusive/exclusive version bounds applied during selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRange {
    min: Option<PsVersion>,
    min_inclusive: bool,
    max: Option<PsVersion>,
    max_inclusive: bool,
}

impl SearchRange {
    /// Range matching exactly one version.
    pub fn exact(version: PsVersion) -> Self {
        SearchRange {
            min: Some(version.clone()),
            min_inclusive: true,
            max: Some(version),
            max_inclusive: true,
        }
    }

    /// Parse a version argument: a bare version token makes an exact range,
    /// anything else must be a well-formed range expression.
    pub fn parse(input: &str) -> Result<Self, DiscoveryError> {
        if let Ok(version) = input.trim().parse::<PsVersion>() {
            let range = SearchRange::exact(version);
            debug!("A specific version, '{}', is specified", range);
            return Ok(range);
        }
        let range = Self::parse_expression(input)?;
        debug!("A version range, '{}', is specified", range);
        Ok(range)
    }

    fn parse_expression(input: &str) -> Result<Self, DiscoveryError> {
        let fail = |reason: &str| DiscoveryError::ConstraintParse {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let bytes = trimmed.as_bytes();
        if bytes.len() < 2 {
            return Err(fail("expected a version or a bracketed range"));
        }

        let min_inclusive = match bytes[0] {
            b'[' => true,
            b'(' => false,
            _ => return Err(fail("range must start with '[' or '('")),
        };
        let max_inclusive = match bytes[bytes.len() - 1] {
            b']' => true,
            b')' => false,
            _ => return Err(fail("range must end with ']' or ')'")),
        };

        let interior = &trimmed[1..trimmed.len() - 1];
        let parts: Vec<&str> = interior.split(',').collect();
        match parts.as_slice() {
            // "[1.0]" pins a single version; exclusive brackets make no sense
            [single] => {
                if !(min_inclusive && max_inclusive) {
                    return Err(fail("a single-version range must use square brackets"));
                }
                let version = single
                    .trim()
                    .parse::<PsVersion>()
                    .map_err(|e| fail(&e.to_string()))?;
                Ok(SearchRange::exact(version))
            }
            [lower, upper] => {
                let parse_bound = |bound: &str| -> Result<Option<PsVersion>, DiscoveryError> {
                    let bound = bound.trim();
                    if bound.is_empty() {
                        return Ok(None);
                    }
                    bound
                        .parse::<PsVersion>()
                        .map(Some)
                        .map_err(|e| fail(&e.to_string()))
                };
                Ok(SearchRange {
                    min: parse_bound(lower)?,
                    min_inclusive,
                    max: parse_bound(upper)?,
                    max_inclusive,
                })
            }
            _ => Err(fail("a range has at most one comma")),
        }
    }

    /// Whether `version` lies within the bounds, honoring inclusivity.
    pub fn satisfies(&self, version: &PsVersion) -> bool {
        if let Some(min) = &self.min {
            if version < min || (!self.min_inclusive && version == min) {
                return false;
            }
        }
        if let Some(max) = &self.max {
            if version > max || (!self.max_inclusive && version == max) {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for SearchRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lower = if self.min_inclusive { '[' } else { '(' };
        let upper = if self.max_inclusive { ']' } else { ')' };
        let bound = |v: &Option<PsVersion>| v.as_ref().map(PsVersion::to_string).unwrap_or_default();
        write!(f, "{}{}, {}{}", lower, bound(&self.min), bound(&self.max), upper)
    }
}
