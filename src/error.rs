//! Error taxonomy for resource discovery.
//!
//! Two classes exist: fatal errors ([`DiscoveryError`]) abort a discovery
//! request before any candidate is examined; everything else is reported as
//! a [`ParseIssue`] through an [`ErrorSink`] and never interrupts the
//! produced sequence.

use log::warn;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures for a discovery request.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The explicitly requested search path does not exist.
    #[error("search path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// The version argument is neither a version token nor a range expression.
    #[error("cannot parse version argument '{input}': {reason}")]
    ConstraintParse { input: String, reason: String },
}

impl DiscoveryError {
    /// Stable identifier for host-side error records.
    pub fn error_id(&self) -> &'static str {
        match self {
            DiscoveryError::PathNotFound { .. } => "PathNotFound",
            DiscoveryError::ConstraintParse { .. } => "ConstraintParseError",
        }
    }
}

/// Category attached to every reported issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueCategory {
    ParserError,
}

/// A non-fatal failure: a metadata file that would not deserialize, or a
/// single field of a record that would not decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    pub error_id: &'static str,
    pub category: IssueCategory,
    pub message: String,
}

impl ParseIssue {
    pub fn parser(error_id: &'static str, message: impl Into<String>) -> Self {
        ParseIssue {
            error_id,
            category: IssueCategory::ParserError,
            message: message.into(),
        }
    }
}

/// Receiver for non-fatal issues raised while decoding metadata.
pub trait ErrorSink {
    fn report(&mut self, issue: ParseIssue);
}

/// Sink that collects issues in memory, in report order.
#[derive(Debug, Default)]
pub struct IssueLog {
    issues: Vec<ParseIssue>,
}

impl IssueLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

impl ErrorSink for IssueLog {
    fn report(&mut self, issue: ParseIssue) {
        self.issues.push(issue);
    }
}

/// Sink that forwards issues to the log facade at warn level.
#[derive(Debug, Default)]
pub struct LogSink;

impl ErrorSink for LogSink {
    fn report(&mut self, issue: ParseIssue) {
        warn!("{}: {}", issue.error_id, issue.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_log_collects_in_order() {
        let mut sink = IssueLog::new();
        assert!(sink.is_empty());

        sink.report(ParseIssue::parser("ErrorParsingVersion", "bad version"));
        sink.report(ParseIssue::parser("ErrorParsingTags", "bad tags"));

        let issues = sink.issues();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].error_id, "ErrorParsingVersion");
        assert_eq!(issues[1].error_id, "ErrorParsingTags");
        assert_eq!(issues[0].category, IssueCategory::ParserError);
    }

    #[test]
    fn test_discovery_error_ids_and_display() {
        let err = DiscoveryError::PathNotFound {
            path: PathBuf::from("/missing"),
        };
        assert_eq!(err.error_id(), "PathNotFound");
        assert!(err.to_string().contains("/missing"));

        let err = DiscoveryError::ConstraintParse {
            input: "[1.0".into(),
            reason: "unterminated range".into(),
        };
        assert_eq!(err.error_id(), "ConstraintParseError");
        assert!(err.to_string().contains("[1.0"));
    }
}
