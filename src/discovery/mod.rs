//! Discovery of installed resources.
//!
//! Composes the search-root enumerator, name filter, and version selector
//! into a lazy sequence of decoded resource records. [`find_resources`] is
//! the public entry point; everything it yields was reconstructed from a
//! metadata file found under the platform install roots (or an explicitly
//! requested path).

mod enumerate;
mod filter;
mod range;
mod roots;
mod select;

pub use enumerate::{ResourceIter, find_resources};
pub use range::SearchRange;

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Fixed file name of a module version's metadata record.
pub const MODULE_METADATA_FILE: &str = "PSGetModuleInfo.xml";

/// Fixed file-name suffix of a script's metadata record.
pub const SCRIPT_METADATA_SUFFIX: &str = "_InstalledScriptInfo.xml";

/// What to look for: which names, which versions, where.
#[derive(Debug, Clone, Default)]
pub struct ResourceQuery {
    /// Requested names; `None` (or exactly `["*"]`) means every resource.
    pub names: Option<Vec<String>>,
    /// Version argument: an exact version or a range expression.
    pub version: Option<String>,
    /// Explicit search root instead of the platform defaults.
    pub path: Option<PathBuf>,
}

/// Cooperative cancellation signal, checked between discovery phases.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancellation_token() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());

        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }
}
