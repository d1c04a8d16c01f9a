//! Version selection: from filtered candidates to metadata file paths.

use log::debug;
use std::path::PathBuf;

use crate::resource::PsVersion;
use crate::runtime::Runtime;

use super::{MODULE_METADATA_FILE, SearchRange};

/// Flatten candidates into the metadata files to decode, preserving
/// candidate order.
///
/// A file candidate is a script record and passes straight through (scripts
/// carry no version tier). A directory candidate enumerates its version
/// subdirectories: with a range, every satisfying version is kept; without
/// one, only the highest. Subdirectory names that do not parse as versions
/// are skipped. Candidates that vanished since enumeration are skipped
/// silently.
#[tracing::instrument(skip(runtime, candidates, range))]
pub fn select_metadata_paths<R: Runtime>(
    runtime: &R,
    candidates: &[PathBuf],
    range: Option<&SearchRange>,
) -> Vec<PathBuf> {
    let mut metadata_files = Vec::new();

    for candidate in candidates {
        debug!("Searching through package path: '{}'", candidate.display());

        if runtime.is_file(candidate) {
            metadata_files.push(candidate.clone());
            continue;
        }
        if !runtime.is_dir(candidate) {
            continue;
        }
        let Ok(entries) = runtime.read_dir(candidate) else {
            continue;
        };

        let versions: Vec<(String, Option<PsVersion>)> = entries
            .iter()
            .filter(|entry| runtime.is_dir(entry))
            .filter_map(|entry| entry.file_name().map(|n| n.to_string_lossy().into_owned()))
            .map(|name| {
                let parsed = name.parse::<PsVersion>().ok();
                (name, parsed)
            })
            .collect();

        match range {
            Some(range) => {
                for (name, version) in &versions {
                    if version.as_ref().is_some_and(|v| range.satisfies(v)) {
                        metadata_files.push(candidate.join(name).join(MODULE_METADATA_FILE));
                    }
                }
            }
            None => {
                if let Some(name) = latest_version_dir(&versions) {
                    metadata_files.push(candidate.join(name).join(MODULE_METADATA_FILE));
                }
            }
        }
    }

    metadata_files
}

/// The single highest version subdirectory. Ties between equal parsed
/// versions go to the lexically-last original-case name; when no name
/// parses at all, fall back to a case-insensitive lexical maximum.
fn latest_version_dir(versions: &[(String, Option<PsVersion>)]) -> Option<&str> {
    let best_parsed = versions
        .iter()
        .filter_map(|(name, version)| version.as_ref().map(|v| (name, v)))
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)));
    if let Some((name, _)) = best_parsed {
        return Some(name);
    }

    versions
        .iter()
        .max_by(|a, b| {
            a.0.to_lowercase()
                .cmp(&b.0.to_lowercase())
                .then_with(|| a.0.cmp(&b.0))
        })
        .map(|(name, _)| name.as_str())
}
