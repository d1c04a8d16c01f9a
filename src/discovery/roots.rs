//! Search-root enumeration.
//!
//! Produces the deduplicated, ordered list of candidate entries to examine:
//! module candidates are directories (one per installed package name),
//! script candidates are the metadata files inside the
//! `Scripts/InstalledScriptInfos` trees.

use indexmap::IndexSet;
use log::debug;
use std::path::{Path, PathBuf};

use crate::error::DiscoveryError;
use crate::platform;
use crate::runtime::Runtime;

use super::CancellationToken;

/// Candidate entries for a discovery request.
///
/// With an explicit root, its immediate subdirectories (a missing root is a
/// fatal error). Otherwise each `PSModulePath` entry's subdirectories, the
/// all-users and per-user `Modules` subdirectories, and the all-users and
/// per-user `Scripts/InstalledScriptInfos` files, in that order. Optional
/// roots that do not exist are skipped; duplicates keep their first
/// position.
#[tracing::instrument(skip(runtime, cancel))]
pub fn search_candidates<R: Runtime>(
    runtime: &R,
    explicit: Option<&Path>,
    cancel: &CancellationToken,
) -> Result<Vec<PathBuf>, DiscoveryError> {
    if let Some(root) = explicit {
        debug!("Provided path is: '{}'", root.display());
        return explicit_root_candidates(runtime, root);
    }

    let mut candidates: IndexSet<PathBuf> = IndexSet::new();

    for module_path in platform::module_search_paths(runtime) {
        if cancel.is_cancelled() {
            return Ok(candidates.into_iter().collect());
        }
        collect_subdirectories(runtime, &module_path, &mut candidates);
    }

    let machine_root = platform::machine_scope_root(runtime);
    let user_root = platform::user_scope_root(runtime);

    for scope_root in [&machine_root, &user_root].into_iter().flatten() {
        if cancel.is_cancelled() {
            break;
        }
        collect_subdirectories(runtime, &scope_root.join("Modules"), &mut candidates);
    }
    for scope_root in [&machine_root, &user_root].into_iter().flatten() {
        if cancel.is_cancelled() {
            break;
        }
        let script_infos = scope_root.join("Scripts").join("InstalledScriptInfos");
        collect_files(runtime, &script_infos, &mut candidates);
    }

    for candidate in &candidates {
        debug!("Directory to search: '{}'", candidate.display());
    }
    Ok(candidates.into_iter().collect())
}

fn explicit_root_candidates<R: Runtime>(
    runtime: &R,
    root: &Path,
) -> Result<Vec<PathBuf>, DiscoveryError> {
    if !runtime.is_dir(root) {
        return Err(DiscoveryError::PathNotFound {
            path: root.to_path_buf(),
        });
    }
    let entries = runtime
        .read_dir(root)
        .map_err(|_| DiscoveryError::PathNotFound {
            path: root.to_path_buf(),
        })?;
    Ok(entries
        .into_iter()
        .filter(|entry| runtime.is_dir(entry))
        .collect())
}

fn collect_subdirectories<R: Runtime>(
    runtime: &R,
    dir: &Path,
    candidates: &mut IndexSet<PathBuf>,
) {
    collect_entries(runtime, dir, candidates, |r, p| r.is_dir(p));
}

fn collect_files<R: Runtime>(runtime: &R, dir: &Path, candidates: &mut IndexSet<PathBuf>) {
    collect_entries(runtime, dir, candidates, |r, p| r.is_file(p));
}

fn collect_entries<R: Runtime>(
    runtime: &R,
    dir: &Path,
    candidates: &mut IndexSet<PathBuf>,
    keep: fn(&R, &Path) -> bool,
) {
    if !runtime.is_dir(dir) {
        return;
    }
    match runtime.read_dir(dir) {
        Ok(entries) => {
            for entry in entries {
                if keep(runtime, &entry) {
                    candidates.insert(entry);
                }
            }
        }
        // Listed a moment ago but gone now; not an error.
        Err(e) => debug!("Skipping '{}': {}", dir.display(), e),
    }
}
