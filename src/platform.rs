//! Platform install-root resolution.
//!
//! Computes the per-user and all-users PowerShell resource roots and splits
//! the `PSModulePath` environment variable. Discovery itself never branches
//! on the operating system; it consumes the paths produced here as opaque
//! inputs.

use log::debug;
use std::path::PathBuf;

use crate::runtime::Runtime;

/// Name of the environment variable holding the module search path list.
pub const MODULE_PATH_VAR: &str = "PSModulePath";

#[cfg(windows)]
const MODULE_PATH_SEPARATOR: char = ';';
#[cfg(not(windows))]
const MODULE_PATH_SEPARATOR: char = ':';

/// Entries of `PSModulePath`, in order. Empty segments are dropped.
#[tracing::instrument(skip(runtime))]
pub fn module_search_paths<R: Runtime>(runtime: &R) -> Vec<PathBuf> {
    match runtime.env_var(MODULE_PATH_VAR) {
        Ok(value) => value
            .split(MODULE_PATH_SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .map(PathBuf::from)
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Current-user install root (the "my documents" scope).
#[tracing::instrument(skip(runtime))]
pub fn user_scope_root<R: Runtime>(runtime: &R) -> Option<PathBuf> {
    let root = user_scope_root_inner(runtime)?;
    debug!("Current user scope path: '{}'", root.display());
    Some(root)
}

/// All-users install root (the "program files" scope).
#[tracing::instrument(skip(runtime))]
pub fn machine_scope_root<R: Runtime>(runtime: &R) -> Option<PathBuf> {
    let root = machine_scope_root_inner(runtime)?;
    debug!("All users scope path: '{}'", root.display());
    Some(root)
}

#[cfg(windows)]
fn user_scope_root_inner<R: Runtime>(runtime: &R) -> Option<PathBuf> {
    Some(runtime.document_dir()?.join("PowerShell"))
}

#[cfg(windows)]
fn machine_scope_root_inner<R: Runtime>(runtime: &R) -> Option<PathBuf> {
    let program_files = runtime.env_var("ProgramFiles").ok()?;
    Some(PathBuf::from(program_files).join("PowerShell"))
}

// Paths are the same for both Linux and macOS.
#[cfg(not(windows))]
fn user_scope_root_inner<R: Runtime>(runtime: &R) -> Option<PathBuf> {
    Some(runtime.data_local_dir()?.join("powershell"))
}

#[cfg(not(windows))]
fn machine_scope_root_inner<R: Runtime>(_runtime: &R) -> Option<PathBuf> {
    Some(PathBuf::from("/usr/local/share/powershell"))
}
