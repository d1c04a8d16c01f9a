//! Name filtering of candidate entries.

use std::path::PathBuf;

use super::SCRIPT_METADATA_SUFFIX;

/// Retain candidates whose final path segment matches one of the requested
/// names, case-insensitively: either the name itself (module directory) or
/// `<name>_installedscriptinfo.xml` (script file). An absent list, or
/// exactly `["*"]`, passes every candidate through. Matching is exact, never
/// by prefix or substring.
pub fn filter_by_names(candidates: Vec<PathBuf>, names: Option<&[String]>) -> Vec<PathBuf> {
    let Some(names) = names else {
        return candidates;
    };
    if matches!(names, [single] if single == "*") {
        return candidates;
    }

    let module_names: Vec<String> = names.iter().map(|n| n.to_lowercase()).collect();
    let script_names: Vec<String> = module_names
        .iter()
        .map(|n| format!("{}{}", n, SCRIPT_METADATA_SUFFIX.to_lowercase()))
        .collect();

    candidates
        .into_iter()
        .filter(|candidate| {
            let Some(segment) = candidate.file_name() else {
                return false;
            };
            let segment = segment.to_string_lossy().to_lowercase();
            module_names.contains(&segment) || script_names.contains(&segment)
        })
        .collect()
}
