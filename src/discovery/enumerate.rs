//! The public entry point: a lazy sequence of decoded resources.

use log::debug;
use std::path::PathBuf;

use crate::error::{DiscoveryError, ErrorSink, ParseIssue};
use crate::resource::{ResourceInfo, decode_resource};
use crate::runtime::Runtime;
use crate::serialization::MetadataReader;

use super::filter::filter_by_names;
use super::range::SearchRange;
use super::roots::search_candidates;
use super::select::select_metadata_paths;
use super::{CancellationToken, ResourceQuery};

/// Discover installed resources matching `query`.
///
/// Fatal failures (a missing explicit path, an unparsable version argument)
/// surface here, before any candidate is examined. The returned iterator
/// decodes one metadata file per step: files that vanished since
/// enumeration are skipped silently, files that will not deserialize are
/// reported to `sink` and skipped, and every other decode problem is
/// reported per field while the record is still yielded. A query matching
/// nothing yields an empty sequence. Each call re-scans the filesystem;
/// nothing is cached across calls.
#[tracing::instrument(skip(runtime, reader, sink, cancel))]
pub fn find_resources<'a, R: Runtime>(
    runtime: &'a R,
    query: &ResourceQuery,
    reader: &'a dyn MetadataReader,
    sink: &'a mut dyn ErrorSink,
    cancel: &'a CancellationToken,
) -> Result<ResourceIter<'a, R>, DiscoveryError> {
    let range = match &query.version {
        Some(argument) => Some(SearchRange::parse(argument)?),
        None => None,
    };

    let candidates = search_candidates(runtime, query.path.as_deref(), cancel)?;
    let candidates = filter_by_names(candidates, query.names.as_deref());
    let metadata_files = select_metadata_paths(runtime, &candidates, range.as_ref());
    debug!("Selected {} metadata file(s)", metadata_files.len());

    Ok(ResourceIter {
        runtime,
        reader,
        sink,
        cancel,
        files: metadata_files.into_iter(),
    })
}

/// Pull-based producer of resource records; one file read and one decode
/// per step, no buffering beyond the current item.
pub struct ResourceIter<'a, R: Runtime> {
    runtime: &'a R,
    reader: &'a dyn MetadataReader,
    sink: &'a mut dyn ErrorSink,
    cancel: &'a CancellationToken,
    files: std::vec::IntoIter<PathBuf>,
}

impl<R: Runtime> Iterator for ResourceIter<'_, R> {
    type Item = ResourceInfo;

    fn next(&mut self) -> Option<ResourceInfo> {
        loop {
            if self.cancel.is_cancelled() {
                return None;
            }
            let path = self.files.next()?;
            debug!("Reading resource metadata from: '{}'", path.display());

            // The file was enumerated a moment ago; it may have been removed
            // since.
            if !self.runtime.is_file(&path) {
                continue;
            }
            let Ok(text) = self.runtime.read_to_string(&path) else {
                continue;
            };

            match self.reader.read_bag(&text) {
                Ok(bag) => return Some(decode_resource(&bag, self.sink)),
                Err(e) => {
                    self.sink.report(ParseIssue::parser(
                        "ErrorParsingMetadataFile",
                        format!("{}: {}", path.display(), e),
                    ));
                }
            }
        }
    }
}
