use anyhow::Result;
use log::debug;
use std::path::PathBuf;

use crate::discovery::{CancellationToken, ResourceQuery, find_resources};
use crate::error::LogSink;
use crate::resource::{ResourceInfo, ResourceType};
use crate::runtime::Runtime;
use crate::serialization::JsonMetadataReader;

/// List installed resources matching the given names and version argument.
#[tracing::instrument(skip(runtime, names, version, path))]
pub fn list<R: Runtime>(
    runtime: R,
    names: Vec<String>,
    version: Option<String>,
    path: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let query = ResourceQuery {
        names: if names.is_empty() { None } else { Some(names) },
        version,
        path,
    };
    debug!("Listing resources for query {:?}", query);

    let reader = JsonMetadataReader;
    let mut sink = LogSink;
    let cancel = CancellationToken::new();

    let resources: Vec<ResourceInfo> =
        find_resources(&runtime, &query, &reader, &mut sink, &cancel)?.collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&resources)?);
        return Ok(());
    }

    if resources.is_empty() {
        println!("No matching resources found.");
        return Ok(());
    }

    debug!("Found {} resource(s)", resources.len());
    for info in &resources {
        let version = info
            .version
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "(unknown)".to_string());
        let kind = match info.resource_type {
            ResourceType::Module => "Module",
            ResourceType::Script => "Script",
        };
        println!("{:<32} {:<16} {:<8} {}", info.name, version, kind, info.repository);
    }

    Ok(())
}
