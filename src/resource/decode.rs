//! Decodes one deserialized metadata bag into a [`ResourceInfo`].
//!
//! Every field is decoded independently through a field-decode table: a
//! failing entry reports one issue to the error sink, leaves its field at
//! the default value, and decoding continues with the next entry. A
//! malformed field never aborts the record.

use chrono::{DateTime, NaiveDateTime, Utc};
use indexmap::IndexMap;
use url::Url;

use crate::error::{ErrorSink, ParseIssue};
use crate::resource::info::{DependencyConstraint, ResourceInfo, ResourceType};
use crate::resource::version::PsVersion;
use crate::serialization::{PropertyBag, RawValue};

type FieldResult = Result<(), String>;
type DecodeFn = fn(&PropertyBag, &mut ResourceInfo) -> FieldResult;

/// Reconstruct a resource descriptor from a metadata bag, reporting each
/// field that fails to decode and defaulting it.
pub fn decode_resource(bag: &PropertyBag, sink: &mut dyn ErrorSink) -> ResourceInfo {
    // Entries run in the order the fields appear in a metadata record.
    let fields: &[(&'static str, DecodeFn)] = &[
        ("ErrorParsingName", |bag, info| {
            set_string(bag, "Name", &mut info.name)
        }),
        ("ErrorParsingVersion", decode_version),
        ("ErrorParsingType", decode_type),
        ("ErrorParsingDescription", |bag, info| {
            set_string(bag, "Description", &mut info.description)
        }),
        ("ErrorParsingAuthor", |bag, info| {
            set_string(bag, "Author", &mut info.author)
        }),
        ("ErrorParsingCompanyName", |bag, info| {
            set_string(bag, "CompanyName", &mut info.company_name)
        }),
        ("ErrorParsingCopyright", |bag, info| {
            set_string(bag, "Copyright", &mut info.copyright)
        }),
        ("ErrorParsingPublishedDate", |bag, info| {
            set_date(bag, "PublishedDate", &mut info.published_date)
        }),
        ("ErrorParsingInstalledDate", |bag, info| {
            set_date(bag, "InstalledDate", &mut info.installed_date)
        }),
        ("ErrorParsingUpdatedDate", |bag, info| {
            set_date(bag, "UpdatedDate", &mut info.updated_date)
        }),
        ("ErrorParsingLicenseUri", |bag, info| {
            set_uri(bag, "LicenseUri", &mut info.license_uri)
        }),
        ("ErrorParsingProjectUri", |bag, info| {
            set_uri(bag, "ProjectUri", &mut info.project_uri)
        }),
        ("ErrorParsingIconUri", |bag, info| {
            set_uri(bag, "IconUri", &mut info.icon_uri)
        }),
        ("ErrorParsingPowerShellGetFormatVersion", decode_format_version),
        ("ErrorParsingReleaseNotes", |bag, info| {
            set_string(bag, "ReleaseNotes", &mut info.release_notes)
        }),
        ("ErrorParsingRepository", |bag, info| {
            set_string(bag, "Repository", &mut info.repository)
        }),
        ("ErrorParsingIsPrerelease", decode_is_prerelease),
        ("ErrorParsingTags", decode_tags),
        ("ErrorParsingDependencies", decode_dependencies),
        ("ErrorParsingIncludes", decode_includes),
        ("ErrorParsingAdditionalMetadata", |bag, info| {
            set_string(bag, "AdditionalMetadata", &mut info.additional_metadata)
        }),
        ("ErrorParsingInstalledLocation", |bag, info| {
            set_string(bag, "InstalledLocation", &mut info.installed_location)
        }),
    ];

    let mut info = ResourceInfo::default();
    for &(error_id, decode) in fields {
        if let Err(reason) = decode(bag, &mut info) {
            sink.report(ParseIssue::parser(error_id, reason));
        }
    }
    info
}

/// Plain string field: absent means empty, anything non-string is an error.
fn set_string(bag: &PropertyBag, key: &str, slot: &mut String) -> FieldResult {
    match bag.get(key) {
        None => Ok(()),
        Some(RawValue::String(s)) => {
            *slot = s.clone();
            Ok(())
        }
        Some(other) => Err(format!("expected a string for '{key}', got {}", other.kind())),
    }
}

/// The record version must be present and parse as a dotted version.
fn decode_version(bag: &PropertyBag, info: &mut ResourceInfo) -> FieldResult {
    let value = bag
        .get("Version")
        .ok_or_else(|| "record has no 'Version' property".to_string())?;
    let text = value
        .as_str()
        .ok_or_else(|| format!("expected a string for 'Version', got {}", value.kind()))?;
    let version = text
        .parse::<PsVersion>()
        .map_err(|e| format!("'{text}': {e}"))?;
    info.version = Some(version);
    Ok(())
}

/// Format version is optional, but must parse when present.
fn decode_format_version(bag: &PropertyBag, info: &mut ResourceInfo) -> FieldResult {
    let Some(value) = bag.get("PowerShellGetFormatVersion") else {
        return Ok(());
    };
    let text = value.as_str().ok_or_else(|| {
        format!(
            "expected a string for 'PowerShellGetFormatVersion', got {}",
            value.kind()
        )
    })?;
    let version = text
        .parse::<PsVersion>()
        .map_err(|e| format!("'{text}': {e}"))?;
    info.format_version = Some(version);
    Ok(())
}

/// "Module" (any casing) is a module; everything else, including a missing
/// or non-string value, is a script.
fn decode_type(bag: &PropertyBag, info: &mut ResourceInfo) -> FieldResult {
    info.resource_type = match bag.get("Type").and_then(RawValue::as_str) {
        Some(s) if s.eq_ignore_ascii_case("Module") => ResourceType::Module,
        _ => ResourceType::Script,
    };
    Ok(())
}

fn set_date(bag: &PropertyBag, key: &str, slot: &mut Option<DateTime<Utc>>) -> FieldResult {
    match bag.get(key) {
        None => Ok(()),
        Some(value) => {
            *slot = Some(date_value(value).map_err(|e| format!("{key}: {e}"))?);
            Ok(())
        }
    }
}

/// A serialized timestamp may be nested one level: the raw value can be a
/// bag whose `DateTime` (or `Date`) property holds the actual string.
fn date_value(value: &RawValue) -> Result<DateTime<Utc>, String> {
    if let Some(bag) = value.as_bag() {
        let nested = bag
            .get("DateTime")
            .or_else(|| bag.get("Date"))
            .ok_or_else(|| "nested value has no 'DateTime' or 'Date' property".to_string())?;
        let text = nested
            .as_str()
            .ok_or_else(|| format!("nested timestamp must be a string, got {}", nested.kind()))?;
        return parse_timestamp(text);
    }
    let text = value
        .as_str()
        .ok_or_else(|| format!("expected a string or nested bag, got {}", value.kind()))?;
    parse_timestamp(text)
}

/// Accepts RFC 3339, or a naive `YYYY-MM-DDTHH:MM:SS[.fff]` taken as UTC.
fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    Err(format!("'{text}' is not a recognized timestamp"))
}

fn set_uri(bag: &PropertyBag, key: &str, slot: &mut Option<Url>) -> FieldResult {
    match bag.get(key) {
        None => Ok(()),
        Some(value) => {
            let text = value
                .as_str()
                .ok_or_else(|| format!("expected a string for '{key}', got {}", value.kind()))?;
            *slot = Some(Url::parse(text).map_err(|e| format!("'{text}': {e}"))?);
            Ok(())
        }
    }
}

/// "true"/"false" in any casing; anything else, including absence, is false.
fn decode_is_prerelease(bag: &PropertyBag, info: &mut ResourceInfo) -> FieldResult {
    info.is_prerelease = bag
        .get("IsPrerelease")
        .and_then(RawValue::as_str)
        .map(str::trim)
        .is_some_and(|s| s.eq_ignore_ascii_case("true"));
    Ok(())
}

/// Tags arrive as one whitespace-separated string.
fn decode_tags(bag: &PropertyBag, info: &mut ResourceInfo) -> FieldResult {
    match bag.get("Tags") {
        None => Ok(()),
        Some(value) => {
            let text = value
                .as_str()
                .ok_or_else(|| format!("expected a string for 'Tags', got {}", value.kind()))?;
            info.tags = text.split_whitespace().map(str::to_string).collect();
            Ok(())
        }
    }
}

/// Dependencies decode as one unit: any malformed entry fails the whole
/// field, leaving the mapping empty.
fn decode_dependencies(bag: &PropertyBag, info: &mut ResourceInfo) -> FieldResult {
    let value = bag
        .get("Dependencies")
        .ok_or_else(|| "record has no 'Dependencies' property".to_string())?;
    let entries = value
        .as_list()
        .ok_or_else(|| format!("expected a list for 'Dependencies', got {}", value.kind()))?;

    let mut dependencies = IndexMap::new();
    for entry in entries {
        let dep = entry
            .as_bag()
            .ok_or_else(|| format!("dependency entry must be a bag, got {}", entry.kind()))?;
        let name = dep
            .get("Name")
            .and_then(RawValue::as_str)
            .ok_or_else(|| "dependency entry has no 'Name'".to_string())?;

        // Minimum, then Required, then Maximum; each present key overwrites
        // the previous, so the last one checked wins.
        let mut constraint = DependencyConstraint::Unknown;
        if let Some(v) = dep.get("MinimumVersion") {
            constraint = DependencyConstraint::Minimum(dependency_version(v));
        }
        if let Some(v) = dep.get("RequiredVersion") {
            constraint = DependencyConstraint::Required(dependency_version(v));
        }
        if let Some(v) = dep.get("MaximumVersion") {
            constraint = DependencyConstraint::Maximum(dependency_version(v));
        }
        dependencies.insert(name.to_string(), constraint);
    }
    info.dependencies = dependencies;
    Ok(())
}

/// A dependency's version string that fails to parse leaves the constraint
/// tagged but without a carried version.
fn dependency_version(value: &RawValue) -> Option<PsVersion> {
    value.as_str().and_then(|s| s.parse().ok())
}

/// The Includes bag decodes all-or-nothing: all four lists must be present
/// and well-formed, or the group fails as one field.
fn decode_includes(bag: &PropertyBag, info: &mut ResourceInfo) -> FieldResult {
    let value = bag
        .get("Includes")
        .ok_or_else(|| "record has no 'Includes' property".to_string())?;
    let includes = value
        .as_bag()
        .ok_or_else(|| format!("expected a bag for 'Includes', got {}", value.kind()))?;

    let commands = string_list(includes, "Command")?;
    let cmdlets = string_list(includes, "Cmdlet")?;
    let dsc_resources = string_list(includes, "DscResource")?;
    let functions = string_list(includes, "Function")?;

    info.commands = commands;
    info.cmdlets = cmdlets;
    info.dsc_resources = dsc_resources;
    info.functions = functions;
    Ok(())
}

fn string_list(bag: &PropertyBag, key: &str) -> Result<Vec<String>, String> {
    let value = bag
        .get(key)
        .ok_or_else(|| format!("missing '{key}' list"))?;
    let items = value
        .as_list()
        .ok_or_else(|| format!("expected a list for '{key}', got {}", value.kind()))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| format!("'{key}' entries must be strings, got {}", item.kind()))
        })
        .collect()
}
