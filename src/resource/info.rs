//! The reconstructed record for one installed resource.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use url::Url;

use super::version::PsVersion;

/// Kind of an installed resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ResourceType {
    Module,
    /// Anything that is not explicitly a module, including records with a
    /// missing or unrecognized kind.
    #[default]
    Script,
}

/// Version constraint attached to one dependency entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum DependencyConstraint {
    #[default]
    Unknown,
    Minimum(Option<PsVersion>),
    Required(Option<PsVersion>),
    Maximum(Option<PsVersion>),
}

/// Fully-typed descriptor for one discovered resource.
///
/// Constructed fresh per metadata file, immutable once yielded. Fields that
/// fail to decode stay at their defaults (see the decoder for the per-field
/// rules).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceInfo {
    pub name: String,
    pub version: Option<PsVersion>,
    #[serde(rename = "Type")]
    pub resource_type: ResourceType,
    pub description: String,
    pub author: String,
    pub company_name: String,
    pub copyright: String,
    pub published_date: Option<DateTime<Utc>>,
    pub installed_date: Option<DateTime<Utc>>,
    pub updated_date: Option<DateTime<Utc>>,
    pub license_uri: Option<Url>,
    pub project_uri: Option<Url>,
    pub icon_uri: Option<Url>,
    pub format_version: Option<PsVersion>,
    pub release_notes: String,
    pub repository: String,
    pub is_prerelease: bool,
    pub tags: Vec<String>,
    pub dependencies: IndexMap<String, DependencyConstraint>,
    pub additional_metadata: String,
    pub commands: Vec<String>,
    pub cmdlets: Vec<String>,
    pub dsc_resources: Vec<String>,
    pub functions: Vec<String>,
    pub installed_location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let info = ResourceInfo::default();
        assert_eq!(info.resource_type, ResourceType::Script);
        assert!(info.version.is_none());
        assert!(info.tags.is_empty());
        assert!(info.dependencies.is_empty());
        assert!(!info.is_prerelease);
    }

    #[test]
    fn test_serialized_field_names() {
        let info = ResourceInfo {
            name: "PkgA".into(),
            version: Some("1.2.3".parse().unwrap()),
            resource_type: ResourceType::Module,
            ..Default::default()
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["Name"], "PkgA");
        assert_eq!(json["Version"], "1.2.3");
        assert_eq!(json["Type"], "Module");
        assert!(json.get("CompanyName").is_some());
        assert!(json.get("DscResources").is_some());
    }
}
