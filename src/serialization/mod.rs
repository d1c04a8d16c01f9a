//! Property-bag boundary for metadata files.
//!
//! A metadata file deserializes into a [`PropertyBag`]: an ordered mapping
//! from field name to a loosely-typed [`RawValue`] (string, list, or nested
//! bag). The [`MetadataReader`] trait is the only place a concrete on-disk
//! encoding is known; the decoder consumes bags and never looks at bytes.
//!
//! [`JsonMetadataReader`] is the built-in reader for the JSON rendering of a
//! serialized bag: objects become bags, arrays become lists, scalars become
//! strings, and null-valued keys are treated as absent.

use indexmap::IndexMap;
use thiserror::Error;

/// A metadata file exists but its contents do not deserialize.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct MetadataFormatError {
    message: String,
}

impl MetadataFormatError {
    pub fn new(message: impl Into<String>) -> Self {
        MetadataFormatError {
            message: message.into(),
        }
    }
}

/// One loosely-typed value inside a deserialized metadata record.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    String(String),
    List(Vec<RawValue>),
    Bag(PropertyBag),
}

impl RawValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[RawValue]> {
        match self {
            RawValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_bag(&self) -> Option<&PropertyBag> {
        match self {
            RawValue::Bag(bag) => Some(bag),
            _ => None,
        }
    }

    /// Variant name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            RawValue::String(_) => "string",
            RawValue::List(_) => "list",
            RawValue::Bag(_) => "bag",
        }
    }
}

/// Ordered mapping from field name to raw value; read-only after
/// deserialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyBag {
    entries: IndexMap<String, RawValue>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: RawValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Deserializes one metadata file's text into a property bag.
pub trait MetadataReader {
    fn read_bag(&self, text: &str) -> Result<PropertyBag, MetadataFormatError>;
}

/// Reader for the JSON rendering of a serialized metadata bag.
#[derive(Debug, Default)]
pub struct JsonMetadataReader;

impl MetadataReader for JsonMetadataReader {
    fn read_bag(&self, text: &str) -> Result<PropertyBag, MetadataFormatError> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| MetadataFormatError::new(format!("not valid JSON: {e}")))?;
        match value {
            serde_json::Value::Object(map) => Ok(bag_from_object(map)),
            other => Err(MetadataFormatError::new(format!(
                "metadata root must be an object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn bag_from_object(map: serde_json::Map<String, serde_json::Value>) -> PropertyBag {
    let mut bag = PropertyBag::new();
    for (key, value) in map {
        if let Some(raw) = raw_from_json(value) {
            bag.insert(key, raw);
        }
    }
    bag
}

fn raw_from_json(value: serde_json::Value) -> Option<RawValue> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(b) => Some(RawValue::String(b.to_string())),
        serde_json::Value::Number(n) => Some(RawValue::String(n.to_string())),
        serde_json::Value::String(s) => Some(RawValue::String(s)),
        serde_json::Value::Array(items) => Some(RawValue::List(
            items
                .into_iter()
                .filter_map(raw_from_json)
                .collect(),
        )),
        serde_json::Value::Object(map) => Some(RawValue::Bag(bag_from_object(map))),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bag_preserves_insertion_order() {
        let mut bag = PropertyBag::new();
        bag.insert("Zeta", RawValue::String("1".into()));
        bag.insert("Alpha", RawValue::String("2".into()));

        let keys: Vec<&str> = bag.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Zeta", "Alpha"]);
        assert!(bag.has("Alpha"));
        assert!(!bag.has("alpha"));
    }

    #[test]
    fn test_json_reader_nested_shapes() {
        let reader = JsonMetadataReader;
        let bag = reader
            .read_bag(
                r#"{
                    "Name": "PkgA",
                    "IsPrerelease": false,
                    "Count": 3,
                    "Tags": ["a", "b"],
                    "Includes": {"Command": ["Get-Thing"]}
                }"#,
            )
            .unwrap();

        assert_eq!(bag.get("Name").unwrap().as_str(), Some("PkgA"));
        assert_eq!(bag.get("IsPrerelease").unwrap().as_str(), Some("false"));
        assert_eq!(bag.get("Count").unwrap().as_str(), Some("3"));

        let tags = bag.get("Tags").unwrap().as_list().unwrap();
        assert_eq!(tags.len(), 2);

        let includes = bag.get("Includes").unwrap().as_bag().unwrap();
        let commands = includes.get("Command").unwrap().as_list().unwrap();
        assert_eq!(commands[0].as_str(), Some("Get-Thing"));
    }

    #[test]
    fn test_json_reader_null_keys_are_absent() {
        let reader = JsonMetadataReader;
        let bag = reader.read_bag(r#"{"Name": null, "Author": "a"}"#).unwrap();
        assert!(!bag.has("Name"));
        assert!(bag.has("Author"));
    }

    #[test]
    fn test_json_reader_rejects_malformed_input() {
        let reader = JsonMetadataReader;
        assert!(reader.read_bag("not json at all").is_err());
        assert!(reader.read_bag(r#"["top-level", "array"]"#).is_err());
    }

    #[test]
    fn test_raw_value_accessors() {
        let value = RawValue::String("x".into());
        assert_eq!(value.kind(), "string");
        assert!(value.as_list().is_none());
        assert!(value.as_bag().is_none());

        let value = RawValue::List(vec![]);
        assert_eq!(value.kind(), "list");
        assert!(value.as_str().is_none());
    }
}
