//! WebGL export manifests.
//!
//! A manifest is a JSON list of records. Records that point at a resource
//! file carry its relative path in the `URL` field; every other field is
//! passed through untouched.

use crate::error::{Result, SplitterError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use std::str::FromStr;

/// Field holding a record's resource reference.
pub const REFERENCE_FIELD: &str = "URL";

/// One manifest record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManifestEntry(pub Map<String, Value>);

impl ManifestEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The resource reference, if the record has a string `URL`.
    pub fn reference(&self) -> Option<&str> {
        self.0.get(REFERENCE_FIELD).and_then(Value::as_str)
    }

    /// Copy of this record pointing at another resource.
    pub fn with_reference(&self, reference: &str) -> Self {
        let mut entry = self.clone();
        entry
            .0
            .insert(REFERENCE_FIELD.to_string(), Value::String(reference.to_string()));
        entry
    }
}

/// An ordered list of manifest records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest(pub Vec<ManifestEntry>);

impl Manifest {
    pub fn new(entries: Vec<ManifestEntry>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Replace every record referencing `reference` with one copy per chunk,
    /// in chunk order. With no chunks the record is removed. Other records
    /// keep their relative order.
    pub fn rewrite(&self, reference: &str, chunks: &[String]) -> Manifest {
        let mut entries = Vec::with_capacity(self.0.len() + chunks.len());
        for entry in &self.0 {
            if entry.reference() == Some(reference) {
                entries.extend(chunks.iter().map(|chunk| entry.with_reference(chunk)));
            } else {
                entries.push(entry.clone());
            }
        }
        Manifest(entries)
    }

    /// Parse a manifest from a JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::Object(map) => Ok(ManifestEntry(map)),
                    other => Err(SplitterError::InvalidManifest(format!(
                        "entry {} is not a record: {}",
                        i, other
                    ))),
                })
                .collect::<Result<Vec<_>>>()
                .map(Manifest),
            other => Err(SplitterError::InvalidManifest(format!(
                "expected a list of records, found {}",
                json_type(&other)
            ))),
        }
    }

    /// Load a manifest file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        text.parse()
    }

    /// Render as JSON indented by four spaces.
    pub fn to_pretty_string(&self) -> Result<String> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)?;
        // serde_json only ever emits UTF-8.
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Write the manifest to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_pretty_string()?)?;
        Ok(())
    }
}

impl FromStr for Manifest {
    type Err = SplitterError;

    fn from_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a record",
    }
}
