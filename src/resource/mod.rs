//! Mesh resource documents.
//!
//! A mesh resource is a three.js JSON model: flat scalar arrays for vertices,
//! normals and colors, optional morph color channels, and a mask-tagged
//! `faces` token stream indexing into those arrays.

pub mod loader;

use crate::types::ArrayKind;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A scalar from one of the resource arrays.
///
/// Kept as a JSON number so integer colors stay integers when written back.
pub type Scalar = Number;

/// A parsed mesh resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshResource {
    /// Opaque metadata block, copied into every chunk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    /// Opaque materials block, copied into every chunk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials: Option<Value>,

    /// Vertex positions, 3 scalars per vertex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertices: Option<Vec<Scalar>>,

    /// Vertex normals, 3 scalars per normal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normals: Option<Vec<Scalar>>,

    /// Colors, 1 scalar per color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<Scalar>>,

    /// Morph color channels, indexed like `colors`.
    #[serde(
        default,
        rename = "morphColors",
        skip_serializing_if = "Option::is_none"
    )]
    pub morph_colors: Option<Vec<MorphChannel>>,

    /// Face token stream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faces: Option<Vec<u32>>,
}

/// A named morph target holding one value per color index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MorphChannel {
    pub name: String,
    #[serde(default)]
    pub colors: Vec<Scalar>,
}

impl MorphChannel {
    /// Create an empty channel with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            colors: Vec::new(),
        }
    }
}

impl MeshResource {
    pub fn new() -> Self {
        Self::default()
    }

    /// The flat source array for an element kind, or an empty slice if absent.
    ///
    /// Morph colors are per-channel and have no single flat array.
    pub fn source(&self, kind: ArrayKind) -> &[Scalar] {
        let array = match kind {
            ArrayKind::Vertex => &self.vertices,
            ArrayKind::Normal => &self.normals,
            ArrayKind::Color => &self.colors,
            ArrayKind::MorphColor => return &[],
        };
        array.as_deref().unwrap_or(&[])
    }

    /// Morph channels, or an empty slice if absent.
    pub fn morph_channels(&self) -> &[MorphChannel] {
        self.morph_colors.as_deref().unwrap_or(&[])
    }

    /// Number of face tokens (0 if the resource has no face stream).
    pub fn face_token_count(&self) -> usize {
        self.faces.as_ref().map_or(0, Vec::len)
    }

    /// Whether there is anything to split.
    pub fn has_faces(&self) -> bool {
        self.face_token_count() > 0
    }

    /// A resource holding only the blocks shared by every chunk.
    pub fn common_items(&self) -> Self {
        Self {
            metadata: self.metadata.clone(),
            materials: self.materials.clone(),
            ..Self::default()
        }
    }
}
