//! Shared types used throughout the library.

mod face_kind;

pub use face_kind::{FaceKind, FACE_VERTEX_COLOR, FACE_VERTEX_NORMAL, GROUP_SIZE};

use std::fmt;

/// The per-element arrays of a mesh resource that faces index into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayKind {
    Vertex,
    Normal,
    Color,
    /// A color index resolved through every morph channel at once.
    MorphColor,
}

impl ArrayKind {
    /// Number of scalars per element.
    pub fn stride(&self) -> usize {
        match self {
            ArrayKind::Vertex | ArrayKind::Normal => 3,
            ArrayKind::Color | ArrayKind::MorphColor => 1,
        }
    }

    /// Name of the array in the resource document.
    pub fn key(&self) -> &'static str {
        match self {
            ArrayKind::Vertex => "vertices",
            ArrayKind::Normal => "normals",
            ArrayKind::Color => "colors",
            ArrayKind::MorphColor => "morphColors",
        }
    }
}

impl fmt::Display for ArrayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArrayKind::Vertex => "vertex",
            ArrayKind::Normal => "normal",
            ArrayKind::Color => "color",
            ArrayKind::MorphColor => "morph color",
        };
        f.write_str(name)
    }
}
