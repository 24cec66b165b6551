//! Face record shapes of the three.js JSON model format.
//!
//! Each face in the `faces` stream starts with a bit mask describing which
//! index groups follow it. Only the combinations listed in [`FaceKind`] are
//! understood; anything else is rejected by the parser.

use super::ArrayKind;

/// Mask bit: each corner carries a normal index.
pub const FACE_VERTEX_NORMAL: u32 = 32;
/// Mask bit: each corner carries a color index.
pub const FACE_VERTEX_COLOR: u32 = 128;

/// Indices per group (one per triangle corner).
pub const GROUP_SIZE: usize = 3;

/// Supported face record shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceKind {
    /// Triangle with per-corner vertex and normal indices (mask 32).
    VertexNormal,
    /// Triangle with per-corner vertex, normal and color indices (mask 160).
    VertexNormalColor,
}

impl FaceKind {
    /// Look up the face shape for a mask token.
    pub fn from_mask(mask: u32) -> Option<Self> {
        match mask {
            FACE_VERTEX_NORMAL => Some(FaceKind::VertexNormal),
            m if m == FACE_VERTEX_NORMAL | FACE_VERTEX_COLOR => Some(FaceKind::VertexNormalColor),
            _ => None,
        }
    }

    /// The mask token that introduces this record.
    pub fn mask(&self) -> u32 {
        match self {
            FaceKind::VertexNormal => FACE_VERTEX_NORMAL,
            FaceKind::VertexNormalColor => FACE_VERTEX_NORMAL | FACE_VERTEX_COLOR,
        }
    }

    /// Index groups following the mask, in stream order.
    pub fn groups(&self) -> &'static [ArrayKind] {
        match self {
            FaceKind::VertexNormal => &[ArrayKind::Vertex, ArrayKind::Normal],
            FaceKind::VertexNormalColor => {
                &[ArrayKind::Vertex, ArrayKind::Normal, ArrayKind::Color]
            }
        }
    }

    /// Total record length in tokens, mask included.
    pub fn record_len(&self) -> usize {
        1 + self.groups().len() * GROUP_SIZE
    }
}
