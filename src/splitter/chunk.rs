//! Chunk accumulation.
//!
//! A [`ChunkAccumulator`] feeds face records into the current [`ChunkState`]
//! and, once the face buffer reaches the token budget, moves the state out as
//! a [`FinishedChunk`] and starts a fresh one.

use super::face::FaceRecord;
use super::remap::{IndexRemapper, MorphRemapper};
use crate::error::Result;
use crate::resource::{MeshResource, MorphChannel, Scalar};
use crate::types::ArrayKind;

/// Mutable state of the chunk being built.
#[derive(Debug, Clone)]
pub struct ChunkState {
    pub vertices: IndexRemapper,
    pub normals: IndexRemapper,
    pub colors: IndexRemapper,
    pub morph_colors: MorphRemapper,
    pub faces: Vec<u32>,
}

impl Default for ChunkState {
    fn default() -> Self {
        Self {
            vertices: IndexRemapper::new(ArrayKind::Vertex),
            normals: IndexRemapper::new(ArrayKind::Normal),
            colors: IndexRemapper::new(ArrayKind::Color),
            morph_colors: MorphRemapper::new(),
            faces: Vec::new(),
        }
    }
}

impl ChunkState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no face has been added yet.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    fn remapper(&mut self, kind: ArrayKind) -> &mut IndexRemapper {
        match kind {
            ArrayKind::Vertex => &mut self.vertices,
            ArrayKind::Normal => &mut self.normals,
            ArrayKind::Color | ArrayKind::MorphColor => &mut self.colors,
        }
    }

    /// Append one face record, rewriting its indices to local ones.
    ///
    /// On error the state may hold a partially remapped record; the caller
    /// abandons the whole split in that case.
    pub fn push_record(&mut self, source: &MeshResource, record: &FaceRecord<'_>) -> Result<()> {
        self.faces.push(record.kind.mask());

        for (kind, indices) in record.groups() {
            let array = source.source(kind);
            for &global in indices {
                let local = self.remapper(kind).map(array, global)?;
                self.faces.push(local);
            }
        }

        let channels = source.morph_channels();
        if !channels.is_empty() {
            if let Some(indices) = record.color_indices() {
                for &global in indices {
                    self.morph_colors.map(channels, global)?;
                }
            }
        }

        Ok(())
    }

    /// Freeze the state into a finished chunk.
    pub fn finish(self, ordinal: usize, reference: String) -> FinishedChunk {
        FinishedChunk {
            ordinal,
            reference,
            vertices: self.vertices.into_values(),
            normals: self.normals.into_values(),
            colors: self.colors.into_values(),
            morph_colors: self.morph_colors.into_channels(),
            faces: self.faces,
        }
    }
}

/// A completed chunk with its local arrays.
///
/// Arrays that received no data are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct FinishedChunk {
    /// 1-based position of the chunk in the split.
    pub ordinal: usize,
    /// Reference name the chunk is written under.
    pub reference: String,
    pub vertices: Option<Vec<Scalar>>,
    pub normals: Option<Vec<Scalar>>,
    pub colors: Option<Vec<Scalar>>,
    pub morph_colors: Option<Vec<MorphChannel>>,
    pub faces: Vec<u32>,
}

impl FinishedChunk {
    /// Build the chunk's resource document on top of the shared blocks.
    pub fn into_resource(self, common: &MeshResource) -> MeshResource {
        MeshResource {
            vertices: self.vertices,
            normals: self.normals,
            colors: self.colors,
            morph_colors: self.morph_colors,
            faces: Some(self.faces),
            ..common.clone()
        }
    }
}

/// Builds consecutive chunks out of a stream of face records.
pub struct ChunkAccumulator<'r> {
    resource: &'r MeshResource,
    token_budget: usize,
    naming: Box<dyn Fn(usize) -> String + 'r>,
    state: ChunkState,
    finished: Vec<FinishedChunk>,
}

impl<'r> ChunkAccumulator<'r> {
    /// Create an accumulator that closes a chunk once its face buffer holds
    /// at least `token_budget` tokens. `naming` maps a 1-based ordinal to the
    /// chunk's reference name.
    pub fn new(
        resource: &'r MeshResource,
        token_budget: usize,
        naming: impl Fn(usize) -> String + 'r,
    ) -> Self {
        Self {
            resource,
            token_budget,
            naming: Box::new(naming),
            state: ChunkState::new(),
            finished: Vec::new(),
        }
    }

    /// Add a face record, closing the chunk if it is now full.
    pub fn push(&mut self, record: &FaceRecord<'_>) -> Result<()> {
        self.state.push_record(self.resource, record)?;
        if self.state.faces.len() >= self.token_budget {
            self.flush();
        }
        Ok(())
    }

    /// The chunk currently being built.
    pub fn current(&self) -> &ChunkState {
        &self.state
    }

    /// Chunks closed so far.
    pub fn finished(&self) -> &[FinishedChunk] {
        &self.finished
    }

    fn flush(&mut self) {
        let state = std::mem::take(&mut self.state);
        let ordinal = self.finished.len() + 1;
        let reference = (self.naming)(ordinal);
        log::debug!(
            "Closing chunk {} ({} face tokens, {} vertices)",
            reference,
            state.faces.len(),
            state.vertices.len()
        );
        self.finished.push(state.finish(ordinal, reference));
    }

    /// Close any non-empty remainder and return every chunk in order.
    pub fn finish(mut self) -> Vec<FinishedChunk> {
        if !self.state.is_empty() {
            self.flush();
        }
        self.finished
    }
}
