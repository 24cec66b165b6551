//! Splitting one mesh resource into self-contained chunks.
//!
//! The face stream is walked once. Every record is rewritten against the
//! current chunk's local arrays, and chunks close as soon as their face
//! buffer reaches `floor(total_face_tokens / splits_required)` tokens. Each
//! resulting chunk only holds the vertices, normals, colors and morph colors
//! its own faces reference.

pub mod chunk;
pub mod face;
pub mod remap;

pub use chunk::{ChunkAccumulator, ChunkState, FinishedChunk};
pub use face::{FaceRecord, FaceStream};
pub use remap::{IndexRemapper, MorphRemapper};

use crate::error::{Result, SplitterError};
use crate::resource::{loader, MeshResource};
use std::path::Path;

/// A chunk ready to be written: its reference name and document.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitChunk {
    pub reference: String,
    pub resource: MeshResource,
}

/// Splits a single mesh resource.
pub struct ResourceSplitter<'a> {
    resource: &'a MeshResource,
    reference: &'a str,
}

impl<'a> ResourceSplitter<'a> {
    /// `reference` is the name the resource is known by in the manifest; chunk
    /// names are derived from it.
    pub fn new(resource: &'a MeshResource, reference: &'a str) -> Self {
        Self {
            resource,
            reference,
        }
    }

    /// Face-buffer token count at which a chunk is closed.
    pub fn chunk_token_budget(&self, splits_required: usize) -> Result<usize> {
        if splits_required == 0 {
            return Err(SplitterError::InvalidSplitCount(splits_required));
        }
        Ok(self.resource.face_token_count() / splits_required)
    }

    /// Split into finished chunks with local arrays only.
    ///
    /// Returns no chunks if the resource has no faces.
    pub fn split_chunks(&self, splits_required: usize) -> Result<Vec<FinishedChunk>> {
        let token_budget = self.chunk_token_budget(splits_required)?;

        let faces = match self.resource.faces.as_deref() {
            Some(faces) if !faces.is_empty() => faces,
            _ => {
                log::warn!("{} has no faces, nothing to split", self.reference);
                return Ok(Vec::new());
            }
        };

        let reference = self.reference;
        let mut accumulator = ChunkAccumulator::new(self.resource, token_budget, move |ordinal| {
            chunk_reference(reference, ordinal)
        });
        for record in FaceStream::new(faces) {
            accumulator.push(&record?)?;
        }
        Ok(accumulator.finish())
    }

    /// Split into complete chunk documents carrying the shared metadata and
    /// materials blocks.
    pub fn split(&self, splits_required: usize) -> Result<Vec<SplitChunk>> {
        let common = self.resource.common_items();
        let chunks = self
            .split_chunks(splits_required)?
            .into_iter()
            .map(|chunk| SplitChunk {
                reference: chunk.reference.clone(),
                resource: chunk.into_resource(&common),
            })
            .collect::<Vec<_>>();

        log::info!(
            "Split {} ({} face tokens) into {} chunks",
            self.reference,
            self.resource.face_token_count(),
            chunks.len()
        );
        Ok(chunks)
    }

    /// Split and write every chunk into `base_dir`, returning the chunk
    /// references in order.
    ///
    /// Nothing is written unless the whole resource splits successfully.
    pub fn split_to_dir<P: AsRef<Path>>(
        &self,
        base_dir: P,
        splits_required: usize,
    ) -> Result<Vec<String>> {
        let chunks = self.split(splits_required)?;
        write_chunks(base_dir, &chunks)
    }
}

/// Write chunk documents relative to `base_dir`.
pub fn write_chunks<P: AsRef<Path>>(base_dir: P, chunks: &[SplitChunk]) -> Result<Vec<String>> {
    let base_dir = base_dir.as_ref();
    let mut references = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let path = base_dir.join(&chunk.reference);
        loader::save_to_path(&chunk.resource, &path)?;
        references.push(chunk.reference.clone());
    }
    Ok(references)
}

/// Name of the `ordinal`-th (1-based) chunk of `reference`.
///
/// `_split_<ordinal>` goes before the extension of the last path component,
/// e.g. `mesh/body.json` becomes `mesh/body_split_2.json`. Leading dots of
/// the file name are not treated as an extension.
pub fn chunk_reference(reference: &str, ordinal: usize) -> String {
    let name_start = reference.rfind(['/', '\\']).map_or(0, |i| i + 1);
    let name = &reference[name_start..];
    let leading_dots = name.len() - name.trim_start_matches('.').len();

    let split_at = name[leading_dots..]
        .rfind('.')
        .map_or(reference.len(), |i| name_start + leading_dots + i);

    let (stem, extension) = reference.split_at(split_at);
    format!("{}_split_{}{}", stem, ordinal, extension)
}
