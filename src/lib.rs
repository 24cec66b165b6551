//! # JSON Resource Splitter
//!
//! A Rust library for splitting large three.js JSON mesh resources into
//! smaller, self-contained chunk files.
//!
//! ## Overview
//!
//! WebGL exports list their mesh resources in a manifest. Resources above a
//! byte limit are split by walking their `faces` stream and rebuilding, for
//! each chunk, compact local vertex/normal/color/morph-color arrays that only
//! hold what the chunk's faces reference. The manifest entry for the original
//! resource is then replaced by one entry per chunk.
//!
//! ## Quick Start
//!
//! ```ignore
//! use json_resource_splitter::{split_manifest, SplitterConfig};
//!
//! let config = SplitterConfig::default().with_size_limit(64 * 1024);
//! let report = split_manifest("export/webgl_meta.json", &config)?;
//! println!("wrote {}", report.manifest_path.display());
//! ```
//!
//! ## Splitting a Single Resource
//!
//! ```ignore
//! use json_resource_splitter::{load_resource, ResourceSplitter};
//!
//! let mesh = load_resource("export/body.json")?;
//! let chunks = ResourceSplitter::new(&mesh, "body.json").split(4)?;
//! for chunk in &chunks {
//!     println!("{}: {} face tokens", chunk.reference, chunk.resource.face_token_count());
//! }
//! ```

pub mod config;
pub mod error;
pub mod manifest;
pub mod resource;
pub mod splitter;
pub mod types;
pub mod workflow;

// Re-export main types for convenience
pub use config::SplitterConfig;
pub use error::{Result, SplitterError};
pub use manifest::{Manifest, ManifestEntry};
pub use resource::{MeshResource, MorphChannel};
pub use splitter::{chunk_reference, FinishedChunk, ResourceSplitter, SplitChunk};
pub use types::{ArrayKind, FaceKind};
pub use workflow::{scan_manifest, split_manifest, LargeResource, SplitReport};

/// Load a mesh resource from a file path.
pub fn load_resource<P: AsRef<std::path::Path>>(path: P) -> Result<MeshResource> {
    resource::loader::load_from_path(path)
}

/// Split a mesh resource given as JSON text, returning `(reference, json)`
/// pairs for every chunk (for WASM and other in-memory callers).
pub fn split_resource_str(
    json: &str,
    reference: &str,
    splits_required: usize,
) -> Result<Vec<(String, String)>> {
    let mesh = resource::loader::load_from_str(json)?;
    ResourceSplitter::new(&mesh, reference)
        .split(splits_required)?
        .into_iter()
        .map(|chunk| Ok((chunk.reference, resource::loader::to_string(&chunk.resource)?)))
        .collect()
}

/// Rewrite a manifest given as JSON text, replacing `reference` with `chunks`.
pub fn rewrite_manifest_str(json: &str, reference: &str, chunks: &[String]) -> Result<String> {
    let manifest: Manifest = json.parse()?;
    manifest.rewrite(reference, chunks).to_pretty_string()
}

#[cfg(feature = "wasm")]
pub mod wasm;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_resource_str() {
        let json = r#"{"vertices":[0,0,0,1,1,1],"normals":[0,0,1],"faces":[32,0,1,0,0,0,0,32,1,1,1,0,0,0]}"#;
        let chunks = split_resource_str(json, "m.json", 2).unwrap();

        assert_eq!(
            chunks,
            vec![
                (
                    "m_split_1.json".to_string(),
                    r#"{"vertices":[0,0,0,1,1,1],"normals":[0,0,1],"faces":[32,0,1,0,0,0,0]}"#
                        .to_string()
                ),
                (
                    "m_split_2.json".to_string(),
                    r#"{"vertices":[1,1,1],"normals":[0,0,1],"faces":[32,0,0,0,0,0,0]}"#.to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_rewrite_manifest_str() {
        let out = rewrite_manifest_str(
            r#"[{"URL":"m.json","Type":"Surfaces"}]"#,
            "m.json",
            &["m_split_1.json".to_string()],
        )
        .unwrap();
        let manifest: Manifest = out.parse().unwrap();
        assert_eq!(manifest.entries()[0].reference(), Some("m_split_1.json"));
        assert_eq!(manifest.entries()[0].0["Type"], "Surfaces");
    }
}
