//! Splitting every oversized resource of a WebGL export.
//!
//! The manifest sits next to the resources it references. Each referenced
//! file bigger than the configured limit is split into
//! `ceil(size / limit)` chunks written alongside it, and a rewritten
//! manifest pointing at the chunks is saved next to the original manifest.

use crate::config::SplitterConfig;
use crate::error::Result;
use crate::manifest::Manifest;
use crate::resource::loader;
use crate::splitter::{write_chunks, ResourceSplitter};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// A manifest resource that exceeds the size limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LargeResource {
    /// Reference as written in the manifest.
    pub url: String,
    /// Directory the URL is relative to.
    pub base_dir: PathBuf,
    /// Resolved file path.
    pub path: PathBuf,
    /// File size in bytes.
    pub size: u64,
    /// Number of chunks to aim for.
    pub splits_required: usize,
}

/// Outcome of splitting one large resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceReport {
    pub resource: LargeResource,
    /// Chunk references, in order. Empty if the resource had no faces.
    pub chunks: Vec<String>,
}

/// Outcome of splitting a whole manifest.
#[derive(Debug, Clone)]
pub struct SplitReport {
    /// Path the rewritten manifest was written to.
    pub manifest_path: PathBuf,
    pub manifest: Manifest,
    pub resources: Vec<ResourceReport>,
}

impl SplitReport {
    /// Total number of chunk files written.
    pub fn chunk_count(&self) -> usize {
        self.resources.iter().map(|r| r.chunks.len()).sum()
    }
}

fn manifest_dir(manifest_path: &Path) -> &Path {
    manifest_path.parent().unwrap_or_else(|| Path::new(""))
}

/// Find the resources of a manifest that are larger than the size limit.
pub fn find_large_resources(
    manifest: &Manifest,
    base_dir: &Path,
    config: &SplitterConfig,
) -> Result<Vec<LargeResource>> {
    let mut seen = HashSet::new();
    let mut large = Vec::new();

    for url in manifest.entries().iter().filter_map(|e| e.reference()) {
        if !seen.insert(url) {
            continue;
        }
        let path = base_dir.join(url);
        let size = std::fs::metadata(&path)?.len();
        if size > config.size_limit {
            large.push(LargeResource {
                url: url.to_string(),
                splits_required: config.splits_required(size),
                base_dir: base_dir.to_path_buf(),
                path,
                size,
            });
        }
    }

    Ok(large)
}

/// Load a manifest and list its oversized resources.
pub fn scan_manifest<P: AsRef<Path>>(
    manifest_path: P,
    config: &SplitterConfig,
) -> Result<Vec<LargeResource>> {
    let manifest_path = manifest_path.as_ref();
    let manifest = Manifest::load(manifest_path)?;
    find_large_resources(&manifest, manifest_dir(manifest_path), config)
}

/// Split one large resource and write its chunks beside it.
pub fn split_large_resource(resource: &LargeResource) -> Result<Vec<String>> {
    log::info!(
        "Splitting {} ({} bytes) into {} parts",
        resource.url,
        resource.size,
        resource.splits_required
    );
    let mesh = loader::load_from_path(&resource.path)?;
    let chunks = ResourceSplitter::new(&mesh, &resource.url).split(resource.splits_required)?;
    // Chunk references keep the URL's directories, so they resolve against the
    // same base as the URL and land next to the original file.
    write_chunks(&resource.base_dir, &chunks)
}

fn split_all(resources: &[LargeResource], config: &SplitterConfig) -> Result<Vec<Vec<String>>> {
    #[cfg(feature = "parallel")]
    if config.parallel {
        use rayon::prelude::*;
        return resources.par_iter().map(split_large_resource).collect();
    }

    #[cfg(not(feature = "parallel"))]
    if config.parallel {
        log::debug!("Built without the parallel feature, splitting sequentially");
    }

    resources.iter().map(split_large_resource).collect()
}

/// Split every oversized resource of a manifest and write the rewritten
/// manifest next to it.
pub fn split_manifest<P: AsRef<Path>>(
    manifest_path: P,
    config: &SplitterConfig,
) -> Result<SplitReport> {
    let manifest_path = manifest_path.as_ref();
    let base_dir = manifest_dir(manifest_path);
    let manifest = Manifest::load(manifest_path)?;

    let large = find_large_resources(&manifest, base_dir, config)?;
    log::info!(
        "{} of {} manifest entries exceed {} bytes",
        large.len(),
        manifest.len(),
        config.size_limit
    );

    let chunk_lists = split_all(&large, config)?;

    let mut rewritten = manifest;
    let mut resources = Vec::with_capacity(large.len());
    for (resource, chunks) in large.into_iter().zip(chunk_lists) {
        if chunks.is_empty() {
            log::warn!("{} could not be split and is dropped from the manifest", resource.url);
        }
        rewritten = rewritten.rewrite(&resource.url, &chunks);
        resources.push(ResourceReport { resource, chunks });
    }

    let file_name = manifest_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let output_path = base_dir.join(format!("{}{}", config.manifest_prefix, file_name));
    rewritten.save(&output_path)?;
    log::info!("Wrote {}", output_path.display());

    if config.delete_originals {
        for report in resources.iter().filter(|r| !r.chunks.is_empty()) {
            std::fs::remove_file(&report.resource.path)?;
            log::info!("Deleted {}", report.resource.path.display());
        }
    }

    Ok(SplitReport {
        manifest_path: output_path,
        manifest: rewritten,
        resources,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SplitterError;
    use serde_json::json;
    use std::fs;

    fn big_mesh(faces: usize) -> serde_json::Value {
        let mut vertices = Vec::new();
        let mut tokens = Vec::new();
        for f in 0..faces {
            for corner in 0..3 {
                vertices.extend([f as f64, corner as f64, 0.5]);
            }
            let v = (f * 3) as u32;
            tokens.extend([32, v, v + 1, v + 2, 0, 0, 0]);
        }
        json!({
            "metadata": {"formatVersion": 3},
            "vertices": vertices,
            "normals": [0, 0, 1],
            "faces": tokens
        })
    }

    fn write_json(path: &Path, value: &serde_json::Value) {
        fs::write(path, serde_json::to_vec(value).unwrap()).unwrap();
    }

    fn export_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        write_json(&dir.path().join("big.json"), &big_mesh(40));
        write_json(&dir.path().join("small.json"), &json!({"faces": []}));
        write_json(&dir.path().join("nofaces.json"), &json!({"vertices": vec![0.25; 600]}));
        write_json(
            &dir.path().join("meta.json"),
            &json!([
                {"Type": "View", "URL": "small.json"},
                {"Type": "Surfaces", "URL": "big.json", "GroupName": "body"},
                {"Type": "Surfaces", "URL": "nofaces.json"},
                {"Type": "Note"}
            ]),
        );
        dir
    }

    #[test]
    fn test_scan_manifest() {
        let dir = export_dir();
        let config = SplitterConfig::default().with_size_limit(1000);
        let large = scan_manifest(dir.path().join("meta.json"), &config).unwrap();

        let urls: Vec<_> = large.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["big.json", "nofaces.json"]);
        for resource in &large {
            assert!(resource.size > 1000);
            assert_eq!(resource.splits_required, config.splits_required(resource.size));
        }
    }

    #[test]
    fn test_scan_missing_resource() {
        let dir = tempfile::tempdir().unwrap();
        write_json(&dir.path().join("meta.json"), &json!([{"URL": "absent.json"}]));
        let err = scan_manifest(dir.path().join("meta.json"), &SplitterConfig::default())
            .unwrap_err();
        assert!(matches!(err, SplitterError::Io(_)));
    }

    #[test]
    fn test_split_manifest() {
        let dir = export_dir();
        let config = SplitterConfig::default()
            .with_size_limit(1000)
            .with_parallel(false);
        let report = split_manifest(dir.path().join("meta.json"), &config).unwrap();

        assert_eq!(report.manifest_path, dir.path().join("split_meta.json"));
        let big = &report.resources[0];
        assert_eq!(big.chunks.len(), big.resource.splits_required);
        assert!(report.resources[1].chunks.is_empty());

        let written = Manifest::load(&report.manifest_path).unwrap();
        assert_eq!(written, report.manifest);
        let urls: Vec<_> = written.entries().iter().map(|e| e.reference()).collect();
        let mut expected = vec![Some("small.json")];
        expected.extend(big.chunks.iter().map(|c| Some(c.as_str())));
        expected.push(None);
        assert_eq!(urls, expected);

        let mut total_tokens = 0;
        for (i, chunk) in big.chunks.iter().enumerate() {
            assert_eq!(chunk, &format!("big_split_{}.json", i + 1));
            let mesh = loader::load_from_path(dir.path().join(chunk)).unwrap();
            assert_eq!(mesh.metadata, Some(json!({"formatVersion": 3})));
            assert_eq!(mesh.normals.as_ref().unwrap().len(), 3);
            total_tokens += mesh.face_token_count();
        }
        assert_eq!(total_tokens, 40 * 7);

        // Originals stay unless asked otherwise.
        assert!(dir.path().join("big.json").exists());
    }

    #[test]
    fn test_split_manifest_deletes_originals() {
        let dir = export_dir();
        let config = SplitterConfig::default()
            .with_size_limit(1000)
            .with_delete_originals(true)
            .with_manifest_prefix("out_");
        let report = split_manifest(dir.path().join("meta.json"), &config).unwrap();

        assert!(dir.path().join("out_meta.json").exists());
        assert!(!dir.path().join("big.json").exists());
        // Resources that produced no chunks are left on disk.
        assert!(dir.path().join("nofaces.json").exists());
        assert!(report.chunk_count() > 1);
    }

    #[test]
    fn test_split_resource_in_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("meshes")).unwrap();
        write_json(&dir.path().join("meshes/big.json"), &big_mesh(30));
        write_json(&dir.path().join("meta.json"), &json!([{"URL": "meshes/big.json"}]));

        let config = SplitterConfig::default().with_size_limit(1000);
        let report = split_manifest(dir.path().join("meta.json"), &config).unwrap();

        let chunks = &report.resources[0].chunks;
        assert_eq!(chunks[0], "meshes/big_split_1.json");
        for chunk in chunks {
            assert!(dir.path().join(chunk).exists());
        }
    }

    #[test]
    fn test_bad_face_mask_leaves_no_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut mesh = big_mesh(40);
        mesh["faces"][7] = json!(5);
        write_json(&dir.path().join("big.json"), &mesh);
        write_json(&dir.path().join("meta.json"), &json!([{"URL": "big.json"}]));

        let config = SplitterConfig::default().with_size_limit(1000);
        let err = split_manifest(dir.path().join("meta.json"), &config).unwrap_err();
        assert!(matches!(err, SplitterError::UnsupportedFaceMask { mask: 5, offset: 7 }));
        assert!(!dir.path().join("big_split_1.json").exists());
        assert!(!dir.path().join("split_meta.json").exists());
    }
}
