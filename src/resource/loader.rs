//! Reading and writing mesh resource documents.

use super::MeshResource;
use crate::error::Result;
use std::path::Path;

/// Load a mesh resource from a file path.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<MeshResource> {
    let data = std::fs::read(path.as_ref())?;
    load_from_bytes(&data)
}

/// Load a mesh resource from JSON bytes.
pub fn load_from_bytes(data: &[u8]) -> Result<MeshResource> {
    Ok(serde_json::from_slice(data)?)
}

/// Load a mesh resource from a JSON string.
pub fn load_from_str(text: &str) -> Result<MeshResource> {
    Ok(serde_json::from_str(text)?)
}

/// Serialize a mesh resource to compact JSON.
pub fn to_string(resource: &MeshResource) -> Result<String> {
    Ok(serde_json::to_string(resource)?)
}

/// Write a mesh resource to a file as compact JSON.
pub fn save_to_path<P: AsRef<Path>>(resource: &MeshResource, path: P) -> Result<()> {
    let data = serde_json::to_vec(resource)?;
    std::fs::write(path.as_ref(), data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SplitterError;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mesh.json");

        let resource = load_from_str(r#"{"vertices":[0,0,0],"faces":[32,0,0,0,0,0,0]}"#).unwrap();
        save_to_path(&resource, &path).unwrap();

        let loaded = load_from_path(&path).unwrap();
        assert_eq!(loaded, resource);
    }

    #[test]
    fn test_rejects_non_integer_faces() {
        let result = load_from_bytes(br#"{"faces":[32,-1]}"#);
        assert!(matches!(result, Err(SplitterError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_from_path(dir.path().join("absent.json"));
        assert!(matches!(result, Err(SplitterError::Io(_))));
    }
}
