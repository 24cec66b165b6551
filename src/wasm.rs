//! WASM bindings for json-resource-splitter.
//!
//! This module provides JavaScript-friendly APIs for use in the browser.

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the browser console
    console_error_panic_hook::set_once();
}

/// One chunk produced by a split.
#[wasm_bindgen]
pub struct ChunkResult {
    reference: String,
    json: String,
}

#[wasm_bindgen]
impl ChunkResult {
    /// Reference name to list in the manifest.
    #[wasm_bindgen(getter)]
    pub fn reference(&self) -> String {
        self.reference.clone()
    }

    /// The chunk's resource document.
    #[wasm_bindgen(getter)]
    pub fn json(&self) -> String {
        self.json.clone()
    }
}

/// Split a mesh resource given as JSON text.
///
/// Returns an array of `ChunkResult`, empty if the resource has no faces.
#[wasm_bindgen(js_name = splitResource)]
pub fn split_resource(
    json: &str,
    reference: &str,
    splits_required: usize,
) -> Result<js_sys::Array, JsError> {
    let chunks = crate::split_resource_str(json, reference, splits_required)
        .map_err(|e| JsError::new(&e.to_string()))?;

    let array = js_sys::Array::new();
    for (reference, json) in chunks {
        array.push(&JsValue::from(ChunkResult { reference, json }));
    }
    Ok(array)
}

/// Replace the manifest entry for `reference` with entries for `chunk_refs`.
#[wasm_bindgen(js_name = rewriteManifest)]
pub fn rewrite_manifest(
    json: &str,
    reference: &str,
    chunk_refs: js_sys::Array,
) -> Result<String, JsError> {
    let chunks = chunk_refs
        .iter()
        .map(|value| {
            value
                .as_string()
                .ok_or_else(|| JsError::new("Chunk references must be strings"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    crate::rewrite_manifest_str(json, reference, &chunks).map_err(|e| JsError::new(&e.to_string()))
}
