//! Global to chunk-local index remapping.
//!
//! Faces in the source resource index into one shared set of arrays. A chunk
//! needs its own compact arrays, so each referenced element is copied the
//! first time it is seen and given the next free local index.

use crate::error::{Result, SplitterError};
use crate::resource::{MorphChannel, Scalar};
use crate::types::ArrayKind;
use std::collections::HashMap;

/// Remaps global element indices of one array kind into a chunk-local array.
#[derive(Debug, Clone)]
pub struct IndexRemapper {
    kind: ArrayKind,
    map: HashMap<u32, u32>,
    local: Vec<Scalar>,
}

impl IndexRemapper {
    pub fn new(kind: ArrayKind) -> Self {
        Self {
            kind,
            map: HashMap::new(),
            local: Vec::new(),
        }
    }

    pub fn kind(&self) -> ArrayKind {
        self.kind
    }

    /// Map a global index to its local index, copying the element from
    /// `source` on first use.
    pub fn map(&mut self, source: &[Scalar], global: u32) -> Result<u32> {
        if let Some(&local) = self.map.get(&global) {
            return Ok(local);
        }

        let stride = self.kind.stride();
        let element = (global as usize)
            .checked_mul(stride)
            .and_then(|start| source.get(start..start.saturating_add(stride)))
            .ok_or_else(|| SplitterError::IndexOutOfRange {
                kind: self.kind,
                index: global,
                len: source.len() / stride,
            })?;

        self.local.extend_from_slice(element);
        let local = (self.local.len() / stride - 1) as u32;
        self.map.insert(global, local);
        Ok(local)
    }

    /// Number of elements copied so far.
    pub fn len(&self) -> usize {
        self.local.len() / self.kind.stride()
    }

    pub fn is_empty(&self) -> bool {
        self.local.is_empty()
    }

    /// The local scalar array.
    pub fn values(&self) -> &[Scalar] {
        &self.local
    }

    /// Consume the remapper, returning the local array if anything was copied.
    pub fn into_values(self) -> Option<Vec<Scalar>> {
        if self.local.is_empty() {
            None
        } else {
            Some(self.local)
        }
    }
}

/// Remaps color indices across every morph channel at once.
///
/// The first time a color index is seen, each channel's value at that index
/// is appended to the matching local channel, so all local channels stay the
/// same length and share one local index per global color index.
#[derive(Debug, Clone, Default)]
pub struct MorphRemapper {
    map: HashMap<u32, u32>,
    channels: Vec<MorphChannel>,
}

impl MorphRemapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a global color index into the local morph channels.
    pub fn map(&mut self, source: &[MorphChannel], global: u32) -> Result<u32> {
        if let Some(&local) = self.map.get(&global) {
            return Ok(local);
        }

        // Validate against every channel before touching local state so a
        // failure leaves the channels the same length.
        let mut values = Vec::with_capacity(source.len());
        for channel in source {
            let value = channel
                .colors
                .get(global as usize)
                .ok_or_else(|| SplitterError::IndexOutOfRange {
                    kind: ArrayKind::MorphColor,
                    index: global,
                    len: channel.colors.len(),
                })?;
            values.push(value.clone());
        }

        if self.channels.is_empty() {
            self.channels = source
                .iter()
                .map(|channel| MorphChannel::named(channel.name.clone()))
                .collect();
        }

        for (channel, value) in self.channels.iter_mut().zip(values) {
            channel.colors.push(value);
        }

        let local = (self.len().saturating_sub(1)) as u32;
        self.map.insert(global, local);
        Ok(local)
    }

    /// Number of color entries in each local channel.
    pub fn len(&self) -> usize {
        self.channels.first().map_or(0, |c| c.colors.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn channels(&self) -> &[MorphChannel] {
        &self.channels
    }

    /// Consume the remapper, returning the channels if any value was copied.
    pub fn into_channels(self) -> Option<Vec<MorphChannel>> {
        if self.is_empty() {
            None
        } else {
            Some(self.channels)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Number;

    fn scalars(values: &[i64]) -> Vec<Scalar> {
        values.iter().map(|&v| Number::from(v)).collect()
    }

    #[test]
    fn test_copies_on_first_use() {
        let source = scalars(&[0, 1, 2, 10, 11, 12, 20, 21, 22]);
        let mut remap = IndexRemapper::new(ArrayKind::Vertex);

        assert_eq!(remap.map(&source, 2).unwrap(), 0);
        assert_eq!(remap.map(&source, 0).unwrap(), 1);
        assert_eq!(remap.len(), 2);
        assert_eq!(remap.values(), scalars(&[20, 21, 22, 0, 1, 2]).as_slice());
    }

    #[test]
    fn test_reuses_seen_index() {
        let source = scalars(&[5, 6, 7]);
        let mut remap = IndexRemapper::new(ArrayKind::Color);

        assert_eq!(remap.map(&source, 1).unwrap(), 0);
        assert_eq!(remap.map(&source, 1).unwrap(), 0);
        assert_eq!(remap.map(&source, 2).unwrap(), 1);
        assert_eq!(remap.len(), 2);
        assert_eq!(remap.into_values(), Some(scalars(&[6, 7])));
    }

    #[test]
    fn test_out_of_range() {
        let source = scalars(&[0, 1, 2, 3]);
        let mut remap = IndexRemapper::new(ArrayKind::Normal);

        let err = remap.map(&source, 1).unwrap_err();
        assert!(matches!(
            err,
            SplitterError::IndexOutOfRange {
                kind: ArrayKind::Normal,
                index: 1,
                len: 1
            }
        ));
        assert!(remap.is_empty());
        assert_eq!(remap.into_values(), None);
    }

    #[test]
    fn test_morph_indices_are_distinct() {
        let source = vec![
            MorphChannel {
                name: "a".into(),
                colors: scalars(&[100, 101, 102]),
            },
            MorphChannel {
                name: "b".into(),
                colors: scalars(&[200, 201, 202]),
            },
        ];
        let mut remap = MorphRemapper::new();

        assert_eq!(remap.map(&source, 2).unwrap(), 0);
        assert_eq!(remap.map(&source, 0).unwrap(), 1);
        assert_eq!(remap.map(&source, 2).unwrap(), 0);
        assert_eq!(remap.map(&source, 1).unwrap(), 2);

        let channels = remap.into_channels().unwrap();
        assert_eq!(channels[0].name, "a");
        assert_eq!(channels[0].colors, scalars(&[102, 100, 101]));
        assert_eq!(channels[1].name, "b");
        assert_eq!(channels[1].colors, scalars(&[202, 200, 201]));
    }

    #[test]
    fn test_morph_out_of_range_leaves_channels_aligned() {
        let source = vec![
            MorphChannel {
                name: "a".into(),
                colors: scalars(&[1, 2]),
            },
            MorphChannel {
                name: "b".into(),
                colors: scalars(&[1]),
            },
        ];
        let mut remap = MorphRemapper::new();

        assert!(remap.map(&source, 1).is_err());
        assert!(remap.is_empty());
        assert_eq!(remap.map(&source, 0).unwrap(), 0);
        assert_eq!(remap.channels()[0].colors.len(), remap.channels()[1].colors.len());
    }

    #[test]
    fn test_morph_without_channels() {
        let mut remap = MorphRemapper::new();
        assert_eq!(remap.map(&[], 4).unwrap(), 0);
        assert_eq!(remap.into_channels(), None);
    }
}
