//! Face stream parsing.
//!
//! The `faces` array is a flat run of records, each a mask token followed by
//! a mask-determined number of index tokens. [`FaceStream`] walks the stream
//! and yields one [`FaceRecord`] per face without copying.

use crate::error::{Result, SplitterError};
use crate::types::{ArrayKind, FaceKind, GROUP_SIZE};

/// One face record borrowed from the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceRecord<'a> {
    pub kind: FaceKind,
    /// Token offset of the mask within the stream.
    pub offset: usize,
    payload: &'a [u32],
}

impl<'a> FaceRecord<'a> {
    /// Index groups of this record paired with the array kind they index.
    pub fn groups(&self) -> impl Iterator<Item = (ArrayKind, &'a [u32])> + 'a {
        self.kind
            .groups()
            .iter()
            .copied()
            .zip(self.payload.chunks_exact(GROUP_SIZE))
    }

    /// The color index group, for shapes that carry one.
    pub fn color_indices(&self) -> Option<&'a [u32]> {
        self.groups()
            .find(|(kind, _)| *kind == ArrayKind::Color)
            .map(|(_, indices)| indices)
    }

    /// Record length in tokens, mask included.
    pub fn token_len(&self) -> usize {
        self.kind.record_len()
    }
}

/// Iterator over the records of a face token stream.
///
/// Stops after the first error.
#[derive(Debug, Clone)]
pub struct FaceStream<'a> {
    tokens: &'a [u32],
    offset: usize,
    failed: bool,
}

impl<'a> FaceStream<'a> {
    pub fn new(tokens: &'a [u32]) -> Self {
        Self {
            tokens,
            offset: 0,
            failed: false,
        }
    }

    fn next_record(&mut self) -> Result<FaceRecord<'a>> {
        let offset = self.offset;
        let mask = self.tokens[offset];
        let kind = FaceKind::from_mask(mask)
            .ok_or(SplitterError::UnsupportedFaceMask { mask, offset })?;

        let expected = kind.record_len();
        let available = self.tokens.len() - offset;
        if available < expected {
            return Err(SplitterError::TruncatedFace {
                mask,
                offset,
                expected,
                available,
            });
        }

        self.offset += expected;
        Ok(FaceRecord {
            kind,
            offset,
            payload: &self.tokens[offset + 1..offset + expected],
        })
    }
}

impl<'a> Iterator for FaceStream<'a> {
    type Item = Result<FaceRecord<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.tokens.len() {
            return None;
        }
        let record = self.next_record();
        self.failed = record.is_err();
        Some(record)
    }
}

/// Check that a whole face stream parses, without remapping anything.
pub fn validate(tokens: &[u32]) -> Result<usize> {
    let mut count = 0;
    for record in FaceStream::new(tokens) {
        record?;
        count += 1;
    }
    Ok(count)
}
