use blob_store::Fetcher;

use crate::part::{parse_parts, PartRef};
use crate::types::{CamliType, Schema};
use crate::Error;

/// Reassembles the logical byte stream of a `bytes`/`file` schema by walking
/// its part-tree, recursing through nested `bytesRef` parts.
///
/// Borrows a [`Fetcher`] for the lifetime of each `read` call; does not own
/// or cache the bytes it reassembles.
pub struct BytesReader<'a, F: Fetcher + ?Sized> {
    fetcher: &'a F,
}

impl<'a, F: Fetcher + ?Sized> BytesReader<'a, F> {
    /// Build a reader that fetches part blobs through `fetcher`.
    pub fn new(fetcher: &'a F) -> Self {
        Self { fetcher }
    }

    /// Read the full logical byte stream of `schema`'s part-tree, in
    /// document order.
    pub fn read(&self, schema: &Schema) -> Result<Vec<u8>, Error> {
        self.read_at_depth(schema, 0)
    }

    fn read_at_depth(&self, schema: &Schema, depth: usize) -> Result<Vec<u8>, Error> {
        if depth >= crate::MAX_PART_TREE_DEPTH {
            return Err(Error::DepthExceeded);
        }
        let parts = parse_parts(schema.value())?;
        let mut out = Vec::new();
        for part in parts {
            match part.part_ref {
                PartRef::BlobRef(r) => {
                    let blob = self.fetcher.fetch(&r)?;
                    out.extend_from_slice(&blob.bytes()?);
                }
                PartRef::BytesRef(r) => {
                    let blob = self.fetcher.fetch(&r)?;
                    let nested = Schema::parse(&blob)
                        .map_err(|e| Error::CorruptPartTree(e.to_string()))?;
                    if nested.camli_type() != CamliType::Bytes {
                        return Err(Error::CorruptPartTree(format!(
                            "bytesRef {r} did not parse as a bytes schema"
                        )));
                    }
                    let nested_bytes = self.read_at_depth(&nested, depth + 1)?;
                    out.extend_from_slice(&nested_bytes);
                }
            }
        }
        Ok(out)
    }
}
