use serde_json::Value;

use blob_store::Ref;

use crate::Error;

/// One entry of a `bytes`/`file` schema's `parts` array.
#[derive(Clone, Debug)]
pub struct Part {
    /// The part's declared byte length.
    pub size: u64,
    /// The part's payload reference.
    pub part_ref: PartRef,
}

/// Where a [`Part`]'s bytes live: a leaf blob, or a nested `bytes` schema.
#[derive(Clone, Debug)]
pub enum PartRef {
    /// A leaf part: fetch this Ref and append its raw bytes.
    BlobRef(Ref),
    /// An interior part: fetch this Ref, parse it as a `bytes` schema, and
    /// recursively read it.
    BytesRef(Ref),
}

/// Parse the `parts` array of an already grammar-validated `bytes`/`file`
/// schema value. Schema grammar validation guarantees each entry has `size`
/// and exactly one of `blobRef`/`bytesRef`, so malformed shape here would
/// indicate a bug in that validation rather than bad input.
pub(crate) fn parse_parts(value: &Value) -> Result<Vec<Part>, Error> {
    let Some(Value::Array(parts)) = value.get("parts") else { return Ok(Vec::new()) };
    parts.iter().map(parse_part).collect()
}

fn parse_part(value: &Value) -> Result<Part, Error> {
    let size = value
        .get("size")
        .and_then(Value::as_u64)
        .ok_or_else(|| Error::CorruptPartTree("part missing numeric size".to_string()))?;
    let part_ref = if let Some(Value::String(s)) = value.get("blobRef") {
        PartRef::BlobRef(s.parse::<Ref>()?)
    } else if let Some(Value::String(s)) = value.get("bytesRef") {
        PartRef::BytesRef(s.parse::<Ref>()?)
    } else {
        return Err(Error::CorruptPartTree(
            "part has neither blobRef nor bytesRef".to_string(),
        ));
    };
    Ok(Part { size, part_ref })
}
