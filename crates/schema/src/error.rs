/// Errors surfaced by schema parsing, typed-view conversion, and
/// [`crate::BytesReader`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The blob exceeds [`crate::SCHEMA_MAX_BYTES`].
    #[error("schema blob too large: {0} bytes")]
    SchemaTooLarge(usize),
    /// The blob's bytes do not decode as UTF-8.
    #[error("schema blob is not valid UTF-8")]
    NotUtf8,
    /// The blob's bytes do not parse as JSON.
    #[error("schema blob is not valid JSON: {0}")]
    NotJson(String),
    /// The parsed JSON value is not an object.
    #[error("schema document is not a JSON object")]
    NotAnObject,
    /// The object violates the schema grammar; carries every violation found,
    /// not just the first.
    #[error("schema grammar violated: {}", .0.join("; "))]
    SchemaGrammarViolation(Vec<String>),
    /// A typed view was requested whose `camliType` does not match the
    /// schema's actual type.
    #[error("schema type mismatch: expected {expected}, found {found}")]
    SchemaTypeMismatch {
        /// The camliType the caller asked to view the schema as.
        expected: &'static str,
        /// The schema's actual camliType.
        found: String,
    },
    /// A nested bytes schema in a part-tree failed to parse or validate.
    #[error("corrupt part tree: {0}")]
    CorruptPartTree(String),
    /// Part-tree recursion exceeded [`crate::MAX_PART_TREE_DEPTH`].
    #[error("part tree depth exceeded")]
    DepthExceeded,
    /// A `blob_store` operation failed: fetching a part blob, or parsing a
    /// `blobRef`/`bytesRef` string as a `Ref`.
    #[error(transparent)]
    BlobStore(#[from] blob_store::Error),
}
