/// Errors surfaced by Ref parsing, Blob access, and Storage operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The algorithm name on the left of a `<alg>-<hex>` Ref string is not registered.
    #[error("unknown digest algorithm: {0}")]
    UnknownAlgorithm(String),
    /// A Ref string is not well-formed: missing separator, non-hex digest, or wrong length.
    #[error("malformed ref {0:?}: {1}")]
    MalformedRef(String, &'static str),
    /// A Blob's lazy byte producer failed.
    #[error("fetch failed: {0}")]
    FetchFailure(String),
    /// No blob exists for the requested Ref.
    #[error("not found")]
    NotFound,
    /// A Storage implementation rejected a `receive` call.
    #[error("receive failed: {0}")]
    ReceiveFailure(String),
    /// A remote object-store transport failed. Carries the backend's own error text;
    /// implementations perform no retries (a caller or wrapping backend's concern).
    #[error("backend failure: {0}")]
    BackendFailure(String),
    /// The operation was canceled by the caller before completion.
    #[error("canceled")]
    Canceled,
}
