use crate::{Blob, Error, Ref};

/// Capability to fetch a Blob by its Ref.
pub trait Fetcher: Send + Sync {
    /// Fetch the blob named by `r`, or [`Error::NotFound`] if it does not
    /// exist in this backend.
    fn fetch(&self, r: &Ref) -> Result<Blob, Error>;
}

/// Capability to enumerate the Refs (and sizes) held by a backend, in
/// ascending Ref order.
pub trait Enumerator: Send + Sync {
    /// Return up to `limit` entries with Ref strictly greater than `after`
    /// (or from the beginning, when `after` is `None`), in ascending order.
    /// An empty result means enumeration is exhausted, not an error.
    fn enumerate(&self, after: Option<&Ref>, limit: usize) -> Result<Vec<(Ref, u64)>, Error>;
}

/// Capability to receive (store) a blob.
pub trait Receiver: Send + Sync {
    /// Store `bytes`, computing its Ref, and return that Ref. Receiving a
    /// Ref that is already present is a no-op that returns the same Ref:
    /// content addressing makes `receive` idempotent.
    fn receive(&self, bytes: &[u8]) -> Result<Ref, Error>;
}

/// The full storage contract: a backend that can fetch, enumerate, and
/// receive blobs. Most callers should depend on the narrowest capability
/// trait they actually need rather than on `Storage` directly.
pub trait Storage: Fetcher + Enumerator + Receiver {}

impl<T: Fetcher + Enumerator + Receiver> Storage for T {}
