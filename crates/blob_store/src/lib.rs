//! Content-addressed blob identity and storage capability traits.
//!
//! Overview
//! - Identity: a [`Ref`] binds an [`Algorithm`] to raw digest bytes and formats as
//!   `"<alg>-<hex>"`; a [`Blob`] pairs a `Ref` with a lazy, memoized byte producer.
//! - Storage is modeled as three narrow capabilities ([`Fetcher`], [`Enumerator`],
//!   [`Receiver`]) composed into [`Storage`]; most callers only need the narrowest one.
//! - [`InMemoryBackend`] is the reference `Storage` implementation, used by this
//!   workspace's other crates in tests.
//! - [`object_store`] specifies (but does not implement) the protocol a remote
//!   object-storage backend (e.g. S3) must satisfy to be a conforming `Storage`.
//!
//! This crate never deletes or mutates a received blob: content addressing makes
//! blobs write-once, so `receive` is idempotent by construction.

#![warn(missing_docs)]

mod blob;
mod error;
mod memory;
mod observer;
pub mod object_store;
mod r#ref;
mod storage;

pub use blob::Blob;
pub use error::Error;
pub use memory::InMemoryBackend;
pub use observer::{set_observer, StoreObserver};
pub use r#ref::{Algorithm, Ref, RECOMMENDED_ALGORITHM};
pub use storage::{Enumerator, Fetcher, Receiver, Storage};
