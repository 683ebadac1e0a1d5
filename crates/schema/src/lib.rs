//! Typed Camli schema documents: `bytes`, `file`, `permanode`, `claim`.
//!
//! A [`Schema`] is produced by [`Schema::parse`] from a `blob_store::Blob`:
//! size, UTF-8, JSON-object, and grammar checks run in that order, with the
//! grammar stage aggregating every violation rather than failing on the
//! first. Once parsed, a typed view ([`BytesSchema`], [`FileSchema`],
//! [`PermanodeSchema`], [`ClaimSchema`]) is obtained by inspecting
//! `camli_type()`. [`BytesReader`] reassembles the logical byte stream of a
//! `bytes`/`file` schema by walking its part-tree, recursing through nested
//! `bytesRef` parts.

#![warn(missing_docs)]

mod bytes_reader;
mod error;
mod part;
mod types;
mod views;

pub use bytes_reader::BytesReader;
pub use error::Error;
pub use part::{Part, PartRef};
pub use types::{CamliType, Schema};
pub use views::{BytesSchema, ClaimSchema, ClaimType, FileSchema, PermanodeSchema};

/// Maximum byte length of a schema blob (§4.6).
pub const SCHEMA_MAX_BYTES: usize = 1_000_000;

/// Maximum part-tree recursion depth [`BytesReader`] will follow before
/// failing with [`Error::DepthExceeded`].
pub const MAX_PART_TREE_DEPTH: usize = 64;
