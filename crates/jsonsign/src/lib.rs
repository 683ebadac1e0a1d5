//! Detached-signature-over-canonicalized-JSON, used to authenticate
//! permanodes and claims.
//!
//! The canonical signing byte layout (§4.9) pretty-prints the unsigned
//! object with 4-space indentation, strips its trailing `}`, signs that
//! "signed prefix", and appends `,"camliSig":"<camlisig>"}\n`. [`sign`] and
//! [`verify`] implement the two halves of this protocol against the
//! externally-pluggable [`Signer`]/[`KeyInspector`]/[`Verifier`]
//! capabilities; the core never touches PGP key material directly.

#![warn(missing_docs)]

mod canon;
mod error;
mod provider;
mod sign;
mod verify;

pub use canon::CAMLI_SIG_DELIMITER;
pub use error::Error;
pub use provider::{KeyInspector, Signer, Verifier};
pub use sign::sign;
pub use verify::verify;
