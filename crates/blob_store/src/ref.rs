use std::fmt;
use std::str::FromStr;

use sha2::{Digest as _, Sha224};

use crate::Error;

/// A digest algorithm usable by a [`Ref`]. The set of variants is closed and
/// extensible only here, at the registry level.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Algorithm {
    /// SHA-224, the currently recommended algorithm.
    Sha224,
}

/// The algorithm used by [`Ref::from_contents`] and [`Blob::from_contents`](crate::Blob::from_contents).
pub const RECOMMENDED_ALGORITHM: Algorithm = Algorithm::Sha224;

impl Algorithm {
    /// The textual name used on the left of a `<alg>-<hex>` Ref string.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sha224 => "sha224",
        }
    }

    /// The exact digest length in bytes for this algorithm.
    pub fn digest_len(self) -> usize {
        match self {
            Self::Sha224 => 28,
        }
    }

    /// Digest `bytes` under this algorithm.
    pub fn digest(self, bytes: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha224 => Sha224::digest(bytes).to_vec(),
        }
    }

    /// Look up an algorithm by its registered name.
    pub fn parse_name(name: &str) -> Option<Self> {
        match name {
            "sha224" => Some(Self::Sha224),
            _ => None,
        }
    }
}

/// A content-addressed identifier: a digest algorithm paired with raw digest bytes.
///
/// Two Refs are equal iff their algorithm and digest bytes are equal. Refs are
/// immutable values; the textual form is `"<algorithm-name>-<lowercase-hex-of-digest>"`.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Ref {
    algorithm: Algorithm,
    digest: Vec<u8>,
}

impl Ref {
    /// Parse a `"<alg>-<hex>"` string. The left side must name a registered
    /// algorithm; the right side must be lowercase hex of exactly that
    /// algorithm's digest length.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let (alg_name, hex_digest) = text.split_once('-').ok_or_else(|| {
            Error::MalformedRef(text.to_string(), "missing '-' separator")
        })?;
        let algorithm = Algorithm::parse_name(alg_name)
            .ok_or_else(|| Error::UnknownAlgorithm(alg_name.to_string()))?;
        if hex_digest.len() != algorithm.digest_len() * 2 {
            return Err(Error::MalformedRef(text.to_string(), "wrong digest length"));
        }
        if !hex_digest.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()) {
            return Err(Error::MalformedRef(text.to_string(), "digest is not lowercase hex"));
        }
        let digest = hex::decode(hex_digest)
            .map_err(|_| Error::MalformedRef(text.to_string(), "digest is not valid hex"))?;
        Ok(Self { algorithm, digest })
    }

    /// Compute a Ref over `bytes` using [`RECOMMENDED_ALGORITHM`].
    pub fn from_contents(bytes: &[u8]) -> Self {
        let digest = RECOMMENDED_ALGORITHM.digest(bytes);
        Self { algorithm: RECOMMENDED_ALGORITHM, digest }
    }

    /// The digest algorithm identifying this Ref.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The raw digest bytes (not hex-encoded).
    pub fn digest_bytes(&self) -> &[u8] {
        &self.digest
    }

    /// The lowercase hex encoding of the digest bytes.
    pub fn digest_hex(&self) -> String {
        hex::encode(&self.digest)
    }
}

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.algorithm.name(), self.digest_hex())
    }
}

impl fmt::Debug for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ref({self})")
    }
}

impl FromStr for Ref {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Ord for Ref {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_string().cmp(&other.to_string())
    }
}

impl PartialOrd for Ref {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
