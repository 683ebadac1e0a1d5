use crate::Error;

/// Produces an ASCII-armored PGP detached signature. The core never touches
/// key material directly; concrete providers (subprocess GPG, a native PGP
/// library) own the private key and the cryptography.
pub trait Signer {
    /// Sign `data` with the private key matching `fingerprint`, returning an
    /// armored detached signature.
    fn sign_detached_armored(&self, fingerprint: &str, data: &[u8]) -> Result<String, Error>;
}

/// Inspects an armored public key to select the matching private key.
pub trait KeyInspector {
    /// The fingerprint of the key carried in `armored_public_key`.
    fn fingerprint(&self, armored_public_key: &str) -> Result<String, Error>;
}

/// Verifies a detached PGP signature against data and a public key.
///
/// Implementations MUST additionally confirm the signature was produced by
/// the supplied public key (fingerprints match), not merely that it is
/// mathematically valid for *some* key — otherwise a signature made by any
/// key would verify against any public-key reference.
pub trait Verifier {
    /// True iff `armored_sig` is a valid signature over `data` made with the
    /// key in `armored_public_key`.
    fn verify(&self, data: &[u8], armored_sig: &str, armored_public_key: &str) -> Result<bool, Error>;
}
