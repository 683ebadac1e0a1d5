//! A deterministic stand-in for a real PGP provider, used only to exercise
//! the jsonsign *protocol* (prefix computation, camlisig round-trip,
//! key-binding) without depending on actual PGP cryptography.
//!
//! "Signing" embeds the key's fingerprint alongside a digest of the signed
//! data; "verifying" recomputes both and requires an exact, constant-time
//! match of the fingerprint against the supplied public key. This
//! reproduces the reference GPG provider's key-binding requirement (§4.9)
//! without needing a real keyring.

use sha2::{Digest, Sha224};
use subtle::ConstantTimeEq;

use jsonsign::{Error, KeyInspector, Signer, Verifier};

pub struct MockPgpProvider;

impl MockPgpProvider {
    pub fn public_key_for(owner: &str) -> String {
        format!("-----BEGIN PGP PUBLIC KEY BLOCK-----\n\nmock-key:{owner}\n-----END PGP PUBLIC KEY BLOCK-----\n")
    }
}

impl KeyInspector for MockPgpProvider {
    fn fingerprint(&self, armored_public_key: &str) -> Result<String, Error> {
        Ok(hex::encode(Sha224::digest(armored_public_key.trim().as_bytes())))
    }
}

impl Signer for MockPgpProvider {
    fn sign_detached_armored(&self, fingerprint: &str, data: &[u8]) -> Result<String, Error> {
        let fingerprint_bytes = hex::decode(fingerprint)
            .map_err(|e| Error::SignerError(format!("bad fingerprint: {e}")))?;
        let digest = Sha224::digest(data);
        let mut payload = fingerprint_bytes;
        payload.extend_from_slice(&digest);
        let camlisig_form = format!("{}=MOCK", hex::encode(payload));
        camlisig::from_camlisig(&camlisig_form).map_err(Error::from)
    }
}

impl Verifier for MockPgpProvider {
    fn verify(&self, data: &[u8], armored_sig: &str, armored_public_key: &str) -> Result<bool, Error> {
        let camlisig_form = camlisig::to_camlisig(armored_sig)?;
        let Some(payload_hex) = camlisig_form.strip_suffix("=MOCK") else { return Ok(false) };
        let Ok(payload) = hex::decode(payload_hex) else { return Ok(false) };
        if payload.len() != 28 + 28 {
            return Ok(false);
        }
        let (sig_fingerprint, sig_digest) = payload.split_at(28);

        let expected_fingerprint = self.fingerprint(armored_public_key)?;
        let expected_fingerprint_bytes = hex::decode(&expected_fingerprint)
            .map_err(|e| Error::VerifierError(format!("bad expected fingerprint: {e}")))?;
        let fingerprint_matches: bool = sig_fingerprint.ct_eq(&expected_fingerprint_bytes).into();

        let expected_digest = Sha224::digest(data);
        let digest_matches: bool = sig_digest.ct_eq(expected_digest.as_slice()).into();

        Ok(fingerprint_matches && digest_matches)
    }
}
