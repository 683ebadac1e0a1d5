use serde_json::Value;
use tracing::field;

use blob_store::{Fetcher, Ref};

use crate::canon::CAMLI_SIG_DELIMITER;
use crate::provider::Verifier;
use crate::Error;

/// Verify a signed document produced by [`crate::sign`].
///
/// Steps (§4.9): parse as a JSON object; extract `camliSig`/`camliSigner`;
/// convert `camliSig` back to armored form; fetch the signer's public-key
/// blob; locate the *last* occurrence of the `,"camliSig":"` delimiter in
/// the raw document to recover the signed prefix; delegate the boolean
/// result to `verifier`, which is responsible for confirming key-binding.
pub fn verify(signed_document: &str, fetcher: &dyn Fetcher, verifier: &dyn Verifier) -> Result<bool, Error> {
    let span = tracing::info_span!("jsonsign_verify", signer_ref = field::Empty, result = field::Empty);
    let _enter = span.enter();

    let value: Value = serde_json::from_str(signed_document).map_err(|_| Error::NotAnObject)?;
    let Value::Object(ref map) = value else { return Err(Error::NotAnObject) };

    let camli_sig = match map.get("camliSig") {
        Some(Value::String(s)) => s.as_str(),
        _ => return Err(Error::MissingSignature),
    };
    let signer_text = match map.get("camliSigner") {
        Some(Value::String(s)) => s.as_str(),
        _ => return Err(Error::MissingSigner),
    };
    span.record("signer_ref", signer_text);

    let armored_sig = camlisig::from_camlisig(camli_sig)?;

    let signer_ref: Ref = signer_text.parse()?;
    let key_blob = fetcher.fetch(&signer_ref).map_err(|_| Error::SignerKeyUnavailable)?;
    let key_bytes = key_blob.bytes()?;
    let armored_key = std::str::from_utf8(&key_bytes).map_err(|_| Error::KeyNotUtf8)?;

    let delimiter_pos = signed_document
        .rfind(CAMLI_SIG_DELIMITER)
        .ok_or(Error::MalformedSignedDocument)?;
    let prefix = &signed_document[..delimiter_pos];

    let result = verifier.verify(prefix.as_bytes(), &armored_sig, armored_key)?;
    span.record("result", result);
    Ok(result)
}
