use serde_json::Value;
use tracing::field;

use blob_store::{Fetcher, Ref};

use crate::canon::{signed_prefix, CAMLI_SIG_DELIMITER};
use crate::provider::{KeyInspector, Signer};
use crate::Error;

/// Sign `unsigned_json_text`, producing the signed document
/// `<signed_prefix>,"camliSig":"<camlisig>"}\n`.
///
/// Steps (§4.9): parse as a JSON object; require `camliVersion == 1`;
/// require `camliSigner` to name a Ref fetchable via `fetcher`; ask
/// `key_inspector` for that key's fingerprint; sign the canonical signed
/// prefix with `signer`; convert the resulting armored signature to camlisig
/// form and append it.
pub fn sign(
    unsigned_json_text: &str,
    signer: &dyn Signer,
    key_inspector: &dyn KeyInspector,
    fetcher: &dyn Fetcher,
) -> Result<String, Error> {
    let span = tracing::info_span!("jsonsign_sign", signer_ref = field::Empty);
    let _enter = span.enter();

    let value: Value = serde_json::from_str(unsigned_json_text).map_err(|_| Error::NotAnObject)?;
    let Value::Object(ref map) = value else { return Err(Error::NotAnObject) };

    match map.get("camliVersion") {
        Some(Value::Number(n)) if n.as_u64() == Some(1) => {}
        _ => return Err(Error::UnknownCamliVersion),
    }

    let signer_text = match map.get("camliSigner") {
        Some(Value::String(s)) => s.as_str(),
        _ => return Err(Error::MissingSigner),
    };
    span.record("signer_ref", signer_text);

    let signer_ref: Ref = signer_text.parse()?;
    let key_blob = fetcher.fetch(&signer_ref).map_err(|_| Error::SignerKeyUnavailable)?;
    let key_bytes = key_blob.bytes()?;
    let armored_key = std::str::from_utf8(&key_bytes).map_err(|_| Error::KeyNotUtf8)?;

    let fingerprint = key_inspector.fingerprint(armored_key)?;
    let prefix = signed_prefix(&value);
    let armored_sig = signer.sign_detached_armored(&fingerprint, prefix.as_bytes())?;
    let sig = camlisig::to_camlisig(&armored_sig)?;

    Ok(format!("{prefix}{CAMLI_SIG_DELIMITER}{sig}\"}}\n"))
}
