mod common;

use blob_store::{InMemoryBackend, Receiver};
use common::MockPgpProvider;

fn setup() -> (InMemoryBackend, String) {
    let backend = InMemoryBackend::new();
    let public_key = MockPgpProvider::public_key_for("alice");
    let key_ref = backend.receive(public_key.as_bytes()).unwrap();
    (backend, key_ref.to_string())
}

#[test]
fn sign_then_verify_round_trips() {
    let (backend, signer_ref) = setup();
    let provider = MockPgpProvider;

    let unsigned = format!(r#"{{"camliVersion":1,"camliSigner":"{signer_ref}"}}"#);
    let signed = jsonsign::sign(&unsigned, &provider, &provider, &backend).unwrap();

    assert!(signed.contains(",\"camliSig\":\""));
    assert!(signed.ends_with("\"}\n"));

    let verified = jsonsign::verify(&signed, &backend, &provider).unwrap();
    assert!(verified);
}

#[test]
fn tampering_with_signed_prefix_fails_verification() {
    let (backend, signer_ref) = setup();
    let provider = MockPgpProvider;

    let unsigned = format!(r#"{{"camliVersion":1,"camliSigner":"{signer_ref}"}}"#);
    let signed = jsonsign::sign(&unsigned, &provider, &provider, &backend).unwrap();

    let tampered = signed.replacen("\"camliVersion\": 1", "\"camliVersion\": 2", 1);
    assert_ne!(tampered, signed, "sanity: replacement must have taken effect");

    let verified = jsonsign::verify(&tampered, &backend, &provider).unwrap();
    assert!(!verified);
}

#[test]
fn verifying_against_the_wrong_key_fails_regardless_of_signature_validity() {
    // Key-binding is an invariant of the Verifier implementation (§4.9), so
    // this exercises MockPgpProvider::verify directly: same signed data and
    // a mathematically-consistent signature, but a public key that isn't
    // the one the signature was actually made with.
    use jsonsign::{KeyInspector, Signer, Verifier};

    let provider = MockPgpProvider;
    let alice_key = MockPgpProvider::public_key_for("alice");
    let bob_key = MockPgpProvider::public_key_for("bob");

    let data = b"the signed prefix bytes";
    let alice_fingerprint = provider.fingerprint(&alice_key).unwrap();
    let sig = provider.sign_detached_armored(&alice_fingerprint, data).unwrap();

    assert!(provider.verify(data, &sig, &alice_key).unwrap());
    assert!(!provider.verify(data, &sig, &bob_key).unwrap());
}

#[test]
fn missing_signer_key_is_rejected() {
    let backend = InMemoryBackend::new();
    let provider = MockPgpProvider;
    let missing = blob_store::Ref::from_contents(b"never stored");
    let unsigned = format!(r#"{{"camliVersion":1,"camliSigner":"{missing}"}}"#);

    let err = jsonsign::sign(&unsigned, &provider, &provider, &backend).unwrap_err();
    assert!(matches!(err, jsonsign::Error::SignerKeyUnavailable));
}
