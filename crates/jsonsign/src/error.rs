/// Errors surfaced by [`crate::sign`], [`crate::verify`], and the PGP
/// provider traits.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input text does not parse as a JSON object.
    #[error("input is not a JSON object")]
    NotAnObject,
    /// `camliVersion` is missing or not equal to `1`.
    #[error("unknown or missing camliVersion")]
    UnknownCamliVersion,
    /// `camliSigner` is missing or not a string.
    #[error("missing or non-string camliSigner")]
    MissingSigner,
    /// `camliSigner`'s referenced public-key blob is not available from the Fetcher.
    #[error("signer public-key blob unavailable")]
    SignerKeyUnavailable,
    /// A signed document has no `,"camliSig":"` delimiter to recover the signed prefix.
    #[error("signed document has no camliSig delimiter")]
    MalformedSignedDocument,
    /// `camliSig` is missing or not a string on a document being verified.
    #[error("missing or non-string camliSig")]
    MissingSignature,
    /// The PGP signer capability failed.
    #[error("signer failed: {0}")]
    SignerError(String),
    /// The PGP key-inspector capability failed.
    #[error("key inspector failed: {0}")]
    KeyError(String),
    /// The PGP verifier capability failed.
    #[error("verifier failed: {0}")]
    VerifierError(String),
    /// Camlisig codec conversion failed.
    #[error(transparent)]
    CamliSig(#[from] camlisig::Error),
    /// A `blob_store` operation failed (fetching the signer's key blob, or
    /// parsing `camliSigner` as a Ref).
    #[error(transparent)]
    BlobStore(#[from] blob_store::Error),
    /// The public-key blob's bytes are not valid UTF-8 (armored keys are text).
    #[error("signer public-key blob is not valid UTF-8")]
    KeyNotUtf8,
}
