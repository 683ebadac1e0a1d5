/// Errors surfaced by `to_camlisig` / `from_camlisig`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The armored text has no blank line (`"\n\n"`) separating the header
    /// block from the signature body.
    #[error("armored signature has no blank line before the body")]
    MissingBody,
    /// The armored text has no `"\n-----"` footer boundary after the body.
    #[error("armored signature has no footer boundary after the body")]
    MissingFooter,
    /// A camlisig string has no `=` separating the signature data from its CRC.
    #[error("camlisig has no '=' separating signature data from its CRC")]
    MissingCrc,
}
