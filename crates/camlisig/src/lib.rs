//! Conversion between armored PGP detached signatures and the compact
//! single-line `camliSig` form embedded in Camli documents.
//!
//! The two directions are near-inverses, not perfect inverses: armor header
//! lines other than `-----BEGIN PGP SIGNATURE-----` (e.g. `Version:`) are
//! dropped by [`to_camlisig`] and never reappear, so `from_camlisig` always
//! emits the same minimal header regardless of what the original armor
//! carried.

#![warn(missing_docs)]

mod error;

pub use error::Error;

const HEADER: &str = "-----BEGIN PGP SIGNATURE-----";
const FOOTER: &str = "-----END PGP SIGNATURE-----";
const LINE_WIDTH: usize = 64;

/// Convert an ASCII-armored detached PGP signature to the compact
/// single-line camlisig form: the signature body (plus its trailing CRC
/// line) with all newlines removed.
pub fn to_camlisig(armored: &str) -> Result<String, Error> {
    let trimmed = armored.trim();
    let body_start = trimmed.find("\n\n").map(|i| i + 2).ok_or(Error::MissingBody)?;
    let footer_offset = trimmed[body_start..].find("\n-----").ok_or(Error::MissingFooter)?;
    let body = &trimmed[body_start..body_start + footer_offset];
    Ok(body.chars().filter(|c| *c != '\n' && *c != '\r').collect())
}

/// Convert a compact single-line camlisig back to ASCII-armored form.
pub fn from_camlisig(camlisig: &str) -> Result<String, Error> {
    let eq_pos = camlisig.rfind('=').ok_or(Error::MissingCrc)?;
    let (sig_data, crc) = camlisig.split_at(eq_pos);

    let mut out = String::new();
    out.push_str(HEADER);
    out.push_str("\n\n");
    for line in sig_data.as_bytes().chunks(LINE_WIDTH) {
        out.push_str(std::str::from_utf8(line).expect("camlisig body is ASCII base64"));
        out.push('\n');
    }
    out.push_str(crc);
    out.push('\n');
    out.push_str(FOOTER);
    out.push('\n');
    Ok(out)
}
