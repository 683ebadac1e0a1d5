use serde::Serialize;
use serde_json::Value;

/// The single literal delimiter separating a signed document's prefix from
/// its trailing `camliSig` field. Byte-exact; `verify` locates its *last*
/// occurrence to recover the signed region.
pub const CAMLI_SIG_DELIMITER: &str = ",\"camliSig\":\"";

/// Pretty-print `value` as JSON with 4-space indentation, matching the
/// canonical signing byte layout (§4.9).
pub fn pretty_print_4space(value: &Value) -> String {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser).expect("serde_json::Value always serializes");
    String::from_utf8(buf).expect("serde_json output is valid UTF-8")
}

/// Compute the signed prefix of `value`'s canonical pretty-printed form: the
/// 4-space-indented text, right-stripped, with its final `}` removed.
pub fn signed_prefix(value: &Value) -> String {
    let pretty = pretty_print_4space(value);
    let trimmed = pretty.trim_end();
    debug_assert!(trimmed.ends_with('}'), "pretty-printed JSON object must end with '}}'");
    trimmed[..trimmed.len() - 1].to_string()
}
