use std::sync::Arc;

use serde_json::Value;

use blob_store::{Blob, Ref};

use crate::Error;

/// The `camliType` discriminant of a [`Schema`] document.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CamliType {
    /// A `bytes` schema: a part-tree of raw blob parts.
    Bytes,
    /// A `file` schema: a `bytes` part-tree plus file metadata.
    File,
    /// A `permanode` schema: a mutable identity anchor.
    Permanode,
    /// A `claim` schema: a signed assertion attaching an attribute to a permanode.
    Claim,
}

impl CamliType {
    /// The JSON string this variant is spelled as in `camliType`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bytes => "bytes",
            Self::File => "file",
            Self::Permanode => "permanode",
            Self::Claim => "claim",
        }
    }

    /// Parse a `camliType` string, or `None` if it names no known variant.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "bytes" => Some(Self::Bytes),
            "file" => Some(Self::File),
            "permanode" => Some(Self::Permanode),
            "claim" => Some(Self::Claim),
            _ => None,
        }
    }
}

/// A parsed, grammar-valid Camli schema document.
///
/// Holds the schema's own Ref, the JSON value it parsed to, and a shared
/// handle to the underlying blob's bytes (not a copy — the same buffer the
/// originating `Blob` cached). Obtain a typed view via [`Schema::camli_type`]
/// and the matching `as_*` conversion (e.g. [`crate::BytesSchema::from_schema`]).
pub struct Schema {
    pub(crate) reference: Ref,
    pub(crate) raw: Arc<Vec<u8>>,
    pub(crate) value: Value,
    pub(crate) camli_type: CamliType,
}

impl Schema {
    /// Parse `blob` into a Schema, enforcing size, UTF-8, JSON-object, and
    /// grammar checks in that order. Grammar violations are aggregated.
    pub fn parse(blob: &Blob) -> Result<Self, Error> {
        let bytes = blob.bytes().map_err(Error::BlobStore)?;
        if bytes.len() > crate::SCHEMA_MAX_BYTES {
            return Err(Error::SchemaTooLarge(bytes.len()));
        }
        let text = std::str::from_utf8(&bytes).map_err(|_| Error::NotUtf8)?;
        let value: Value = serde_json::from_str(text).map_err(|e| Error::NotJson(e.to_string()))?;
        let Value::Object(ref map) = value else { return Err(Error::NotAnObject) };

        let mut violations = Vec::new();
        check_version(map, &mut violations);
        let camli_type = check_camli_type(map, &mut violations);

        if let Some(camli_type) = camli_type {
            match camli_type {
                CamliType::Bytes | CamliType::File => check_parts(map, &mut violations),
                CamliType::Permanode => check_permanode(map, &mut violations),
                CamliType::Claim => check_claim(map, &mut violations),
            }
        }

        if !violations.is_empty() {
            return Err(Error::SchemaGrammarViolation(violations));
        }
        let camli_type = camli_type.expect("no violations implies camliType was recognized");

        Ok(Self { reference: blob.reference().clone(), raw: bytes, value, camli_type })
    }

    /// This schema's own Ref (the Ref of the blob it was parsed from).
    pub fn reference(&self) -> &Ref {
        &self.reference
    }

    /// The underlying JSON-object value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The raw bytes this schema was parsed from.
    pub fn raw(&self) -> &Arc<Vec<u8>> {
        &self.raw
    }

    /// This schema's `camliType`.
    pub fn camli_type(&self) -> CamliType {
        self.camli_type
    }

    pub(crate) fn field(&self, key: &str) -> Option<&Value> {
        self.value.get(key)
    }

    pub(crate) fn require_type<const N: usize>(
        &self,
        expected: [CamliType; N],
        name: &'static str,
    ) -> Result<(), Error> {
        if expected.contains(&self.camli_type) {
            Ok(())
        } else {
            Err(Error::SchemaTypeMismatch { expected: name, found: self.camli_type.as_str().to_string() })
        }
    }
}

fn check_version(map: &serde_json::Map<String, Value>, violations: &mut Vec<String>) {
    match map.get("camliVersion") {
        Some(Value::Number(n)) if n.as_u64() == Some(1) => {}
        Some(_) => violations.push("camliVersion must equal 1".to_string()),
        None => violations.push("missing required field camliVersion".to_string()),
    }
}

fn check_camli_type(
    map: &serde_json::Map<String, Value>,
    violations: &mut Vec<String>,
) -> Option<CamliType> {
    match map.get("camliType") {
        Some(Value::String(s)) => match CamliType::parse(s) {
            Some(t) => Some(t),
            None => {
                violations.push(format!("unrecognized camliType {s:?}"));
                None
            }
        },
        Some(_) => {
            violations.push("camliType must be a string".to_string());
            None
        }
        None => {
            violations.push("missing required field camliType".to_string());
            None
        }
    }
}

fn check_parts(map: &serde_json::Map<String, Value>, violations: &mut Vec<String>) {
    let Some(parts) = map.get("parts") else { return };
    let Value::Array(parts) = parts else {
        violations.push("parts must be an array".to_string());
        return;
    };
    for (i, part) in parts.iter().enumerate() {
        let Value::Object(part) = part else {
            violations.push(format!("parts[{i}] must be an object"));
            continue;
        };
        if !matches!(part.get("size"), Some(Value::Number(_))) {
            violations.push(format!("parts[{i}] missing required numeric field size"));
        }
        let has_blob_ref = part.contains_key("blobRef");
        let has_bytes_ref = part.contains_key("bytesRef");
        if has_blob_ref == has_bytes_ref {
            violations.push(format!(
                "parts[{i}] must have exactly one of blobRef or bytesRef"
            ));
        }
    }
}

fn require_string_field(
    map: &serde_json::Map<String, Value>,
    field: &str,
    violations: &mut Vec<String>,
) {
    match map.get(field) {
        Some(Value::String(_)) => {}
        Some(_) => violations.push(format!("{field} must be a string")),
        None => violations.push(format!("missing required field {field}")),
    }
}

fn check_permanode(map: &serde_json::Map<String, Value>, violations: &mut Vec<String>) {
    require_string_field(map, "random", violations);
    require_string_field(map, "camliSigner", violations);
}

fn check_claim(map: &serde_json::Map<String, Value>, violations: &mut Vec<String>) {
    for field in ["camliSigner", "camliSig", "claimDate", "permaNode", "attribute"] {
        require_string_field(map, field, violations);
    }
    match map.get("claimType") {
        Some(Value::String(s)) => match s.as_str() {
            "add-attribute" | "set-attribute" => {
                if !map.contains_key("value") {
                    violations.push(format!("claimType {s:?} requires value"));
                }
            }
            "del-attribute" => {
                if map.contains_key("value") {
                    violations.push("claimType \"del-attribute\" forbids value".to_string());
                }
            }
            other => violations.push(format!("unrecognized claimType {other:?}")),
        },
        Some(_) => violations.push("claimType must be a string".to_string()),
        None => violations.push("missing required field claimType".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob_of(json: &str) -> Blob {
        Blob::from_contents(json.as_bytes().to_vec())
    }

    #[test]
    fn valid_bytes_schema_parses() {
        let json = r#"{"camliVersion":1,"camliType":"bytes","parts":[{"blobRef":"sha224-d14a028c2a3a2bc9476102bb288234c415a2b01f828ea62ac5b3e42f","size":1024}]}"#;
        let schema = Schema::parse(&blob_of(json)).unwrap();
        assert_eq!(schema.camli_type(), CamliType::Bytes);
    }

    #[test]
    fn missing_camli_version_is_named_violation() {
        let json = r#"{"camliType":"bytes","parts":[]}"#;
        let err = Schema::parse(&blob_of(json)).unwrap_err();
        let Error::SchemaGrammarViolation(violations) = err else { panic!("wrong error: {err:?}") };
        assert!(violations.iter().any(|v| v.contains("camliVersion")));
    }

    #[test]
    fn aggregates_multiple_violations() {
        let json = r#"{"camliType":"claim"}"#;
        let err = Schema::parse(&blob_of(json)).unwrap_err();
        let Error::SchemaGrammarViolation(violations) = err else { panic!("wrong error: {err:?}") };
        assert!(violations.len() > 1, "expected multiple violations, got {violations:?}");
        assert!(violations.iter().any(|v| v.contains("camliVersion")));
        assert!(violations.iter().any(|v| v.contains("claimType")));
    }

    #[test]
    fn part_with_both_refs_is_rejected() {
        let json = r#"{"camliVersion":1,"camliType":"bytes","parts":[{"blobRef":"sha224-d14a028c2a3a2bc9476102bb288234c415a2b01f828ea62ac5b3e42f","bytesRef":"sha224-d14a028c2a3a2bc9476102bb288234c415a2b01f828ea62ac5b3e42f","size":1}]}"#;
        let err = Schema::parse(&blob_of(json)).unwrap_err();
        let Error::SchemaGrammarViolation(violations) = err else { panic!("wrong error: {err:?}") };
        assert!(violations.iter().any(|v| v.contains("exactly one of blobRef or bytesRef")));
    }

    #[test]
    fn claim_del_attribute_forbids_value() {
        let json = r#"{"camliVersion":1,"camliType":"claim","camliSigner":"x","camliSig":"x","claimDate":"x","permaNode":"x","attribute":"x","claimType":"del-attribute","value":"x"}"#;
        let err = Schema::parse(&blob_of(json)).unwrap_err();
        let Error::SchemaGrammarViolation(violations) = err else { panic!("wrong error: {err:?}") };
        assert!(violations.iter().any(|v| v.contains("forbids value")));
    }

    #[test]
    fn oversized_blob_is_rejected_before_utf8_check() {
        let bytes = vec![0xffu8; crate::SCHEMA_MAX_BYTES + 1];
        let err = Schema::parse(&Blob::from_contents(bytes)).unwrap_err();
        assert!(matches!(err, Error::SchemaTooLarge(_)));
    }

    #[test]
    fn non_utf8_is_rejected() {
        let err = Schema::parse(&Blob::from_contents(vec![0xff, 0xfe])).unwrap_err();
        assert!(matches!(err, Error::NotUtf8));
    }

    #[test]
    fn non_json_is_rejected() {
        let err = Schema::parse(&blob_of("not json")).unwrap_err();
        assert!(matches!(err, Error::NotJson(_)));
    }

    #[test]
    fn non_object_is_rejected() {
        let err = Schema::parse(&blob_of("[1,2,3]")).unwrap_err();
        assert!(matches!(err, Error::NotAnObject));
    }
}
