use blob_store::Ref;

use crate::part::parse_parts;
use crate::types::{CamliType, Schema};
use crate::{Error, Part};

fn string_field<'a>(schema: &'a Schema, field: &str) -> &'a str {
    schema
        .field(field)
        .and_then(|v| v.as_str())
        .expect("grammar validation guarantees this field is a present string")
}

fn ref_field(schema: &Schema, field: &str) -> Result<Ref, Error> {
    Ok(string_field(schema, field).parse::<Ref>()?)
}

/// Typed view of a `camliType: "bytes"` schema.
pub struct BytesSchema<'a> {
    schema: &'a Schema,
}

impl<'a> BytesSchema<'a> {
    /// View `schema` as a bytes schema, failing if its `camliType` is not `bytes`.
    pub fn from_schema(schema: &'a Schema) -> Result<Self, Error> {
        schema.require_type([CamliType::Bytes], "bytes")?;
        Ok(Self { schema })
    }

    /// The schema's part list, in document order.
    pub fn parts(&self) -> Result<Vec<Part>, Error> {
        parse_parts(self.schema.value())
    }

    /// The underlying schema.
    pub fn schema(&self) -> &Schema {
        self.schema
    }
}

/// Typed view of a `camliType: "file"` schema.
pub struct FileSchema<'a> {
    schema: &'a Schema,
}

impl<'a> FileSchema<'a> {
    /// View `schema` as a file schema, failing if its `camliType` is not `file`.
    pub fn from_schema(schema: &'a Schema) -> Result<Self, Error> {
        schema.require_type([CamliType::File], "file")?;
        Ok(Self { schema })
    }

    /// The schema's part list, in document order.
    pub fn parts(&self) -> Result<Vec<Part>, Error> {
        parse_parts(self.schema.value())
    }

    /// The file's recorded name, if present.
    pub fn file_name(&self) -> Option<&str> {
        self.schema.field("fileName").and_then(|v| v.as_str())
    }

    /// The file's recorded modification time (Unix seconds), if present.
    pub fn unix_mtime(&self) -> Option<i64> {
        self.schema.field("unixMtime").and_then(|v| v.as_i64())
    }

    /// The underlying schema.
    pub fn schema(&self) -> &Schema {
        self.schema
    }
}

/// Typed view of a `camliType: "permanode"` schema.
pub struct PermanodeSchema<'a> {
    schema: &'a Schema,
}

impl<'a> PermanodeSchema<'a> {
    /// View `schema` as a permanode schema, failing if its `camliType` is not `permanode`.
    pub fn from_schema(schema: &'a Schema) -> Result<Self, Error> {
        schema.require_type([CamliType::Permanode], "permanode")?;
        Ok(Self { schema })
    }

    /// The permanode's nonce string.
    pub fn random(&self) -> &str {
        string_field(self.schema, "random")
    }

    /// The Ref of the public-key blob that must sign claims against this permanode.
    pub fn camli_signer(&self) -> Result<Ref, Error> {
        ref_field(self.schema, "camliSigner")
    }
}

/// The `claimType` of a [`ClaimSchema`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ClaimType {
    /// Add a value to a (possibly multi-valued) attribute.
    AddAttribute,
    /// Set an attribute's value, replacing any existing value(s).
    SetAttribute,
    /// Remove an attribute (or a specific value of it).
    DelAttribute,
}

impl ClaimType {
    /// The JSON string this variant is spelled as in `claimType`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AddAttribute => "add-attribute",
            Self::SetAttribute => "set-attribute",
            Self::DelAttribute => "del-attribute",
        }
    }

    /// Parse a `claimType` string, or `None` if it names no known variant.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "add-attribute" => Some(Self::AddAttribute),
            "set-attribute" => Some(Self::SetAttribute),
            "del-attribute" => Some(Self::DelAttribute),
            _ => None,
        }
    }
}

/// Typed view of a `camliType: "claim"` schema.
pub struct ClaimSchema<'a> {
    schema: &'a Schema,
}

impl<'a> ClaimSchema<'a> {
    /// View `schema` as a claim schema, failing if its `camliType` is not `claim`.
    pub fn from_schema(schema: &'a Schema) -> Result<Self, Error> {
        schema.require_type([CamliType::Claim], "claim")?;
        Ok(Self { schema })
    }

    /// The Ref of the public-key blob the claim must be signed with.
    pub fn camli_signer(&self) -> Result<Ref, Error> {
        ref_field(self.schema, "camliSigner")
    }

    /// The claim's embedded signature (single-line camlisig form).
    pub fn camli_sig(&self) -> &str {
        string_field(self.schema, "camliSig")
    }

    /// The claim's timestamp, as recorded in the document (RFC 3339 text,
    /// not parsed here — date parsing is a caller concern).
    pub fn claim_date(&self) -> &str {
        string_field(self.schema, "claimDate")
    }

    /// The Ref of the permanode this claim applies to.
    pub fn perma_node(&self) -> Result<Ref, Error> {
        ref_field(self.schema, "permaNode")
    }

    /// The attribute name this claim mutates.
    pub fn attribute(&self) -> &str {
        string_field(self.schema, "attribute")
    }

    /// The claim's operation.
    pub fn claim_type(&self) -> ClaimType {
        ClaimType::parse(string_field(self.schema, "claimType"))
            .expect("grammar validation guarantees a recognized claimType")
    }

    /// The attribute value being added or set. `None` for `del-attribute`
    /// (grammar validation guarantees `value` is present iff required).
    pub fn value(&self) -> Option<&str> {
        self.schema.field("value").and_then(|v| v.as_str())
    }
}
