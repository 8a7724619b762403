use super::{
    error::Result,
    fields::{write_string_bounded, write_u16_be, MAX_STATUS_CHARS},
    varint::write_varint,
};

/// Wire type tag of an encoded field.
///
/// JSON is deliberately absent: it is a decode-only type (status responses),
/// so it has no encodable representation here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    VarInt,
    UnsignedShort,
    String,
}

/// An encodable typed field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    VarInt(i32),
    UnsignedShort(u16),
    String(&'a str),
}

impl FieldValue<'_> {
    fn kind(&self) -> FieldKind {
        match self {
            Self::VarInt(_) => FieldKind::VarInt,
            Self::UnsignedShort(_) => FieldKind::UnsignedShort,
            Self::String(_) => FieldKind::String,
        }
    }
}

/// A field after encoding: its type tag plus the exact wire bytes.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    kind: FieldKind,
    encoded: Vec<u8>,
}

impl Field {
    pub fn encode(value: FieldValue<'_>) -> Result<Self> {
        let mut encoded = Vec::new();
        match value {
            FieldValue::VarInt(v) => write_varint(&mut encoded, v),
            FieldValue::UnsignedShort(v) => write_u16_be(&mut encoded, v),
            FieldValue::String(v) => write_string_bounded(&mut encoded, v, MAX_STATUS_CHARS)?,
        }
        Ok(Self {
            kind: value.kind(),
            encoded,
        })
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn encoded_len(&self) -> usize {
        self.encoded.len()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.encoded
    }
}

/// Ordered, append-only sequence of typed fields making up a packet body.
///
/// Outbound only: inbound bodies are decoded directly by
/// [`super::packet::ClientboundPacket`] against the field list registered
/// for the packet id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    fields: Vec<Field>,
}

impl Message {
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Encodes `value` and appends it, returning the message so fields can
    /// be chained in emission order.
    pub fn append(mut self, value: FieldValue<'_>) -> Result<Self> {
        self.fields.push(Field::encode(value)?);
        Ok(self)
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn encoded_len(&self) -> usize {
        self.fields.iter().map(Field::encoded_len).sum()
    }

    /// Concatenation of every field's wire bytes in append order. An empty
    /// message encodes to no bytes (the status request has no payload).
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        for field in &self.fields {
            out.extend_from_slice(field.bytes());
        }
        out
    }
}
