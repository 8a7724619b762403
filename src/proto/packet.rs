use super::{
    error::{ProtoError, Result},
    fields::{read_string_bounded, MAX_STATUS_CHARS},
    message::Message,
    varint::{read_varint, varint_len, write_varint},
};

/// Maximum packet body length in bytes (protocol limit).
pub const MAX_PACKET_SIZE: usize = 2_097_152;

/// Packet id shared by the handshake, status request, and status response.
pub const STATUS_PACKET_ID: i32 = 0x00;

/// An outbound length-prefixed frame: a varint packet id followed by the
/// encoded message body. Immutable once constructed; `encode` always
/// reproduces the same bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    id: i32,
    id_encoded: Vec<u8>,
    body: Vec<u8>,
}

impl Packet {
    /// Packet with an empty body, e.g. the status request.
    pub fn new(id: i32) -> Result<Self> {
        Self::with_payload(id, &Message::new())
    }

    pub fn with_payload(id: i32, message: &Message) -> Result<Self> {
        let mut id_encoded = Vec::with_capacity(varint_len(id));
        write_varint(&mut id_encoded, id);
        let body = message.encode();

        let len = id_encoded.len() + body.len();
        if len > MAX_PACKET_SIZE {
            return Err(ProtoError::PacketTooLarge { len });
        }

        Ok(Self {
            id,
            id_encoded,
            body,
        })
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    /// Length carried by the frame's prefix: encoded id plus body, never
    /// counting the prefix itself.
    pub fn body_len(&self) -> usize {
        self.id_encoded.len() + self.body.len()
    }

    /// `VarInt(length) ++ VarInt(id) ++ body`.
    pub fn encode(&self) -> Vec<u8> {
        let body_len = self.body_len();
        let mut out = Vec::with_capacity(varint_len(body_len as i32) + body_len);
        write_varint(&mut out, body_len as i32);
        out.extend_from_slice(&self.id_encoded);
        out.extend_from_slice(&self.body);
        out
    }
}

/// An inbound packet, dispatched by id against the field list registered
/// for that id. Adding a packet type means adding a variant here and an arm
/// in [`ClientboundPacket::decode`].
#[derive(Debug, Clone, PartialEq)]
pub enum ClientboundPacket {
    /// Status response (id 0x00): a single JSON document field.
    StatusResponse { data: serde_json::Value },
}

impl ClientboundPacket {
    /// Decodes a frame body whose outer length prefix has already been
    /// stripped by the transport layer. Returns `None` for empty input.
    pub fn decode(raw: &[u8]) -> Result<Option<Self>> {
        if raw.is_empty() {
            return Ok(None);
        }

        let mut input = raw;
        let id = read_varint(&mut input)?;
        let packet = match id {
            STATUS_PACKET_ID => {
                let text = read_string_bounded(&mut input, MAX_STATUS_CHARS)?;
                let data = serde_json::from_str(text)
                    .map_err(|err| ProtoError::InvalidJson(err.to_string()))?;
                Self::StatusResponse { data }
            }
            other => return Err(ProtoError::UnknownPacketId(other)),
        };

        if !input.is_empty() {
            return Err(ProtoError::TrailingBytes(input.len()));
        }

        Ok(Some(packet))
    }
}
