//! Minimal Minecraft wire codec for the server list ping: varint encoding,
//! typed field codecs, message building, and packet framing.

mod error;
mod fields;
mod message;
mod packet;
mod varint;

#[cfg(test)]
mod tests;

pub use error::{ProtoError, Result};
pub use fields::{
    read_string_bounded, read_u16_be, take, write_string_bounded, write_u16_be,
    MAX_ADDRESS_CHARS, MAX_STATUS_CHARS,
};
pub use message::{Field, FieldKind, FieldValue, Message};
pub use packet::{ClientboundPacket, Packet, MAX_PACKET_SIZE, STATUS_PACKET_ID};
pub use varint::{
    read_varint, read_varint_partial, varint_complete, varint_len, write_varint, MAX_VARINT_LEN,
};
