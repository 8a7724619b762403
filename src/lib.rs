//! Minecraft server list ping client: varint codec, packet framing, and the
//! handshake/status-request/status-response exchange over a blocking
//! transport.

pub mod connection;
pub(crate) mod logging;
pub mod proto;
pub mod query;

pub use connection::{read_frame, TcpTransport, Transport};
pub use proto::{
    ClientboundPacket, Field, FieldKind, FieldValue, Message, Packet, ProtoError,
    MAX_PACKET_SIZE, STATUS_PACKET_ID,
};
pub use query::{
    query_status, ConnectionContext, QueryError, QueryState, ServerStatus, StatusPlayers,
    StatusQuery, StatusVersion, DEFAULT_PORT, DEFAULT_PROTOCOL_VERSION,
};
