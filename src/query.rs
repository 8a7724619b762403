use serde::Deserialize;
use serde_json::Value;

use crate::{
    connection::{read_frame, TcpTransport, Transport},
    logging::QueryLogger,
    proto::{
        ClientboundPacket, FieldValue, Message, Packet, ProtoError, MAX_ADDRESS_CHARS,
        STATUS_PACKET_ID,
    },
};

/// Protocol version sent in the handshake. Servers answer a status query
/// regardless of the version; 498 (1.14.4) is the default advertised one.
pub const DEFAULT_PROTOCOL_VERSION: i32 = 498;

/// Default server list ping port.
pub const DEFAULT_PORT: u16 = 25565;

/// Handshake `next_state` value selecting the status flow.
const NEXT_STATE_STATUS: i32 = 1;

/// Error surfaced by a status query.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("cannot connect to {address}: {source}")]
    Connect {
        address: String,
        source: std::io::Error,
    },
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),
    #[error(transparent)]
    Proto(#[from] ProtoError),
}

/// Endpoint and version for one query. Created at query start, dropped when
/// the response is returned or an error aborts the sequence; never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionContext {
    pub host: String,
    pub port: u16,
    pub protocol_version: i32,
}

impl ConnectionContext {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            protocol_version: DEFAULT_PROTOCOL_VERSION,
        }
    }

    #[must_use]
    pub fn with_protocol_version(mut self, protocol_version: i32) -> Self {
        self.protocol_version = protocol_version;
        self
    }
}

/// Sequencer state. Transitions are linear; any error moves to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryState {
    Idle,
    Connected,
    HandshakeSent,
    StatusRequested,
    StatusReceived,
    Failed,
}

/// Drives the three-step status exchange against a blocking transport:
/// handshake, empty status request, framed status response.
///
/// Single-threaded and synchronous throughout. No retries and no timeouts
/// are modeled here; a server that never sends the terminating byte of a
/// length prefix hangs the caller unless the transport carries a deadline.
pub struct StatusQuery<T> {
    transport: T,
    ctx: ConnectionContext,
    state: QueryState,
}

impl<T: Transport> StatusQuery<T> {
    /// Takes an already-open transport, so the machine starts at
    /// `Connected`.
    pub fn new(transport: T, ctx: ConnectionContext) -> Self {
        Self {
            transport,
            ctx,
            state: QueryState::Connected,
        }
    }

    pub fn state(&self) -> QueryState {
        self.state
    }

    /// Runs the exchange to completion and returns the status document.
    pub fn run(mut self) -> Result<Value, QueryError> {
        match self.drive() {
            Ok(data) => {
                self.state = QueryState::StatusReceived;
                Ok(data)
            }
            Err(err) => {
                self.state = QueryState::Failed;
                QueryLogger::query_failed(&self.ctx.host, self.ctx.port, &err);
                Err(err)
            }
        }
    }

    fn drive(&mut self) -> Result<Value, QueryError> {
        self.send_handshake()?;
        self.send_status_request()?;
        self.read_status_response()
    }

    fn send_handshake(&mut self) -> Result<(), QueryError> {
        let host_chars = self.ctx.host.encode_utf16().count();
        if host_chars > MAX_ADDRESS_CHARS {
            return Err(ProtoError::StringTooLong {
                max: MAX_ADDRESS_CHARS,
                actual: host_chars,
            }
            .into());
        }

        let message = Message::new()
            .append(FieldValue::VarInt(self.ctx.protocol_version))?
            .append(FieldValue::String(&self.ctx.host))?
            .append(FieldValue::UnsignedShort(self.ctx.port))?
            .append(FieldValue::VarInt(NEXT_STATE_STATUS))?;
        let packet = Packet::with_payload(STATUS_PACKET_ID, &message)?;
        self.transport.write_all(&packet.encode())?;
        self.state = QueryState::HandshakeSent;
        QueryLogger::handshake_sent(&self.ctx.host, self.ctx.protocol_version);
        Ok(())
    }

    fn send_status_request(&mut self) -> Result<(), QueryError> {
        let packet = Packet::new(STATUS_PACKET_ID)?;
        self.transport.write_all(&packet.encode())?;
        self.state = QueryState::StatusRequested;
        QueryLogger::status_requested(&self.ctx.host);
        Ok(())
    }

    fn read_status_response(&mut self) -> Result<Value, QueryError> {
        let frame = read_frame(&mut self.transport)?;
        QueryLogger::frame_received(frame.len());
        let packet = ClientboundPacket::decode(&frame)?.ok_or(ProtoError::UnexpectedEof)?;
        match packet {
            ClientboundPacket::StatusResponse { data } => Ok(data),
        }
    }
}

/// Connects to `host:port` and runs one status query.
pub fn query_status(host: &str, port: u16, protocol_version: i32) -> Result<Value, QueryError> {
    let transport = TcpTransport::connect(host, port)?;
    let ctx = ConnectionContext::new(host, port).with_protocol_version(protocol_version);
    StatusQuery::new(transport, ctx).run()
}

/// Typed view over the status document. Servers vary in what they fill in,
/// so everything is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerStatus {
    pub version: Option<StatusVersion>,
    pub players: Option<StatusPlayers>,
    #[serde(default)]
    pub description: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusVersion {
    pub name: String,
    pub protocol: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusPlayers {
    pub online: i64,
    pub max: i64,
}

impl ServerStatus {
    pub fn from_value(value: &Value) -> Result<Self, QueryError> {
        serde_json::from_value(value.clone())
            .map_err(|err| ProtoError::InvalidJson(err.to_string()).into())
    }

    /// Plain-text rendering of the description, which servers send either
    /// as a bare string or as a text component object.
    pub fn description_text(&self) -> String {
        match &self.description {
            Value::String(text) => text.clone(),
            Value::Object(component) => component
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            _ => String::new(),
        }
    }
}
