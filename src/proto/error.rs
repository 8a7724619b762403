/// Protocol decode/encode error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtoError {
    #[error("unexpected end of stream")]
    UnexpectedEof,
    #[error("varint did not terminate within 5 bytes")]
    VarIntTooLarge,
    #[error("negative length prefix: {0}")]
    NegativeLength(i32),
    #[error("packet of {len} bytes exceeds the frame limit")]
    PacketTooLarge { len: usize },
    #[error("length {actual} exceeds limit {max}")]
    LengthTooLarge { max: usize, actual: usize },
    #[error("string of {actual} chars exceeds limit {max}")]
    StringTooLong { max: usize, actual: usize },
    #[error("string field is not valid UTF-8")]
    InvalidUtf8,
    #[error("{0} trailing bytes after packet body")]
    TrailingBytes(usize),
    #[error("unknown clientbound packet id {0:#04x}")]
    UnknownPacketId(i32),
    #[error("malformed status document: {0}")]
    InvalidJson(String),
}

pub type Result<T> = std::result::Result<T, ProtoError>;
