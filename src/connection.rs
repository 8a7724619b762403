use std::{
    io::{ErrorKind, Read, Write},
    net::TcpStream,
};

use crate::{
    logging::QueryLogger,
    proto::{read_varint, varint_complete, ProtoError, MAX_PACKET_SIZE, MAX_VARINT_LEN},
    query::QueryError,
};

/// Blocking byte-stream transport the protocol sequencer runs against.
///
/// Every call blocks until it completes or the underlying stream errors;
/// there is no timeout at this layer. Callers wanting a deadline set one on
/// the stream before handing it over.
pub trait Transport {
    fn write_all(&mut self, bytes: &[u8]) -> std::io::Result<()>;
    fn read_byte(&mut self) -> std::io::Result<u8>;
    fn read_exact(&mut self, n: usize) -> std::io::Result<Vec<u8>>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write_all(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        (**self).write_all(bytes)
    }

    fn read_byte(&mut self) -> std::io::Result<u8> {
        (**self).read_byte()
    }

    fn read_exact(&mut self, n: usize) -> std::io::Result<Vec<u8>> {
        (**self).read_exact(n)
    }
}

/// TCP transport over a blocking [`TcpStream`].
#[derive(Debug)]
pub struct TcpTransport {
    stream: TcpStream,
}

impl TcpTransport {
    pub fn connect(host: &str, port: u16) -> Result<Self, QueryError> {
        let address = format!("{host}:{port}");
        QueryLogger::connecting(&address);
        let stream = TcpStream::connect((host, port)).map_err(|source| QueryError::Connect {
            address: address.clone(),
            source,
        })?;
        if let Err(err) = stream.set_nodelay(true) {
            QueryLogger::tcp_nodelay_failed(&err);
        }
        QueryLogger::connected(&address);
        Ok(Self { stream })
    }

    pub fn into_inner(self) -> TcpStream {
        self.stream
    }
}

impl Transport for TcpTransport {
    fn write_all(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        self.stream.write_all(bytes)
    }

    fn read_byte(&mut self) -> std::io::Result<u8> {
        let mut byte = [0u8; 1];
        self.stream.read_exact(&mut byte)?;
        Ok(byte[0])
    }

    fn read_exact(&mut self, n: usize) -> std::io::Result<Vec<u8>> {
        let mut buf = vec![0u8; n];
        self.stream.read_exact(&mut buf)?;
        Ok(buf)
    }
}

/// Reads one length-prefixed frame and returns its body (length prefix
/// stripped, packet id still in place).
///
/// The frame length is unknown until the prefix terminates, so the prefix
/// is scanned one byte at a time into a bounded buffer, checking the
/// continuation bit after each byte. Five continuation bytes is a framing
/// error, not a longer read.
pub fn read_frame<T: Transport>(transport: &mut T) -> Result<Vec<u8>, QueryError> {
    let mut prefix = [0u8; MAX_VARINT_LEN];
    let mut filled = 0;
    while filled < MAX_VARINT_LEN {
        prefix[filled] = transport.read_byte().map_err(map_stream_err)?;
        filled += 1;
        if varint_complete(&prefix[..filled]) {
            break;
        }
    }

    let mut scan = &prefix[..filled];
    let len = read_varint(&mut scan)?;
    if len < 0 {
        return Err(ProtoError::NegativeLength(len).into());
    }

    let len = len as usize;
    if len > MAX_PACKET_SIZE {
        return Err(ProtoError::PacketTooLarge { len }.into());
    }

    transport.read_exact(len).map_err(map_stream_err)
}

/// A stream that ends mid-frame is a framing error, never a short result.
fn map_stream_err(err: std::io::Error) -> QueryError {
    if err.kind() == ErrorKind::UnexpectedEof {
        ProtoError::UnexpectedEof.into()
    } else {
        QueryError::Transport(err)
    }
}
