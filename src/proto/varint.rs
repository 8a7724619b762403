use super::error::{ProtoError, Result};

/// Maximum encoded length of a protocol varint. Values are bounded to 32
/// bits, so a fifth byte only ever carries the top four bits.
pub const MAX_VARINT_LEN: usize = 5;

/// Reads one complete varint from the front of `input`, advancing the slice
/// past it.
#[inline]
pub fn read_varint(input: &mut &[u8]) -> Result<i32> {
    let Some((value, len)) = read_varint_partial(input)? else {
        return Err(ProtoError::UnexpectedEof);
    };
    *input = &input[len..];
    Ok(value)
}

/// Scans a varint without consuming input. Returns the decoded value and the
/// number of bytes it occupied, or `None` if `input` ends before the
/// terminating byte (a proper prefix of a longer encoding).
///
/// Sign handling is plain two's complement: groups are accumulated into a
/// `u32` and reinterpreted, so a pattern with bit 31 set comes back negative.
#[inline]
pub fn read_varint_partial(input: &[u8]) -> Result<Option<(i32, usize)>> {
    let mut value: u32 = 0;
    for i in 0..MAX_VARINT_LEN {
        if i >= input.len() {
            return Ok(None);
        }

        let byte = input[i];
        value |= ((byte & 0x7f) as u32) << (i * 7);
        if (byte & 0x80) == 0 {
            return Ok(Some((value as i32, i + 1)));
        }
    }

    Err(ProtoError::VarIntTooLarge)
}

/// True iff `buf` holds a complete varint, i.e. its last byte has the
/// continuation bit clear. Only meaningful when `buf` starts at a varint
/// boundary; used by the framed reader while accumulating a length prefix
/// one byte at a time.
#[inline]
pub fn varint_complete(buf: &[u8]) -> bool {
    match buf.last() {
        Some(byte) => (byte & 0x80) == 0,
        None => false,
    }
}

/// Appends the canonical varint encoding of `value` to `out`. Negative
/// values encode their 32-bit two's-complement pattern, always 5 bytes.
#[inline]
pub fn write_varint(out: &mut Vec<u8>, value: i32) {
    let mut val = value as u32;
    loop {
        if (val & 0xffff_ff80) == 0 {
            out.push(val as u8);
            return;
        }
        out.push((val as u8 & 0x7f) | 0x80);
        val >>= 7;
    }
}

/// Encoded length of `value` without allocating.
#[inline]
pub fn varint_len(value: i32) -> usize {
    let mut val = value as u32;
    let mut count = 1;
    while (val & 0xffff_ff80) != 0 {
        count += 1;
        val >>= 7;
    }
    count
}
