use serde_json::json;

use super::{
    error::ProtoError,
    fields::{read_string_bounded, read_u16_be, write_string_bounded, write_u16_be},
    message::{FieldKind, FieldValue, Message},
    packet::{ClientboundPacket, Packet, STATUS_PACKET_ID},
    varint::{read_varint, read_varint_partial, varint_complete, varint_len, write_varint},
};

fn encode_varint(value: i32) -> Vec<u8> {
    let mut buf = Vec::new();
    write_varint(&mut buf, value);
    buf
}

#[test]
fn varint_roundtrip() {
    let values = [
        0,
        1,
        2,
        127,
        128,
        255,
        25_565,
        2_147_483_647,
        -1,
        -255,
        -2_147_483_648,
    ];
    for value in values {
        let buf = encode_varint(value);
        let mut slice = buf.as_slice();
        let decoded = read_varint(&mut slice).unwrap();
        assert_eq!(decoded, value);
        assert!(slice.is_empty());

        let (partial, consumed) = read_varint_partial(&buf).unwrap().unwrap();
        assert_eq!(partial, value);
        assert_eq!(consumed, buf.len());
    }
}

#[test]
fn varint_encoded_lengths() {
    let table = [
        (0, 1),
        (127, 1),
        (128, 2),
        (16_383, 2),
        (16_384, 3),
        (2_097_151, 3),
        (2_097_152, 4),
        (268_435_455, 4),
        (268_435_456, 5),
        (-1, 5),
    ];
    for (value, expected) in table {
        assert_eq!(encode_varint(value).len(), expected, "value {value}");
        assert_eq!(varint_len(value), expected, "value {value}");
    }
}

#[test]
fn varint_complete_only_after_final_byte() {
    for value in [300, 2_097_152, -1] {
        let buf = encode_varint(value);
        for end in 1..buf.len() {
            assert!(!varint_complete(&buf[..end]));
            assert_eq!(read_varint_partial(&buf[..end]).unwrap(), None);
        }
        assert!(varint_complete(&buf));
    }
    assert!(!varint_complete(&[]));
}

#[test]
fn varint_five_continuation_bytes_is_an_error() {
    let buf = [0x80u8, 0x80, 0x80, 0x80, 0x80];
    assert_eq!(
        read_varint_partial(&buf),
        Err(ProtoError::VarIntTooLarge)
    );
    let mut slice = buf.as_slice();
    assert_eq!(read_varint(&mut slice), Err(ProtoError::VarIntTooLarge));
}

#[test]
fn varint_truncated_input_is_eof() {
    let mut slice: &[u8] = &[0x80];
    assert_eq!(read_varint(&mut slice), Err(ProtoError::UnexpectedEof));
}

#[test]
fn string_roundtrip() {
    for value in ["", "example.com", "zömbie piglin ⛏"] {
        let mut buf = Vec::new();
        write_string_bounded(&mut buf, value, 255).unwrap();
        let mut slice = buf.as_slice();
        let decoded = read_string_bounded(&mut slice, 255).unwrap();
        assert_eq!(decoded, value);
        assert!(slice.is_empty());
    }
}

#[test]
fn string_length_counts_bytes_not_chars() {
    let mut buf = Vec::new();
    write_string_bounded(&mut buf, "ö", 255).unwrap();
    assert_eq!(buf, [0x02, 0xC3, 0xB6]);
}

#[test]
fn string_rejects_invalid_utf8() {
    let mut slice: &[u8] = &[0x02, 0xFF, 0xFE];
    assert_eq!(
        read_string_bounded(&mut slice, 255),
        Err(ProtoError::InvalidUtf8)
    );
}

#[test]
fn string_rejects_over_cap() {
    let long = "a".repeat(17);
    let mut buf = Vec::new();
    assert_eq!(
        write_string_bounded(&mut buf, &long, 16),
        Err(ProtoError::StringTooLong {
            max: 16,
            actual: 17
        })
    );
}

#[test]
fn u16_roundtrip() {
    let mut buf = Vec::new();
    write_u16_be(&mut buf, 25_565);
    assert_eq!(buf, [0x63, 0xDD]);
    let mut slice = buf.as_slice();
    assert_eq!(read_u16_be(&mut slice).unwrap(), 25_565);
}

#[test]
fn message_concatenates_fields_in_append_order() {
    let message = Message::new()
        .append(FieldValue::VarInt(498))
        .unwrap()
        .append(FieldValue::UnsignedShort(25_565))
        .unwrap();
    assert_eq!(message.fields().len(), 2);
    assert_eq!(message.fields()[0].kind(), FieldKind::VarInt);
    assert_eq!(message.fields()[1].kind(), FieldKind::UnsignedShort);
    assert_eq!(message.encode(), [0xF2, 0x03, 0x63, 0xDD]);
}

#[test]
fn empty_message_encodes_to_nothing() {
    assert_eq!(Message::new().encode(), Vec::<u8>::new());
}

#[test]
fn handshake_packet_bytes() {
    let message = Message::new()
        .append(FieldValue::VarInt(498))
        .unwrap()
        .append(FieldValue::String("example.com"))
        .unwrap()
        .append(FieldValue::UnsignedShort(25_565))
        .unwrap()
        .append(FieldValue::VarInt(1))
        .unwrap();
    let packet = Packet::with_payload(STATUS_PACKET_ID, &message).unwrap();
    assert_eq!(packet.body_len(), 18);

    let mut expected = vec![0x12, 0x00, 0xF2, 0x03, 0x0B];
    expected.extend_from_slice(b"example.com");
    expected.extend_from_slice(&[0x63, 0xDD, 0x01]);
    assert_eq!(packet.encode(), expected);
}

#[test]
fn empty_packet_is_length_then_id() {
    let packet = Packet::new(STATUS_PACKET_ID).unwrap();
    assert_eq!(packet.body_len(), 1);
    assert_eq!(packet.encode(), [0x01, 0x00]);
}

#[test]
fn packet_encode_is_deterministic() {
    let message = Message::new()
        .append(FieldValue::String("hello"))
        .unwrap();
    let packet = Packet::with_payload(STATUS_PACKET_ID, &message).unwrap();
    assert_eq!(packet.encode(), packet.encode());
}

#[test]
fn status_response_roundtrip() {
    let document = json!({"version": {"name": "1.14.4", "protocol": 498}});
    let text = document.to_string();
    let message = Message::new().append(FieldValue::String(&text)).unwrap();
    let packet = Packet::with_payload(STATUS_PACKET_ID, &message).unwrap();

    let encoded = packet.encode();
    let (frame_len, prefix_len) = read_varint_partial(&encoded).unwrap().unwrap();
    let body = &encoded[prefix_len..];
    assert_eq!(body.len(), frame_len as usize);

    match ClientboundPacket::decode(body).unwrap().unwrap() {
        ClientboundPacket::StatusResponse { data } => assert_eq!(data, document),
    }
}

#[test]
fn decode_empty_json_object() {
    let raw = [0x00, 0x02, 0x7B, 0x7D];
    match ClientboundPacket::decode(&raw).unwrap().unwrap() {
        ClientboundPacket::StatusResponse { data } => assert_eq!(data, json!({})),
    }
}

#[test]
fn decode_empty_body_is_none() {
    assert_eq!(ClientboundPacket::decode(&[]), Ok(None));
}

#[test]
fn decode_unknown_packet_id() {
    let raw = [0x05, 0x02, 0x7B, 0x7D];
    assert_eq!(
        ClientboundPacket::decode(&raw),
        Err(ProtoError::UnknownPacketId(0x05))
    );
}

#[test]
fn decode_rejects_trailing_bytes() {
    let raw = [0x00, 0x02, 0x7B, 0x7D, 0xAA];
    assert_eq!(
        ClientboundPacket::decode(&raw),
        Err(ProtoError::TrailingBytes(1))
    );
}

#[test]
fn decode_rejects_malformed_json() {
    let raw = [0x00, 0x02, b'{', b'x'];
    assert!(matches!(
        ClientboundPacket::decode(&raw),
        Err(ProtoError::InvalidJson(_))
    ));
}

#[test]
fn decode_truncated_string_is_eof() {
    // Length prefix promises 3 bytes, only 2 follow.
    let raw = [0x00, 0x03, 0x7B, 0x7D];
    assert_eq!(
        ClientboundPacket::decode(&raw),
        Err(ProtoError::UnexpectedEof)
    );
}
