
use test_utils::*;

#[test]
fn test_octet_string_indefinite_segments() {
    let data = [
        0x24, 0x80, 0x04, 0x02, b'A', b'B', 0x04, 0x02, b'C', b'D', 0x00, 0x00,
    ];
    let mut reader = BerReader::new(&data[..]);
    assert_eq!(
        b"ABCD".to_vec(),
        <OctetString>::read_value(&mut reader).unwrap()
    );
    assert!(reader.is_empty());
}

#[test]
fn test_octet_string_nested_segments() {
    let data = [
        0x24, 0x0A, 0x24, 0x80, 0x04, 0x01, 0x01, 0x00, 0x00, 0x04, 0x01, 0x02,
    ];
    assert_eq!(
        Value::OctetString(vec![0x01, 0x02]),
        decode(&data, ValueType::OctetString).unwrap()
    );
}

#[test]
fn test_octet_string_long_form_length() {
    let octets = vec![0x5A; 300];
    let mut writer = BerWriter::default();
    <OctetString>::write_value(&mut writer, &octets).unwrap();
    assert_eq!(&[0x04, 0x82, 0x01, 0x2C], &writer.byte_content()[..4]);
    assert_eq!(304, writer.byte_content().len());

    let mut reader = BerReader::new(writer.byte_content());
    assert_eq!(octets, <OctetString>::read_value(&mut reader).unwrap());
}

#[test]
fn test_utf8_string_segments_use_outer_tag() {
    let data = [
        0x2C, 0x80, 0x0C, 0x02, b'A', b'B', 0x0C, 0x02, b'C', b'D', 0x00, 0x00,
    ];
    let mut reader = BerReader::new(&data[..]);
    assert_eq!("ABCD", <Utf8String>::read_value(&mut reader).unwrap());

    let data = [0x2C, 0x04, 0x04, 0x02, b'A', b'B'];
    let mut reader = BerReader::new(&data[..]);
    assert!(matches!(
        <Utf8String>::read_value(&mut reader).unwrap_err().kind(),
        ErrorKind::TagMismatch { .. }
    ));
}

#[test]
fn test_utf8_string() {
    let mut writer = BerWriter::default();
    <Utf8String>::write_value(&mut writer, &"grün".to_string()).unwrap();
    assert_eq!(
        &[0x0C, 0x05, b'g', b'r', 0xC3, 0xBC, b'n'],
        writer.byte_content()
    );

    assert_eq!(
        &ErrorKind::InvalidUtf8,
        decode(&[0x0C, 0x02, 0xC3, 0x28], ValueType::Utf8String)
            .unwrap_err()
            .kind()
    );
}

#[test]
fn test_ia5_string() {
    assert_eq!(
        Value::Ia5String("hello".to_string()),
        decode(b"\x16\x05hello", ValueType::Ia5String).unwrap()
    );
    assert_eq!(
        &ErrorKind::InvalidString(Charset::Ia5, char::from(0xE4), 2),
        decode(&[0x16, 0x03, b'h', b'a', 0xE4], ValueType::Ia5String)
            .unwrap_err()
            .kind()
    );

    let mut writer = BerWriter::default();
    assert!(matches!(
        <Ia5String>::write_value(&mut writer, &"ä".to_string())
            .unwrap_err()
            .kind(),
        ErrorKind::InvalidString(Charset::Ia5, 'ä', 0)
    ));
}

#[test]
fn test_graphic_string_rejects_control_characters() {
    assert_eq!(
        Value::GraphicString("a b".to_string()),
        decode(b"\x19\x03a b", ValueType::GraphicString).unwrap()
    );
    assert!(matches!(
        decode(b"\x19\x02a\n", ValueType::GraphicString)
            .unwrap_err()
            .kind(),
        ErrorKind::InvalidString(Charset::Graphic, '\n', 1)
    ));
}

#[test]
fn test_bit_string_keeps_13_bits() {
    let bits = BitVec::from_bytes(vec![0xAB, 0xCD], 13);
    let mut writer = BerWriter::default();
    <BitString>::write_value(&mut writer, &bits).unwrap();
    assert_eq!(&[0x03, 0x03, 0x03, 0xAB, 0xC8], writer.byte_content());

    let mut reader = BerReader::new(writer.byte_content());
    let decoded = <BitString>::read_value(&mut reader).unwrap();
    assert_eq!(13, decoded.bit_len());
    assert_eq!(bits, decoded);
}

#[test]
fn test_bit_string_empty() {
    let mut writer = BerWriter::default();
    <BitString>::write_value(&mut writer, &BitVec::default()).unwrap();
    assert_eq!(&[0x03, 0x01, 0x00], writer.byte_content());
    assert_eq!(
        Value::BitString(BitVec::default()),
        decode(&[0x03, 0x01, 0x00], ValueType::BitString).unwrap()
    );
}

#[test]
fn test_bit_string_constructed() {
    let data = [
        0x23, 0x80, 0x03, 0x02, 0x04, 0xF0, 0x03, 0x02, 0x04, 0xF0, 0x00, 0x00,
    ];
    match decode(&data, ValueType::BitString).unwrap() {
        Value::BitString(bits) => {
            assert_eq!(8, bits.bit_len());
            assert_eq!(&[0xFF], bits.as_byte_slice());
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_bit_string_illegal_unused_bits() {
    assert!(is_framing_violation(
        &decode(&[0x03, 0x02, 0x08, 0x00], ValueType::BitString).unwrap_err()
    ));
    assert!(is_framing_violation(
        &decode(&[0x03, 0x01, 0x01], ValueType::BitString).unwrap_err()
    ));
    assert!(is_framing_violation(
        &decode(&[0x03, 0x00], ValueType::BitString).unwrap_err()
    ));
}
