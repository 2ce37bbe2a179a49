
use test_utils::*;

#[test]
fn test_boolean() {
    for value in [true, false] {
        let mut writer = BerWriter::default();
        <Boolean>::write_value(&mut writer, &value).unwrap();
        assert_eq!(
            &[0x01, 0x01, if value { 0xFF } else { 0x00 }],
            writer.byte_content()
        );

        let mut reader = BerReader::new(writer.byte_content());
        assert_eq!(value, <Boolean>::read_value(&mut reader).unwrap());
    }
}

#[test]
fn test_boolean_true_from_any_non_zero() {
    for value in 1..=u8::MAX {
        let data = [0x01, 0x01, value];
        let mut reader = BerReader::new(&data[..]);
        assert!(<Boolean>::read_value(&mut reader).unwrap());
    }
}

#[test]
fn test_integer_300() {
    assert_eq!(
        vec![0x02, 0x02, 0x01, 0x2C],
        encode(Class::Universal, 2, &Value::Integer(300))
    );
    assert_eq!(
        Value::Integer(300),
        decode(&[0x02, 0x02, 0x01, 0x2C], ValueType::Integer).unwrap()
    );
}

#[test]
fn test_integer_minimal_encoding() {
    for (value, content) in [
        (0_i64, &[0x00][..]),
        (127, &[0x7F][..]),
        (128, &[0x00, 0x80][..]),
        (-1, &[0xFF][..]),
        (-128, &[0x80][..]),
        (-129, &[0xFF, 0x7F][..]),
        (
            i64::MIN,
            &[0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00][..],
        ),
        (
            i64::MAX,
            &[0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF][..],
        ),
    ] {
        let bytes = encode(Class::Universal, 2, &Value::Integer(value));
        assert_eq!(content, &bytes[2..], "{}", value);
        assert_eq!(Value::Integer(value), decode(&bytes, ValueType::Integer).unwrap());
    }
}

#[test]
fn test_integer_exceeding_64_bits() {
    assert!(matches!(
        decode(
            &[0x02, 0x09, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
            ValueType::Integer
        )
        .unwrap_err()
        .kind(),
        ErrorKind::RangeViolation(_)
    ));
}

#[test]
fn test_integer_into_narrow_types() {
    let mut reader = BerReader::new(&[0x02, 0x01, 0xFF, 0x02, 0x02, 0x00, 0xFF][..]);
    assert_eq!(-1_i8, <Integer<i8>>::read_value(&mut reader).unwrap());
    assert_eq!(255_u8, <Integer<u8>>::read_value(&mut reader).unwrap());
    assert!(reader.is_empty());

    let mut reader = BerReader::new(&[0x02, 0x01, 0xFF][..]);
    assert!(matches!(
        <Integer<u32>>::read_value(&mut reader).unwrap_err().kind(),
        ErrorKind::RangeViolation(_)
    ));
}

#[test]
fn test_integer_with_wrong_tag() {
    let mut reader = BerReader::new(&[0x01, 0x01, 0xFF][..]);
    assert_eq!(
        &ErrorKind::TagMismatch {
            expected: Tag::DEFAULT_INTEGER,
            got: Tag::DEFAULT_BOOLEAN,
        },
        <Integer<i64>>::read_value(&mut reader).unwrap_err().kind()
    );
}

#[test]
fn test_null() {
    let mut writer = BerWriter::default();
    <NullT>::write_value(&mut writer, &Null).unwrap();
    assert_eq!(&[0x05, 0x00], writer.byte_content());
    assert!(is_framing_violation(
        &decode(&[0x05, 0x01, 0x00], ValueType::Null).unwrap_err()
    ));
}

#[test]
fn test_object_identifier() {
    let oid = "1.2.840.113549".parse::<ObjectIdentifier>().unwrap();
    let bytes = encode(Class::Universal, 6, &Value::ObjectIdentifier(oid.clone()));
    assert_eq!(
        vec![0x06, 0x06, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D],
        bytes
    );
    assert_eq!(
        Value::ObjectIdentifier(oid),
        decode(&bytes, ValueType::ObjectIdentifier).unwrap()
    );
}

#[test]
fn test_object_identifier_large_second_arc() {
    let oid = ObjectIdentifier::from(vec![2, 999, 3]);
    let mut writer = BerWriter::default();
    <ObjectIdentifierT>::write_value(&mut writer, &oid).unwrap();
    assert_eq!(&[0x06, 0x03, 0x88, 0x37, 0x03], writer.byte_content());
    assert_eq!(oid, deserialize_oid(writer.byte_content()));
    assert_eq!("2.999.3", oid.to_string());
}

fn deserialize_oid(data: &[u8]) -> ObjectIdentifier {
    let mut reader = BerReader::new(data);
    <ObjectIdentifierT>::read_value(&mut reader).unwrap()
}

#[test]
fn test_object_identifier_illegal_first_arcs() {
    for arcs in [vec![3, 1], vec![0, 40], vec![1]] {
        let mut writer = BerWriter::default();
        assert!(
            <ObjectIdentifierT>::write_value(&mut writer, &ObjectIdentifier::from(arcs.clone()))
                .is_err(),
            "{:?}",
            arcs
        );
    }
}

#[test]
fn test_real() {
    let mut writer = BerWriter::default();
    <Real>::write_value(&mut writer, &1.0).unwrap();
    <Real>::write_value(&mut writer, &0.0).unwrap();
    <Real>::write_value(&mut writer, &f64::NEG_INFINITY).unwrap();
    assert_eq!(
        &[0x09, 0x03, 0x80, 0x00, 0x01, 0x09, 0x00, 0x09, 0x01, 0x41],
        writer.byte_content()
    );

    let mut reader = BerReader::new(writer.byte_content());
    assert_eq!(1.0, <Real>::read_value(&mut reader).unwrap());
    assert_eq!(0.0, <Real>::read_value(&mut reader).unwrap());
    assert_eq!(f64::NEG_INFINITY, <Real>::read_value(&mut reader).unwrap());
}

#[test]
fn test_real_round_trips() {
    for value in [
        0.1,
        -2.5,
        1e300,
        -1e-200,
        f64::MAX,
        f64::MIN_POSITIVE,
        f64::EPSILON,
        core::f64::consts::PI,
    ] {
        let bytes = encode(Class::Universal, 9, &Value::Real(value));
        match decode(&bytes, ValueType::Real).unwrap() {
            Value::Real(decoded) => assert_eq!(value.to_bits(), decoded.to_bits()),
            other => panic!("unexpected {:?}", other),
        }
    }
}

#[test]
fn test_real_decimal_and_nan() {
    assert_eq!(
        Value::Real(-12.25),
        decode(b"\x09\x07\x02-12,25", ValueType::Real).unwrap()
    );
    match decode(&[0x09, 0x01, 0x42], ValueType::Real).unwrap() {
        Value::Real(value) => assert!(value.is_nan()),
        other => panic!("unexpected {:?}", other),
    }
}
