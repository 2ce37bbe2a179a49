//! Contents octets of the primitive types BOOLEAN, INTEGER, NULL and OBJECT IDENTIFIER.
//!
//! The decoders receive the already framed contents octets, the encoders only append contents
//! octets. Identifier and length octets are handled by the caller.

use crate::io::ber::{write_base128, Identifier, Length};
use crate::io::buf::OctetBuffer;
use crate::io::cursor::OctetCursor;
use crate::io::err::Error;
use byteorder::{ByteOrder, NetworkEndian};

const BOOLEAN_TRUE: u8 = 0xFF;
const BOOLEAN_FALSE: u8 = 0x00;

const SUBIDENTIFIER_CONTINUATION_BIT: u8 = 0b1_0000000;
const SUBIDENTIFIER_MASK: u8 = 0b0_1111111;

/// Ensures the element is encoded primitive with a definite length and returns that length
pub fn primitive_len(
    type_name: &'static str,
    identifier: Identifier,
    length: Length,
) -> Result<usize, Error> {
    if identifier.is_constructed() {
        return Err(Error::framing_violation(
            type_name,
            "the constructed encoding is not allowed",
        ));
    }
    match length {
        Length::Definite(length) => Ok(length),
        Length::Indefinite => Err(Error::framing_violation(
            type_name,
            "the indefinite length form is not allowed",
        )),
    }
}

/// Borrows the contents octets of a primitive element whose header was already consumed
#[inline]
pub fn primitive_content<'a>(
    cursor: &mut OctetCursor<'a>,
    type_name: &'static str,
    identifier: Identifier,
    length: Length,
) -> Result<&'a [u8], Error> {
    let length = primitive_len(type_name, identifier, length)?;
    cursor.read_slice(length)
}

/// ITU-T X.690 | ISO/IEC 8825-1, 8.2: a single octet, where zero is `false` and any other value
/// is `true`
pub fn decode_boolean(content: &[u8]) -> Result<bool, Error> {
    match content {
        [octet] => Ok(*octet != BOOLEAN_FALSE),
        _ => Err(Error::framing_violation(
            "BOOLEAN",
            "the length of the contents must be 1",
        )),
    }
}

#[inline]
pub fn encode_boolean(buffer: &mut OctetBuffer, value: bool) {
    buffer.write_octet(if value { BOOLEAN_TRUE } else { BOOLEAN_FALSE });
}

/// ITU-T X.690 | ISO/IEC 8825-1, 8.3: big-endian two's complement in at least one octet.
///
/// Redundant leading sign octets are tolerated, but the value must fit into an `i64`.
pub fn decode_integer(content: &[u8]) -> Result<i64, Error> {
    if content.is_empty() {
        return Err(Error::framing_violation(
            "INTEGER",
            "at least one contents octet is required",
        ));
    }

    let mut content = content;
    while content.len() > std::mem::size_of::<i64>() && is_redundant_sign(content[0], content[1])
    {
        content = &content[1..];
    }

    if content.len() > std::mem::size_of::<i64>() {
        return Err(Error::range_violation(format!(
            "INTEGER with {} significant octets does not fit into 64 bits",
            content.len()
        )));
    }

    Ok(NetworkEndian::read_int(content, content.len()))
}

/// ITU-T X.690 | ISO/IEC 8825-1, 8.3.2: the minimal two's complement representation. Positive
/// values whose most significant bit would be set get a leading zero octet.
pub fn encode_integer(buffer: &mut OctetBuffer, value: i64) {
    let bytes = value.to_be_bytes();
    let mut offset = 0;
    while offset < bytes.len() - 1 && is_redundant_sign(bytes[offset], bytes[offset + 1]) {
        offset += 1;
    }
    buffer.write_octets(&bytes[offset..]);
}

/// The number of contents octets [`encode_integer`] writes for the given value
pub fn integer_len(value: i64) -> usize {
    let bytes = value.to_be_bytes();
    let mut offset = 0;
    while offset < bytes.len() - 1 && is_redundant_sign(bytes[offset], bytes[offset + 1]) {
        offset += 1;
    }
    bytes.len() - offset
}

#[inline]
const fn is_redundant_sign(first: u8, second: u8) -> bool {
    (first == 0x00 && second & 0x80 == 0) || (first == 0xFF && second & 0x80 != 0)
}

/// ITU-T X.690 | ISO/IEC 8825-1, 8.8: no contents octets at all
pub fn decode_null(content: &[u8]) -> Result<(), Error> {
    if content.is_empty() {
        Ok(())
    } else {
        Err(Error::framing_violation(
            "NULL",
            "the contents must be empty",
        ))
    }
}

/// ITU-T X.690 | ISO/IEC 8825-1, 8.19: a list of subidentifiers, each encoded in groups of 7
/// bits. The first subidentifier combines the first two arcs as `arc0 * 40 + arc1`.
pub fn decode_object_identifier(content: &[u8]) -> Result<Vec<u64>, Error> {
    if content.is_empty() {
        return Err(Error::framing_violation(
            "OBJECT IDENTIFIER",
            "at least one contents octet is required",
        ));
    }

    let mut subidentifiers = Vec::with_capacity(content.len() + 1);
    let mut value = 0_u64;
    let mut started = false;

    for octet in content.iter().copied() {
        if !started && octet == SUBIDENTIFIER_CONTINUATION_BIT {
            // 8.19.2
            return Err(Error::framing_violation(
                "OBJECT IDENTIFIER",
                "the leading octet of a subidentifier must not be 0x80",
            ));
        }
        if value > (u64::MAX >> 7) {
            return Err(Error::range_violation(
                "OBJECT IDENTIFIER subidentifier exceeds 64 bits",
            ));
        }
        value = (value << 7) | u64::from(octet & SUBIDENTIFIER_MASK);
        started = octet & SUBIDENTIFIER_CONTINUATION_BIT != 0;
        if !started {
            subidentifiers.push(value);
            value = 0;
        }
    }

    if started {
        return Err(Error::framing_violation(
            "OBJECT IDENTIFIER",
            "the last subidentifier is not terminated",
        ));
    }

    let first = subidentifiers[0];
    let (arc0, arc1) = if first < 80 {
        (first / 40, first % 40)
    } else {
        (2, first - 80)
    };

    let mut arcs = Vec::with_capacity(subidentifiers.len() + 1);
    arcs.push(arc0);
    arcs.push(arc1);
    arcs.extend_from_slice(&subidentifiers[1..]);
    Ok(arcs)
}

/// See [`decode_object_identifier`]
pub fn encode_object_identifier(buffer: &mut OctetBuffer, arcs: &[u64]) -> Result<(), Error> {
    let first = first_subidentifier(arcs)?;
    write_base128(buffer, first);
    for arc in &arcs[2..] {
        write_base128(buffer, *arc);
    }
    Ok(())
}

fn first_subidentifier(arcs: &[u64]) -> Result<u64, Error> {
    match arcs {
        [arc0 @ 0..=1, arc1, ..] if *arc1 < 40 => Ok(arc0 * 40 + arc1),
        [0..=1, arc1, ..] => Err(Error::range_violation(format!(
            "second arc {} of OBJECT IDENTIFIER must be less than 40",
            arc1
        ))),
        [2, arc1, ..] => arc1.checked_add(80).ok_or_else(|| {
            Error::range_violation("second arc of OBJECT IDENTIFIER exceeds 64 bits")
        }),
        [arc0, _, ..] => Err(Error::range_violation(format!(
            "first arc {} of OBJECT IDENTIFIER must be 0, 1 or 2",
            arc0
        ))),
        _ => Err(Error::range_violation(
            "OBJECT IDENTIFIER requires at least two arcs",
        )),
    }
}
