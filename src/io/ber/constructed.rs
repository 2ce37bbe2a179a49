//! The string types BIT STRING, OCTET STRING and the restricted character strings, which may be
//! encoded primitive or constructed from nested segments (ITU-T X.690 | ISO/IEC 8825-1, 8.6,
//! 8.7 and 8.23).

use crate::io::ber::primitive::primitive_len;
use crate::io::ber::{BasicRead, BasicWrite, Identifier, Length};
use crate::io::buf::OctetBuffer;
use crate::io::cursor::OctetCursor;
use crate::io::err::Error;
use crate::model::{Charset, Tag};

const BIT_STRING_MAX_UNUSED_BITS: u8 = 7;

/// Appends the octets of an OCTET STRING or character string to `out`. A constructed encoding
/// is flattened, every segment has to be tagged with `segment_tag`.
pub fn decode_octets(
    cursor: &mut OctetCursor<'_>,
    type_name: &'static str,
    identifier: Identifier,
    length: Length,
    segment_tag: Tag,
    out: &mut Vec<u8>,
) -> Result<(), Error> {
    for_each_segment(
        cursor,
        type_name,
        identifier,
        length,
        segment_tag,
        |content| {
            out.extend_from_slice(content);
            Ok(())
        },
    )
}

/// The constructed elements [`for_each_segment`] is currently inside of
enum Level<'a> {
    /// Reading a view bounded by the definite length, the parent continues after it
    Definite { parent: OctetCursor<'a> },
    /// Reading the view of the enclosing level up to the End-of-Contents octets
    Indefinite,
}

/// Calls `f` with the contents of every primitive segment in order. Nested constructed
/// segments are walked with an explicit stack, so the nesting depth is only bounded by the
/// size of the input.
fn for_each_segment<'a, F: FnMut(&'a [u8]) -> Result<(), Error>>(
    cursor: &mut OctetCursor<'a>,
    type_name: &'static str,
    identifier: Identifier,
    length: Length,
    segment_tag: Tag,
    mut f: F,
) -> Result<(), Error> {
    if !identifier.is_constructed() {
        let len = primitive_len(type_name, identifier, length)?;
        return f(cursor.read_slice(len)?);
    }

    let mut levels = Vec::new();
    let mut current = *cursor;
    enter(&mut levels, &mut current, length)?;

    loop {
        let at_end = match levels.last() {
            None => break,
            Some(Level::Definite { .. }) => current.is_empty(),
            Some(Level::Indefinite) => {
                if current.remaining() < 2 {
                    return Err(Error::unterminated_indefinite());
                }
                current.try_read_end_of_contents()?
            }
        };

        if at_end {
            if let Some(Level::Definite { parent }) = levels.pop() {
                current = parent;
            }
            continue;
        }

        let (identifier, length) = current.read_header(segment_tag)?;
        trace!("{} segment {:?} {:?}", type_name, identifier, length);
        if identifier.is_constructed() {
            enter(&mut levels, &mut current, length)?;
        } else {
            let len = primitive_len(type_name, identifier, length)?;
            f(current.read_slice(len)?)?;
        }
    }

    *cursor = current;
    Ok(())
}

fn enter<'a>(
    levels: &mut Vec<Level<'a>>,
    current: &mut OctetCursor<'a>,
    length: Length,
) -> Result<(), Error> {
    match length {
        Length::Definite(len) => {
            let child = current.sub_view(len)?;
            levels.push(Level::Definite { parent: *current });
            *current = child;
        }
        Length::Indefinite => levels.push(Level::Indefinite),
    }
    Ok(())
}

/// Decodes a character string and validates the concatenated octets against the charset.
/// Nested segments must carry the same tag as the outer element.
pub fn decode_string(
    cursor: &mut OctetCursor<'_>,
    charset: Charset,
    type_name: &'static str,
    identifier: Identifier,
    length: Length,
) -> Result<String, Error> {
    let mut octets = Vec::new();
    decode_octets(
        cursor,
        type_name,
        identifier,
        length,
        identifier.tag,
        &mut octets,
    )?;

    match String::from_utf8(octets) {
        Ok(string) => {
            Error::ensure_string_valid(charset, &string)?;
            Ok(string)
        }
        Err(e) if charset == Charset::Utf8 => {
            trace!("{}: {}", type_name, e);
            Err(Error::invalid_utf8())
        }
        Err(e) => {
            let index = e.utf8_error().valid_up_to();
            let octet = e.as_bytes()[index];
            Err(Error::invalid_string(charset, char::from(octet), index))
        }
    }
}

/// Appends the bits of a BIT STRING to `bytes` and `bit_len`. A constructed encoding is
/// flattened, every segment has to be a universal BIT STRING. The padding bits of the last
/// octet are always cleared.
pub fn decode_bits(
    cursor: &mut OctetCursor<'_>,
    identifier: Identifier,
    length: Length,
    bytes: &mut Vec<u8>,
    bit_len: &mut u64,
) -> Result<(), Error> {
    for_each_segment(
        cursor,
        "BIT STRING",
        identifier,
        length,
        Tag::DEFAULT_BIT_STRING,
        |content| {
            let (unused, octets) = match content.split_first() {
                Some((unused, octets)) => (*unused, octets),
                None => {
                    return Err(Error::framing_violation(
                        "BIT STRING",
                        "the initial octet with the number of unused bits is missing",
                    ))
                }
            };
            if unused > BIT_STRING_MAX_UNUSED_BITS {
                return Err(Error::framing_violation(
                    "BIT STRING",
                    "the number of unused bits must be within 0..=7",
                ));
            }
            if octets.is_empty() && unused != 0 {
                return Err(Error::framing_violation(
                    "BIT STRING",
                    "an empty bit string must not have unused bits",
                ));
            }
            let bits = octets.len() as u64 * 8 - u64::from(unused);
            append_bits(bytes, bit_len, octets, bits);
            Ok(())
        },
    )
}

/// Appends the first `src_bits` bits of `src` right after the first `bit_len` bits of `bytes`
fn append_bits(bytes: &mut Vec<u8>, bit_len: &mut u64, src: &[u8], src_bits: u64) {
    let src = &src[..octets_for_bits(src_bits) as usize];
    let offset = (*bit_len % 8) as u32;

    if offset == 0 {
        bytes.extend_from_slice(src);
    } else {
        for octet in src.iter().copied() {
            if let Some(last) = bytes.last_mut() {
                *last |= octet >> offset;
            }
            bytes.push(octet << (8 - offset));
        }
    }

    *bit_len += src_bits;
    bytes.truncate(octets_for_bits(*bit_len) as usize);
    clear_padding(bytes, *bit_len);
}

#[inline]
fn octets_for_bits(bits: u64) -> u64 {
    bits / 8 + u64::from(bits % 8 != 0)
}

fn clear_padding(bytes: &mut [u8], bit_len: u64) {
    let used = (bit_len % 8) as u32;
    if used != 0 {
        if let Some(last) = bytes.last_mut() {
            *last &= 0xFF_u8 << (8 - used);
        }
    }
}

/// Writes the contents octets of a primitive BIT STRING: the number of unused bits followed by
/// the octets holding the first `bit_len` bits of `bytes`, with the padding bits cleared.
pub fn encode_bits(buffer: &mut OctetBuffer, bytes: &[u8], bit_len: u64) -> Result<(), Error> {
    let octets = octets_for_bits(bit_len);
    if octets > bytes.len() as u64 {
        return Err(Error::range_violation(format!(
            "BIT STRING of {} bits requires {} octets but only {} are given",
            bit_len,
            octets,
            bytes.len()
        )));
    }

    let octets = octets as usize;
    let unused = ((8 - bit_len % 8) % 8) as u8;
    buffer.write_octet(unused);

    let start = buffer.byte_len();
    buffer.write_octets(&bytes[..octets]);
    clear_padding(&mut buffer.buffer[start..], bit_len);
    Ok(())
}

/// The number of contents octets [`encode_bits`] writes
#[inline]
pub fn bits_len(bit_len: u64) -> usize {
    1 + octets_for_bits(bit_len) as usize
}

/// Encodes `bytes` in the constructed form with the indefinite length, split into primitive
/// segments of at most `segment_len` octets. Outer element and segments both carry `tag`.
pub fn write_segmented(
    buffer: &mut OctetBuffer,
    tag: Tag,
    bytes: &[u8],
    segment_len: usize,
) -> Result<(), Error> {
    buffer.write_identifier(Identifier::constructed(tag))?;
    let slot = buffer.reserve_indefinite();
    for segment in bytes.chunks(segment_len.max(1)) {
        buffer.write_identifier(Identifier::primitive(tag))?;
        buffer.write_length(Length::Definite(segment.len()))?;
        buffer.write_octets(segment);
    }
    buffer.finalize_indefinite(slot);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::err::ErrorKind;

    fn octets_of(data: &[u8], segment_tag: Tag) -> Result<(Vec<u8>, usize), Error> {
        let mut cursor = OctetCursor::new(data);
        let identifier = cursor.read_identifier()?;
        let length = cursor.read_length()?;
        let mut out = Vec::new();
        decode_octets(
            &mut cursor,
            "OCTET STRING",
            identifier,
            length,
            segment_tag,
            &mut out,
        )?;
        Ok((out, cursor.position()))
    }

    fn bits_of(data: &[u8]) -> Result<(Vec<u8>, u64), Error> {
        let mut cursor = OctetCursor::new(data);
        let identifier = cursor.read_identifier()?;
        let length = cursor.read_length()?;
        let mut bytes = Vec::new();
        let mut bit_len = 0;
        decode_bits(&mut cursor, identifier, length, &mut bytes, &mut bit_len)?;
        Ok((bytes, bit_len))
    }

    #[test]
    fn test_constructed_indefinite_octets() {
        let data = [
            0x24, 0x80, 0x04, 0x02, b'A', b'B', 0x04, 0x02, b'C', b'D', 0x00, 0x00,
        ];
        let (octets, position) = octets_of(&data, Tag::DEFAULT_OCTET_STRING).unwrap();
        assert_eq!(b"ABCD", &octets[..]);
        assert_eq!(data.len(), position);
    }

    #[test]
    fn test_constructed_definite_nested_octets() {
        let data = [
            0x24, 0x09, 0x04, 0x01, b'A', 0x24, 0x04, 0x04, 0x02, b'B', b'C',
        ];
        let (octets, position) = octets_of(&data, Tag::DEFAULT_OCTET_STRING).unwrap();
        assert_eq!(b"ABC", &octets[..]);
        assert_eq!(data.len(), position);
    }

    #[test]
    fn test_constructed_segment_with_wrong_tag() {
        let data = [0x24, 0x80, 0x0C, 0x01, b'A', 0x00, 0x00];
        assert!(matches!(
            octets_of(&data, Tag::DEFAULT_OCTET_STRING).unwrap_err().kind(),
            ErrorKind::TagMismatch { .. }
        ));
    }

    #[test]
    fn test_constructed_unterminated() {
        let data = [0x24, 0x80, 0x04, 0x01, b'A'];
        assert_eq!(
            ErrorKind::UnterminatedIndefinite,
            *octets_of(&data, Tag::DEFAULT_OCTET_STRING)
                .unwrap_err()
                .kind()
        );
    }

    #[test]
    fn test_bit_string_keeps_bit_length() {
        // 13 bits: 1010 1010 1011 1 with 3 unused bits that are not zero on the wire
        let (bytes, bit_len) = bits_of(&[0x03, 0x03, 0x03, 0xAA, 0xBF]).unwrap();
        assert_eq!(13, bit_len);
        assert_eq!(vec![0xAA, 0xB8], bytes);
    }

    #[test]
    fn test_bit_string_empty() {
        assert_eq!((Vec::new(), 0), bits_of(&[0x03, 0x01, 0x00]).unwrap());
        assert!(bits_of(&[0x03, 0x01, 0x01]).is_err());
        assert!(bits_of(&[0x03, 0x00]).is_err());
        assert!(bits_of(&[0x03, 0x02, 0x08, 0xFF]).is_err());
    }

    #[test]
    fn test_bit_string_segments_concatenate_bitwise() {
        // 3 bits 101 + 6 bits 110011 = 101110011
        let data = [
            0x23, 0x80, 0x03, 0x02, 0x05, 0xA0, 0x03, 0x02, 0x02, 0xCC, 0x00, 0x00,
        ];
        let (bytes, bit_len) = bits_of(&data).unwrap();
        assert_eq!(9, bit_len);
        assert_eq!(vec![0b1011_1001, 0b1000_0000], bytes);
    }

    #[test]
    fn test_encode_bits_clears_padding() {
        let mut buffer = OctetBuffer::default();
        encode_bits(&mut buffer, &[0xAA, 0xBF], 13).unwrap();
        assert_eq!(&[0x03, 0xAA, 0xB8], buffer.content());
        assert_eq!(3, bits_len(13));

        let mut buffer = OctetBuffer::default();
        encode_bits(&mut buffer, &[], 0).unwrap();
        assert_eq!(&[0x00], buffer.content());

        assert!(encode_bits(&mut buffer, &[0xFF], 9).is_err());
    }

    #[test]
    fn test_write_segmented_is_decodable() {
        let mut buffer = OctetBuffer::default();
        write_segmented(&mut buffer, Tag::DEFAULT_IA5_STRING, b"Hello World", 4).unwrap();
        assert_eq!(
            &[0x36, 0x80, 0x16, 0x04, b'H', b'e', b'l', b'l'],
            &buffer.content()[..8]
        );

        let mut cursor = OctetCursor::new(buffer.content());
        let identifier = cursor.read_identifier().unwrap();
        let length = cursor.read_length().unwrap();
        let string =
            decode_string(&mut cursor, Charset::Ia5, "IA5String", identifier, length).unwrap();
        assert_eq!("Hello World", string);
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_decode_string_charset() {
        let data = [0x19, 0x02, b'a', 0x07];
        let mut cursor = OctetCursor::new(&data[..]);
        let identifier = cursor.read_identifier().unwrap();
        let length = cursor.read_length().unwrap();
        assert_eq!(
            ErrorKind::InvalidString(Charset::Graphic, '\u{07}', 1),
            *decode_string(&mut cursor, Charset::Graphic, "GraphicString", identifier, length)
                .unwrap_err()
                .kind()
        );

        let data = [0x16, 0x02, b'a', 0xC3];
        let mut cursor = OctetCursor::new(&data[..]);
        let identifier = cursor.read_identifier().unwrap();
        let length = cursor.read_length().unwrap();
        assert!(matches!(
            decode_string(&mut cursor, Charset::Ia5, "IA5String", identifier, length)
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidString(Charset::Ia5, _, 1)
        ));

        let data = [0x0C, 0x01, 0xFF];
        let mut cursor = OctetCursor::new(&data[..]);
        let identifier = cursor.read_identifier().unwrap();
        let length = cursor.read_length().unwrap();
        assert_eq!(
            ErrorKind::InvalidUtf8,
            *decode_string(&mut cursor, Charset::Utf8, "UTF8String", identifier, length)
                .unwrap_err()
                .kind()
        );
    }

    #[test]
    fn test_deeply_nested_octets() {
        let depth = 20_000;
        let mut data = Vec::new();
        for _ in 0..depth {
            data.extend_from_slice(&[0x24, 0x80]);
        }
        data.extend_from_slice(&[0x04, 0x01, b'A']);
        for _ in 0..depth {
            data.extend_from_slice(&[0x00, 0x00]);
        }
        let (octets, position) = octets_of(&data, Tag::DEFAULT_OCTET_STRING).unwrap();
        assert_eq!(b"A", &octets[..]);
        assert_eq!(data.len(), position);

        data.truncate(data.len() - 2);
        assert_eq!(
            ErrorKind::UnterminatedIndefinite,
            *octets_of(&data, Tag::DEFAULT_OCTET_STRING)
                .unwrap_err()
                .kind()
        );
    }

    #[test]
    fn test_deeply_nested_definite_bits() {
        // every level wraps the previous one with a one octet length
        let mut data = vec![0x03, 0x02, 0x00, 0xA5];
        for _ in 0..60 {
            let mut outer = vec![0x23, data.len() as u8];
            outer.append(&mut data);
            data = outer;
            if data.len() > 127 {
                break;
            }
        }
        let (bytes, bit_len) = bits_of(&data).unwrap();
        assert_eq!(vec![0xA5], bytes);
        assert_eq!(8, bit_len);
    }

    #[test]
    fn test_encode_bits_with_huge_bit_length() {
        let mut buffer = OctetBuffer::default();
        assert!(matches!(
            encode_bits(&mut buffer, &[0xFF], u64::MAX).unwrap_err().kind(),
            ErrorKind::RangeViolation(_)
        ));
        assert!(buffer.content().is_empty());
        assert_eq!(u64::MAX / 8 + 1, octets_for_bits(u64::MAX));
    }
}
