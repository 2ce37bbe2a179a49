//! This module contains the traits and codecs to encode and decode the framing and the
//! primitive values of the Basic Encoding Rules (BER) according to ITU-T X.690.

#![allow(clippy::unusual_byte_groupings)]

pub mod constructed;
pub mod primitive;
pub mod real;

use crate::io::buf::{minimal_octet_count, OctetBuffer};
use crate::io::cursor::OctetCursor;
use crate::io::err::Error;
use crate::model::{Class, Tag};
use byteorder::{ByteOrder, NetworkEndian};

const CLASS_BITS_SHIFT: u8 = 6;
const PC_BIT_CONSTRUCTED: u8 = 0b00_1_00000;
const TAG_NUMBER_MASK: u8 = 0b00_0_11111;
const TAG_NUMBER_LONG_FORM: u8 = 0b00_0_11111;
const TAG_NUMBER_SHORT_MAX_VALUE: usize = 30;
const TAG_CONTINUATION_BIT: u8 = 0b1_0000000;
const TAG_CONTINUATION_MASK: u8 = 0b0_1111111;

const LENGTH_SHORT_MAX_VALUE: usize = 127;
const LENGTH_BIT_MASK: u8 = 0b1_0000000;
const LENGTH_BIT_SHORT_FORM: u8 = 0b0_0000000;
const LENGTH_BIT_LONG_FORM: u8 = 0b1_0000000;
const LENGTH_INDEFINITE: u8 = 0b1_0000000;
const LENGTH_RESERVED: u8 = 0b1_1111111;
const LENGTH_MAX_OCTETS: usize = 4;

/// ITU-T X.690 | ISO/IEC 8825-1, 8.1.2.5, whether the contents octets are the value itself or
/// further nested elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PC {
    Primitive = 0,
    Constructed,
}

impl From<bool> for PC {
    fn from(v: bool) -> Self {
        match v {
            false => Self::Primitive,
            true => Self::Constructed,
        }
    }
}

/// The content of the identifier octets: the tag and whether the encoding is constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    pub tag: Tag,
    pub pc: PC,
}

impl Identifier {
    #[inline]
    pub const fn primitive(tag: Tag) -> Self {
        Self {
            tag,
            pc: PC::Primitive,
        }
    }

    #[inline]
    pub const fn constructed(tag: Tag) -> Self {
        Self {
            tag,
            pc: PC::Constructed,
        }
    }

    #[inline]
    pub const fn is_constructed(&self) -> bool {
        matches!(self.pc, PC::Constructed)
    }
}

/// ITU-T X.690 | ISO/IEC 8825-1, 8.1.3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Length {
    Definite(usize),
    Indefinite,
}

/// According to ITU-T X.690
pub trait BasicRead {
    /// According to ITU-T X.690, chapter 8.1.2, the identifier octets contain the class, the
    /// primitive/constructed flag and the number of the tag. Tag numbers greater than 30 are
    /// encoded in subsequent octets with 7 bits each (8.1.2.4).
    fn read_identifier(&mut self) -> Result<Identifier, Error>;

    /// Same as [`BasicRead::read_identifier`], but without consuming the identifier octets
    fn peek_identifier(&self) -> Result<Identifier, Error>;

    /// According to ITU-T X.690, chapter 8.1.3, the length is encoded in at least one byte, in
    /// either the short (8.1.3.4), long (8.1.3.5) or indefinite (8.1.3.6) form
    fn read_length(&mut self) -> Result<Length, Error>;

    /// Reads the identifier and length octets, expecting the given tag
    fn read_header(&mut self, expected: Tag) -> Result<(Identifier, Length), Error> {
        let identifier = self.peek_identifier()?;
        if identifier.tag != expected {
            return Err(Error::tag_mismatch(expected, identifier.tag));
        }
        let identifier = self.read_identifier()?;
        let length = self.read_length()?;
        if Length::Indefinite == length && !identifier.is_constructed() {
            return Err(Error::framing_violation(
                "primitive encoding",
                "the indefinite length form is only allowed for constructed encodings",
            ));
        }
        Ok((identifier, length))
    }
}

/// According to ITU-T X.690
pub trait BasicWrite {
    /// According to ITU-T X.690, chapter 8.1.2, the identifier octets contain the class, the
    /// primitive/constructed flag and the number of the tag.
    fn write_identifier(&mut self, identifier: Identifier) -> Result<(), Error>;

    /// According to ITU-T X.690, chapter 8.1.3, the length is encoded in at least one byte, in
    /// either the short (8.1.3.4), long (8.1.3.5) or indefinite (8.1.3.6) form
    fn write_length(&mut self, length: Length) -> Result<(), Error>;
}

impl<'a> BasicRead for OctetCursor<'a> {
    fn read_identifier(&mut self) -> Result<Identifier, Error> {
        let octet = self.read()?;
        let class = Class::from_bits(octet >> CLASS_BITS_SHIFT);
        let pc = PC::from(octet & PC_BIT_CONSTRUCTED != 0);

        let number = if octet & TAG_NUMBER_MASK == TAG_NUMBER_LONG_FORM {
            let mut number = 0_usize;
            loop {
                let octet = self.read()?;
                if number > (usize::MAX >> 7) {
                    return Err(Error::range_violation(
                        "tag number exceeds the native integer width",
                    ));
                }
                number = (number << 7) | usize::from(octet & TAG_CONTINUATION_MASK);
                if octet & TAG_CONTINUATION_BIT == 0 {
                    break number;
                }
            }
        } else {
            usize::from(octet & TAG_NUMBER_MASK)
        };

        Ok(Identifier {
            tag: Tag::new(class, number),
            pc,
        })
    }

    #[inline]
    fn peek_identifier(&self) -> Result<Identifier, Error> {
        let mut copy = *self;
        copy.read_identifier()
    }

    fn read_length(&mut self) -> Result<Length, Error> {
        let octet = self.read()?;
        if octet & LENGTH_BIT_MASK == LENGTH_BIT_SHORT_FORM {
            return Ok(Length::Definite(usize::from(octet & !LENGTH_BIT_MASK)));
        }

        match octet {
            LENGTH_INDEFINITE => Ok(Length::Indefinite),
            LENGTH_RESERVED => Err(Error::framing_violation(
                "length",
                "the value 0xFF is reserved for future use (8.1.3.5 c)",
            )),
            _ => {
                let byte_len = usize::from(octet & !LENGTH_BIT_MASK);
                if byte_len > LENGTH_MAX_OCTETS {
                    return Err(Error::range_violation(format!(
                        "long form length with {} octets, at most {} are supported",
                        byte_len, LENGTH_MAX_OCTETS
                    )));
                }
                let bytes = self.read_slice(byte_len)?;
                Ok(Length::Definite(
                    NetworkEndian::read_uint(bytes, byte_len) as usize
                ))
            }
        }
    }
}

impl BasicWrite for OctetBuffer {
    fn write_identifier(&mut self, identifier: Identifier) -> Result<(), Error> {
        let Identifier { tag, pc } = identifier;
        let mut identifier_octet = tag.class().bits() << CLASS_BITS_SHIFT;
        if let PC::Constructed = pc {
            identifier_octet |= PC_BIT_CONSTRUCTED;
        }

        let number = tag.value();
        if number <= TAG_NUMBER_SHORT_MAX_VALUE {
            self.write_octet(identifier_octet | number as u8);
        } else {
            self.write_octet(identifier_octet | TAG_NUMBER_LONG_FORM);
            write_base128(self, number as u64);
        }
        Ok(())
    }

    fn write_length(&mut self, length: Length) -> Result<(), Error> {
        match length {
            Length::Indefinite => self.write_octet(LENGTH_INDEFINITE),
            Length::Definite(length) if length <= LENGTH_SHORT_MAX_VALUE => {
                // short form 8.1.3.4
                self.write_octet(LENGTH_BIT_SHORT_FORM | length as u8)
            }
            Length::Definite(length) => {
                // long form 8.1.3.5
                if length > u32::MAX as usize {
                    return Err(Error::range_violation(format!(
                        "length {} exceeds the supported {} length octets",
                        length, LENGTH_MAX_OCTETS
                    )));
                }
                let len_bytes = minimal_octet_count(length as u64);
                let mut bytes = [0u8; LENGTH_MAX_OCTETS];
                NetworkEndian::write_uint(&mut bytes[..len_bytes], length as u64, len_bytes);
                self.write_octet(LENGTH_BIT_LONG_FORM | len_bytes as u8);
                self.write_octets(&bytes[..len_bytes]);
            }
        }
        Ok(())
    }
}

/// Writes the value in groups of 7 bits, most significant group first, with the continuation
/// bit set on all but the last octet (ITU-T X.690, 8.1.2.4.2 and 8.19.2).
pub(crate) fn write_base128(buffer: &mut OctetBuffer, value: u64) {
    let groups = ((u64::BITS - value.leading_zeros() + 6) / 7).max(1);
    for group in (0..groups).rev() {
        let mut octet = ((value >> (group * 7)) as u8) & TAG_CONTINUATION_MASK;
        if group != 0 {
            octet |= TAG_CONTINUATION_BIT;
        }
        buffer.write_octet(octet);
    }
}
