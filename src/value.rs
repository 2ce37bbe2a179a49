//! Untyped entry points: decode the next element as a [`ValueType`] chosen at runtime, or encode
//! a [`Value`] under any tag.

use crate::io::ber::constructed::{decode_bits, decode_octets, decode_string, encode_bits};
use crate::io::ber::primitive::{
    decode_boolean, decode_integer, decode_null, decode_object_identifier, encode_boolean,
    encode_integer, encode_object_identifier, primitive_content,
};
use crate::io::ber::real::{decode_real, encode_real};
use crate::io::ber::{BasicRead, BasicWrite, Identifier, Length, PC};
use crate::io::buf::OctetBuffer;
use crate::io::cursor::OctetCursor;
use crate::io::err::Error;
use crate::model::{Charset, Class, Tag};
use crate::syn::io::{BerReader, BerWriter};
use crate::syn::{sequence, BitVec, External, ObjectIdentifier};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Boolean,
    Integer,
    Real,
    Null,
    ObjectIdentifier,
    BitString,
    OctetString,
    Ia5String,
    Utf8String,
    GraphicString,
    ObjectDescriptor,
    External,
}

impl ValueType {
    pub const fn default_tag(self) -> Tag {
        match self {
            ValueType::Boolean => Tag::DEFAULT_BOOLEAN,
            ValueType::Integer => Tag::DEFAULT_INTEGER,
            ValueType::Real => Tag::DEFAULT_REAL,
            ValueType::Null => Tag::DEFAULT_NULL,
            ValueType::ObjectIdentifier => Tag::DEFAULT_OBJECT_IDENTIFIER,
            ValueType::BitString => Tag::DEFAULT_BIT_STRING,
            ValueType::OctetString => Tag::DEFAULT_OCTET_STRING,
            ValueType::Ia5String => Tag::DEFAULT_IA5_STRING,
            ValueType::Utf8String => Tag::DEFAULT_UTF8_STRING,
            ValueType::GraphicString => Tag::DEFAULT_GRAPHIC_STRING,
            ValueType::ObjectDescriptor => Tag::DEFAULT_OBJECT_DESCRIPTOR,
            ValueType::External => Tag::DEFAULT_EXTERNAL,
        }
    }

    /// The type of a universal tag, if it is one of the supported types
    pub fn from_universal(tag: Tag) -> Option<Self> {
        Some(match tag {
            Tag::DEFAULT_BOOLEAN => ValueType::Boolean,
            Tag::DEFAULT_INTEGER => ValueType::Integer,
            Tag::DEFAULT_REAL => ValueType::Real,
            Tag::DEFAULT_NULL => ValueType::Null,
            Tag::DEFAULT_OBJECT_IDENTIFIER => ValueType::ObjectIdentifier,
            Tag::DEFAULT_BIT_STRING => ValueType::BitString,
            Tag::DEFAULT_OCTET_STRING => ValueType::OctetString,
            Tag::DEFAULT_IA5_STRING => ValueType::Ia5String,
            Tag::DEFAULT_UTF8_STRING => ValueType::Utf8String,
            Tag::DEFAULT_GRAPHIC_STRING => ValueType::GraphicString,
            Tag::DEFAULT_OBJECT_DESCRIPTOR => ValueType::ObjectDescriptor,
            Tag::DEFAULT_EXTERNAL => ValueType::External,
            _ => return None,
        })
    }

    pub const fn name(self) -> &'static str {
        match self {
            ValueType::Boolean => "BOOLEAN",
            ValueType::Integer => "INTEGER",
            ValueType::Real => "REAL",
            ValueType::Null => "NULL",
            ValueType::ObjectIdentifier => "OBJECT IDENTIFIER",
            ValueType::BitString => "BIT STRING",
            ValueType::OctetString => "OCTET STRING",
            ValueType::Ia5String => "IA5String",
            ValueType::Utf8String => "UTF8String",
            ValueType::GraphicString => "GraphicString",
            ValueType::ObjectDescriptor => "ObjectDescriptor",
            ValueType::External => "EXTERNAL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Null,
    ObjectIdentifier(ObjectIdentifier),
    BitString(BitVec),
    OctetString(Vec<u8>),
    Ia5String(String),
    Utf8String(String),
    GraphicString(String),
    ObjectDescriptor(String),
    External(External),
}

impl Value {
    pub const fn value_type(&self) -> ValueType {
        match self {
            Value::Boolean(_) => ValueType::Boolean,
            Value::Integer(_) => ValueType::Integer,
            Value::Real(_) => ValueType::Real,
            Value::Null => ValueType::Null,
            Value::ObjectIdentifier(_) => ValueType::ObjectIdentifier,
            Value::BitString(_) => ValueType::BitString,
            Value::OctetString(_) => ValueType::OctetString,
            Value::Ia5String(_) => ValueType::Ia5String,
            Value::Utf8String(_) => ValueType::Utf8String,
            Value::GraphicString(_) => ValueType::GraphicString,
            Value::ObjectDescriptor(_) => ValueType::ObjectDescriptor,
            Value::External(_) => ValueType::External,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Boolean(value) => write!(f, "{}", if *value { "TRUE" } else { "FALSE" }),
            Value::Integer(value) => write!(f, "{}", value),
            Value::Real(value) => write!(f, "{}", value),
            Value::Null => write!(f, "NULL"),
            Value::ObjectIdentifier(oid) => write!(f, "{{ {} }}", oid),
            Value::BitString(bits) => {
                write!(f, "'")?;
                for bit in 0..bits.bit_len() {
                    write!(f, "{}", if bits.is_bit_set(bit) { '1' } else { '0' })?;
                }
                write!(f, "'B")
            }
            Value::OctetString(octets) => {
                write!(f, "'")?;
                for octet in octets {
                    write!(f, "{:02X}", octet)?;
                }
                write!(f, "'H")
            }
            Value::Ia5String(string)
            | Value::Utf8String(string)
            | Value::GraphicString(string)
            | Value::ObjectDescriptor(string) => write!(f, "{:?}", string),
            Value::External(external) => write!(f, "{:?}", external),
        }
    }
}

/// Reads the identifier and length of the next element and decodes its contents as `value_type`.
/// The tag is not checked, so implicitly tagged values can be decoded as well.
pub fn decode_value(cursor: &mut OctetCursor<'_>, value_type: ValueType) -> Result<Value, Error> {
    let identifier = cursor.read_identifier()?;
    let length = cursor.read_length()?;
    trace!("{:?} {:?} as {:?}", identifier, length, value_type);
    if Length::Indefinite == length && !identifier.is_constructed() {
        return Err(Error::framing_violation(
            value_type.name(),
            "the indefinite length form is only allowed for constructed encodings",
        ));
    }
    decode_content(cursor, identifier, length, value_type)
}

/// Decodes the contents of an element whose identifier and length octets were already read
pub fn decode_content(
    cursor: &mut OctetCursor<'_>,
    identifier: Identifier,
    length: Length,
    value_type: ValueType,
) -> Result<Value, Error> {
    let name = value_type.name();
    Ok(match value_type {
        ValueType::Boolean => Value::Boolean(decode_boolean(primitive_content(
            cursor, name, identifier, length,
        )?)?),
        ValueType::Integer => Value::Integer(decode_integer(primitive_content(
            cursor, name, identifier, length,
        )?)?),
        ValueType::Real => Value::Real(decode_real(primitive_content(
            cursor, name, identifier, length,
        )?)?),
        ValueType::Null => {
            decode_null(primitive_content(cursor, name, identifier, length)?)?;
            Value::Null
        }
        ValueType::ObjectIdentifier => Value::ObjectIdentifier(ObjectIdentifier::from(
            decode_object_identifier(primitive_content(cursor, name, identifier, length)?)?,
        )),
        ValueType::BitString => {
            let mut bytes = Vec::new();
            let mut bit_len = 0;
            decode_bits(cursor, identifier, length, &mut bytes, &mut bit_len)?;
            Value::BitString(BitVec::from_bytes(bytes, bit_len))
        }
        ValueType::OctetString => {
            let mut octets = Vec::new();
            decode_octets(
                cursor,
                name,
                identifier,
                length,
                Tag::DEFAULT_OCTET_STRING,
                &mut octets,
            )?;
            Value::OctetString(octets)
        }
        ValueType::Ia5String => Value::Ia5String(decode_string(
            cursor,
            Charset::Ia5,
            name,
            identifier,
            length,
        )?),
        ValueType::Utf8String => Value::Utf8String(decode_string(
            cursor,
            Charset::Utf8,
            name,
            identifier,
            length,
        )?),
        ValueType::GraphicString => Value::GraphicString(decode_string(
            cursor,
            Charset::Graphic,
            name,
            identifier,
            length,
        )?),
        ValueType::ObjectDescriptor => Value::ObjectDescriptor(decode_string(
            cursor,
            Charset::Graphic,
            name,
            identifier,
            length,
        )?),
        ValueType::External => {
            if !identifier.is_constructed() {
                return Err(Error::framing_violation(
                    name,
                    "the primitive encoding is not allowed",
                ));
            }
            let mut reader = BerReader::from(cursor.sub_view_for(length)?);
            let external = <External as sequence::Constraint>::read_seq(&mut reader)?;
            if !reader.is_empty() {
                return Err(Error::trailing_data(reader.bytes_remaining()));
            }
            Value::External(external)
        }
    })
}

/// Writes the identifier with the given class and number, the length and the contents of the
/// value. The length is always definite. On failure the buffer is left as it was before the
/// call.
pub fn encode_value(
    buffer: &mut OctetBuffer,
    class: Class,
    number: usize,
    value: &Value,
) -> Result<(), Error> {
    let start = buffer.byte_len();
    let result = encode_element(buffer, Tag::new(class, number), value);
    if result.is_err() {
        buffer.truncate(start);
    }
    result
}

fn encode_element(buffer: &mut OctetBuffer, tag: Tag, value: &Value) -> Result<(), Error> {
    let pc = if let Value::External(_) = value {
        PC::Constructed
    } else {
        PC::Primitive
    };
    buffer.write_identifier(Identifier { tag, pc })?;
    let slot = buffer.reserve_length();
    match value {
        Value::Boolean(value) => encode_boolean(buffer, *value),
        Value::Integer(value) => encode_integer(buffer, *value),
        Value::Real(value) => encode_real(buffer, *value)?,
        Value::Null => {}
        Value::ObjectIdentifier(oid) => encode_object_identifier(buffer, oid.arcs())?,
        Value::BitString(bits) => encode_bits(buffer, bits.as_byte_slice(), bits.bit_len())?,
        Value::OctetString(octets) => buffer.write_octets(octets),
        Value::Ia5String(string) => write_string(buffer, Charset::Ia5, string)?,
        Value::Utf8String(string) => write_string(buffer, Charset::Utf8, string)?,
        Value::GraphicString(string) | Value::ObjectDescriptor(string) => {
            write_string(buffer, Charset::Graphic, string)?
        }
        Value::External(external) => {
            let mut writer = BerWriter::default();
            <External as sequence::Constraint>::write_seq(external, &mut writer)?;
            buffer.write_octets(writer.byte_content());
        }
    }
    buffer.finalize_length(slot)
}

fn write_string(buffer: &mut OctetBuffer, charset: Charset, string: &str) -> Result<(), Error> {
    Error::ensure_string_valid(charset, string)?;
    buffer.write_octets(string.as_bytes());
    Ok(())
}
