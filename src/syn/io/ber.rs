use crate::io::ber::constructed::{decode_bits, decode_octets, decode_string, encode_bits};
use crate::io::ber::primitive::{
    decode_boolean, decode_integer, decode_null, decode_object_identifier, encode_boolean,
    encode_integer, encode_object_identifier, primitive_content,
};
use crate::io::ber::real::{decode_real, encode_real};
use crate::io::ber::{BasicRead, BasicWrite, Identifier, Length};
use crate::io::buf::OctetBuffer;
use crate::io::cursor::OctetCursor;
use crate::io::err::Error;
use crate::model::{Charset, Tag};
use crate::prelude::*;

#[derive(Default)]
pub struct BerWriter {
    buffer: OctetBuffer,
}

impl BerWriter {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: OctetBuffer::with_capacity(capacity),
        }
    }

    pub fn byte_content(&self) -> &[u8] {
        self.buffer.content()
    }

    pub fn into_bytes_vec(self) -> Vec<u8> {
        self.buffer.into()
    }

    /// Gives access to the underlying buffer, to write elements with the codecs of
    /// [`crate::io::ber`] directly
    pub fn buffer_mut(&mut self) -> &mut OctetBuffer {
        &mut self.buffer
    }

    /// Writes a definite length primitive element, `content` writes the contents octets
    fn write_primitive<F: FnOnce(&mut OctetBuffer) -> Result<(), Error>>(
        &mut self,
        tag: Tag,
        content: F,
    ) -> Result<(), Error> {
        let start = self.buffer.byte_len();
        let result = self
            .buffer
            .write_identifier(Identifier::primitive(tag))
            .and_then(|_| {
                let slot = self.buffer.reserve_length();
                content(&mut self.buffer)?;
                self.buffer.finalize_length(slot)
            });
        if result.is_err() {
            self.buffer.truncate(start);
        }
        result
    }

    /// Writes a definite length constructed element, `content` writes the nested elements
    fn write_constructed<F: FnOnce(&mut Self) -> Result<(), Error>>(
        &mut self,
        tag: Tag,
        content: F,
    ) -> Result<(), Error> {
        let start = self.buffer.byte_len();
        let result = self
            .buffer
            .write_identifier(Identifier::constructed(tag))
            .and_then(|_| {
                let slot = self.buffer.reserve_length();
                content(self)?;
                self.buffer.finalize_length(slot)
            });
        if result.is_err() {
            self.buffer.truncate(start);
        }
        result
    }

    fn write_string(&mut self, charset: Charset, tag: Tag, value: &str) -> Result<(), Error> {
        Error::ensure_string_valid(charset, value)?;
        self.write_primitive(tag, |buffer| {
            buffer.write_octets(value.as_bytes());
            Ok(())
        })
    }
}

impl Writer for BerWriter {
    type Error = Error;

    #[inline]
    fn write_sequence<C: sequence::Constraint, F: Fn(&mut Self) -> Result<(), Self::Error>>(
        &mut self,
        f: F,
    ) -> Result<(), Self::Error> {
        self.write_constructed(C::TAG, |w| f(w))
    }

    #[inline]
    fn write_choice<C: choice::Constraint>(&mut self, choice: &C) -> Result<(), Self::Error> {
        choice.write_content(self)
    }

    #[inline]
    fn write_opt<T: WritableType>(
        &mut self,
        value: Option<&<T as WritableType>::Type>,
    ) -> Result<(), Self::Error> {
        if let Some(value) = value {
            T::write_value(self, value)
        } else {
            Ok(())
        }
    }

    #[inline]
    fn write_explicit<C: common::Constraint, T: WritableType>(
        &mut self,
        value: &T::Type,
    ) -> Result<(), Self::Error> {
        self.write_constructed(C::TAG, |w| T::write_value(w, value))
    }

    fn write_any(&mut self, value: &[u8]) -> Result<(), Self::Error> {
        let mut cursor = OctetCursor::new(value);
        let raw = cursor.read_raw_value()?;
        if !cursor.is_empty() {
            return Err(Error::framing_violation(
                "ANY",
                "the value must be exactly one complete element",
            ));
        }
        self.buffer.write_octets(raw);
        Ok(())
    }

    #[inline]
    fn write_number<T: numbers::Number, C: numbers::Constraint<T>>(
        &mut self,
        value: T,
    ) -> Result<(), Self::Error> {
        let value = value.to_i64().ok_or_else(|| {
            Error::range_violation(format!("{} exceeds the range of INTEGER", value))
        })?;
        if !numbers::is_within::<T, C>(value) {
            return Err(Error::range_violation(format!(
                "{} is not within {:?}..={:?}",
                value,
                C::MIN,
                C::MAX
            )));
        }
        self.write_primitive(C::TAG, |buffer| {
            encode_integer(buffer, value);
            Ok(())
        })
    }

    #[inline]
    fn write_real<C: real::Constraint>(&mut self, value: f64) -> Result<(), Self::Error> {
        self.write_primitive(C::TAG, |buffer| encode_real(buffer, value))
    }

    #[inline]
    fn write_null<C: null::Constraint>(&mut self, _value: &Null) -> Result<(), Self::Error> {
        self.write_primitive(C::TAG, |_| Ok(()))
    }

    #[inline]
    fn write_object_identifier<C: oid::Constraint>(
        &mut self,
        value: &ObjectIdentifier,
    ) -> Result<(), Self::Error> {
        self.write_primitive(C::TAG, |buffer| {
            encode_object_identifier(buffer, value.arcs())
        })
    }

    #[inline]
    fn write_utf8string<C: utf8string::Constraint>(
        &mut self,
        value: &str,
    ) -> Result<(), Self::Error> {
        self.write_string(Charset::Utf8, C::TAG, value)
    }

    #[inline]
    fn write_ia5string<C: ia5string::Constraint>(
        &mut self,
        value: &str,
    ) -> Result<(), Self::Error> {
        self.write_string(Charset::Ia5, C::TAG, value)
    }

    #[inline]
    fn write_graphic_string<C: graphicstring::Constraint>(
        &mut self,
        value: &str,
    ) -> Result<(), Self::Error> {
        self.write_string(Charset::Graphic, C::TAG, value)
    }

    #[inline]
    fn write_octet_string<C: octetstring::Constraint>(
        &mut self,
        value: &[u8],
    ) -> Result<(), Self::Error> {
        self.write_primitive(C::TAG, |buffer| {
            buffer.write_octets(value);
            Ok(())
        })
    }

    #[inline]
    fn write_bit_string<C: bitstring::Constraint>(
        &mut self,
        value: &[u8],
        bit_len: u64,
    ) -> Result<(), Self::Error> {
        self.write_primitive(C::TAG, |buffer| encode_bits(buffer, value, bit_len))
    }

    #[inline]
    fn write_boolean<C: boolean::Constraint>(&mut self, value: bool) -> Result<(), Self::Error> {
        self.write_primitive(C::TAG, |buffer| {
            encode_boolean(buffer, value);
            Ok(())
        })
    }
}

impl From<BerWriter> for Vec<u8> {
    fn from(writer: BerWriter) -> Self {
        writer.into_bytes_vec()
    }
}

pub struct BerReader<'a> {
    cursor: OctetCursor<'a>,
}

impl<'a> BerReader<'a> {
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self {
            cursor: OctetCursor::new(bytes),
        }
    }

    #[inline]
    pub const fn bytes_remaining(&self) -> usize {
        self.cursor.remaining()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.cursor.is_empty()
    }

    #[inline]
    pub fn cursor(&self) -> &OctetCursor<'a> {
        &self.cursor
    }

    #[inline]
    pub fn into_cursor(self) -> OctetCursor<'a> {
        self.cursor
    }

    /// Reads the header of the next element, which must have the given tag
    fn read_header(&mut self, tag: Tag) -> Result<(Identifier, Length), Error> {
        let (identifier, length) = self.cursor.read_header(tag)?;
        trace!(
            "{:?} {:?} at {}",
            identifier,
            length,
            self.cursor.absolute_position()
        );
        Ok((identifier, length))
    }

    /// Reads the header of a constructed element and calls `f` with this reader limited to the
    /// contents of the element. All contents must be consumed by `f`.
    fn read_constructed<T, F: FnOnce(&mut Self) -> Result<T, Error>>(
        &mut self,
        type_name: &'static str,
        tag: Tag,
        f: F,
    ) -> Result<T, Error> {
        let (identifier, length) = self.read_header(tag)?;
        if !identifier.is_constructed() {
            return Err(Error::framing_violation(
                type_name,
                "the primitive encoding is not allowed",
            ));
        }
        let view = self.cursor.sub_view_for(length)?;
        self.scoped(view, f)
    }

    /// Calls `f` with this reader limited to the given view, the view must be fully consumed
    fn scoped<T, F: FnOnce(&mut Self) -> Result<T, Error>>(
        &mut self,
        view: OctetCursor<'a>,
        f: F,
    ) -> Result<T, Error> {
        let parent = core::mem::replace(&mut self.cursor, view);
        let result = f(self);
        let view = core::mem::replace(&mut self.cursor, parent);
        let value = result?;
        if view.is_empty() {
            Ok(value)
        } else {
            Err(Error::trailing_data(view.remaining()))
        }
    }

    fn read_primitive(&mut self, type_name: &'static str, tag: Tag) -> Result<&'a [u8], Error> {
        let (identifier, length) = self.read_header(tag)?;
        primitive_content(&mut self.cursor, type_name, identifier, length)
    }

    fn read_string(
        &mut self,
        charset: Charset,
        type_name: &'static str,
        tag: Tag,
    ) -> Result<String, Error> {
        let (identifier, length) = self.read_header(tag)?;
        decode_string(&mut self.cursor, charset, type_name, identifier, length)
    }
}

impl<'a> From<OctetCursor<'a>> for BerReader<'a> {
    fn from(cursor: OctetCursor<'a>) -> Self {
        Self { cursor }
    }
}

impl<'a> Reader for BerReader<'a> {
    type Error = Error;

    #[inline]
    fn read_sequence<
        C: sequence::Constraint,
        S: Sized,
        F: Fn(&mut Self) -> Result<S, Self::Error>,
    >(
        &mut self,
        f: F,
    ) -> Result<S, Self::Error> {
        self.read_constructed(C::NAME, C::TAG, |r| f(r))
    }

    #[inline]
    fn read_choice<C: choice::Constraint>(&mut self) -> Result<C, Self::Error> {
        if self.cursor.is_empty() {
            return Err(Error::unexpected_choice_tag(C::NAME, None));
        }
        let tag = self.cursor.peek_identifier()?.tag;
        let index =
            C::index_of(tag).ok_or_else(|| Error::unexpected_choice_tag(C::NAME, Some(tag)))?;
        trace!("{} alternative {} with {:?}", C::NAME, index, tag);
        C::read_content(index, self)?
            .ok_or_else(|| Error::unexpected_choice_tag(C::NAME, Some(tag)))
    }

    #[inline]
    fn read_opt<T: ReadableType + TaggedType>(
        &mut self,
    ) -> Result<Option<<T as ReadableType>::Type>, Self::Error> {
        if self.cursor.is_empty() || self.cursor.peek_identifier()?.tag != T::TAG {
            Ok(None)
        } else {
            T::read_value(self).map(Some)
        }
    }

    #[inline]
    fn read_explicit<C: common::Constraint, T: ReadableType>(
        &mut self,
    ) -> Result<T::Type, Self::Error> {
        self.read_constructed("explicit tag", C::TAG, T::read_value)
    }

    #[inline]
    fn read_any(&mut self) -> Result<Vec<u8>, Self::Error> {
        self.cursor.read_raw_value().map(<[u8]>::to_vec)
    }

    #[inline]
    fn read_number<T: numbers::Number, C: numbers::Constraint<T>>(
        &mut self,
    ) -> Result<T, Self::Error> {
        let value = decode_integer(self.read_primitive("INTEGER", C::TAG)?)?;
        if !numbers::is_within::<T, C>(value) {
            return Err(Error::range_violation(format!(
                "{} is not within {:?}..={:?}",
                value,
                C::MIN,
                C::MAX
            )));
        }
        T::from_i64(value).ok_or_else(|| {
            Error::range_violation(format!(
                "{} does not fit into {}",
                value,
                core::any::type_name::<T>()
            ))
        })
    }

    #[inline]
    fn read_real<C: real::Constraint>(&mut self) -> Result<f64, Self::Error> {
        decode_real(self.read_primitive("REAL", C::TAG)?)
    }

    #[inline]
    fn read_null<C: null::Constraint>(&mut self) -> Result<Null, Self::Error> {
        decode_null(self.read_primitive("NULL", C::TAG)?).map(Null::from)
    }

    #[inline]
    fn read_object_identifier<C: oid::Constraint>(
        &mut self,
    ) -> Result<ObjectIdentifier, Self::Error> {
        decode_object_identifier(self.read_primitive("OBJECT IDENTIFIER", C::TAG)?)
            .map(ObjectIdentifier::from)
    }

    #[inline]
    fn read_utf8string<C: utf8string::Constraint>(&mut self) -> Result<String, Self::Error> {
        self.read_string(Charset::Utf8, "UTF8String", C::TAG)
    }

    #[inline]
    fn read_ia5string<C: ia5string::Constraint>(&mut self) -> Result<String, Self::Error> {
        self.read_string(Charset::Ia5, "IA5String", C::TAG)
    }

    #[inline]
    fn read_graphic_string<C: graphicstring::Constraint>(
        &mut self,
    ) -> Result<String, Self::Error> {
        self.read_string(Charset::Graphic, "GraphicString", C::TAG)
    }

    #[inline]
    fn read_octet_string<C: octetstring::Constraint>(&mut self) -> Result<Vec<u8>, Self::Error> {
        let (identifier, length) = self.read_header(C::TAG)?;
        let mut octets = Vec::new();
        decode_octets(
            &mut self.cursor,
            "OCTET STRING",
            identifier,
            length,
            Tag::DEFAULT_OCTET_STRING,
            &mut octets,
        )?;
        Ok(octets)
    }

    #[inline]
    fn read_bit_string<C: bitstring::Constraint>(
        &mut self,
    ) -> Result<(Vec<u8>, u64), Self::Error> {
        let (identifier, length) = self.read_header(C::TAG)?;
        let mut bytes = Vec::new();
        let mut bit_len = 0;
        decode_bits(&mut self.cursor, identifier, length, &mut bytes, &mut bit_len)?;
        Ok((bytes, bit_len))
    }

    #[inline]
    fn read_boolean<C: boolean::Constraint>(&mut self) -> Result<bool, Self::Error> {
        decode_boolean(self.read_primitive("BOOLEAN", C::TAG)?)
    }
}
