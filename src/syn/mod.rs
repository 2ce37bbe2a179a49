//! Type definitions and the [`Reader`] and [`Writer`] traits connecting them to an encoding.
//!
//! Each ASN.1 type is described by a zero sized definition type like [`Boolean`] or
//! [`OctetString`], whose constraint parameter supplies the tag (and therefore implicit
//! tagging). Message types built from these definitions implement [`Readable`] and
//! [`Writable`], see [`External`] for an example.

use crate::model::Tag;

pub mod any;
pub mod bitstring;
pub mod boolean;
pub mod choice;
pub mod common;
pub mod explicit;
pub mod external;
pub mod graphicstring;
pub mod ia5string;
pub mod io;
pub mod null;
pub mod numbers;
pub mod octetstring;
pub mod oid;
pub mod optional;
pub mod real;
pub mod sequence;
pub mod utf8string;

pub use any::Any;
pub use bitstring::BitString;
pub use bitstring::BitVec;
pub use boolean::Boolean;
pub use choice::Choice;
pub use explicit::Explicit;
pub use external::External;
pub use external::ExternalEncoding;
pub use graphicstring::GraphicString;
pub use ia5string::Ia5String;
pub use null::Null;
pub use null::NullT;
pub use numbers::Integer;
pub use oid::ObjectIdentifier;
pub use oid::ObjectIdentifierT;
pub use octetstring::OctetString;
pub use real::Real;
pub use sequence::Sequence;
pub use utf8string::Utf8String;

pub trait Reader {
    type Error;

    #[inline]
    fn read<T: Readable>(&mut self) -> Result<T, Self::Error>
    where
        Self: Sized,
    {
        T::read(self)
    }

    fn read_sequence<
        C: sequence::Constraint,
        S: Sized,
        F: Fn(&mut Self) -> Result<S, Self::Error>,
    >(
        &mut self,
        f: F,
    ) -> Result<S, Self::Error>;

    fn read_choice<C: choice::Constraint>(&mut self) -> Result<C, Self::Error>;

    fn read_opt<T: ReadableType + TaggedType>(&mut self) -> Result<Option<T::Type>, Self::Error>;

    fn read_explicit<C: common::Constraint, T: ReadableType>(
        &mut self,
    ) -> Result<T::Type, Self::Error>;

    fn read_any(&mut self) -> Result<Vec<u8>, Self::Error>;

    fn read_number<T: numbers::Number, C: numbers::Constraint<T>>(
        &mut self,
    ) -> Result<T, Self::Error>;

    fn read_real<C: real::Constraint>(&mut self) -> Result<f64, Self::Error>;

    fn read_null<C: null::Constraint>(&mut self) -> Result<Null, Self::Error>;

    fn read_object_identifier<C: oid::Constraint>(
        &mut self,
    ) -> Result<ObjectIdentifier, Self::Error>;

    fn read_utf8string<C: utf8string::Constraint>(&mut self) -> Result<String, Self::Error>;

    fn read_ia5string<C: ia5string::Constraint>(&mut self) -> Result<String, Self::Error>;

    fn read_graphic_string<C: graphicstring::Constraint>(
        &mut self,
    ) -> Result<String, Self::Error>;

    fn read_octet_string<C: octetstring::Constraint>(&mut self) -> Result<Vec<u8>, Self::Error>;

    fn read_bit_string<C: bitstring::Constraint>(&mut self) -> Result<(Vec<u8>, u64), Self::Error>;

    fn read_boolean<C: boolean::Constraint>(&mut self) -> Result<bool, Self::Error>;
}

pub trait Readable: Sized {
    fn read<R: Reader>(reader: &mut R) -> Result<Self, R::Error>;
}

pub trait ReadableType {
    type Type: Sized;

    #[inline]
    fn read_ref<R: Reader>(&self, reader: &mut R) -> Result<Self::Type, R::Error> {
        Self::read_value(reader)
    }

    fn read_value<R: Reader>(reader: &mut R) -> Result<Self::Type, R::Error>;
}

impl<T: Readable> ReadableType for T {
    type Type = T;

    #[inline]
    fn read_value<R: Reader>(reader: &mut R) -> Result<T, R::Error> {
        T::read(reader)
    }
}

pub trait Writer {
    type Error;

    #[inline]
    fn write<T: Writable>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        Self: Sized,
    {
        value.write(self)
    }

    fn write_sequence<C: sequence::Constraint, F: Fn(&mut Self) -> Result<(), Self::Error>>(
        &mut self,
        f: F,
    ) -> Result<(), Self::Error>;

    fn write_choice<C: choice::Constraint>(&mut self, choice: &C) -> Result<(), Self::Error>;

    fn write_opt<T: WritableType>(&mut self, value: Option<&T::Type>) -> Result<(), Self::Error>;

    fn write_explicit<C: common::Constraint, T: WritableType>(
        &mut self,
        value: &T::Type,
    ) -> Result<(), Self::Error>;

    fn write_any(&mut self, value: &[u8]) -> Result<(), Self::Error>;

    fn write_number<T: numbers::Number, C: numbers::Constraint<T>>(
        &mut self,
        value: T,
    ) -> Result<(), Self::Error>;

    fn write_real<C: real::Constraint>(&mut self, value: f64) -> Result<(), Self::Error>;

    fn write_null<C: null::Constraint>(&mut self, value: &Null) -> Result<(), Self::Error>;

    fn write_object_identifier<C: oid::Constraint>(
        &mut self,
        value: &ObjectIdentifier,
    ) -> Result<(), Self::Error>;

    fn write_utf8string<C: utf8string::Constraint>(
        &mut self,
        value: &str,
    ) -> Result<(), Self::Error>;

    fn write_ia5string<C: ia5string::Constraint>(
        &mut self,
        value: &str,
    ) -> Result<(), Self::Error>;

    fn write_graphic_string<C: graphicstring::Constraint>(
        &mut self,
        value: &str,
    ) -> Result<(), Self::Error>;

    fn write_octet_string<C: octetstring::Constraint>(
        &mut self,
        value: &[u8],
    ) -> Result<(), Self::Error>;

    fn write_bit_string<C: bitstring::Constraint>(
        &mut self,
        value: &[u8],
        bit_len: u64,
    ) -> Result<(), Self::Error>;

    fn write_boolean<C: boolean::Constraint>(&mut self, value: bool) -> Result<(), Self::Error>;
}

pub trait Writable {
    fn write<W: Writer>(&self, writer: &mut W) -> Result<(), W::Error>;
}

pub trait WritableType {
    type Type;

    #[inline]
    fn write_ref<W: Writer>(&self, writer: &mut W, value: &Self::Type) -> Result<(), W::Error> {
        Self::write_value(writer, value)
    }

    fn write_value<W: Writer>(writer: &mut W, value: &Self::Type) -> Result<(), W::Error>;
}

/// Definitions whose encoding always starts with the same tag. Only those can be OPTIONAL,
/// because the presence is decided by peeking at the next tag.
pub trait TaggedType {
    const TAG: Tag;
}
