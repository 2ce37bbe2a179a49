use crate::syn::{ReadableType, Reader, WritableType, Writer};

/// An element of any type, kept as its complete encoding (identifier, length and contents)
#[derive(Default)]
pub struct Any;

impl WritableType for Any {
    type Type = Vec<u8>;

    #[inline]
    fn write_value<W: Writer>(writer: &mut W, value: &Self::Type) -> Result<(), W::Error> {
        writer.write_any(value.as_slice())
    }
}

impl ReadableType for Any {
    type Type = Vec<u8>;

    #[inline]
    fn read_value<R: Reader>(reader: &mut R) -> Result<Self::Type, <R as Reader>::Error> {
        reader.read_any()
    }
}
