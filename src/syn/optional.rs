//! OPTIONAL components. An absent value is not encoded at all, so when reading, the value is
//! present only if the next element carries the tag of `T`.

use crate::syn::{ReadableType, Reader, TaggedType, WritableType, Writer};

impl<T: WritableType> WritableType for Option<T> {
    type Type = Option<T::Type>;

    fn write_value<W: Writer>(
        writer: &mut W,
        value: &Self::Type,
    ) -> Result<(), <W as Writer>::Error> {
        writer.write_opt::<T>(value.as_ref())
    }
}

impl<T: ReadableType + TaggedType> ReadableType for Option<T> {
    type Type = Option<T::Type>;

    fn read_value<R: Reader>(reader: &mut R) -> Result<Self::Type, <R as Reader>::Error> {
        reader.read_opt::<T>()
    }
}

#[cfg(test)]
mod tests {
    use crate::syn::io::{BerReader, BerWriter};
    use crate::syn::{Boolean, Integer, ReadableType, WritableType};

    #[test]
    fn test_absent_value_writes_nothing() {
        let mut writer = BerWriter::default();
        Option::<Boolean>::write_value(&mut writer, &None).unwrap();
        assert!(writer.byte_content().is_empty());
        Option::<Boolean>::write_value(&mut writer, &Some(false)).unwrap();
        assert_eq!(&[0x01, 0x01, 0x00], writer.byte_content());
    }

    #[test]
    fn test_other_tag_leaves_element_unread() {
        let data = [0x02, 0x01, 0x05];
        let mut reader = BerReader::new(&data[..]);
        assert_eq!(None, Option::<Boolean>::read_value(&mut reader).unwrap());
        assert_eq!(3, reader.bytes_remaining());
        assert_eq!(
            Some(5),
            Option::<Integer<i64>>::read_value(&mut reader).unwrap()
        );
        assert!(reader.is_empty());
    }
}
