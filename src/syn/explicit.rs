use crate::model::Tag;
use crate::syn::{ReadableType, Reader, TaggedType, WritableType, Writer};
use core::marker::PhantomData;

/// Explicit tagging: the complete encoding of `T` wrapped in a constructed element with the tag
/// of `C` (ITU-T X.690 | ISO/IEC 8825-1, 8.14)
pub struct Explicit<C: super::common::Constraint, T>(PhantomData<C>, PhantomData<T>);

impl<C: super::common::Constraint, T> Default for Explicit<C, T> {
    fn default() -> Self {
        Explicit(Default::default(), Default::default())
    }
}

impl<C: super::common::Constraint, T> TaggedType for Explicit<C, T> {
    const TAG: Tag = C::TAG;
}

impl<C: super::common::Constraint, T: WritableType> WritableType for Explicit<C, T> {
    type Type = T::Type;

    #[inline]
    fn write_value<W: Writer>(writer: &mut W, value: &Self::Type) -> Result<(), W::Error> {
        writer.write_explicit::<C, T>(value)
    }
}

impl<C: super::common::Constraint, T: ReadableType> ReadableType for Explicit<C, T> {
    type Type = T::Type;

    #[inline]
    fn read_value<R: Reader>(reader: &mut R) -> Result<Self::Type, <R as Reader>::Error> {
        reader.read_explicit::<C, T>()
    }
}
