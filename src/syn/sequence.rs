use crate::model::Tag;
use crate::syn::{ReadableType, Reader, TaggedType, WritableType, Writer};
use core::marker::PhantomData;

pub struct Sequence<T: Constraint>(PhantomData<T>);

impl<T: Constraint> Default for Sequence<T> {
    fn default() -> Self {
        Self(Default::default())
    }
}

/// Implemented by the message type itself. The tag is usually [`Tag::DEFAULT_SEQUENCE`].
pub trait Constraint: super::common::Constraint {
    const NAME: &'static str;

    fn read_seq<R: Reader>(reader: &mut R) -> Result<Self, R::Error>
    where
        Self: Sized;

    fn write_seq<W: Writer>(&self, writer: &mut W) -> Result<(), W::Error>;
}

impl<C: Constraint> TaggedType for Sequence<C> {
    const TAG: Tag = C::TAG;
}

impl<C: Constraint> WritableType for Sequence<C> {
    type Type = C;

    #[inline]
    fn write_value<W: Writer>(
        writer: &mut W,
        value: &Self::Type,
    ) -> Result<(), <W as Writer>::Error> {
        writer.write_sequence::<C, _>(|w| value.write_seq::<W>(w))
    }
}

impl<C: Constraint> ReadableType for Sequence<C>
where
    C: Sized,
{
    type Type = C;

    #[inline]
    fn read_value<R: Reader>(reader: &mut R) -> Result<Self::Type, <R as Reader>::Error> {
        reader.read_sequence::<C, Self::Type, _>(C::read_seq)
    }
}
