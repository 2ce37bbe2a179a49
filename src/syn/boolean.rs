use crate::model::Tag;
use crate::syn::{ReadableType, Reader, TaggedType, WritableType, Writer};
use core::marker::PhantomData;

pub struct Boolean<C: Constraint = NoConstraint>(PhantomData<C>);

impl<C: Constraint> Default for Boolean<C> {
    fn default() -> Self {
        Boolean(Default::default())
    }
}

pub trait Constraint: super::common::Constraint {}

#[derive(Default)]
pub struct NoConstraint;
impl super::common::Constraint for NoConstraint {
    const TAG: Tag = Tag::DEFAULT_BOOLEAN;
}
impl Constraint for NoConstraint {}

impl<C: Constraint> TaggedType for Boolean<C> {
    const TAG: Tag = C::TAG;
}

impl<C: Constraint> WritableType for Boolean<C> {
    type Type = bool;

    #[inline]
    fn write_value<W: Writer>(
        writer: &mut W,
        value: &Self::Type,
    ) -> Result<(), <W as Writer>::Error> {
        writer.write_boolean::<C>(*value)
    }
}

impl<C: Constraint> ReadableType for Boolean<C> {
    type Type = bool;

    #[inline]
    fn read_value<R: Reader>(reader: &mut R) -> Result<Self::Type, <R as Reader>::Error> {
        reader.read_boolean::<C>()
    }
}
