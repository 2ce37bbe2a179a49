use crate::model::Tag;
use crate::syn::{ReadableType, Reader, TaggedType, WritableType, Writer};
use core::marker::PhantomData;

pub struct Real<C: Constraint = NoConstraint>(PhantomData<C>);

impl<C: Constraint> Default for Real<C> {
    fn default() -> Self {
        Real(Default::default())
    }
}

pub trait Constraint: super::common::Constraint {}

#[derive(Default)]
pub struct NoConstraint;
impl super::common::Constraint for NoConstraint {
    const TAG: Tag = Tag::DEFAULT_REAL;
}
impl Constraint for NoConstraint {}

impl<C: Constraint> TaggedType for Real<C> {
    const TAG: Tag = C::TAG;
}

impl<C: Constraint> WritableType for Real<C> {
    type Type = f64;

    #[inline]
    fn write_value<W: Writer>(
        writer: &mut W,
        value: &Self::Type,
    ) -> Result<(), <W as Writer>::Error> {
        writer.write_real::<C>(*value)
    }
}

impl<C: Constraint> ReadableType for Real<C> {
    type Type = f64;

    #[inline]
    fn read_value<R: Reader>(reader: &mut R) -> Result<Self::Type, <R as Reader>::Error> {
        reader.read_real::<C>()
    }
}
