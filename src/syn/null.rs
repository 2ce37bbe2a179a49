use crate::model::Tag;
use crate::syn::{ReadableType, Reader, TaggedType, WritableType, Writer};
use core::marker::PhantomData;

pub struct NullT<C: Constraint = NoConstraint>(PhantomData<C>);

impl<C: Constraint> Default for NullT<C> {
    fn default() -> Self {
        NullT(Default::default())
    }
}

pub trait Constraint: super::common::Constraint {}

#[derive(Default)]
pub struct NoConstraint;
impl super::common::Constraint for NoConstraint {
    const TAG: Tag = Tag::DEFAULT_NULL;
}
impl Constraint for NoConstraint {}

impl<C: Constraint> TaggedType for NullT<C> {
    const TAG: Tag = C::TAG;
}

impl<C: Constraint> WritableType for NullT<C> {
    type Type = Null;

    #[inline]
    fn write_value<W: Writer>(
        writer: &mut W,
        value: &Self::Type,
    ) -> Result<(), <W as Writer>::Error> {
        writer.write_null::<C>(value)
    }
}

impl<C: Constraint> ReadableType for NullT<C> {
    type Type = Null;

    #[inline]
    fn read_value<R: Reader>(reader: &mut R) -> Result<Self::Type, <R as Reader>::Error> {
        reader.read_null::<C>()
    }
}

#[derive(Default, Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Null;

impl From<()> for Null {
    fn from(_value: ()) -> Self {
        Null
    }
}

impl From<Null> for () {
    fn from(_value: Null) -> Self {}
}
