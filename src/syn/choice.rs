use crate::model::Tag;
use crate::syn::{ReadableType, Reader, WritableType, Writer};
use core::marker::PhantomData;

/// A CHOICE is encoded as the chosen alternative itself, so the alternatives must have distinct
/// tags.
pub struct Choice<C: Constraint>(PhantomData<C>);

impl<C: Constraint> Default for Choice<C> {
    fn default() -> Self {
        Self(Default::default())
    }
}

pub trait Constraint: Sized {
    const NAME: &'static str;
    /// The tag of each alternative, indexed by the choice index
    const VARIANT_TAGS: &'static [Tag];

    fn to_choice_index(&self) -> u64;

    fn write_content<W: Writer>(&self, writer: &mut W) -> Result<(), W::Error>;

    fn read_content<R: Reader>(index: u64, reader: &mut R) -> Result<Option<Self>, R::Error>;

    /// The index of the alternative with the given tag
    fn index_of(tag: Tag) -> Option<u64> {
        Self::VARIANT_TAGS
            .iter()
            .position(|t| *t == tag)
            .map(|index| index as u64)
    }
}

impl<C: Constraint> WritableType for Choice<C> {
    type Type = C;

    #[inline]
    fn write_value<W: Writer>(
        writer: &mut W,
        value: &Self::Type,
    ) -> Result<(), <W as Writer>::Error> {
        writer.write_choice(value)
    }
}

impl<C: Constraint> ReadableType for Choice<C> {
    type Type = C;

    #[inline]
    fn read_value<R: Reader>(reader: &mut R) -> Result<Self::Type, <R as Reader>::Error> {
        reader.read_choice::<Self::Type>()
    }
}
