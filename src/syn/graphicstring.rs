use crate::model::Tag;
use crate::syn::{ReadableType, Reader, TaggedType, WritableType, Writer};
use core::marker::PhantomData;

/// Also used for the ObjectDescriptor type, which is a GraphicString with the universal tag 7
/// (ITU-T X.680, 48.3)
pub struct GraphicString<C: Constraint = NoConstraint>(PhantomData<C>);

impl<C: Constraint> Default for GraphicString<C> {
    fn default() -> Self {
        GraphicString(Default::default())
    }
}

pub trait Constraint: super::common::Constraint {}

#[derive(Default)]
pub struct NoConstraint;
impl super::common::Constraint for NoConstraint {
    const TAG: Tag = Tag::DEFAULT_GRAPHIC_STRING;
}
impl Constraint for NoConstraint {}

#[derive(Default)]
pub struct ObjectDescriptor;
impl super::common::Constraint for ObjectDescriptor {
    const TAG: Tag = Tag::DEFAULT_OBJECT_DESCRIPTOR;
}
impl Constraint for ObjectDescriptor {}

impl<C: Constraint> TaggedType for GraphicString<C> {
    const TAG: Tag = C::TAG;
}

impl<C: Constraint> WritableType for GraphicString<C> {
    type Type = String;

    #[inline]
    fn write_value<W: Writer>(writer: &mut W, value: &Self::Type) -> Result<(), W::Error> {
        writer.write_graphic_string::<C>(value.as_str())
    }
}

impl<C: Constraint> ReadableType for GraphicString<C> {
    type Type = String;

    #[inline]
    fn read_value<R: Reader>(reader: &mut R) -> Result<Self::Type, <R as Reader>::Error> {
        reader.read_graphic_string::<C>()
    }
}
