use crate::model::Tag;
use crate::syn::{ReadableType, Reader, TaggedType, WritableType, Writer};
use core::marker::PhantomData;
use std::convert::TryFrom;

pub struct Integer<T: Number = i64, C: Constraint<T> = NoConstraint>(
    PhantomData<T>,
    PhantomData<C>,
);

impl<T: Number, C: Constraint<T>> Default for Integer<T, C> {
    fn default() -> Self {
        Integer(Default::default(), Default::default())
    }
}

/// The native integer types an INTEGER can be decoded into. The conversions fail, if the value
/// is not representable in the target type.
pub trait Number: Copy + core::fmt::Display {
    fn to_i64(self) -> Option<i64>;

    fn from_i64(value: i64) -> Option<Self>;
}

pub trait Constraint<T: Number>: super::common::Constraint {
    const MIN: Option<i64> = None;
    const MAX: Option<i64> = None;
}

#[derive(Default)]
pub struct NoConstraint;
impl super::common::Constraint for NoConstraint {
    const TAG: Tag = Tag::DEFAULT_INTEGER;
}
impl<T: Number> Constraint<T> for NoConstraint {}

impl<T: Number, C: Constraint<T>> TaggedType for Integer<T, C> {
    const TAG: Tag = C::TAG;
}

impl<T: Number, C: Constraint<T>> WritableType for Integer<T, C> {
    type Type = T;

    #[inline]
    fn write_value<W: Writer>(
        writer: &mut W,
        value: &Self::Type,
    ) -> Result<(), <W as Writer>::Error> {
        writer.write_number::<T, C>(*value)
    }
}

impl<T: Number, C: Constraint<T>> ReadableType for Integer<T, C> {
    type Type = T;

    #[inline]
    fn read_value<R: Reader>(reader: &mut R) -> Result<Self::Type, <R as Reader>::Error> {
        reader.read_number::<T, C>()
    }
}

/// Whether the value is within the bounds of the constraint
pub fn is_within<T: Number, C: Constraint<T>>(value: i64) -> bool {
    C::MIN.map_or(true, |min| value >= min) && C::MAX.map_or(true, |max| value <= max)
}

macro_rules! impl_number {
    ( $($T:ident),+ ) => {$(
        impl Number for $T {
            #[inline]
            fn to_i64(self) -> Option<i64> {
                i64::try_from(self).ok()
            }

            #[inline]
            fn from_i64(value: i64) -> Option<Self> {
                $T::try_from(value).ok()
            }
        }
    )*}
}

impl_number!(u8, u16, u32, u64);
impl_number!(i8, i16, i32, i64);
