use crate::model::Tag;
use crate::syn::{ReadableType, Reader, TaggedType, WritableType, Writer};
use core::marker::PhantomData;
use std::fmt::{Display, Formatter};

pub struct ObjectIdentifierT<C: Constraint = NoConstraint>(PhantomData<C>);

impl<C: Constraint> Default for ObjectIdentifierT<C> {
    fn default() -> Self {
        ObjectIdentifierT(Default::default())
    }
}

pub trait Constraint: super::common::Constraint {}

#[derive(Default)]
pub struct NoConstraint;
impl super::common::Constraint for NoConstraint {
    const TAG: Tag = Tag::DEFAULT_OBJECT_IDENTIFIER;
}
impl Constraint for NoConstraint {}

impl<C: Constraint> TaggedType for ObjectIdentifierT<C> {
    const TAG: Tag = C::TAG;
}

impl<C: Constraint> WritableType for ObjectIdentifierT<C> {
    type Type = ObjectIdentifier;

    #[inline]
    fn write_value<W: Writer>(
        writer: &mut W,
        value: &Self::Type,
    ) -> Result<(), <W as Writer>::Error> {
        writer.write_object_identifier::<C>(value)
    }
}

impl<C: Constraint> ReadableType for ObjectIdentifierT<C> {
    type Type = ObjectIdentifier;

    #[inline]
    fn read_value<R: Reader>(reader: &mut R) -> Result<Self::Type, <R as Reader>::Error> {
        reader.read_object_identifier::<C>()
    }
}

/// The ordered arcs of an OBJECT IDENTIFIER value. Whether the arcs are encodable (at least two
/// arcs, the first one being 0, 1 or 2) is checked when writing.
///
/// ```rust
/// use asn1ber::syn::ObjectIdentifier;
/// let oid = ObjectIdentifier::from(vec![1, 2, 840, 113549]);
/// assert_eq!("1.2.840.113549", oid.to_string());
/// assert_eq!(Ok(oid), "1.2.840.113549".parse::<ObjectIdentifier>());
/// ```
#[derive(Debug, Default, Clone, PartialOrd, Ord, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectIdentifier(Vec<u64>);

impl ObjectIdentifier {
    pub fn arcs(&self) -> &[u64] {
        &self.0
    }

    pub fn into_arcs(self) -> Vec<u64> {
        self.0
    }
}

impl From<Vec<u64>> for ObjectIdentifier {
    fn from(arcs: Vec<u64>) -> Self {
        ObjectIdentifier(arcs)
    }
}

impl From<&[u64]> for ObjectIdentifier {
    fn from(arcs: &[u64]) -> Self {
        ObjectIdentifier(arcs.to_vec())
    }
}

impl Display for ObjectIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, arc) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", arc)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for ObjectIdentifier {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split('.')
            .map(str::parse::<u64>)
            .collect::<Result<Vec<_>, _>>()
            .map(ObjectIdentifier)
    }
}
