use crate::model::Tag;

/// Supplies the tag of a type definition. Implementing it with another tag than the universal
/// one of the type is implicit tagging.
pub trait Constraint {
    const TAG: Tag;
}
