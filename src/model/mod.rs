//! The abstract ASN.1 notions the codec needs to know about: tags and the character sets of
//! the restricted string types.

mod charset;
mod tag;

pub use charset::Charset;
pub use tag::Class;
pub use tag::Tag;
