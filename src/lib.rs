//! Encoding and decoding of ASN.1 values with the Basic Encoding Rules (ITU-T X.690).
//!
//! Incoming messages are walked with an [`io::cursor::OctetCursor`], which hands out zero-copy
//! views of nested elements. Outgoing messages are written into an [`io::buf::OctetBuffer`],
//! which backpatches the length octets once the contents are known. Typed messages are built
//! from the definitions in [`syn`] and read and written with [`syn::io::BerReader`] and
//! [`syn::io::BerWriter`], untyped values are handled by [`value`].

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(unused_extern_crates)]

#[macro_use]
extern crate log;

#[macro_use]
pub extern crate serde_derive;

pub mod io;
pub mod model;
pub mod prelude;
pub mod syn;
pub mod value;
