pub mod ber;
pub mod buf;
pub mod cursor;
pub mod err;

pub use err::Error;
pub use err::ErrorKind;
