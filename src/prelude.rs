pub use crate::io::buf::OctetBuffer;
pub use crate::io::cursor::OctetCursor;
pub use crate::io::{Error, ErrorKind};
pub use crate::model::{Charset, Class, Tag};
pub use crate::syn::io::*;
pub use crate::syn::*;
pub use crate::value::{decode_content, decode_value, encode_value, Value, ValueType};
