use crate::model::{Charset, Tag};
use backtrace::Backtrace;
use std::fmt::{Debug, Display, Formatter};

pub struct Error(pub(crate) Box<Inner>);

impl Error {
    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.0.kind
    }

    #[cold]
    #[inline(never)]
    pub fn truncated() -> Self {
        Self::from(ErrorKind::Truncated)
    }

    #[cold]
    #[inline(never)]
    pub fn framing_violation(type_name: &'static str, constraint: &'static str) -> Self {
        Self::from(ErrorKind::FramingViolation {
            type_name,
            constraint,
        })
    }

    #[cold]
    #[inline(never)]
    pub fn range_violation(reason: impl Into<String>) -> Self {
        Self::from(ErrorKind::RangeViolation(reason.into()))
    }

    #[cold]
    #[inline(never)]
    pub fn tag_mismatch(expected: Tag, got: Tag) -> Self {
        Self::from(ErrorKind::TagMismatch { expected, got })
    }

    #[cold]
    #[inline(never)]
    pub fn unterminated_indefinite() -> Self {
        Self::from(ErrorKind::UnterminatedIndefinite)
    }

    #[cold]
    #[inline(never)]
    pub fn invalid_string(charset: Charset, char: char, index: usize) -> Self {
        Self::from(ErrorKind::InvalidString(charset, char, index))
    }

    #[cold]
    #[inline(never)]
    pub fn invalid_utf8() -> Self {
        Self::from(ErrorKind::InvalidUtf8)
    }

    #[cold]
    #[inline(never)]
    pub fn trailing_data(remaining: usize) -> Self {
        Self::from(ErrorKind::TrailingData(remaining))
    }

    #[cold]
    #[inline(never)]
    pub fn unexpected_choice_tag(name: &'static str, got: Option<Tag>) -> Self {
        Self::from(ErrorKind::UnexpectedChoiceTag { name, got })
    }

    pub fn ensure_string_valid(charset: Charset, str: &str) -> Result<(), Self> {
        match charset.find_invalid(str) {
            None => Ok(()),
            Some((index, char)) => Err(Self::invalid_string(charset, char, index)),
        }
    }
}

impl From<ErrorKind> for Error {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Error(Box::new(Inner::from(kind)))
    }
}

impl Debug for Error {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.0.kind)?;
        let mut backtrace = self.0.backtrace.clone();
        backtrace.resolve();
        writeln!(f, "{backtrace:?}")
    }
}

impl std::error::Error for Error {
    fn description(&self) -> &str {
        "encoding or decoding with basic rules failed"
    }
}

#[derive(Debug)]
pub(crate) struct Inner {
    pub(crate) kind: ErrorKind,
    pub(crate) backtrace: Backtrace,
}

impl From<ErrorKind> for Inner {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            backtrace: Backtrace::new_unresolved(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// The data ended before the current element was complete
    Truncated,
    /// The identifier or length octets are not legal for the type being decoded
    FramingViolation {
        type_name: &'static str,
        constraint: &'static str,
    },
    /// A value does not fit into the representation it is decoded into or encoded from
    RangeViolation(String),
    TagMismatch {
        expected: Tag,
        got: Tag,
    },
    /// No End-of-Contents octets were found for an indefinite length element
    UnterminatedIndefinite,
    InvalidString(Charset, char, usize),
    InvalidUtf8,
    /// The content of a constructed element was not fully consumed
    TrailingData(usize),
    UnexpectedChoiceTag {
        name: &'static str,
        got: Option<Tag>,
    },
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Truncated => write!(
                f,
                "There is insufficient data in the source buffer for this operation"
            ),
            ErrorKind::FramingViolation {
                type_name,
                constraint,
            } => write!(f, "Illegal encoding of {type_name}: {constraint}"),
            ErrorKind::RangeViolation(reason) => write!(f, "Value out of range: {reason}"),
            ErrorKind::TagMismatch { expected, got } => {
                write!(f, "Expected tag {expected:?} but got {got:?}")
            }
            ErrorKind::UnterminatedIndefinite => write!(
                f,
                "Reached the end of data before the End-of-Contents of an indefinite length element"
            ),
            ErrorKind::InvalidString(charset, char, index) => write!(
                f,
                "Invalid character for a string with the charset {charset:?} at index {index}: {char}"
            ),
            ErrorKind::InvalidUtf8 => write!(f, "The content is not valid UTF-8"),
            ErrorKind::TrailingData(remaining) => write!(
                f,
                "Expected the end of the constructed element but {remaining} byte(s) remain"
            ),
            ErrorKind::UnexpectedChoiceTag { name, got } => {
                write!(f, "No alternative of {name} matches the tag {got:?}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_constraint() {
        let error = Error::framing_violation("BOOLEAN", "length must be 1");
        let text = error.kind().to_string();
        assert!(text.contains("BOOLEAN"));
        assert!(text.contains("length must be 1"));
    }

    #[test]
    fn test_kind_is_preserved() {
        let error = Error::tag_mismatch(Tag::DEFAULT_INTEGER, Tag::DEFAULT_BOOLEAN);
        assert_eq!(
            &ErrorKind::TagMismatch {
                expected: Tag::DEFAULT_INTEGER,
                got: Tag::DEFAULT_BOOLEAN
            },
            error.kind()
        );
    }
}
